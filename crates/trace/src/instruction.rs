use mmusim_error::{errdata, Result};

/// The four commands a trace can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Make the process named by the operand the current one.
    ContextSwitch,
    /// Read the virtual page named by the operand.
    Read,
    /// Write the virtual page named by the operand.
    Write,
    /// Tear down the current process. The operand is ignored.
    Exit,
}

impl Command {
    /// The single-character mnemonic used in trace files.
    pub fn as_char(&self) -> char {
        match self {
            Command::ContextSwitch => 'c',
            Command::Read => 'r',
            Command::Write => 'w',
            Command::Exit => 'e',
        }
    }
}

impl TryFrom<char> for Command {
    type Error = mmusim_error::Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'c' => Ok(Command::ContextSwitch),
            'r' => Ok(Command::Read),
            'w' => Ok(Command::Write),
            'e' => Ok(Command::Exit),
            other => errdata!("unknown instruction command '{}'", other),
        }
    }
}

/// One `(command, operand)` pair of the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    command: Command,
    operand: usize,
}

impl Instruction {
    pub fn new(command: Command, operand: usize) -> Self {
        Self { command, operand }
    }

    pub fn context_switch(pid: usize) -> Self {
        Self::new(Command::ContextSwitch, pid)
    }

    pub fn read(vpage: usize) -> Self {
        Self::new(Command::Read, vpage)
    }

    pub fn write(vpage: usize) -> Self {
        Self::new(Command::Write, vpage)
    }

    pub fn exit() -> Self {
        Self::new(Command::Exit, 0)
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// The pid for a context switch, the virtual page for a read or write.
    pub fn operand(&self) -> usize {
        self.operand
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.command.as_char(), self.operand)
    }
}
