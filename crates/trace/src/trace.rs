use crate::instruction::{Command, Instruction};
use crate::types::{Pid, VPage};
use crate::vma::Vma;
use crate::Result;
use log::debug;
use mmusim_error::{errdata, Error};
use std::path::Path;
use std::str::FromStr;

/// The static description of one process: its pid and its ordered list of VMAs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pid: Pid,
    vmas: Vec<Vma>,
}

impl ProcessSpec {
    pub fn new(pid: Pid, vmas: Vec<Vma>) -> Self {
        Self { pid, vmas }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn vmas(&self) -> &[Vma] {
        &self.vmas
    }
}

/// A parsed trace file: the processes and the instruction stream that drives them.
///
/// The format is line oriented; lines starting with `#` are comments and blank lines are
/// ignored wherever they appear:
///
/// ```text
/// # process count
/// 1
/// # VMA count, then `start_vpage end_vpage write_protected file_mapped` per VMA
/// 2
/// 0 31 0 0
/// 32 63 1 1
/// # instructions
/// c 0
/// r 3
/// w 40
/// e 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    processes: Vec<ProcessSpec>,
    instructions: Vec<Instruction>,
}

impl Trace {
    pub fn new(processes: Vec<ProcessSpec>, instructions: Vec<Instruction>) -> Self {
        Self {
            processes,
            instructions,
        }
    }

    /// Loads and parses a trace file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IO(format!("Unable to read trace file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses the contents of a trace file.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (line_no, line) = lines
            .next()
            .ok_or_else(|| Error::InvalidData("trace file has no process count".to_string()))?;
        let process_count: usize = parse_field(line, line_no, "process count")?;

        // Counts come from the file, so they do not size allocations.
        let mut processes = Vec::new();
        for pid in 0..process_count {
            let (line_no, line) = lines.next().ok_or_else(|| {
                Error::InvalidData(format!("missing VMA count for process {}", pid))
            })?;
            let vma_count: usize = parse_field(line, line_no, "VMA count")?;

            let mut vmas = Vec::new();
            for i in 0..vma_count {
                let (line_no, line) = lines.next().ok_or_else(|| {
                    Error::InvalidData(format!(
                        "process {} declares {} VMAs but only {} are present",
                        pid, vma_count, i
                    ))
                })?;
                vmas.push(parse_vma(line, line_no)?);
            }
            processes.push(ProcessSpec::new(pid, vmas));
        }

        let instructions = lines
            .map(|(line_no, line)| parse_instruction(line, line_no))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "parsed trace: {} processes, {} instructions",
            processes.len(),
            instructions.len()
        );
        Ok(Self::new(processes, instructions))
    }

    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Splits the trace into its processes and instructions.
    pub fn into_parts(self) -> (Vec<ProcessSpec>, Vec<Instruction>) {
        (self.processes, self.instructions)
    }
}

fn parse_field<T: FromStr>(token: &str, line_no: usize, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::InvalidData(format!("line {}: invalid {} '{}'", line_no, what, token)))
}

fn parse_flag(token: &str, line_no: usize, what: &str) -> Result<bool> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => errdata!("line {}: {} must be 0 or 1, got '{}'", line_no, what, token),
    }
}

fn parse_vma(line: &str, line_no: usize) -> Result<Vma> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 4 {
        return errdata!(
            "line {}: expected 4 VMA fields, found {}",
            line_no,
            tokens.len()
        );
    }
    let start: VPage = parse_field(tokens[0], line_no, "start vpage")?;
    let end: VPage = parse_field(tokens[1], line_no, "end vpage")?;
    if start > end {
        return errdata!("line {}: VMA start {} is past its end {}", line_no, start, end);
    }
    let write_protected = parse_flag(tokens[2], line_no, "write_protected")?;
    let file_mapped = parse_flag(tokens[3], line_no, "file_mapped")?;
    Ok(Vma::new(start, end, write_protected, file_mapped))
}

fn parse_instruction(line: &str, line_no: usize) -> Result<Instruction> {
    let mut tokens = line.split_whitespace();
    let mnemonic = tokens.next().unwrap_or_default();
    let mut chars = mnemonic.chars();
    let command = match (chars.next(), chars.next()) {
        (Some(c), None) => Command::try_from(c).ok(),
        _ => None,
    }
    .ok_or_else(|| {
        Error::InvalidData(format!("line {}: unknown instruction '{}'", line_no, mnemonic))
    })?;

    let operand = match (tokens.next(), command) {
        (Some(token), _) => parse_field(token, line_no, "operand")?,
        (None, Command::Exit) => 0,
        (None, _) => return errdata!("line {}: '{}' needs an operand", line_no, mnemonic),
    };
    if let Some(extra) = tokens.next() {
        return errdata!("line {}: unexpected token '{}'", line_no, extra);
    }
    Ok(Instruction::new(command, operand))
}
