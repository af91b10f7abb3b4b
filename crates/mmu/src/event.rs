use crate::typedef::{FrameId, Pid, VPage};
use core::fmt;

/// Something observable the simulator did while executing one instruction. An instruction's
/// events are reported in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The current process exited.
    Exit(Pid),
    /// A page was unmapped from its frame, on eviction or on exit.
    Unmap { pid: Pid, vpage: VPage },
    /// A dirty anonymous page was written to swap.
    Out,
    /// A dirty file-backed page was written back to its file.
    FileOut,
    /// A page was restored from swap.
    In,
    /// A file-backed page was read from its file.
    FileIn,
    /// A fresh anonymous page was zero-filled.
    Zero,
    /// The faulting page was mapped into the given frame.
    Map(FrameId),
    /// The access fell outside every VMA of the current process.
    Segv,
    /// A write hit a write-protected page.
    Segprot,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Exit(pid) => write!(f, "EXIT current process {}", pid),
            Event::Unmap { pid, vpage } => write!(f, " UNMAP {}:{}", pid, vpage),
            Event::Out => write!(f, " OUT"),
            Event::FileOut => write!(f, " FOUT"),
            Event::In => write!(f, " IN"),
            Event::FileIn => write!(f, " FIN"),
            Event::Zero => write!(f, " ZERO"),
            Event::Map(frame) => write!(f, " MAP {}", frame),
            Event::Segv => write!(f, " SEGV"),
            Event::Segprot => write!(f, " SEGPROT"),
        }
    }
}
