/// Identifies a process. Processes are numbered in the order they appear in the trace file.
pub type Pid = usize;

/// A virtual page number inside a process address space.
pub type VPage = usize;
