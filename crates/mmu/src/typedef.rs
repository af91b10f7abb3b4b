pub use mmusim_trace::types::{Pid, VPage};

/// Index of a physical frame in the frame table.
pub type FrameId = usize;

/// Simulated time, counted in executed instructions.
pub type Tick = u64;
