use crate::typedef::{FrameId, Pid, Tick, VPage};
use core::fmt;

/// A physical page slot with its owner and the per-frame state the replacement policies keep.
#[derive(Clone)]
pub struct Frame {
    index: FrameId,                // Fixed position in the frame table
    owner: Option<(Pid, VPage)>,   // The page mapped here, `None` while free
    age: u32,                      // Aging shift register
    last_use_time: Tick,           // Instruction count of the last recorded use
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index)
            .field("owner", &self.owner)
            .field("age", &format_args!("{:#010x}", self.age))
            .field("last_use_time", &self.last_use_time)
            .finish()
    }
}

impl Frame {
    /// Creates a new, unmapped frame.
    pub(crate) fn new(index: FrameId) -> Self {
        Self {
            index,
            owner: None,
            age: 0,
            last_use_time: 0,
        }
    }

    /// Returns the frame's position in the frame table.
    pub fn index(&self) -> FrameId {
        self.index
    }

    /// Returns the `(pid, vpage)` mapped into this frame, if any.
    pub fn owner(&self) -> Option<(Pid, VPage)> {
        self.owner
    }

    /// Checks if a page is mapped into this frame.
    pub fn is_mapped(&self) -> bool {
        self.owner.is_some()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn last_use_time(&self) -> Tick {
        self.last_use_time
    }

    /// Binds the frame to a page, restarting its aging and recency state at `now`.
    pub(crate) fn map(&mut self, pid: Pid, vpage: VPage, now: Tick) {
        self.owner = Some((pid, vpage));
        self.age = 0;
        self.last_use_time = now;
    }

    /// Detaches the frame from its page. Policy state is left for the next `map` to reset.
    pub(crate) fn unmap(&mut self) {
        self.owner = None;
    }

    pub(crate) fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub(crate) fn set_last_use_time(&mut self, time: Tick) {
        self.last_use_time = time;
    }
}
