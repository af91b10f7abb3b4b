use crate::frame::Frame;
use crate::page_table::Pte;
use crate::process::Process;
use crate::typedef::{FrameId, Pid, Tick, VPage};

/// The view of the frame table a replacement policy gets while it picks a victim.
///
/// A policy may read and clear the reference bits of the pages it scans, and update the aging
/// and recency state of frames. It cannot change which page a frame holds; only the simulator
/// maps and unmaps.
pub struct PagerContext<'a> {
    frames: &'a mut [Frame],
    processes: &'a mut [Process],
    now: Tick,
}

impl<'a> PagerContext<'a> {
    pub(crate) fn new(frames: &'a mut [Frame], processes: &'a mut [Process], now: Tick) -> Self {
        Self {
            frames,
            processes,
            now,
        }
    }

    /// Returns the number of frames in the pool.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns the current instruction count.
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn owner(&self, frame: FrameId) -> Option<(Pid, VPage)> {
        self.frames[frame].owner()
    }

    fn pte(&self, frame: FrameId) -> Option<&Pte> {
        let (pid, vpage) = self.frames[frame].owner()?;
        self.processes[pid].page_table().entry(vpage).ok()
    }

    /// Returns the reference bit of the page held by `frame`; false for a free frame.
    pub fn referenced(&self, frame: FrameId) -> bool {
        self.pte(frame).is_some_and(Pte::referenced)
    }

    /// Returns the modified bit of the page held by `frame`; false for a free frame.
    pub fn modified(&self, frame: FrameId) -> bool {
        self.pte(frame).is_some_and(Pte::modified)
    }

    /// Clears the reference bit of the page held by `frame`.
    pub fn clear_referenced(&mut self, frame: FrameId) {
        if let Some((pid, vpage)) = self.frames[frame].owner() {
            if let Ok(pte) = self.processes[pid].page_table_mut().entry_mut(vpage) {
                pte.set_referenced(false);
            }
        }
    }

    pub fn age(&self, frame: FrameId) -> u32 {
        self.frames[frame].age()
    }

    pub fn set_age(&mut self, frame: FrameId, age: u32) {
        self.frames[frame].set_age(age);
    }

    pub fn last_use_time(&self, frame: FrameId) -> Tick {
        self.frames[frame].last_use_time()
    }

    pub fn set_last_use_time(&mut self, frame: FrameId, time: Tick) {
        self.frames[frame].set_last_use_time(time);
    }
}
