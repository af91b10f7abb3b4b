use crate::frame::Frame;
use crate::typedef::{FrameId, Pid, Tick, VPage};
use std::collections::VecDeque;

/// The fixed pool of physical frames together with the list of free ones.
///
/// Frames are handed out from the front of the free list and returned to its back, so frames
/// released by an exiting process are reused in the order they were released. The free list
/// always holds exactly the unmapped frames.
#[derive(Debug)]
pub struct FrameTable {
    frames: Vec<Frame>,          // Storage for all frames
    free_list: VecDeque<FrameId>, // Unmapped frames, in reuse order
}

impl FrameTable {
    /// Creates `size` unmapped frames, all on the free list in index order.
    pub fn new(size: usize) -> Self {
        Self {
            frames: (0..size).map(Frame::new).collect(),
            free_list: (0..size).collect(),
        }
    }

    /// Returns the total number of frames.
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Returns the number of frames on the free list.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Returns the number of frames currently holding a page.
    pub fn mapped_count(&self) -> usize {
        self.capacity() - self.free_count()
    }

    pub fn frame(&self, frame_id: FrameId) -> Option<&Frame> {
        self.frames.get(frame_id)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the free list, front first.
    pub fn free_list(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.free_list.iter().copied()
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Takes the next frame off the free list, if there is one.
    pub(crate) fn pop_free(&mut self) -> Option<FrameId> {
        self.free_list.pop_front()
    }

    /// Binds `frame_id` to `(pid, vpage)`. The frame must not be on the free list.
    pub(crate) fn map(&mut self, frame_id: FrameId, pid: Pid, vpage: VPage, now: Tick) {
        debug_assert!(!self.free_list.contains(&frame_id));
        self.frames[frame_id].map(pid, vpage, now);
    }

    /// Detaches a victim frame from its page without freeing it; it is remapped right away.
    pub(crate) fn unmap(&mut self, frame_id: FrameId) {
        self.frames[frame_id].unmap();
    }

    /// Detaches `frame_id` from its page and appends it to the free list.
    pub(crate) fn release(&mut self, frame_id: FrameId) {
        self.frames[frame_id].unmap();
        self.free_list.push_back(frame_id);
    }
}
