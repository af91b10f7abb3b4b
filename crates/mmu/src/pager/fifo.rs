use super::context::PagerContext;
use super::pager::EvictionPolicy;
use crate::typedef::FrameId;
use crate::Result;
use log::trace;
use mmusim_error::errdata;
use std::collections::VecDeque;

/// Evicts the frame that has held its current page the longest.
#[derive(Debug, Default)]
pub struct FifoPager {
    queue: VecDeque<FrameId>, // Mapped frames in allocation order
}

impl FifoPager {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl EvictionPolicy for FifoPager {
    fn record_map(&mut self, frame: FrameId) {
        self.queue.push_back(frame);
    }

    fn release(&mut self, frame: FrameId) {
        self.queue.retain(|&f| f != frame);
    }

    fn select_victim(&mut self, _ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        match self.queue.pop_front() {
            Some(frame) => {
                trace!("fifo: victim frame {}", frame);
                Ok(frame)
            }
            None => errdata!("fifo pager has no mapped frame to evict"),
        }
    }
}
