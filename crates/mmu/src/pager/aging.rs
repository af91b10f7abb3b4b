use super::context::PagerContext;
use super::pager::EvictionPolicy;
use crate::typedef::FrameId;
use crate::Result;
use log::trace;
use mmusim_error::errdata;

const REFERENCED_BIT: u32 = 0x8000_0000;

/// Aging: every selection shifts each frame's 32-bit age register right by one and moves the
/// page's reference bit into the top bit, then evicts the frame with the smallest age.
#[derive(Debug, Default)]
pub struct AgingPager {
    hand: FrameId,
}

impl AgingPager {
    pub fn new() -> Self {
        Self { hand: 0 }
    }

    pub fn hand(&self) -> FrameId {
        self.hand
    }
}

impl EvictionPolicy for AgingPager {
    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        let n = ctx.frame_count();
        let mut youngest: Option<(u32, FrameId)> = None;
        for i in 0..n {
            let frame = (self.hand + i) % n;
            let mut age = ctx.age(frame) >> 1;
            if ctx.referenced(frame) {
                age |= REFERENCED_BIT;
                ctx.clear_referenced(frame);
            }
            ctx.set_age(frame, age);
            // Strict comparison: the earliest frame from the hand wins ties.
            if youngest.map_or(true, |(lowest, _)| age < lowest) {
                youngest = Some((age, frame));
            }
        }

        let Some((age, victim)) = youngest else {
            return errdata!("aging pager has no frame to evict");
        };
        self.hand = (victim + 1) % n;
        trace!("aging: victim frame {} (age {:#010x})", victim, age);
        Ok(victim)
    }
}
