use super::context::PagerContext;
use super::pager::EvictionPolicy;
use crate::typedef::{FrameId, Tick};
use crate::Result;
use log::trace;
use mmusim_error::errdata;

/// Working set: pages used within the last `tau` instructions are protected.
///
/// Scanning from the hand, a referenced page has its bit cleared and its last-use time set to
/// now. An unreferenced page idle for more than `tau` instructions is evicted on the spot. If a
/// full sweep finds no such page, the frame with the oldest last-use time is evicted instead.
#[derive(Debug)]
pub struct WorkingSetPager {
    hand: FrameId,
    tau: Tick,
}

impl WorkingSetPager {
    pub fn new(tau: Tick) -> Self {
        Self { hand: 0, tau }
    }

    pub fn hand(&self) -> FrameId {
        self.hand
    }

    pub fn tau(&self) -> Tick {
        self.tau
    }
}

impl EvictionPolicy for WorkingSetPager {
    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        let n = ctx.frame_count();
        let now = ctx.now();
        let mut expired = None;
        let mut oldest: Option<(Tick, FrameId)> = None;

        for i in 0..n {
            let frame = (self.hand + i) % n;
            if ctx.referenced(frame) {
                ctx.clear_referenced(frame);
                ctx.set_last_use_time(frame, now);
            } else if now.saturating_sub(ctx.last_use_time(frame)) > self.tau {
                expired = Some(frame);
                break;
            }
            let last_use = ctx.last_use_time(frame);
            if oldest.map_or(true, |(time, _)| last_use < time) {
                oldest = Some((last_use, frame));
            }
        }

        let victim = match (expired, oldest) {
            (Some(frame), _) => frame,
            (None, Some((_, frame))) => frame,
            (None, None) => return errdata!("working-set pager has no frame to evict"),
        };
        self.hand = (victim + 1) % n;
        trace!(
            "working-set: victim frame {} ({})",
            victim,
            if expired.is_some() { "expired" } else { "oldest" }
        );
        Ok(victim)
    }
}
