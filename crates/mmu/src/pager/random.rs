use super::context::PagerContext;
use super::pager::EvictionPolicy;
use crate::typedef::FrameId;
use crate::Result;
use log::trace;
use mmusim_trace::random::RandomSource;

/// Evicts the frame at a random index drawn from the pre-generated random numbers.
#[derive(Debug)]
pub struct RandomPager {
    random: RandomSource,
}

impl RandomPager {
    pub fn new(random: RandomSource) -> Self {
        Self { random }
    }

    /// Returns the number of random values consumed so far.
    pub fn draws(&self) -> usize {
        self.random.consumed()
    }
}

impl EvictionPolicy for RandomPager {
    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        let frame = self.random.next(ctx.frame_count())?;
        trace!("random: draw {} picks frame {}", self.random.consumed(), frame);
        Ok(frame)
    }
}
