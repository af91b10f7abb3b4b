use super::context::PagerContext;
use super::pager::EvictionPolicy;
use crate::typedef::FrameId;
use crate::Result;
use log::trace;

/// Second chance: a hand sweeps the frames circularly, clearing reference bits, and stops at the
/// first frame whose page has not been referenced since the hand last passed it.
#[derive(Debug, Default)]
pub struct ClockPager {
    hand: FrameId,
}

impl ClockPager {
    pub fn new() -> Self {
        Self { hand: 0 }
    }

    pub fn hand(&self) -> FrameId {
        self.hand
    }
}

impl EvictionPolicy for ClockPager {
    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        let n = ctx.frame_count();
        // At most one full sweep clears every bit, so the second sweep always finds a victim.
        loop {
            let frame = self.hand;
            self.hand = (self.hand + 1) % n;
            if ctx.referenced(frame) {
                ctx.clear_referenced(frame);
            } else {
                trace!("clock: victim frame {}", frame);
                return Ok(frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::fixture::Fixture;

    #[test]
    fn test_clock_gives_second_chance() {
        let mut fixture = Fixture::new(4);
        fixture.set_referenced(0, true);
        fixture.set_referenced(1, true);
        let mut clock = ClockPager::new();

        assert_eq!(clock.select_victim(&mut fixture.context(1)).unwrap(), 2);
        assert_eq!(clock.hand(), 3);
        assert!(!fixture.referenced(0));
        assert!(!fixture.referenced(1));

        fixture.set_referenced(3, true);
        assert_eq!(clock.select_victim(&mut fixture.context(2)).unwrap(), 0);
        assert!(!fixture.referenced(3));
        assert_eq!(clock.hand(), 1);
    }

    #[test]
    fn test_clock_full_sweep_clears_every_bit() {
        let mut fixture = Fixture::new(5);
        for frame in 0..5 {
            fixture.set_referenced(frame, true);
        }
        let mut clock = ClockPager::new();

        // Every page was referenced: the hand wraps once and takes the frame it started at.
        assert_eq!(clock.select_victim(&mut fixture.context(1)).unwrap(), 0);
        assert_eq!(clock.hand(), 1);
        assert!((0..5).all(|frame| !fixture.referenced(frame)));
    }

    #[test]
    fn test_clock_ignores_modified_bit() {
        let mut fixture = Fixture::new(2);
        fixture.set_modified(0, true);
        let mut clock = ClockPager::new();
        assert_eq!(clock.select_victim(&mut fixture.context(1)).unwrap(), 0);
        assert!(fixture.modified(0));
    }
}
