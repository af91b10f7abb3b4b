use super::context::PagerContext;
use super::pager::EvictionPolicy;
use crate::typedef::{FrameId, Tick};
use crate::Result;
use log::trace;
use mmusim_error::errdata;

/// Not Recently Used.
///
/// Pages fall into four classes by their `(referenced, modified)` bits:
///
/// | class | referenced | modified |
/// |-------|------------|----------|
/// | 0     | 0          | 0        |
/// | 1     | 0          | 1        |
/// | 2     | 1          | 0        |
/// | 3     | 1          | 1        |
///
/// Scanning from the hand, the victim is the first frame found in the lowest non-empty class.
/// Once at least `reset_interval` instructions have passed since the last reset, the next
/// selection scans every frame and clears all reference bits as it goes (after classifying each
/// frame).
#[derive(Debug)]
pub struct NruPager {
    hand: FrameId,
    reset_interval: Tick,
    last_reset: Tick,
}

impl NruPager {
    pub fn new(reset_interval: Tick) -> Self {
        Self {
            hand: 0,
            reset_interval,
            last_reset: 0,
        }
    }

    pub fn hand(&self) -> FrameId {
        self.hand
    }

    /// Instruction count at which reference bits were last cleared.
    pub fn last_reset(&self) -> Tick {
        self.last_reset
    }
}

impl EvictionPolicy for NruPager {
    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        let n = ctx.frame_count();
        let now = ctx.now();
        let reset = now.saturating_sub(self.last_reset) >= self.reset_interval;
        if reset {
            self.last_reset = now;
        }

        let mut best: Option<(u8, FrameId)> = None;
        for i in 0..n {
            let frame = (self.hand + i) % n;
            let class = 2 * u8::from(ctx.referenced(frame)) + u8::from(ctx.modified(frame));
            if best.map_or(true, |(lowest, _)| class < lowest) {
                best = Some((class, frame));
            }
            if reset {
                ctx.clear_referenced(frame);
            } else if class == 0 {
                // Nothing can beat class 0, and without a reset the rest of the scan is moot.
                break;
            }
        }

        let Some((class, victim)) = best else {
            return errdata!("nru pager has no frame to evict");
        };
        self.hand = (victim + 1) % n;
        trace!("nru: victim frame {} (class {}, reset {})", victim, class, reset);
        Ok(victim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::fixture::Fixture;

    /// Sets frame `i` to class `classes[i]`.
    fn with_classes(classes: &[u8]) -> Fixture {
        let mut fixture = Fixture::new(classes.len());
        for (frame, &class) in classes.iter().enumerate() {
            fixture.set_referenced(frame, class & 2 != 0);
            fixture.set_modified(frame, class & 1 != 0);
        }
        fixture
    }

    #[test]
    fn test_nru_picks_lowest_class() {
        let mut fixture = with_classes(&[3, 2, 1, 3]);
        let mut nru = NruPager::new(1000);
        assert_eq!(nru.select_victim(&mut fixture.context(1)).unwrap(), 2);
        assert_eq!(nru.hand(), 3);
        // No reset: reference bits are untouched.
        assert!(fixture.referenced(0));
        assert!(fixture.referenced(1));
    }

    #[test]
    fn test_nru_breaks_ties_in_scan_order_from_hand() {
        let mut fixture = with_classes(&[0, 2, 0, 2, 0]);
        let mut nru = NruPager::new(1000);
        assert_eq!(nru.select_victim(&mut fixture.context(1)).unwrap(), 0);
        assert_eq!(nru.select_victim(&mut fixture.context(2)).unwrap(), 2);
        assert_eq!(nru.select_victim(&mut fixture.context(3)).unwrap(), 4);
        // The hand wrapped: frame 0 is class 0 again.
        assert_eq!(nru.select_victim(&mut fixture.context(4)).unwrap(), 0);
    }

    #[test]
    fn test_nru_reset_clears_every_reference_bit() {
        let mut fixture = with_classes(&[3, 2, 1, 2]);
        let mut nru = NruPager::new(10);

        // Too early for a reset.
        assert_eq!(nru.select_victim(&mut fixture.context(9)).unwrap(), 2);
        assert!(fixture.referenced(0));
        assert_eq!(nru.last_reset(), 0);

        // The reset scan still classifies with the bits as they were before clearing.
        assert_eq!(nru.select_victim(&mut fixture.context(10)).unwrap(), 2);
        assert_eq!(nru.last_reset(), 10);
        assert!((0..4).all(|frame| !fixture.referenced(frame)));
        assert!(fixture.modified(0));
        assert!(fixture.modified(2));

        // With the bits cleared, frame 3 (now class 0) is first from the hand.
        assert_eq!(nru.select_victim(&mut fixture.context(11)).unwrap(), 3);
        assert_eq!(nru.last_reset(), 10);
    }

    #[test]
    fn test_nru_reset_scan_visits_past_class_zero() {
        let mut fixture = with_classes(&[0, 2, 2]);
        let mut nru = NruPager::new(5);
        assert_eq!(nru.select_victim(&mut fixture.context(5)).unwrap(), 0);
        assert!(!fixture.referenced(1));
        assert!(!fixture.referenced(2));
    }
}
