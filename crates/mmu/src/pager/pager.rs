use std::fmt::Debug;

use super::aging::AgingPager;
use super::clock::ClockPager;
use super::context::PagerContext;
use super::fifo::FifoPager;
use super::nru::NruPager;
use super::random::RandomPager;
use super::working_set::WorkingSetPager;
use crate::config::{PolicyKind, SimConfig};
use crate::typedef::FrameId;
use crate::Result;
use mmusim_error::Error;
use mmusim_trace::random::RandomSource;

pub trait EvictionPolicy: Debug {
    /// Records that `frame` was just bound to a page, whether it came from the free list or
    /// from an eviction.
    fn record_map(&mut self, _frame: FrameId) {}

    /// Records that `frame` was returned to the free list by an exiting process.
    fn release(&mut self, _frame: FrameId) {}

    /// Selects the frame to evict. Only called when every frame is mapped.
    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId>;
}

/// The replacement policy of a run, chosen once before it starts.
#[derive(Debug)]
pub enum Pager {
    Fifo(FifoPager),
    Random(RandomPager),
    Clock(ClockPager),
    Nru(NruPager),
    Aging(AgingPager),
    WorkingSet(WorkingSetPager),
}

impl Pager {
    /// Builds the policy selected by `config`. Only the random policy consumes `random`.
    pub fn from_config(config: &SimConfig, random: RandomSource) -> Result<Self> {
        config.validate()?;
        let missing = |what: &str| Error::Config(format!("the {} policy needs a {}", config.policy, what));
        let pager = match config.policy {
            PolicyKind::Fifo => Pager::Fifo(FifoPager::new()),
            PolicyKind::Random => Pager::Random(RandomPager::new(random)),
            PolicyKind::Clock => Pager::Clock(ClockPager::new()),
            PolicyKind::Nru => Pager::Nru(NruPager::new(
                config
                    .nru_reset_interval
                    .ok_or_else(|| missing("reset interval"))?,
            )),
            PolicyKind::Aging => Pager::Aging(AgingPager::new()),
            PolicyKind::WorkingSet => Pager::WorkingSet(WorkingSetPager::new(
                config.tau.ok_or_else(|| missing("tau"))?,
            )),
        };
        Ok(pager)
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Pager::Fifo(_) => PolicyKind::Fifo,
            Pager::Random(_) => PolicyKind::Random,
            Pager::Clock(_) => PolicyKind::Clock,
            Pager::Nru(_) => PolicyKind::Nru,
            Pager::Aging(_) => PolicyKind::Aging,
            Pager::WorkingSet(_) => PolicyKind::WorkingSet,
        }
    }

    fn policy_mut(&mut self) -> &mut dyn EvictionPolicy {
        match self {
            Pager::Fifo(p) => p,
            Pager::Random(p) => p,
            Pager::Clock(p) => p,
            Pager::Nru(p) => p,
            Pager::Aging(p) => p,
            Pager::WorkingSet(p) => p,
        }
    }
}

impl EvictionPolicy for Pager {
    fn record_map(&mut self, frame: FrameId) {
        self.policy_mut().record_map(frame);
    }

    fn release(&mut self, frame: FrameId) {
        self.policy_mut().release(frame);
    }

    fn select_victim(&mut self, ctx: &mut PagerContext<'_>) -> Result<FrameId> {
        self.policy_mut().select_victim(ctx)
    }
}

impl From<FifoPager> for Pager {
    fn from(pager: FifoPager) -> Self {
        Pager::Fifo(pager)
    }
}

impl From<RandomPager> for Pager {
    fn from(pager: RandomPager) -> Self {
        Pager::Random(pager)
    }
}

impl From<ClockPager> for Pager {
    fn from(pager: ClockPager) -> Self {
        Pager::Clock(pager)
    }
}

impl From<NruPager> for Pager {
    fn from(pager: NruPager) -> Self {
        Pager::Nru(pager)
    }
}

impl From<AgingPager> for Pager {
    fn from(pager: AgingPager) -> Self {
        Pager::Aging(pager)
    }
}

impl From<WorkingSetPager> for Pager {
    fn from(pager: WorkingSetPager) -> Self {
        Pager::WorkingSet(pager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmusim_error::assert_errors;

    fn no_random() -> RandomSource {
        RandomSource::from_values(vec![])
    }

    #[test]
    fn test_pager_from_config() {
        let kinds = [
            PolicyKind::Fifo,
            PolicyKind::Random,
            PolicyKind::Clock,
            PolicyKind::Nru,
            PolicyKind::Aging,
            PolicyKind::WorkingSet,
        ];
        for kind in kinds {
            let config = SimConfig::new(8, kind)
                .with_nru_reset_interval(50)
                .with_tau(49);
            let pager = Pager::from_config(&config, no_random()).unwrap();
            assert_eq!(pager.kind(), kind);
        }
    }

    #[test]
    fn test_pager_from_config_requires_parameters() {
        assert_errors!(Pager::from_config(
            &SimConfig::new(8, PolicyKind::Nru),
            no_random()
        ));
        assert_errors!(Pager::from_config(
            &SimConfig::new(8, PolicyKind::WorkingSet),
            no_random()
        ));
        assert_errors!(Pager::from_config(
            &SimConfig::new(0, PolicyKind::Clock),
            no_random()
        ));
    }

    #[test]
    fn test_pager_dispatches_to_policy() {
        use crate::pager::fixture::Fixture;

        let mut fixture = Fixture::new(3);
        let mut pager = Pager::from(FifoPager::new());
        for frame in [2, 0, 1] {
            pager.record_map(frame);
        }
        assert_eq!(pager.select_victim(&mut fixture.context(1)).unwrap(), 2);
        pager.release(0);
        assert_eq!(pager.select_victim(&mut fixture.context(2)).unwrap(), 1);
    }
}
