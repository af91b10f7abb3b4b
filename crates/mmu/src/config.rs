use crate::typedef::Tick;
use crate::Result;
use mmusim_error::{errconfig, Error};
use serde::de::IntoDeserializer;
use serde::Deserialize;
use std::str::FromStr;

/// Default number of physical frames.
pub const DEFAULT_FRAMES: usize = 128;
/// Default number of virtual pages per process.
pub const DEFAULT_VPAGES: usize = 64;
/// Frame indices are stored in 16 bits of the PTE.
pub const MAX_FRAMES: usize = 1 << 16;
/// Upper bound on the virtual address space, in pages. Every process gets a page table this big.
pub const MAX_VPAGES: usize = 1 << 20;

/// The page replacement policies. Selectors are the single letters used on the command line,
/// with the long names accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PolicyKind {
    #[serde(rename = "f", alias = "fifo")]
    Fifo,
    #[serde(rename = "r", alias = "random")]
    Random,
    #[serde(rename = "c", alias = "clock")]
    Clock,
    #[serde(rename = "e", alias = "nru")]
    Nru,
    #[serde(rename = "a", alias = "aging")]
    Aging,
    #[serde(rename = "w", alias = "working-set")]
    WorkingSet,
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let deserializer: serde::de::value::StrDeserializer<'_, Error> = s.into_deserializer();
        Self::deserialize(deserializer).map_err(|e| match e {
            Error::InvalidData(msg) => Error::Config(format!("replacement policy '{}': {}", s, msg)),
            other => other,
        })
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Random => "random",
            PolicyKind::Clock => "clock",
            PolicyKind::Nru => "nru",
            PolicyKind::Aging => "aging",
            PolicyKind::WorkingSet => "working-set",
        };
        write!(f, "{}", name)
    }
}

/// The parameters of one simulation run. They are fixed once the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Size of the physical frame pool.
    pub frames: usize,
    /// Size of every process's virtual address space, in pages.
    pub vpages: usize,
    pub policy: PolicyKind,
    /// How many instructions pass between NRU reference-bit resets. Required for NRU.
    pub nru_reset_interval: Option<Tick>,
    /// The working-set window τ, in instructions. Required for Working-Set.
    pub tau: Option<Tick>,
}

impl SimConfig {
    pub fn new(frames: usize, policy: PolicyKind) -> Self {
        Self {
            frames,
            vpages: DEFAULT_VPAGES,
            policy,
            nru_reset_interval: None,
            tau: None,
        }
    }

    pub fn with_vpages(mut self, vpages: usize) -> Self {
        self.vpages = vpages;
        self
    }

    pub fn with_nru_reset_interval(mut self, interval: Tick) -> Self {
        self.nru_reset_interval = Some(interval);
        self
    }

    pub fn with_tau(mut self, tau: Tick) -> Self {
        self.tau = Some(tau);
        self
    }

    /// Checks the parameters before a run. Policy parameters have no built-in defaults, so the
    /// policies that need one fail here when it is missing.
    pub fn validate(&self) -> Result<()> {
        if self.frames == 0 {
            return errconfig!("the frame pool needs at least one frame");
        }
        if self.frames > MAX_FRAMES {
            return errconfig!(
                "{} frames requested, at most {} are supported",
                self.frames,
                MAX_FRAMES
            );
        }
        if self.vpages == 0 {
            return errconfig!("the virtual address space needs at least one page");
        }
        if self.vpages > MAX_VPAGES {
            return errconfig!(
                "{} virtual pages requested, at most {} are supported",
                self.vpages,
                MAX_VPAGES
            );
        }
        match self.policy {
            PolicyKind::Nru if self.nru_reset_interval.is_none() => {
                errconfig!("the nru policy needs a reference-bit reset interval")
            }
            PolicyKind::WorkingSet if self.tau.is_none() => {
                errconfig!("the working-set policy needs a tau")
            }
            _ => Ok(()),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES, PolicyKind::Fifo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmusim_error::assert_errors;

    #[test]
    fn test_policy_selectors() {
        let cases = [
            ("f", PolicyKind::Fifo),
            ("r", PolicyKind::Random),
            ("c", PolicyKind::Clock),
            ("e", PolicyKind::Nru),
            ("a", PolicyKind::Aging),
            ("w", PolicyKind::WorkingSet),
            ("fifo", PolicyKind::Fifo),
            ("working-set", PolicyKind::WorkingSet),
        ];
        for (selector, expected) in cases {
            assert_eq!(selector.parse::<PolicyKind>().unwrap(), expected);
        }
        assert!(matches!("x".parse::<PolicyKind>(), Err(Error::Config(_))));
        assert!(matches!("".parse::<PolicyKind>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_policy_display_round_trips() {
        for kind in [PolicyKind::Fifo, PolicyKind::Nru, PolicyKind::WorkingSet] {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_validate() {
        assert!(SimConfig::default().validate().is_ok());
        assert_errors!(SimConfig::new(0, PolicyKind::Fifo).validate());
        assert_errors!(SimConfig::new(MAX_FRAMES + 1, PolicyKind::Clock).validate());
        assert!(SimConfig::new(MAX_FRAMES, PolicyKind::Clock).validate().is_ok());
        assert_errors!(SimConfig::new(4, PolicyKind::Fifo).with_vpages(0).validate());
        assert!(matches!(
            SimConfig::new(4, PolicyKind::Fifo)
                .with_vpages(MAX_VPAGES + 1)
                .validate(),
            Err(Error::Config(_))
        ));
        assert!(SimConfig::new(4, PolicyKind::Fifo)
            .with_vpages(MAX_VPAGES)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_policy_parameters() {
        assert_errors!(SimConfig::new(4, PolicyKind::Nru).validate());
        assert!(SimConfig::new(4, PolicyKind::Nru)
            .with_nru_reset_interval(50)
            .validate()
            .is_ok());

        assert_errors!(SimConfig::new(4, PolicyKind::WorkingSet)
            .with_nru_reset_interval(50)
            .validate());
        assert!(SimConfig::new(4, PolicyKind::WorkingSet)
            .with_tau(49)
            .validate()
            .is_ok());
    }
}
