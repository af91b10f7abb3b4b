use clap::Parser;
use mmusim_error::{errconfig, Error, Result};
use mmusim_mmu::config::{PolicyKind, SimConfig, DEFAULT_FRAMES, DEFAULT_VPAGES};
use std::path::PathBuf;
use std::str::FromStr;

/// Which reports to print, parsed from the letters given to `-o`:
/// `O` per-instruction event trace, `P` final page tables, `F` final frame table,
/// `S` per-process summaries and the total cost.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub trace: bool,
    pub page_tables: bool,
    pub frame_table: bool,
    pub summary: bool,
}

impl FromStr for OutputOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut options = OutputOptions::default();
        for letter in s.chars() {
            match letter {
                'O' => options.trace = true,
                'P' => options.page_tables = true,
                'F' => options.frame_table = true,
                'S' => options.summary = true,
                other => return errconfig!("unknown output option '{}'", other),
            }
        }
        Ok(options)
    }
}

/// Simulates demand paging of a trace of processes over a fixed pool of physical frames.
#[derive(Debug, Parser)]
#[command(name = "mmu", version)]
pub struct Args {
    /// Number of physical frames.
    #[arg(short = 'f', long, default_value_t = DEFAULT_FRAMES)]
    pub frames: usize,

    /// Replacement policy: f(ifo), r(andom), c(lock), e (nru), a(ging) or w(orking-set).
    #[arg(short = 'a', long = "algo", default_value = "f")]
    pub policy: PolicyKind,

    /// Output options, any of O, P, F and S.
    #[arg(short = 'o', long = "options", default_value = "")]
    pub options: OutputOptions,

    /// Size of every virtual address space, in pages.
    #[arg(long, default_value_t = DEFAULT_VPAGES)]
    pub vpages: usize,

    /// Instructions between reference-bit resets of the nru policy.
    #[arg(long)]
    pub nru_reset_interval: Option<u64>,

    /// Working-set window, in instructions.
    #[arg(long)]
    pub tau: Option<u64>,

    /// The trace file: processes, their VMAs and the instruction stream.
    pub inputfile: PathBuf,

    /// The random number file used by the random policy.
    pub randomfile: PathBuf,
}

impl Args {
    pub fn config(&self) -> SimConfig {
        SimConfig {
            frames: self.frames,
            vpages: self.vpages,
            policy: self.policy,
            nru_reset_interval: self.nru_reset_interval,
            tau: self.tau,
        }
    }
}
