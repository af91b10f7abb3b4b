//! The `mmu` binary: loads a trace and a random number file, runs the simulation and prints
//! the requested reports.
//!
//! ```text
//! mmu [-f<frames>] [-a<algo>] [-o<OPFS>] [--vpages N]
//!     [--nru-reset-interval N] [--tau N] <inputfile> <randomfile>
//! ```
mod cli;

use clap::Parser;
use cli::Args;
use log::{error, info};
use mmusim_error::Result;
use mmusim_mmu::pager::Pager;
use mmusim_mmu::report;
use mmusim_mmu::simulator::Simulator;
use mmusim_trace::random::RandomSource;
use mmusim_trace::trace::Trace;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn) // Overridden by RUST_LOG
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}:{} - {}",
                record.level(),
                record.target(),
                record.file().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("simulation aborted: {}", err);
            let _ = writeln!(io::stderr(), "mmu: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Loads the inputs named by `args`, runs the simulation and writes the selected reports to
/// `out`: the per-instruction trace first, then page tables, frame table and summaries.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let config = args.config();
    config.validate()?;

    let trace = Trace::from_file(&args.inputfile)?;
    let random = RandomSource::from_file(&args.randomfile)?;
    info!(
        "{} processes, {} instructions, {} frames, {} policy",
        trace.processes().len(),
        trace.instructions().len(),
        config.frames,
        config.policy
    );

    let pager = Pager::from_config(&config, random)?;
    let (specs, instructions) = trace.into_parts();
    let mut sim = Simulator::new(&config, specs, pager)?;

    let options = args.options;

    for (index, instruction) in instructions.iter().enumerate() {
        if options.trace {
            writeln!(out, "{}", report::instruction_header(index, instruction))?;
        }
        let events = sim.step(instruction)?;
        if options.trace {
            for event in events {
                writeln!(out, "{}", event)?;
            }
        }
    }

    if options.page_tables {
        for process in sim.processes() {
            writeln!(out, "{}", report::page_table_line(process))?;
        }
    }
    if options.frame_table {
        writeln!(out, "{}", report::frame_table_line(sim.frame_table()))?;
    }
    if options.summary {
        for process in sim.processes() {
            writeln!(out, "{}", report::process_summary_line(process))?;
        }
        writeln!(out, "{}", report::total_cost_line(&sim))?;
    }
    out.flush()?;

    info!("done, total cost {}", sim.total_cost());
    Ok(())
}
