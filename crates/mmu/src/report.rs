//! Text renderings of the simulator state, in the line formats of the classic MMU lab output.
use crate::frame_table::FrameTable;
use crate::page_table::Pte;
use crate::process::Process;
use crate::simulator::Simulator;
use mmusim_trace::instruction::Instruction;
use std::fmt::Write;

/// The verbose-trace header printed before an instruction's events, e.g. `12: ==> r 3`.
pub fn instruction_header(index: usize, instruction: &Instruction) -> String {
    format!("{}: ==> {}", index, instruction)
}

/// A process's page table on one line: `vpage:RMS` for present pages (`-` for clear bits),
/// `#` for swapped-out pages and `*` for everything else.
pub fn page_table_line(process: &Process) -> String {
    let mut line = format!("PT[{}]:", process.pid());
    for (vpage, pte) in process.page_table().iter() {
        if pte.present() {
            let _ = write!(line, " {}:{}", vpage, flags(pte));
        } else if pte.pageout() {
            line.push_str(" #");
        } else {
            line.push_str(" *");
        }
    }
    line
}

fn flags(pte: &Pte) -> String {
    [
        (pte.referenced(), 'R'),
        (pte.modified(), 'M'),
        (pte.pageout(), 'S'),
    ]
    .iter()
    .map(|&(set, c)| if set { c } else { '-' })
    .collect()
}

/// The frame table on one line: `pid:vpage` for each mapped frame, `*` for free ones.
pub fn frame_table_line(frame_table: &FrameTable) -> String {
    let mut line = String::from("FT:");
    for frame in frame_table.frames() {
        match frame.owner() {
            Some((pid, vpage)) => {
                let _ = write!(line, " {}:{}", pid, vpage);
            }
            None => line.push_str(" *"),
        }
    }
    line
}

/// A process's counters: `PROC[pid]: U=.. M=.. I=.. O=.. FI=.. FO=.. Z=.. SV=.. SP=..`.
pub fn process_summary_line(process: &Process) -> String {
    let s = process.stats();
    format!(
        "PROC[{}]: U={} M={} I={} O={} FI={} FO={} Z={} SV={} SP={}",
        process.pid(),
        s.unmaps,
        s.maps,
        s.ins,
        s.outs,
        s.fins,
        s.fouts,
        s.zeros,
        s.segv,
        s.segprot
    )
}

/// The run totals: instructions, context switches, process exits, total cost and PTE size.
pub fn total_cost_line(sim: &Simulator) -> String {
    let stats = sim.stats();
    format!(
        "TOTALCOST {} {} {} {} {}",
        stats.instructions,
        stats.ctx_switches,
        stats.process_exits,
        sim.total_cost(),
        std::mem::size_of::<Pte>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PolicyKind, SimConfig};
    use crate::pager::Pager;
    use mmusim_trace::random::RandomSource;
    use mmusim_trace::trace::ProcessSpec;
    use mmusim_trace::vma::Vma;

    /// Two frames, one process with 4 pages: page 0 swapped out, page 1 dirty, page 2 clean.
    fn run_small() -> Simulator {
        let config = SimConfig::new(2, PolicyKind::Fifo).with_vpages(4);
        let pager = Pager::from_config(&config, RandomSource::from_values(vec![])).unwrap();
        let specs = vec![ProcessSpec::new(0, vec![Vma::new(0, 2, false, false)])];
        let mut sim = Simulator::new(&config, specs, pager).unwrap();
        let instructions = [
            Instruction::context_switch(0),
            Instruction::write(0),
            Instruction::write(1),
            Instruction::read(2),
            Instruction::read(3),
        ];
        sim.run(&instructions).unwrap();
        sim
    }

    #[test]
    fn test_instruction_header() {
        assert_eq!(instruction_header(0, &Instruction::context_switch(1)), "0: ==> c 1");
        assert_eq!(instruction_header(17, &Instruction::write(42)), "17: ==> w 42");
    }

    #[test]
    fn test_table_lines() {
        let sim = run_small();
        let process = sim.process(0).unwrap();
        assert_eq!(page_table_line(process), "PT[0]: # 1:RM- 2:R-- *");
        assert_eq!(frame_table_line(sim.frame_table()), "FT: 0:2 0:1");
    }

    #[test]
    fn test_summary_lines() {
        let sim = run_small();
        let process = sim.process(0).unwrap();
        assert_eq!(
            process_summary_line(process),
            "PROC[0]: U=1 M=3 I=0 O=1 FI=0 FO=0 Z=3 SV=1 SP=0"
        );
        let cost = 410 + 3 * 350 + 2750 + 3 * 150 + 440 + 4 + 130;
        assert_eq!(total_cost_line(&sim), format!("TOTALCOST 5 1 0 {} 4", cost));
    }

    #[test]
    fn test_free_frames_and_pageout_marker() {
        let mut sim = run_small();
        sim.step(&Instruction::exit()).unwrap();
        assert_eq!(frame_table_line(sim.frame_table()), "FT: * *");
        // Exit clears pageout along with everything else.
        assert_eq!(page_table_line(sim.process(0).unwrap()), "PT[0]: * * * *");
    }
}
