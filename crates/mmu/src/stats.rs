//! Event counters and the weighted cost model.

/// Cost of mapping a frame into a page table.
pub const MAP_COST: u64 = 350;
/// Cost of unmapping a frame from a page table.
pub const UNMAP_COST: u64 = 410;
/// Cost of reading a page back from swap.
pub const IN_COST: u64 = 3200;
/// Cost of writing a dirty anonymous page to swap.
pub const OUT_COST: u64 = 2750;
/// Cost of reading a file-backed page.
pub const FILE_IN_COST: u64 = 2350;
/// Cost of writing a dirty file-backed page back to its file.
pub const FILE_OUT_COST: u64 = 2800;
/// Cost of zero-filling a fresh anonymous page.
pub const ZERO_COST: u64 = 150;
/// Cost of a segmentation violation.
pub const SEGV_COST: u64 = 440;
/// Cost of a write-protection violation.
pub const SEGPROT_COST: u64 = 410;
/// Cost of a plain read or write access.
pub const ACCESS_COST: u64 = 1;
/// Cost of a context switch.
pub const CONTEXT_SWITCH_COST: u64 = 130;
/// Cost of a process exit.
pub const PROCESS_EXIT_COST: u64 = 1230;

/// The per-process event counters. All of them only ever grow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub unmaps: u64,
    pub maps: u64,
    pub ins: u64,
    pub outs: u64,
    pub fins: u64,
    pub fouts: u64,
    pub zeros: u64,
    pub segv: u64,
    pub segprot: u64,
}

impl ProcessStats {
    /// The weighted cost of this process's paging activity.
    pub fn cost(&self) -> u64 {
        self.maps * MAP_COST
            + self.unmaps * UNMAP_COST
            + self.ins * IN_COST
            + self.outs * OUT_COST
            + self.fins * FILE_IN_COST
            + self.fouts * FILE_OUT_COST
            + self.zeros * ZERO_COST
            + self.segv * SEGV_COST
            + self.segprot * SEGPROT_COST
    }
}

/// Simulation-wide counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimStats {
    /// Every instruction executed, whatever its command.
    pub instructions: u64,
    pub ctx_switches: u64,
    pub process_exits: u64,
    /// Read and write instructions, including those that faulted.
    pub accesses: u64,
}

impl SimStats {
    /// The weighted cost of the instruction mix, excluding per-process paging activity.
    pub fn cost(&self) -> u64 {
        self.accesses * ACCESS_COST
            + self.ctx_switches * CONTEXT_SWITCH_COST
            + self.process_exits * PROCESS_EXIT_COST
    }
}

/// The total cost of a run: the instruction mix plus every process's paging activity.
pub fn total_cost<'a>(sim: &SimStats, processes: impl IntoIterator<Item = &'a ProcessStats>) -> u64 {
    sim.cost() + processes.into_iter().map(ProcessStats::cost).sum::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_cost_weights() {
        let one_of_each = ProcessStats {
            unmaps: 1,
            maps: 1,
            ins: 1,
            outs: 1,
            fins: 1,
            fouts: 1,
            zeros: 1,
            segv: 1,
            segprot: 1,
        };
        assert_eq!(
            one_of_each.cost(),
            350 + 410 + 3200 + 2750 + 2350 + 2800 + 150 + 440 + 410
        );
        assert_eq!(ProcessStats::default().cost(), 0);

        let maps_only = ProcessStats {
            maps: 3,
            zeros: 3,
            ..Default::default()
        };
        assert_eq!(maps_only.cost(), 3 * 350 + 3 * 150);
    }

    #[test]
    fn test_total_cost() {
        let sim = SimStats {
            instructions: 10,
            ctx_switches: 2,
            process_exits: 1,
            accesses: 7,
        };
        assert_eq!(sim.cost(), 7 + 2 * 130 + 1230);

        let procs = [
            ProcessStats {
                maps: 2,
                ..Default::default()
            },
            ProcessStats {
                segv: 1,
                ..Default::default()
            },
        ];
        assert_eq!(total_cost(&sim, &procs), sim.cost() + 700 + 440);
    }
}
