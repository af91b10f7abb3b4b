use crate::page_table::PageTable;
use crate::stats::ProcessStats;
use crate::typedef::{Pid, VPage};
use mmusim_trace::trace::ProcessSpec;
use mmusim_trace::vma::Vma;

/// A simulated process: its VMAs, its page table and its event counters.
///
/// Processes live for the whole run. Exiting tears down the page table but keeps the counters.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    vmas: Vec<Vma>,
    page_table: PageTable,
    stats: ProcessStats,
}

impl Process {
    /// Creates a process with an address space of `vpages` pages, none of them present.
    pub fn new(spec: ProcessSpec, vpages: usize) -> Self {
        let pid = spec.pid();
        Self {
            pid,
            vmas: spec.vmas().to_vec(),
            page_table: PageTable::new(vpages),
            stats: ProcessStats::default(),
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn vmas(&self) -> &[Vma] {
        &self.vmas
    }

    /// Returns the first VMA covering `vpage`, if any.
    pub fn vma_for(&self, vpage: VPage) -> Option<&Vma> {
        self.vmas.iter().find(|vma| vma.contains(vpage))
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn stats(&self) -> &ProcessStats {
        &self.stats
    }

    pub(crate) fn page_table_mut(&mut self) -> &mut PageTable {
        &mut self.page_table
    }

    pub(crate) fn stats_mut(&mut self) -> &mut ProcessStats {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vma_lookup() {
        let spec = ProcessSpec::new(
            3,
            vec![Vma::new(0, 9, false, false), Vma::new(20, 29, true, true)],
        );
        let process = Process::new(spec, 64);
        assert_eq!(process.pid(), 3);
        assert_eq!(process.page_table().len(), 64);

        assert_eq!(process.vma_for(0), Some(&Vma::new(0, 9, false, false)));
        assert_eq!(process.vma_for(25), Some(&Vma::new(20, 29, true, true)));
        assert_eq!(process.vma_for(10), None);
        assert_eq!(process.vma_for(63), None);
    }
}
