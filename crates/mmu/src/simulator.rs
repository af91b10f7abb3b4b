use crate::config::SimConfig;
use crate::event::Event;
use crate::frame_table::FrameTable;
use crate::pager::{EvictionPolicy, Pager, PagerContext};
use crate::process::Process;
use crate::stats::{total_cost, SimStats};
use crate::typedef::{FrameId, Pid, Tick, VPage};
use crate::Result;
use log::{debug, trace};
use mmusim_error::{errdata, errinput};
use mmusim_trace::instruction::{Command, Instruction};
use mmusim_trace::trace::ProcessSpec;

/// The demand-paging engine.
///
/// Owns every process, the frame table and the replacement policy, and executes the instruction
/// stream one instruction at a time. Processes and frames refer to each other by index only:
/// a frame records the `(pid, vpage)` it holds and the page table entry records the frame.
#[derive(Debug)]
pub struct Simulator {
    vpages: usize,               // Size of every virtual address space
    processes: Vec<Process>,     // Indexed by pid
    frame_table: FrameTable,     // Physical frames and the free list
    pager: Pager,                // Picks victims once the free list runs dry
    current: Option<Pid>,        // The process reads and writes apply to
    stats: SimStats,             // Run-wide counters
    events: Vec<Event>,          // Events of the last instruction
}

impl Simulator {
    /// Creates a simulator with every frame free and no current process.
    ///
    /// Process `i` of `specs` must have pid `i`, and every VMA must lie inside the configured
    /// virtual address space.
    pub fn new(config: &SimConfig, specs: Vec<ProcessSpec>, pager: Pager) -> Result<Self> {
        config.validate()?;
        for (index, spec) in specs.iter().enumerate() {
            if spec.pid() != index {
                return errinput!("process {} is listed in position {}", spec.pid(), index);
            }
            if let Some(vma) = spec.vmas().iter().find(|vma| vma.end_vpage() >= config.vpages) {
                return errinput!(
                    "process {}: VMA {} exceeds the address space of {} pages",
                    index,
                    vma,
                    config.vpages
                );
            }
        }

        debug!(
            "simulator: {} frames, {} processes of {} pages, {} policy",
            config.frames,
            specs.len(),
            config.vpages,
            pager.kind()
        );
        let processes = specs
            .into_iter()
            .map(|spec| Process::new(spec, config.vpages))
            .collect();
        Ok(Self {
            vpages: config.vpages,
            processes,
            frame_table: FrameTable::new(config.frames),
            pager,
            current: None,
            stats: SimStats::default(),
            events: Vec::new(),
        })
    }

    /// Executes one instruction and returns the events it produced, in the order they happened.
    ///
    /// Segmentation and protection violations are recorded as events and counters, not errors.
    /// An error means the trace is unusable and the run must stop.
    pub fn step(&mut self, instruction: &Instruction) -> Result<&[Event]> {
        self.events.clear();
        self.stats.instructions += 1;
        let now = self.stats.instructions;

        match instruction.command() {
            Command::ContextSwitch => self.context_switch(instruction.operand())?,
            Command::Exit => self.exit_current()?,
            Command::Read => self.access(instruction.operand(), false, now)?,
            Command::Write => self.access(instruction.operand(), true, now)?,
        }
        Ok(&self.events)
    }

    /// Executes every instruction in order, stopping at the first error.
    pub fn run<'a>(&mut self, instructions: impl IntoIterator<Item = &'a Instruction>) -> Result<()> {
        for instruction in instructions {
            self.step(instruction)?;
        }
        Ok(())
    }

    fn current_pid(&self, command: Command) -> Result<Pid> {
        match self.current {
            Some(pid) => Ok(pid),
            None => errinput!(
                "instruction {} '{}' issued with no current process",
                self.stats.instructions - 1,
                command.as_char()
            ),
        }
    }

    fn context_switch(&mut self, pid: Pid) -> Result<()> {
        if pid >= self.processes.len() {
            return errinput!(
                "context switch to process {}, but only {} processes exist",
                pid,
                self.processes.len()
            );
        }
        self.current = Some(pid);
        self.stats.ctx_switches += 1;
        Ok(())
    }

    /// Tears down the current process: unmaps its present pages in ascending page order,
    /// returns their frames to the back of the free list and clears its whole page table.
    fn exit_current(&mut self) -> Result<()> {
        let pid = self.current_pid(Command::Exit)?;
        self.stats.process_exits += 1;
        self.events.push(Event::Exit(pid));

        let process = &mut self.processes[pid];
        let present: Vec<(VPage, FrameId, bool)> = process
            .page_table()
            .iter()
            .filter(|(_, pte)| pte.present())
            .map(|(vpage, pte)| (vpage, pte.frame(), pte.modified() && pte.file_mapped()))
            .collect();

        for &(vpage, frame, file_out) in &present {
            let stats = process.stats_mut();
            stats.unmaps += 1;
            self.events.push(Event::Unmap { pid, vpage });
            if file_out {
                stats.fouts += 1;
                self.events.push(Event::FileOut);
            }
            self.frame_table.release(frame);
            self.pager.release(frame);
        }
        process.page_table_mut().reset();
        self.current = None;

        debug!("process {} exited, released {} frames", pid, present.len());
        Ok(())
    }

    fn access(&mut self, vpage: VPage, write: bool, now: Tick) -> Result<()> {
        let command = if write { Command::Write } else { Command::Read };
        let pid = self.current_pid(command)?;
        self.stats.accesses += 1;

        let process = &mut self.processes[pid];
        if !process.page_table().entry(vpage)?.present() {
            let Some(vma) = process.vma_for(vpage).copied() else {
                process.stats_mut().segv += 1;
                self.events.push(Event::Segv);
                return Ok(());
            };
            let pte = process.page_table_mut().entry_mut(vpage)?;
            pte.set_write_protect(vma.write_protected());
            pte.set_file_mapped(vma.file_mapped());

            let frame = self.allocate_frame(now)?;
            if let Some((owner, owner_vpage)) = self.frame_table.frames()[frame].owner() {
                self.evict(frame, owner, owner_vpage)?;
            }
            self.map(frame, pid, vpage, now)?;
        }

        let process = &mut self.processes[pid];
        let pte = process.page_table_mut().entry_mut(vpage)?;
        pte.set_referenced(true);
        if write {
            if pte.write_protect() {
                process.stats_mut().segprot += 1;
                self.events.push(Event::Segprot);
            } else {
                pte.set_modified(true);
            }
        }
        Ok(())
    }

    /// Returns a frame for a faulting page: the head of the free list, or else the replacement
    /// policy's victim, which still holds its old page.
    fn allocate_frame(&mut self, now: Tick) -> Result<FrameId> {
        if let Some(frame) = self.frame_table.pop_free() {
            return Ok(frame);
        }

        let mut ctx = PagerContext::new(self.frame_table.frames_mut(), &mut self.processes, now);
        let victim = self.pager.select_victim(&mut ctx)?;
        match self.frame_table.frame(victim) {
            Some(frame) if frame.is_mapped() => {}
            _ => {
                return errdata!(
                    "{} policy chose frame {}, which holds no page",
                    self.pager.kind(),
                    victim
                )
            }
        }
        trace!("{} policy evicts frame {}", self.pager.kind(), victim);
        Ok(victim)
    }

    /// Takes `frame` away from `(pid, vpage)`, writing the page out first if it is dirty.
    fn evict(&mut self, frame: FrameId, pid: Pid, vpage: VPage) -> Result<()> {
        self.events.push(Event::Unmap { pid, vpage });
        let process = &mut self.processes[pid];
        let pte = process.page_table_mut().entry_mut(vpage)?;
        let modified = pte.modified();
        let file_mapped = pte.file_mapped();
        if modified && !file_mapped {
            pte.set_pageout(true);
        }
        pte.set_present(false);
        pte.set_referenced(false);
        pte.set_modified(false);
        pte.set_frame(0);

        let stats = process.stats_mut();
        stats.unmaps += 1;
        if modified {
            if file_mapped {
                stats.fouts += 1;
                self.events.push(Event::FileOut);
            } else {
                stats.outs += 1;
                self.events.push(Event::Out);
            }
        }
        self.frame_table.unmap(frame);
        Ok(())
    }

    /// Fills `frame` with `(pid, vpage)`, loading the page from wherever it lives.
    fn map(&mut self, frame: FrameId, pid: Pid, vpage: VPage, now: Tick) -> Result<()> {
        let process = &mut self.processes[pid];
        let pte = process.page_table_mut().entry_mut(vpage)?;
        let origin = if pte.pageout() {
            Event::In
        } else if pte.file_mapped() {
            Event::FileIn
        } else {
            Event::Zero
        };
        pte.set_frame(frame);
        pte.set_present(true);

        let stats = process.stats_mut();
        match origin {
            Event::In => stats.ins += 1,
            Event::FileIn => stats.fins += 1,
            _ => stats.zeros += 1,
        }
        stats.maps += 1;

        self.frame_table.map(frame, pid, vpage, now);
        self.pager.record_map(frame);
        self.events.push(origin);
        self.events.push(Event::Map(frame));
        debug!("process {} page {} mapped to frame {} ({:?})", pid, vpage, frame, origin);
        Ok(())
    }

    pub fn vpages(&self) -> usize {
        self.vpages
    }

    /// All processes, indexed by pid.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(pid)
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.frame_table
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// The process reads and writes currently apply to, if any.
    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The events of the most recent instruction.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The weighted cost of everything executed so far.
    pub fn total_cost(&self) -> u64 {
        total_cost(&self.stats, self.processes.iter().map(Process::stats))
    }
}
