use crate::typedef::{FrameId, VPage};
use crate::Result;
use bytemuck::{Pod, Zeroable};
use core::fmt;
use mmusim_error::errinput;

const PRESENT: u32 = 1 << 0;
const REFERENCED: u32 = 1 << 1;
const MODIFIED: u32 = 1 << 2;
const WRITE_PROTECT: u32 = 1 << 3;
const FILE_MAPPED: u32 = 1 << 4;
const PAGEOUT: u32 = 1 << 5;
const FRAME_SHIFT: u32 = 6;
const FRAME_MASK: u32 = 0xffff << FRAME_SHIFT;

/// A page table entry, packed into one 32-bit word.
///
/// ```text
///  31        22 21                6   5       4         3        2        1         0
/// | reserved   | frame index (16) | pageout | file_map | wprot | modified | referenced | present |
/// ```
///
/// `write_protect` and `file_mapped` are cached from the covering VMA on the first fault so later
/// faults need not search the VMA list again. `pageout` is sticky: it survives eviction and tells
/// the next fault to bring the page back IN from swap instead of zero-filling it. The frame index
/// is only meaningful while `present` is set.
#[repr(transparent)]
#[derive(Pod, Zeroable, Copy, Clone, Default, PartialEq, Eq)]
pub struct Pte(u32);

impl Pte {
    fn bit(&self, mask: u32) -> bool {
        self.0 & mask != 0
    }

    fn set_bit(&mut self, mask: u32, value: bool) {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn present(&self) -> bool {
        self.bit(PRESENT)
    }

    pub fn referenced(&self) -> bool {
        self.bit(REFERENCED)
    }

    pub fn modified(&self) -> bool {
        self.bit(MODIFIED)
    }

    pub fn write_protect(&self) -> bool {
        self.bit(WRITE_PROTECT)
    }

    pub fn file_mapped(&self) -> bool {
        self.bit(FILE_MAPPED)
    }

    pub fn pageout(&self) -> bool {
        self.bit(PAGEOUT)
    }

    pub fn frame(&self) -> FrameId {
        ((self.0 & FRAME_MASK) >> FRAME_SHIFT) as FrameId
    }

    pub(crate) fn set_present(&mut self, value: bool) {
        self.set_bit(PRESENT, value);
    }

    pub(crate) fn set_referenced(&mut self, value: bool) {
        self.set_bit(REFERENCED, value);
    }

    pub(crate) fn set_modified(&mut self, value: bool) {
        self.set_bit(MODIFIED, value);
    }

    pub(crate) fn set_write_protect(&mut self, value: bool) {
        self.set_bit(WRITE_PROTECT, value);
    }

    pub(crate) fn set_file_mapped(&mut self, value: bool) {
        self.set_bit(FILE_MAPPED, value);
    }

    pub(crate) fn set_pageout(&mut self, value: bool) {
        self.set_bit(PAGEOUT, value);
    }

    /// Stores a frame index. Indices are 16 bits wide; the frame pool size is capped accordingly.
    pub(crate) fn set_frame(&mut self, frame: FrameId) {
        debug_assert!(frame <= 0xffff, "frame index {} does not fit in a PTE", frame);
        self.0 = (self.0 & !FRAME_MASK) | (((frame as u32) << FRAME_SHIFT) & FRAME_MASK);
    }

    /// Clears every bit, as on process exit.
    pub(crate) fn reset(&mut self) {
        self.0 = 0;
    }

    /// The raw word.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Pte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pte")
            .field("present", &self.present())
            .field("referenced", &self.referenced())
            .field("modified", &self.modified())
            .field("write_protect", &self.write_protect())
            .field("file_mapped", &self.file_mapped())
            .field("pageout", &self.pageout())
            .field("frame", &self.frame())
            .finish()
    }
}

/// One process's page table: a PTE for every page of its virtual address space.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<Pte>,
}

impl PageTable {
    /// Creates a page table for an address space of `vpages` pages, with every entry cleared.
    pub fn new(vpages: usize) -> Self {
        Self {
            entries: vec![Pte::default(); vpages],
        }
    }

    /// Returns the number of virtual pages covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `vpage`, or an error if the page lies outside the address space.
    pub fn entry(&self, vpage: VPage) -> Result<&Pte> {
        match self.entries.get(vpage) {
            Some(pte) => Ok(pte),
            None => errinput!(
                "virtual page {} outside the address space of {} pages",
                vpage,
                self.entries.len()
            ),
        }
    }

    pub(crate) fn entry_mut(&mut self, vpage: VPage) -> Result<&mut Pte> {
        let len = self.entries.len();
        match self.entries.get_mut(vpage) {
            Some(pte) => Ok(pte),
            None => errinput!(
                "virtual page {} outside the address space of {} pages",
                vpage,
                len
            ),
        }
    }

    /// Iterates over `(vpage, entry)` pairs in ascending page order.
    pub fn iter(&self) -> impl Iterator<Item = (VPage, &Pte)> {
        self.entries.iter().enumerate()
    }

    /// The page table as raw PTE words, for bit-for-bit comparisons between runs.
    pub fn as_words(&self) -> &[u32] {
        bytemuck::cast_slice(&self.entries)
    }

    /// Clears every entry.
    pub(crate) fn reset(&mut self) {
        self.entries.iter_mut().for_each(Pte::reset);
    }
}
