use crate::types::VPage;

/// A Virtual Memory Area: a contiguous, inclusive range of virtual pages sharing the same
/// protection and backing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vma {
    start_vpage: VPage,
    end_vpage: VPage,
    write_protected: bool,
    file_mapped: bool,
}

impl Vma {
    pub fn new(start_vpage: VPage, end_vpage: VPage, write_protected: bool, file_mapped: bool) -> Self {
        Self {
            start_vpage,
            end_vpage,
            write_protected,
            file_mapped,
        }
    }

    pub fn start_vpage(&self) -> VPage {
        self.start_vpage
    }

    pub fn end_vpage(&self) -> VPage {
        self.end_vpage
    }

    pub fn write_protected(&self) -> bool {
        self.write_protected
    }

    pub fn file_mapped(&self) -> bool {
        self.file_mapped
    }

    /// Returns true if `vpage` lies inside this area (both bounds inclusive).
    pub fn contains(&self, vpage: VPage) -> bool {
        self.start_vpage <= vpage && vpage <= self.end_vpage
    }
}

impl std::fmt::Display for Vma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.start_vpage,
            self.end_vpage,
            u8::from(self.write_protected),
            u8::from(self.file_mapped)
        )
    }
}
