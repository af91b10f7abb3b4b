//! The inputs a simulation run consumes: the processes with their virtual memory areas, the
//! instruction stream, and the pre-generated random numbers used by the random pager.
//!
//! Both input files are read once, fully, before the simulation starts. See
//! [`crate::trace::Trace`] and [`crate::random::RandomSource`] for their formats.
pub mod instruction;
pub mod random;
pub mod trace;
pub mod types;
pub mod vma;

pub(crate) type Result<T> = std::result::Result<T, mmusim_error::Error>;
