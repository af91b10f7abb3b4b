//! The demand-paging engine: page tables, the physical frame pool, the page replacement
//! policies, and the simulator that drives them one instruction at a time.
pub mod config;
pub mod event;
pub mod frame;
pub mod frame_table;
pub mod page_table;
pub mod pager;
pub mod process;
pub mod report;
pub mod simulator;
pub mod stats;
pub mod typedef;

pub(crate) type Result<T> = std::result::Result<T, mmusim_error::Error>;
