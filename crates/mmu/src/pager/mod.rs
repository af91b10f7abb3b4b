//! Page replacement. A policy only runs when the free list is empty, and picks the frame whose
//! page gets evicted to make room for the faulting one.
pub mod aging;
pub mod clock;
pub mod context;
pub mod fifo;
pub mod nru;
#[allow(clippy::module_inception)]
pub mod pager;
pub mod random;
pub mod working_set;

pub use context::PagerContext;
pub use pager::{EvictionPolicy, Pager};
