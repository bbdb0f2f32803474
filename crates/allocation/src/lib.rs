//! Allocation domain module.
//!
//! Decides which stock batch fulfils an order line. Pure, synchronous domain
//! logic (no IO, no storage); callers own the batches and persist changes.

pub mod batch;
pub mod error;
pub mod order_line;
pub mod selection;

pub use batch::{Batch, BatchSnapshot, PreferenceRank};
pub use error::OutOfStock;
pub use order_line::OrderLine;
pub use selection::allocate;
