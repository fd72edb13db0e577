//! In-process table storage

mod memory;

pub use memory::{MemoryTable, RowFilter, RowOrder};
