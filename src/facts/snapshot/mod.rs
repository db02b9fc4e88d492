//! A directory of table exports as an observation source
//!
//! Exports are either JSON (an array of objects, one per row) or CSV (a header row, one
//! record per row, empty cells read as null). Numeric columns accept numbers or numeric
//! strings. Timestamps are RFC 3339.

mod source;
mod table;

pub use source::SnapshotSource;
pub use table::{Row, Table};
