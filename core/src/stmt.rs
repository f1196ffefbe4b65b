use crate::{col_metadata::ColMetadata, err::Result};
use serde_json::Value;

/// A materialized result set held by a statement handle: a plain query, a
/// table listing, or a column listing.
pub trait InventreeStatement: std::fmt::Debug + Send {
    // Move the cursor to the next row. Returns true while a row is available.
    fn next(&mut self) -> Result<bool>;
    // Get the JSON value for the cell at the given 1-indexed column on the
    // current row. next must have been called at least once; None for cells
    // that are SQL NULL or out of range.
    fn get_value(&self, col_index: u16) -> Result<Option<Value>>;
    fn get_resultset_metadata(&self) -> &[ColMetadata];
    fn num_rows(&self) -> usize;
}
