//! Immutable captures of a client collection taken before speculation.

use crate::board::domain::{Column, Task};

/// Full prior contents of the collection a speculative call touched.
///
/// Restoring a snapshot reinstates the collection verbatim, including raw
/// order values and element positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// The column list as it was.
    Columns(Vec<Column>),
    /// The task list as it was.
    Tasks(Vec<Task>),
}
