//! Boundary request bodies for the ordering operations.
//!
//! Bodies arrive already authenticated; these types only check shape. Field
//! names follow the wire format (`orderedIds`, `tasks`, `newColumnId`,
//! `newOrder`).

use crate::board::domain::{ColumnId, TaskId, TaskOrderEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;

/// Malformed request shape, rejected before touching storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The body is not valid JSON for the expected shape.
    #[error("malformed request body: {0}")]
    Malformed(String),

    /// A column id appears more than once in `orderedIds`.
    #[error("column {0} is listed more than once")]
    DuplicateColumn(ColumnId),

    /// A task id appears more than once in `tasks`.
    #[error("task {0} is listed more than once")]
    DuplicateTask(TaskId),

    /// An order value is negative.
    #[error("invalid order value {0}, expected a non-negative integer")]
    NegativeOrder(i32),
}

fn first_duplicate<T: Eq + Hash + Copy>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut seen = HashSet::new();
    values.into_iter().find(|value| !seen.insert(*value))
}

fn parse<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body).map_err(|err| ValidationError::Malformed(err.to_string()))
}

/// Body of `reorder-columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    /// Column ids in their new display order.
    pub ordered_ids: Vec<ColumnId>,
}

impl ReorderColumnsRequest {
    /// Creates a request from an ordered id sequence.
    #[must_use]
    pub fn new(ordered_ids: impl IntoIterator<Item = ColumnId>) -> Self {
        Self {
            ordered_ids: ordered_ids.into_iter().collect(),
        }
    }

    /// Parses and validates a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the body is malformed or lists a
    /// column twice.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let request: Self = parse(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Checks that no id is listed twice.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateColumn`] for the first repeated id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match first_duplicate(self.ordered_ids.iter().copied()) {
            Some(id) => Err(ValidationError::DuplicateColumn(id)),
            None => Ok(()),
        }
    }
}

/// Body of `reorder-tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderTasksRequest {
    /// New `(order, columnId)` for each listed task.
    pub tasks: Vec<TaskOrderEntry>,
}

impl ReorderTasksRequest {
    /// Creates a request from entries.
    #[must_use]
    pub fn new(tasks: impl IntoIterator<Item = TaskOrderEntry>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
        }
    }

    /// Parses and validates a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the body is malformed, lists a task
    /// twice or carries a negative order.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let request: Self = parse(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Checks ids are unique and orders non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(entry) = self.tasks.iter().find(|entry| entry.order < 0) {
            return Err(ValidationError::NegativeOrder(entry.order));
        }
        match first_duplicate(self.tasks.iter().map(|entry| entry.id)) {
            Some(id) => Err(ValidationError::DuplicateTask(id)),
            None => Ok(()),
        }
    }

    /// Returns the distinct target columns named by the entries.
    #[must_use]
    pub fn target_columns(&self) -> Vec<ColumnId> {
        let mut seen = HashSet::new();
        self.tasks
            .iter()
            .map(|entry| entry.column_id)
            .filter(|column_id| seen.insert(*column_id))
            .collect()
    }
}

/// Body of `move-task/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    /// Column the task moves to.
    pub new_column_id: ColumnId,
    /// Order value within the target column.
    pub new_order: i32,
}

impl MoveTaskRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(new_column_id: ColumnId, new_order: i32) -> Self {
        Self {
            new_column_id,
            new_order,
        }
    }

    /// Parses and validates a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the body is malformed or the order is
    /// negative.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let request: Self = parse(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Checks the order is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeOrder`].
    pub const fn validate(&self) -> Result<(), ValidationError> {
        if self.new_order < 0 {
            return Err(ValidationError::NegativeOrder(self.new_order));
        }
        Ok(())
    }
}
