//! Task card aggregate and related types.

use super::{BoardDomainError, ColumnId, OwnerId, ParseTaskPriorityError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Creator-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    column_id: ColumnId,
    title: String,
    description: String,
    priority: TaskPriority,
    status: String,
    order: i32,
}

impl TaskDraft {
    /// Creates a draft with required fields and medium priority.
    #[must_use]
    pub fn new(column_id: ColumnId, title: impl Into<String>, order: i32) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: String::new(),
            priority: TaskPriority::Medium,
            status: String::new(),
            order,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the free-form status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Returns the column the task will be created in.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }
}

/// A task card placed in exactly one column.
///
/// The `order` value is only meaningful relative to tasks sharing the same
/// `column_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    column_id: ColumnId,
    title: String,
    description: String,
    priority: TaskPriority,
    status: String,
    order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner_id: OwnerId,
    /// Persisted column reference.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status label.
    pub status: String,
    /// Persisted order value.
    pub order: i32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task for `owner_id` from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is blank or
    /// [`BoardDomainError::NegativeOrder`] when the draft order is negative.
    pub fn new(
        owner_id: OwnerId,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let TaskDraft {
            column_id,
            title,
            description,
            priority,
            status,
            order,
        } = draft;

        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        if order < 0 {
            return Err(BoardDomainError::NegativeOrder(order));
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            owner_id,
            column_id,
            title: trimmed.to_owned(),
            description,
            priority,
            status,
            order,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning caller.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the column holding this task.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the free-form status label.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the order value within the task's column.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Places the task at `order` in `column_id`, stamping it as updated.
    pub(crate) const fn relocate(&mut self, column_id: ColumnId, order: i32, at: DateTime<Utc>) {
        self.column_id = column_id;
        self.order = order;
        self.updated_at = at;
    }

    /// Places the task without touching timestamps (client mirror).
    pub(crate) const fn place(&mut self, column_id: ColumnId, order: i32) {
        self.column_id = column_id;
        self.order = order;
    }
}
