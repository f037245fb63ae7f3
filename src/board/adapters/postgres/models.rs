//! Diesel row models for board persistence.

use super::schema::{board_columns, board_tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning caller.
    pub owner_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Position among the owner's columns.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for columns.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_columns)]
pub struct NewColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning caller.
    pub owner_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Position among the owner's columns.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = board_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning caller.
    pub owner_id: uuid::Uuid,
    /// Column holding the task.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority label.
    pub priority: String,
    /// Free-form status label.
    pub status: String,
    /// Position within the column.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = board_tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning caller.
    pub owner_id: uuid::Uuid,
    /// Column holding the task.
    pub column_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority label.
    pub priority: String,
    /// Free-form status label.
    pub status: String,
    /// Position within the column.
    pub sort_order: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
