//! Column aggregate.

use super::{BoardDomainError, ColumnId, OwnerId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A board column owned by a single caller.
///
/// The `order` value is only meaningful relative to the other columns of the
/// same owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    id: ColumnId,
    owner_id: OwnerId,
    name: String,
    order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Persisted owner.
    pub owner_id: OwnerId,
    /// Persisted display name.
    pub name: String,
    /// Persisted order value.
    pub order: i32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Creates a new column for `owner_id` at the creator-supplied order.
    ///
    /// Creation does not enforce unique order values among siblings; only
    /// the reorder operations assign dense positions.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] when the name is blank or
    /// [`BoardDomainError::NegativeOrder`] when `order` is negative.
    pub fn new(
        owner_id: OwnerId,
        name: impl Into<String>,
        order: i32,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnName);
        }
        if order < 0 {
            return Err(BoardDomainError::NegativeOrder(order));
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ColumnId::new(),
            owner_id,
            name: trimmed.to_owned(),
            order,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning caller.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the order value among the owner's columns.
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

    /// Assigns a new order value, stamping the row as updated at `at`.
    pub(crate) const fn reposition(&mut self, order: i32, at: DateTime<Utc>) {
        self.order = order;
        self.updated_at = at;
    }

    /// Assigns a new order value without touching timestamps.
    ///
    /// Used by the client mirror, where timestamps are server-owned.
    pub(crate) const fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}
