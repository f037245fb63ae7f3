//! Diesel schema for board persistence.

diesel::table! {
    /// Owner-scoped board columns.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning caller.
        owner_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Position among the owner's columns.
        sort_order -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task cards, each placed in one column.
    board_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning caller.
        owner_id -> Uuid,
        /// Column holding the task.
        column_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Priority (`low`, `medium`, `high`).
        #[max_length = 16]
        priority -> Varchar,
        /// Free-form status label.
        #[max_length = 100]
        status -> Varchar,
        /// Position among the tasks of the same column.
        sort_order -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(board_tasks -> board_columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(board_columns, board_tasks);
