//! Diesel schema for relationship persistence.

diesel::table! {
    /// Typed directed edges between tasks.
    task_relationships (id) {
        /// Relationship identifier.
        id -> Uuid,
        /// Source task identifier.
        source_task_id -> Uuid,
        /// Target task identifier.
        target_task_id -> Uuid,
        /// Surface relationship kind.
        #[max_length = 32]
        kind -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
