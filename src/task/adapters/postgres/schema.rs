//! Diesel schema for task persistence.

diesel::table! {
    /// Task records synchronised from external issue trackers.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Workflow status copied from the source tracker.
        #[max_length = 100]
        status -> Varchar,
        /// Source integration name.
        #[max_length = 50]
        integration -> Varchar,
        /// Optional priority label.
        #[max_length = 100]
        priority -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
