//! Diesel row models for relationship persistence.

use super::schema::task_relationships;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for relationship records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_relationships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RelationshipRow {
    /// Relationship identifier.
    pub id: uuid::Uuid,
    /// Source task identifier.
    pub source_task_id: uuid::Uuid,
    /// Target task identifier.
    pub target_task_id: uuid::Uuid,
    /// Surface relationship kind.
    pub kind: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
