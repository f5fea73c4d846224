//! `PostgreSQL` repository implementation for relationship storage.

use super::{models::RelationshipRow, schema::task_relationships};
use crate::relationship::{
    domain::{
        PersistedRelationshipData, Relationship, RelationshipFilter, RelationshipId,
        RelationshipKind,
    },
    ports::{RelationshipRepository, RelationshipRepositoryError, RelationshipRepositoryResult},
};
use crate::task::{adapters::postgres::TaskPgPool, domain::TaskId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed relationship repository.
///
/// Shares the connection pool type with the task adapter; both tables live
/// in the same database so the foreign keys can cascade on task deletion.
#[derive(Debug, Clone)]
pub struct PostgresRelationshipRepository {
    pool: TaskPgPool,
}

impl PostgresRelationshipRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RelationshipRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RelationshipRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(RelationshipRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RelationshipRepositoryError::persistence)?
    }
}

#[async_trait]
impl RelationshipRepository for PostgresRelationshipRepository {
    async fn insert(&self, relationship: &Relationship) -> RelationshipRepositoryResult<()> {
        let row = to_row(relationship);
        let duplicate = RelationshipRepositoryError::duplicate_of(relationship);

        self.run_blocking(move |connection| {
            diesel::insert_into(task_relationships::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, duplicate))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, relationship: &Relationship) -> RelationshipRepositoryResult<()> {
        let id = relationship.id();
        let kind = relationship.kind().as_str();
        let updated_at = relationship.updated_at();
        let duplicate = RelationshipRepositoryError::duplicate_of(relationship);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                task_relationships::table.filter(task_relationships::id.eq(id.into_inner())),
            )
            .set((
                task_relationships::kind.eq(kind),
                task_relationships::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(|err| map_unique_violation(err, duplicate))?;
            if affected == 0 {
                return Err(RelationshipRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: RelationshipId) -> RelationshipRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                task_relationships::table.filter(task_relationships::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(RelationshipRepositoryError::persistence)?;
            if affected == 0 {
                return Err(RelationshipRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: RelationshipId,
    ) -> RelationshipRepositoryResult<Option<Relationship>> {
        self.run_blocking(move |connection| {
            let row = task_relationships::table
                .filter(task_relationships::id.eq(id.into_inner()))
                .select(RelationshipRow::as_select())
                .first::<RelationshipRow>(connection)
                .optional()
                .map_err(RelationshipRepositoryError::persistence)?;
            row.map(row_to_relationship).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: &RelationshipFilter,
    ) -> RelationshipRepositoryResult<Vec<Relationship>> {
        let filter = *filter;
        self.run_blocking(move |connection| {
            let mut query = task_relationships::table
                .select(RelationshipRow::as_select())
                .into_boxed();
            if let Some(source) = filter.source_task_id {
                query = query.filter(task_relationships::source_task_id.eq(source.into_inner()));
            }
            if let Some(target) = filter.target_task_id {
                query = query.filter(task_relationships::target_task_id.eq(target.into_inner()));
            }
            if let Some(kind) = filter.kind {
                query = query.filter(task_relationships::kind.eq(kind.as_str()));
            }
            let rows = query
                .order((
                    task_relationships::created_at.asc(),
                    task_relationships::id.asc(),
                ))
                .load::<RelationshipRow>(connection)
                .map_err(RelationshipRepositoryError::persistence)?;
            rows.into_iter().map(row_to_relationship).collect()
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> RelationshipRepositoryResult<Vec<Relationship>> {
        let id = task_id.into_inner();
        self.run_blocking(move |connection| {
            let rows = task_relationships::table
                .filter(
                    task_relationships::source_task_id
                        .eq(id)
                        .or(task_relationships::target_task_id.eq(id)),
                )
                .select(RelationshipRow::as_select())
                .order((
                    task_relationships::created_at.asc(),
                    task_relationships::id.asc(),
                ))
                .load::<RelationshipRow>(connection)
                .map_err(RelationshipRepositoryError::persistence)?;
            rows.into_iter().map(row_to_relationship).collect()
        })
        .await
    }

    async fn delete_by_task(&self, task_id: TaskId) -> RelationshipRepositoryResult<usize> {
        let id = task_id.into_inner();
        self.run_blocking(move |connection| {
            diesel::delete(
                task_relationships::table.filter(
                    task_relationships::source_task_id
                        .eq(id)
                        .or(task_relationships::target_task_id.eq(id)),
                ),
            )
            .execute(connection)
            .map_err(RelationshipRepositoryError::persistence)
        })
        .await
    }
}

fn map_unique_violation(
    err: DieselError,
    duplicate: RelationshipRepositoryError,
) -> RelationshipRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => duplicate,
        _ => RelationshipRepositoryError::persistence(err),
    }
}

fn to_row(relationship: &Relationship) -> RelationshipRow {
    RelationshipRow {
        id: relationship.id().into_inner(),
        source_task_id: relationship.source_task_id().into_inner(),
        target_task_id: relationship.target_task_id().into_inner(),
        kind: relationship.kind().as_str().to_owned(),
        created_at: relationship.created_at(),
        updated_at: relationship.updated_at(),
    }
}

fn row_to_relationship(row: RelationshipRow) -> RelationshipRepositoryResult<Relationship> {
    let RelationshipRow {
        id,
        source_task_id,
        target_task_id,
        kind: persisted_kind,
        created_at,
        updated_at,
    } = row;

    let kind = RelationshipKind::try_from(persisted_kind.as_str())
        .map_err(RelationshipRepositoryError::persistence)?;

    Ok(Relationship::from_persisted(PersistedRelationshipData {
        id: RelationshipId::from_uuid(id),
        source_task_id: TaskId::from_uuid(source_task_id),
        target_task_id: TaskId::from_uuid(target_task_id),
        kind,
        created_at,
        updated_at,
    }))
}
