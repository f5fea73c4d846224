//! JSON HTTP surface over the task and relationship services.
//!
//! Routes:
//!
//! - `GET|POST /tasks`, `GET|PATCH|DELETE /tasks/{id}`
//! - `GET|POST /relationships`, `GET|PUT|PATCH|DELETE /relationships/{id}`
//!
//! Every failure is reported as `{"error": "<message>"}` with a status code
//! chosen by [`ApiError::status_code`].

mod error;
mod relationships;
mod state;
mod tasks;

pub use error::ApiError;
pub use state::{AppRelationshipService, AppState, AppTaskService};

use axum::Router;
use axum::routing::get;
use serde::Serialize;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/relationships",
            get(relationships::list_relationships).post(relationships::create_relationship),
        )
        .route(
            "/relationships/{id}",
            get(relationships::get_relationship)
                .put(relationships::update_relationship)
                .patch(relationships::update_relationship)
                .delete(relationships::delete_relationship),
        )
        .with_state(state)
}

/// Body returned by create endpoints.
#[derive(Debug, Serialize)]
struct CreatedResponse {
    id: String,
}

/// Body returned by update and delete endpoints.
#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}
