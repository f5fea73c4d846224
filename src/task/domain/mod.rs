//! Domain model for task records.
//!
//! The task domain models task creation, status changes, and list filtering
//! while keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod filter;
mod ids;
mod task;

pub use error::{ParseIntegrationError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::TaskId;
pub use task::{Integration, NewTask, PersistedTaskData, Task, TaskStatus};
