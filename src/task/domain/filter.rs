//! Listing filter for task queries.

use super::{Integration, Task, TaskStatus};

/// Keywords that mark a task as a meeting rather than engineering work.
const MEETING_KEYWORDS: [&str; 6] = ["meeting", "zoom", "call", "sync", "standup", "review"];

/// Optional criteria applied when listing tasks.
///
/// Unset fields match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    integration: Option<Integration>,
    priority: Option<String>,
    search: Option<String>,
    exclude_meetings: bool,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to an exact status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to one integration.
    #[must_use]
    pub const fn with_integration(mut self, integration: Integration) -> Self {
        self.integration = Some(integration);
        self
    }

    /// Restricts results to an exact priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Restricts results to tasks whose title or description contains the
    /// term, ignoring case.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into().to_lowercase());
        self
    }

    /// Drops tasks that look like meetings.
    #[must_use]
    pub const fn excluding_meetings(mut self) -> Self {
        self.exclude_meetings = true;
        self
    }

    /// Returns the status criterion, if set.
    #[must_use]
    pub const fn status(&self) -> Option<&TaskStatus> {
        self.status.as_ref()
    }

    /// Returns the integration criterion, if set.
    #[must_use]
    pub const fn integration(&self) -> Option<Integration> {
        self.integration
    }

    /// Returns the priority criterion, if set.
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    /// Returns `true` when the task satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.as_ref().is_some_and(|status| status != task.status()) {
            return false;
        }
        if self
            .integration
            .is_some_and(|integration| integration != task.integration())
        {
            return false;
        }
        if self
            .priority
            .as_deref()
            .is_some_and(|priority| Some(priority) != task.priority())
        {
            return false;
        }

        let title = task.title().to_lowercase();
        let description = task.description().unwrap_or_default().to_lowercase();
        if self
            .search
            .as_deref()
            .is_some_and(|term| !title.contains(term) && !description.contains(term))
        {
            return false;
        }
        if self.exclude_meetings
            && MEETING_KEYWORDS
                .iter()
                .any(|keyword| title.contains(keyword) || description.contains(keyword))
        {
            return false;
        }
        true
    }
}
