//! Task record and the value types that flow into and out of the task store.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a task title.
pub const TITLE_MAX_CHARS: usize = 255;

/// Persisted task record.
///
/// The serialized form doubles as the audit snapshot and the HTTP
/// representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Builds a freshly stored task from validated input.
    #[must_use]
    pub fn from_new(id: TaskId, new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update in place.
    ///
    /// Fields absent from the patch are left untouched. An empty patch does
    /// not move `updated_at`.
    pub fn apply(&mut self, patch: &TaskPatch, clock: &impl Clock) {
        if patch.is_empty() {
            return;
        }
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = clock.utc();
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
}

impl NewTask {
    /// Creates a new-task value with no description.
    #[must_use]
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            description: None,
            status,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validated partial update for a task.
///
/// `description` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`). Serializes to exactly the fields that were supplied, which
/// is the `new` half of an update audit record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    /// Replacement title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// Replacement status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description, `None` clearing it.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Listing filter for the task store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact status match, when set.
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Filter matching every task.
    #[must_use]
    pub const fn all() -> Self {
        Self { status: None }
    }

    /// Filter matching tasks with the given status.
    #[must_use]
    pub const fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// Returns `true` when `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
    }
}

/// Page size used when the caller does not choose one.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Largest accepted page size; larger requests are clamped.
pub const MAX_PER_PAGE: u32 = 100;

/// One-based page selection for paginated listing.
///
/// Out-of-range values are clamped rather than rejected: page `0` reads as
/// page `1`, and `per_page` is kept within `1..=MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Selects page `page` with `per_page` tasks per page.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Selects the first page with `per_page` tasks per page.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Tasks per page.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Number of tasks preceding this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

/// One page of tasks plus the size of the whole filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks on this page, newest first.
    pub items: Vec<Task>,
    /// Tasks matching the filter across all pages.
    pub total: u64,
    /// Page that was read.
    pub request: PageRequest,
}

impl TaskPage {
    /// A page with no items and a zero total.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            request,
        }
    }

    /// Number of the last non-empty page; `1` for an empty listing.
    #[must_use]
    pub fn last_page(&self) -> u64 {
        self.total
            .div_ceil(u64::from(self.request.per_page()))
            .max(1)
    }
}

/// Dashboard counts of tasks by status.
///
/// The four counts are read independently, so under concurrent writes
/// `total` may disagree with the sum of the per-status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// All tasks.
    pub total: u64,
    /// Tasks with status `pending`.
    pub pending: u64,
    /// Tasks with status `in_progress`.
    pub in_progress: u64,
    /// Tasks with status `completed`.
    pub completed: u64,
}
