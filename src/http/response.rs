//! Success envelopes.

use crate::task::domain::{Task, TaskPage};
use serde::Serialize;

/// `{data}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataResponse<T> {
    /// Payload.
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wraps `data`.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Position of a page within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// One-based page number that was read.
    pub current_page: u32,
    /// Page size.
    pub per_page: u32,
    /// Matches across all pages.
    pub total: u64,
    /// Number of the last page; `1` for an empty listing.
    pub last_page: u64,
}

/// `{data, meta}` envelope for paginated listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedResponse<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Pagination details.
    pub meta: PageMeta,
}

impl PagedResponse<Task> {
    /// Wraps a page of tasks.
    #[must_use]
    pub fn from_page(page: TaskPage) -> Self {
        let meta = PageMeta {
            current_page: page.request.page(),
            per_page: page.request.per_page(),
            total: page.total,
            last_page: page.last_page(),
        };
        Self {
            data: page.items,
            meta,
        }
    }
}

/// `{message, data?}` envelope returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse<T> {
    /// Confirmation message.
    pub message: &'static str,
    /// Affected resource, when there is one to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> MessageResponse<T> {
    /// Confirmation carrying the affected resource.
    #[must_use]
    pub const fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl MessageResponse<()> {
    /// Confirmation without a payload.
    #[must_use]
    pub const fn message(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}
