//! Domain model for tasks.
//!
//! Tasks are plain records: there is no state machine behind the status
//! field, so the domain consists of the record itself, the values that flow
//! to and from the task store, and the input validator shared by the create
//! and update paths.

mod error;
mod ids;
mod status;
mod task;
pub mod validation;

pub use error::{ParseTaskStatusError, ValidationError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, NewTask, PageRequest, PersistedTaskData, TITLE_MAX_CHARS,
    Task, TaskFilter, TaskPage, TaskPatch, TaskStatistics,
};
pub use validation::{ValidationMode, validate, validate_new_task, validate_task_patch};
