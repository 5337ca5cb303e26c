//! Route handlers.

mod logs;
mod system;
mod tasks;

pub use logs::{LogsQuery, list_logs};
pub use system::{health, info};
pub use tasks::{
    ListTasksQuery, create_task, delete_task, list_tasks, show_task, task_statistics, update_task,
};
