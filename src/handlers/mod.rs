mod auth;
mod task;

pub use auth::{login, register};
pub use task::{
    create_task, delete_task, filter_tasks, get_task_by_id, get_tasks, search_tasks, update_task,
};
