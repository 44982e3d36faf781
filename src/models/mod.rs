mod requests;
mod task;
mod user;
pub mod validate;

pub use requests::{
    CreateTaskRequest, Credentials, FilterTasksQuery, ListTasksQuery, SearchTasksQuery,
    UpdateTaskRequest,
};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::{AuthUser, PublicUser, User};
