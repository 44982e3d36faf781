use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::extractors::{Json, Query};
use crate::models::{
    AuthUser, CreateTaskRequest, FilterTasksQuery, ListTasksQuery, SearchTasksQuery, Task,
    TaskPriority, TaskStatus, UpdateTaskRequest,
};
use crate::AppState;

pub async fn create_task(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(request): Json<CreateTaskRequest>,
) -> AppResult<Response> {
    request.validate()?;
    tracing::info!("Creating task for user: {}", auth_user.username);

    let task = build_task(request, auth_user.id);
    redis_service.create_task(&task).await?;

    tracing::debug!("Created task: {}", task.id);
    Ok((StatusCode::CREATED, Json(task)).into_response())
}

pub async fn get_tasks(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListTasksQuery>,
) -> AppResult<Response> {
    query.validate()?;
    tracing::debug!("Listing tasks for user: {}", auth_user.username);

    let tasks = redis_service.get_user_tasks(&auth_user.id).await?;
    let page = paginate(tasks, query.page, query.limit);

    Ok(Json(page).into_response())
}

pub async fn filter_tasks(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<FilterTasksQuery>,
) -> AppResult<Response> {
    query.validate()?;
    tracing::debug!(
        "Filtering tasks for user: {} (status: {:?}, priority: {:?})",
        auth_user.username,
        query.status,
        query.priority
    );

    let tasks = redis_service.get_user_tasks(&auth_user.id).await?;
    let filtered = apply_filter(tasks, query.status, query.priority);
    let page = paginate(filtered, query.page, query.limit);

    Ok(Json(page).into_response())
}

pub async fn search_tasks(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<SearchTasksQuery>,
) -> AppResult<Response> {
    query.validate()?;
    tracing::debug!("Searching tasks for user: {}", auth_user.username);

    let tasks = redis_service.get_user_tasks(&auth_user.id).await?;
    let matched = apply_search(tasks, query.title.as_deref(), query.description.as_deref());
    let page = paginate(matched, query.page, query.limit);

    Ok(Json(page).into_response())
}

pub async fn get_task_by_id(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(task_id): Path<String>,
) -> AppResult<Response> {
    tracing::debug!("Fetching task: {}", task_id);

    let task = authorize_task(redis_service.get_task(&task_id).await?, &auth_user.id)?;

    Ok(Json(task).into_response())
}

pub async fn update_task(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(task_id): Path<String>,
    Json(patch): Json<UpdateTaskRequest>,
) -> AppResult<Response> {
    patch.validate()?;
    tracing::info!("Updating task: {}", task_id);

    let mut task = authorize_task(redis_service.get_task(&task_id).await?, &auth_user.id)?;
    patch.apply(&mut task);
    redis_service.save_task(&task).await?;

    Ok(Json(task).into_response())
}

pub async fn delete_task(
    State((redis_service, _)): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(task_id): Path<String>,
) -> AppResult<Response> {
    tracing::info!("Deleting task: {}", task_id);

    let task = authorize_task(redis_service.get_task(&task_id).await?, &auth_user.id)?;
    redis_service.delete_task(&task).await?;

    Ok(Json(json!({ "message": "Task deleted successfully" })).into_response())
}

// Ownership is fixed at creation: the new record is stamped with the
// authenticated creator's id, never one taken from the request body.
fn build_task(request: CreateTaskRequest, owner_id: String) -> Task {
    Task {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        status: request.status,
        priority: request.priority,
        due_date: request.due_date,
        user_id: owner_id,
    }
}

// Authorize-then-act guard. Existence is decided before ownership: a missing id
// is NotFound for every caller; only a real task with a different owner is
// Forbidden.
fn authorize_task(task: Option<Task>, owner_id: &str) -> AppResult<Task> {
    let task = task.ok_or(AppError::NotFound("Task"))?;

    if task.user_id != owner_id {
        return Err(AppError::Forbidden);
    }

    Ok(task)
}

// Pagination is 1-indexed: skip = limit * (page - 1). Page and limit are
// validated positive before this is reached.
fn paginate(tasks: Vec<Task>, page: u32, limit: u32) -> Vec<Task> {
    let skip = limit as usize * (page as usize - 1);
    tasks.into_iter().skip(skip).take(limit as usize).collect()
}

// Exact-match filters compose with logical AND across fields.
fn apply_filter(
    tasks: Vec<Task>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| status.map_or(true, |wanted| task.status == wanted))
        .filter(|task| priority.map_or(true, |wanted| task.priority == wanted))
        .collect()
}

// Case-insensitive substring search. Title and description terms compose with
// logical OR; with neither given, every task matches.
fn apply_search(tasks: Vec<Task>, title: Option<&str>, description: Option<&str>) -> Vec<Task> {
    if title.is_none() && description.is_none() {
        return tasks;
    }

    tasks
        .into_iter()
        .filter(|task| {
            let title_hit = title.map_or(false, |term| contains_ci(&task.title, term));
            let description_hit =
                description.map_or(false, |term| contains_ci(&task.description, term));
            title_hit || description_hit
        })
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
