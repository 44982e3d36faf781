use redis::{AsyncCommands, Client};
use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::{Task, User};

// Thin document-store layer over Redis. Users and tasks are stored as JSON
// documents, one key each; a per-user list keeps task ids in insertion order.
//
//   user:{username}   -> User JSON (username uniqueness rides on the key)
//   task:{task_id}    -> Task JSON
//   user_tasks:{uid}  -> list of task ids owned by user {uid}
pub struct RedisService {
    client: Arc<Client>,
}

impl RedisService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn get_user(&self, username: &str) -> AppResult<Option<User>> {
        let mut conn = self.client.get_async_connection().await?;
        let user_data: Option<String> = conn.get(format!("user:{}", username)).await?;
        user_data.map(|data| parse_document(&data)).transpose()
    }

    pub async fn user_exists(&self, username: &str) -> AppResult<bool> {
        let mut conn = self.client.get_async_connection().await?;
        let exists: bool = conn.exists(format!("user:{}", username)).await?;
        Ok(exists)
    }

    // Atomic SET NX: returns false when the username is already taken, which is
    // how a concurrent duplicate registration loses the race.
    pub async fn create_user(&self, user: &User) -> AppResult<bool> {
        let mut conn = self.client.get_async_connection().await?;
        let created: bool = conn
            .set_nx(
                format!("user:{}", user.username),
                serialize_document(user)?,
            )
            .await?;
        Ok(created)
    }

    pub async fn get_task(&self, task_id: &str) -> AppResult<Option<Task>> {
        let mut conn = self.client.get_async_connection().await?;
        let task_data: Option<String> = conn.get(format!("task:{}", task_id)).await?;
        task_data.map(|data| parse_document(&data)).transpose()
    }

    pub async fn save_task(&self, task: &Task) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(format!("task:{}", task.id), serialize_document(task)?)
            .await?;
        Ok(())
    }

    // Creates the task document and appends it to the owner's index list.
    pub async fn create_task(&self, task: &Task) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(format!("task:{}", task.id), serialize_document(task)?)
            .await?;
        conn.rpush::<_, _, i64>(format!("user_tasks:{}", task.user_id), &task.id)
            .await?;
        Ok(())
    }

    pub async fn delete_task(&self, task: &Task) -> AppResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.del::<_, ()>(format!("task:{}", task.id)).await?;
        conn.lrem::<_, _, i64>(format!("user_tasks:{}", task.user_id), 1, &task.id)
            .await?;
        Ok(())
    }

    // All tasks owned by a user, in insertion order. Filtering and pagination
    // happen in the handler layer on top of this.
    pub async fn get_user_tasks(&self, user_id: &str) -> AppResult<Vec<Task>> {
        let mut conn = self.client.get_async_connection().await?;
        let task_ids: Vec<String> = conn
            .lrange(format!("user_tasks:{}", user_id), 0, -1)
            .await?;

        let mut tasks = Vec::with_capacity(task_ids.len());
        for task_id in &task_ids {
            let task_data: Option<String> = conn.get(format!("task:{}", task_id)).await?;
            match task_data {
                Some(data) => tasks.push(parse_document(&data)?),
                None => tracing::warn!("Task {} missing for user {}", task_id, user_id),
            }
        }

        Ok(tasks)
    }
}

fn serialize_document<T: serde::Serialize>(document: &T) -> AppResult<String> {
    serde_json::to_string(document).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to serialize document",
            e.to_string(),
        ))
        .into()
    })
}

fn parse_document<T: serde::de::DeserializeOwned>(data: &str) -> AppResult<T> {
    serde_json::from_str(data).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "Failed to parse document",
            e.to_string(),
        ))
        .into()
    })
}

impl Clone for RedisService {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}
