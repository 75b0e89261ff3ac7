use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use notes_core::{NewTask, Priority, Task, TaskFilter, TaskPatch, TaskStatus};
use serde::Deserialize;

use super::{nullable, parse_due, present};
use crate::{error::ApiError, with_workspace, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub package_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub package_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub package_id: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// Body of `PUT /api/tasks/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub status: String,
}

impl UpdateTaskBody {
    fn into_patch(self) -> Result<TaskPatch, ApiError> {
        let due_at = match self.due_date {
            Some(value) => Some(parse_due(value.as_deref())?),
            None => None,
        };
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_at,
            package_id: self.package_id,
            tags: self.tags,
        })
    }
}

pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(query) = query?;
    let filter = TaskFilter {
        status: present(query.status)
            .map(|value| value.parse::<TaskStatus>())
            .transpose()?,
        priority: present(query.priority)
            .map(|value| value.parse::<Priority>())
            .transpose()?,
        package_id: present(query.package_id),
    };

    let tasks = with_workspace(&state, move |ws| Ok(ws.tasks.list_tasks(&filter)?)).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(body) = payload?;
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let input = NewTask {
        description: body.description,
        status: body
            .status
            .as_deref()
            .map(|value| value.trim().parse::<TaskStatus>())
            .transpose()?
            .unwrap_or_default(),
        priority: body
            .priority
            .as_deref()
            .map(|value| value.trim().parse::<Priority>())
            .transpose()?
            .unwrap_or_default(),
        due_at: parse_due(body.due_date.as_deref())?,
        package_id: body.package_id.filter(|id| !id.trim().is_empty()),
        tags: body.tags,
        ..NewTask::titled(body.title)
    };

    let task = with_workspace(&state, move |ws| Ok(ws.tasks.create_task(input)?)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = with_workspace(&state, move |ws| Ok(ws.tasks.require_task(&id)?)).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(body) = payload?;
    let patch = body.into_patch()?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No data provided".to_string()));
    }

    let task = with_workspace(&state, move |ws| Ok(ws.tasks.update_task(&id, &patch)?)).await?;
    Ok(Json(task))
}

/// Status-only change; an unknown status name is a 400.
pub async fn set_task_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(body) = payload?;
    let task =
        with_workspace(&state, move |ws| Ok(ws.tasks.set_status(&id, &body.status)?)).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    with_workspace(&state, move |ws| Ok(ws.tasks.delete_task(&id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/status", put(set_task_status))
}
