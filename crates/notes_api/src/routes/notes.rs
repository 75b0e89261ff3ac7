use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use notes_core::{NewNote, Note, NoteFilter, NotePatch};
use serde::Deserialize;

use super::{nullable, present};
use crate::{error::ApiError, with_workspace, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct NoteQuery {
    pub package_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub package_id: Option<String>,
    #[serde(default)]
    pub linked_tasks: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub package_id: Option<Option<String>>,
    pub linked_tasks: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateNoteBody> for NotePatch {
    fn from(body: UpdateNoteBody) -> Self {
        NotePatch {
            title: body.title,
            content: body.content,
            package_id: body.package_id,
            linked_tasks: body.linked_tasks,
            tags: body.tags,
        }
    }
}

pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<NoteQuery>, QueryRejection>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let Query(query) = query?;
    let filter = NoteFilter {
        package_id: present(query.package_id),
    };
    let notes = with_workspace(&state, move |ws| Ok(ws.notes.list_notes(&filter)?)).await?;
    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(body) = payload?;
    if body.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }
    let input = NewNote {
        title: body.title,
        content: body.content,
        package_id: body.package_id.filter(|id| !id.trim().is_empty()),
        linked_tasks: body.linked_tasks,
        tags: body.tags,
    };

    let note = with_workspace(&state, move |ws| Ok(ws.notes.create_note(input)?)).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let note = with_workspace(&state, move |ws| Ok(ws.notes.require_note(&id)?)).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteBody>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(body) = payload?;
    let patch = NotePatch::from(body);
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No data provided".to_string()));
    }

    let note = with_workspace(&state, move |ws| Ok(ws.notes.update_note(&id, &patch)?)).await?;
    Ok(Json(note))
}

/// Body of `POST /api/notes/{id}/links`.
#[derive(Debug, Deserialize)]
pub struct LinkBody {
    #[serde(default)]
    pub task_id: String,
}

/// Adds a task id to the note's links. Linking twice is a no-op and the
/// task id is not checked against stored tasks.
pub async fn link_note_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LinkBody>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(body) = payload?;
    let task_id = body.task_id.trim().to_string();
    if task_id.is_empty() {
        return Err(ApiError::BadRequest("task_id is required".to_string()));
    }

    let (note, _) =
        with_workspace(&state, move |ws| Ok(ws.notes.link_task(&id, &task_id)?)).await?;
    Ok(Json(note))
}

pub async fn unlink_note_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<Note>, ApiError> {
    let (note, _) =
        with_workspace(&state, move |ws| Ok(ws.notes.unlink_task(&id, &task_id)?)).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    with_workspace(&state, move |ws| Ok(ws.notes.delete_note(&id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/notes/{id}/links", post(link_note_task))
        .route("/notes/{id}/links/{task_id}", delete(unlink_note_task))
}
