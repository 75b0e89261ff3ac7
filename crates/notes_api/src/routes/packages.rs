use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use log::info;
use notes_core::{
    short_id, NewPackage, Package, PackageDetails, PackageFilter, PackagePatch, PackageStatus,
};
use serde::Deserialize;

use super::{nullable, parse_due, present};
use crate::{error::ApiError, with_workspace, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct PackageQuery {
    pub status: Option<String>,
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePackageBody {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePackageBody {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
    pub status: Option<String>,
}

impl UpdatePackageBody {
    fn into_patch(self) -> Result<PackagePatch, ApiError> {
        let due_at = match self.due_date {
            Some(value) => Some(parse_due(value.as_deref())?),
            None => None,
        };
        Ok(PackagePatch {
            name: self.name,
            description: self.description,
            parent_id: self.parent_id,
            due_at,
            status: self.status,
        })
    }
}

pub async fn list_packages(
    State(state): State<AppState>,
    query: Result<Query<PackageQuery>, QueryRejection>,
) -> Result<Json<Vec<Package>>, ApiError> {
    let Query(query) = query?;
    let filter = PackageFilter {
        status: present(query.status)
            .map(|value| value.parse::<PackageStatus>())
            .transpose()?,
        parent_id: present(query.parent_id),
    };
    let packages =
        with_workspace(&state, move |ws| Ok(ws.packages.list_packages(&filter)?)).await?;
    Ok(Json(packages))
}

pub async fn create_package(
    State(state): State<AppState>,
    payload: Result<Json<CreatePackageBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Package>), ApiError> {
    let Json(body) = payload?;
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }
    let status = body
        .status
        .as_deref()
        .map(|value| value.trim().parse::<PackageStatus>())
        .transpose()?
        .unwrap_or_default();
    let input = NewPackage {
        name: body.name,
        description: body.description,
        parent_id: body.parent_id.filter(|id| !id.trim().is_empty()),
        due_at: parse_due(body.due_date.as_deref())?,
    };

    let package = with_workspace(&state, move |ws| {
        let package = ws.packages.create_package(input)?;
        if status == package.status {
            return Ok(package);
        }
        Ok(ws.packages.set_status(&package.id, status.as_str())?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(package)))
}

pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PackageDetails>, ApiError> {
    let details = with_workspace(&state, move |ws| Ok(ws.package_details(&id)?)).await?;
    Ok(Json(details))
}

pub async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePackageBody>, JsonRejection>,
) -> Result<Json<Package>, ApiError> {
    let Json(body) = payload?;
    let patch = body.into_patch()?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No data provided".to_string()));
    }

    let package =
        with_workspace(&state, move |ws| Ok(ws.packages.update_package(&id, &patch)?)).await?;
    Ok(Json(package))
}

/// Deletes the package with its tasks and notes.
pub async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let summary = with_workspace(&state, {
        let id = id.clone();
        move |ws| Ok(ws.packages.delete_package(&id)?)
    })
    .await?;
    info!(
        "event=api_package_delete module=api status=ok id={} tasks={} notes={}",
        short_id(&id),
        summary.tasks_deleted,
        summary.notes_deleted
    );
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/packages", get(list_packages).post(create_package))
        .route(
            "/packages/{id}",
            get(get_package).put(update_package).delete(delete_package),
        )
}
