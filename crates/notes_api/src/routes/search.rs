use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use notes_core::SearchResults;
use serde::Deserialize;

use super::present;
use crate::{error::ApiError, with_workspace, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Query(query) = query?;
    let Some(q) = present(query.q) else {
        return Err(ApiError::BadRequest(
            "Query parameter q is required".to_string(),
        ));
    };
    let results = with_workspace(&state, move |ws| Ok(ws.search(&q)?)).await?;
    Ok(Json(results))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search))
}
