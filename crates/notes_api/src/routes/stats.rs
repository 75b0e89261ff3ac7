use axum::{extract::State, routing::get, Json, Router};
use notes_core::{PackageStatus, Stats, TaskStatus};
use serde_json::{json, Map, Value};

use crate::{error::ApiError, with_workspace, AppState};

/// Dashboard counts grouped per kind, with snake_case status keys.
fn stats_body(stats: &Stats) -> Value {
    let mut tasks = Map::new();
    tasks.insert("total".into(), json!(stats.tasks_total));
    for status in TaskStatus::ALL {
        let count = stats.tasks_by_status.get(status.as_str()).copied().unwrap_or(0);
        tasks.insert(status.as_str().replace('-', "_"), json!(count));
    }

    let mut packages = Map::new();
    packages.insert("total".into(), json!(stats.packages_total));
    for status in PackageStatus::ALL {
        let count = stats
            .packages_by_status
            .get(status.as_str())
            .copied()
            .unwrap_or(0);
        packages.insert(status.as_str().to_string(), json!(count));
    }

    json!({
        "tasks": tasks,
        "notes": { "total": stats.notes_total },
        "packages": packages,
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let stats = with_workspace(&state, |ws| Ok(ws.stats()?)).await?;
    Ok(Json(stats_body(&stats)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}
