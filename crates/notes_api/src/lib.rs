//! HTTP/JSON API over `notes_core`.
//!
//! # Responsibility
//! - Expose tasks, notes, packages, search and stats as JSON resources.
//! - Serve from the CLI (`notes server`) or from a background thread
//!   started by the shell's `gui` command.
//!
//! # Invariants
//! - Every request opens its own SQLite connection on a blocking worker.
//! - Errors always render as `{"error": message}`.

pub mod error;
mod routes;

use axum::{routing::get, Router};
use log::{error, info};
use notes_core::{open_db, Workspace};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

pub use error::{ApiError, ServerError};

/// Shared handler state: where to open the database.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(routes::tasks::router())
        .merge(routes::notes::router())
        .merge(routes::packages::router())
        .merge(routes::search::router())
        .merge(routes::stats::router());

    Router::new()
        .route("/", get(routes::landing::landing_page))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Runs `op` against a fresh connection on the blocking pool.
pub(crate) async fn with_workspace<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Workspace<'_>) -> Result<T, ApiError> + Send + 'static,
{
    let db_path = Arc::clone(&state.db_path);
    tokio::task::spawn_blocking(move || {
        let conn = open_db(db_path.as_path())?;
        let workspace = Workspace::new(&conn);
        op(&workspace)
    })
    .await
    .map_err(|err| ApiError::Internal(err.to_string()))?
}

fn loopback(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, port))
}

/// Serves on `127.0.0.1:port` until the process exits.
pub async fn serve(db_path: PathBuf, port: u16) -> Result<(), ServerError> {
    // Fail before binding if the database cannot be opened or migrated.
    open_db(&db_path)?;
    let addr = loopback(port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    run(listener, AppState::new(db_path)).await
}

async fn run(listener: tokio::net::TcpListener, state: AppState) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    info!("event=api_listen module=api status=ok addr={}", addr);
    axum::serve(listener, router(state)).await?;
    info!("event=api_stop module=api status=ok");
    Ok(())
}

/// A server running on its own thread and runtime.
#[derive(Debug)]
pub struct BackgroundServer {
    pub addr: SocketAddr,
    pub handle: JoinHandle<()>,
}

impl BackgroundServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Binds synchronously, then serves on a new OS thread.
///
/// Bind and database errors are returned to the caller; later failures are
/// only logged.
pub fn spawn_background(db_path: PathBuf, port: u16) -> Result<BackgroundServer, ServerError> {
    open_db(&db_path)?;
    let addr = loopback(port);
    let listener =
        std::net::TcpListener::bind(addr).map_err(|source| ServerError::Bind { addr, source })?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;

    let handle = std::thread::Builder::new()
        .name("notes-api".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!(
                        "event=api_runtime module=api status=error error={}",
                        err
                    );
                    return;
                }
            };
            let result = runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)?;
                run(listener, AppState::new(db_path)).await
            });
            if let Err(err) = result {
                error!("event=api_serve module=api status=error error={}", err);
            }
        })?;

    Ok(BackgroundServer { addr, handle })
}
