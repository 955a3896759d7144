//! RPC server over a Unix domain socket.
//!
//! # Responsibilities
//! - Expose `Mount` and `Version` as JSON endpoints
//! - Map error codes onto HTTP statuses
//! - Own the socket file: remove stale ones on bind, clean up on shutdown

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tokio::net::UnixListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::ErrorCode;
use crate::rpc::adapter::TransportAdapter;
use crate::rpc::contract::{MountRequest, MountResponse, VersionResponse};

pub const MOUNT_ROUTE: &str = "/v1alpha1/mount";
pub const VERSION_ROUTE: &str = "/v1alpha1/version";

/// RPC server for the provider contract.
pub struct ProviderServer {
    router: Router,
    socket_path: PathBuf,
}

impl ProviderServer {
    /// Create a server dispatching to `adapter`.
    pub fn new<A: TransportAdapter + 'static>(adapter: Arc<A>, config: &ServerConfig) -> Self {
        let router = Self::build_router(
            adapter,
            Duration::from_secs(config.request_timeout_secs),
        );
        Self {
            router,
            socket_path: PathBuf::from(&config.socket_path),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router<A: TransportAdapter + 'static>(
        adapter: Arc<A>,
        request_timeout: Duration,
    ) -> Router {
        Router::new()
            .route(MOUNT_ROUTE, post(mount_handler::<A>))
            .route(VERSION_ROUTE, get(version_handler::<A>))
            .with_state(adapter)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Bind the configured socket, replacing a stale socket file.
    pub fn bind(&self) -> io::Result<UnixListener> {
        bind_socket(&self.socket_path)
    }

    /// Serve until `shutdown` fires, then remove the socket file.
    pub async fn run(
        self,
        listener: UnixListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> io::Result<()> {
        tracing::info!(socket = %self.socket_path.display(), "RPC server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("RPC server draining");
            })
            .await?;

        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(socket = %self.socket_path.display(), error = %e, "Failed to remove socket");
            }
        }

        tracing::info!("RPC server stopped");
        Ok(())
    }
}

/// Bind a Unix listener at `path`, removing a leftover socket file first.
pub fn bind_socket(path: &Path) -> io::Result<UnixListener> {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(socket = %path.display(), "Removed stale socket"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    UnixListener::bind(path)
}

/// HTTP status used for a failed mount.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MalformedInput
        | ErrorCode::ValidationError
        | ErrorCode::UnsupportedExtension
        | ErrorCode::MissingTargetPath => StatusCode::BAD_REQUEST,
        ErrorCode::RetrievalFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::FileWriteFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn mount_handler<A: TransportAdapter>(
    State(adapter): State<Arc<A>>,
    Json(request): Json<MountRequest>,
) -> (StatusCode, Json<MountResponse>) {
    tracing::debug!(target_path = %request.target_path, "Mount request received");
    let response = adapter.handle_mount(request).await;
    let status = response
        .error
        .as_ref()
        .map(|e| status_for(e.code))
        .unwrap_or(StatusCode::OK);
    (status, Json(response))
}

async fn version_handler<A: TransportAdapter>(
    State(adapter): State<Arc<A>>,
) -> Json<VersionResponse> {
    Json(adapter.handle_version())
}
