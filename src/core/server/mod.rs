//! Generation HTTP Service
//!
//! Serves the generation endpoint and the compiled preview client.
//!
//! ## Endpoints
//! - `POST /api/generate` - prompt in, `{html, css, js}` out
//! - `GET /health` - Health check
//! - everything else - static preview client assets, `index.html` fallback

pub mod error;
pub mod handlers;

pub use error::{GenerateError, ServiceError};
pub use handlers::{run_generation, validate_request, GenerationRequest};

use crate::config::AppConfig;
use crate::core::llm::{GoogleProvider, LLMError, LLMProvider};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Shared, immutable handler state.
#[derive(Clone, Default)]
pub struct ServerState {
    /// `None` when no credential is configured; requests then fail with 500.
    pub provider: Option<Arc<dyn LLMProvider>>,
}

impl ServerState {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Build the upstream provider from config. A missing credential is not an
    /// error here; the endpoint reports it per request.
    pub fn from_config(config: &AppConfig) -> Result<Self, LLMError> {
        match GoogleProvider::from_config(&config.upstream) {
            Ok(provider) => {
                info!(
                    provider = provider.id(),
                    model = %config.upstream.model,
                    endpoint = %provider.endpoint(),
                    "upstream provider configured"
                );
                Ok(Self::new(Arc::new(provider)))
            }
            Err(LLMError::NotConfigured(reason)) => {
                warn!("Upstream credential missing ({}); generation requests will fail", reason);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Build the application router. Static assets are served only when
/// `static_dir` exists.
pub fn router(state: Arc<ServerState>, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route(
            "/api/generate",
            post(handlers::generate).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .with_state(state);

    let app = match static_dir.filter(|dir| dir.is_dir()) {
        Some(dir) => api.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => api,
    };

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

/// Owns the listener task for the generation service.
pub struct GenerationService {
    addr: SocketAddr,
    state: Arc<ServerState>,
    static_dir: Option<PathBuf>,
    bound: Option<SocketAddr>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl GenerationService {
    pub fn new(addr: SocketAddr, state: ServerState) -> Self {
        Self {
            addr,
            state: Arc::new(state),
            static_dir: None,
            bound: None,
            shutdown_tx: None,
            handle: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let host = config.server.host.as_str();
        let port = config.server.port;
        let addr = (host, port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ServiceError::InvalidAddress(format!("{}:{}", host, port)))?;

        let state = ServerState::from_config(config)?;
        Ok(Self::new(addr, state).with_static_dir(&config.server.static_dir))
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Base URL of the bound listener once started.
    pub fn url(&self) -> Option<String> {
        self.bound.map(|addr| format!("http://{}", addr))
    }

    /// Bind and spawn the server. Port 0 picks a free port; the bound address
    /// is returned.
    pub async fn start(&mut self) -> Result<SocketAddr, ServiceError> {
        if self.shutdown_tx.is_some() {
            return Err(ServiceError::AlreadyRunning);
        }

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServiceError::Bind {
                addr: self.addr,
                source,
            })?;
        let bound = listener.local_addr().map_err(|source| ServiceError::Bind {
            addr: self.addr,
            source,
        })?;

        match self.static_dir.as_deref() {
            Some(dir) if dir.is_dir() => info!("Serving preview client from {}", dir.display()),
            Some(dir) => warn!(
                "Static directory {} not found; serving API only",
                dir.display()
            ),
            None => {}
        }

        let app = router(self.state.clone(), self.static_dir.as_deref());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            info!("Generation service listening on http://{}", bound);

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                    info!("Generation service shutting down");
                })
                .await
            {
                tracing::error!("Generation service error: {}", e);
            }
        });

        self.bound = Some(bound);
        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(handle);
        Ok(bound)
    }

    /// Signal shutdown and wait for in-flight requests to drain.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
            info!("Generation service stopped");
        }
        self.bound = None;
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}
