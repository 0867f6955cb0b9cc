//! # HTTP Server
//!
//! Combines the search, translation, proxy and health routers into one
//! axum application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::graphql_routes::graphql_routes;
use super::observability_routes::observability_routes;
use super::proxy_routes::proxy_routes;
use super::search_routes::search_routes;
use super::webhook_routes::webhook_routes;
use crate::config::GatewayConfig;
use crate::crm::{CrmBackend, CrmError, CrmResult, HubSpotClient};

/// State shared by every handler
pub struct AppState {
    backend: Option<Arc<dyn CrmBackend>>,
    started_at: DateTime<Utc>,
    port: u16,
}

impl AppState {
    pub fn new(backend: Option<Arc<dyn CrmBackend>>, port: u16) -> Self {
        Self {
            backend,
            started_at: Utc::now(),
            port,
        }
    }

    /// Port the gateway listens on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The configured backend, or `CredentialMissing`
    pub fn backend(&self) -> CrmResult<&dyn CrmBackend> {
        self.backend.as_deref().ok_or(CrmError::CredentialMissing)
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// HTTP server for the CRM gateway
pub struct HttpServer {
    config: GatewayConfig,
    router: Router,
}

impl HttpServer {
    /// Build a server backed by HubSpot when a token is configured
    pub fn new(config: GatewayConfig) -> Self {
        let backend: Option<Arc<dyn CrmBackend>> = match HubSpotClient::new(&config.crm) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!(error = %e, "CRM backend unavailable; search and proxy routes will answer 503");
                None
            }
        };
        Self::with_backend(config, backend)
    }

    /// Build a server around an explicit backend
    pub fn with_backend(config: GatewayConfig, backend: Option<Arc<dyn CrmBackend>>) -> Self {
        let state = Arc::new(AppState::new(backend, config.port));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &GatewayConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(observability_routes(state.clone()))
            .merge(graphql_routes(state.clone()))
            .nest("/api/search", search_routes(state.clone()))
            .nest("/api/hubspot", proxy_routes(state.clone()))
            .nest("/webhooks", webhook_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address: {}", e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "CRM gateway listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_without_token_is_unconfigured() {
        let server = HttpServer::new(GatewayConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
        let _router = server.router();
    }

    #[test]
    fn test_state_backend_missing() {
        let state = AppState::new(None, 3000);
        assert!(!state.is_configured());
        assert!(matches!(state.backend(), Err(CrmError::CredentialMissing)));
    }

    #[test]
    fn test_restricted_cors_builds() {
        let config = GatewayConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_backend(config, None).router();
    }
}
