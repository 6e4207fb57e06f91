//! Reusable HTTP server with optional CORS support.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use http::{header::HeaderName, Method};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::debug;

/// CORS configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Use `vec!["*".to_string()]` to allow all origins.
    pub allowed_origins: Vec<String>,
    /// Max age for CORS preflight cache in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age_secs: 3600,
        }
    }
}

impl CorsConfig {
    /// Parse comma-separated origins string.
    pub fn from_comma_separated(origins: &str) -> Self {
        let allowed_origins: Vec<String> = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            allowed_origins: if allowed_origins.is_empty() {
                vec!["*".to_string()]
            } else {
                allowed_origins
            },
            max_age_secs: 3600,
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CORS configuration; `None` disables the CORS layer.
    pub cors_config: Option<CorsConfig>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_config: None,
        }
    }
}

/// Build a CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.len() == 1 && config.allowed_origins[0] == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
        ])
        .max_age(Duration::from_secs(config.max_age_secs))
}

/// Run an HTTP server with the provided router and configuration, shutting
/// down gracefully when the cancellation token fires.
pub async fn run_http_server(
    config: HttpServerConfig,
    router: Router,
    cancellation_token: CancellationToken,
) -> Result<(), anyhow::Error> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let router = match &config.cors_config {
        Some(cors) => router.layer(build_cors_layer(cors)),
        None => router,
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    debug!(address = %addr, "starting HTTP server");

    let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
        cancellation_token.cancelled().await;
        debug!("HTTP server shutdown signal received");
    });

    match serve.await {
        Ok(_) => {
            debug!("HTTP server stopped gracefully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("HTTP server error: {}", e);
            Err(e.into())
        }
    }
}
