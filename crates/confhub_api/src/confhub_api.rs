use common::http::{run_http_server, HttpServerConfig};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::http::{build_router, AppState};

/// Application module bundling the route table with its server configuration
pub struct ConfhubApi {
    state: AppState,
    config: HttpServerConfig,
}

impl ConfhubApi {
    pub fn new(state: AppState, config: HttpServerConfig) -> Self {
        debug!("initializing confhub API module");
        Self { state, config }
    }

    /// Serve until the cancellation token fires
    pub async fn run(self, cancellation_token: CancellationToken) -> anyhow::Result<()> {
        let router = build_router(self.state);
        run_http_server(self.config, router, cancellation_token).await
    }
}
