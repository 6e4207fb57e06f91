mod config;

use std::sync::Arc;

use common::auth::{
    Argon2PasswordService, AuthTokenProvider, JwtAuthTokenProvider, JwtConfig, PasswordService,
};
use common::domain::{ConfigStore, DeviceRepository, UserRepository};
use common::http::{CorsConfig, HttpServerConfig};
use common::postgres::{
    PostgresClient, PostgresConfig, PostgresDeviceRepository, PostgresUserRepository,
};
use common::storage::FsConfigStore;
use common::telemetry::{init_telemetry, TelemetryConfig};
use config::ServiceConfig;
use confhub_api::confhub_api::ConfhubApi;
use confhub_api::domain::{DeviceService, UserService};
use confhub_api::http::AppState;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
    }) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!(
        http_host = %config.http_host,
        http_port = config.http_port,
        "Starting confhub server"
    );
    debug!("Configuration: {:?}", config);

    // Shared infrastructure
    let postgres_config = PostgresConfig {
        host: config.postgres_host.clone(),
        port: config.postgres_port,
        database: config.postgres_database.clone(),
        username: config.postgres_username.clone(),
        password: config.postgres_password.clone(),
        max_pool_size: config.postgres_max_pool_size,
    };

    let postgres_client = match PostgresClient::connect(&postgres_config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create PostgreSQL client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = postgres_client.ping().await {
        error!("Failed to reach PostgreSQL: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = postgres_client.ensure_schema().await {
        error!("Failed to ensure database schema: {}", e);
        std::process::exit(1);
    }

    let device_repository: Arc<dyn DeviceRepository> =
        Arc::new(PostgresDeviceRepository::new(postgres_client.clone()));
    let user_repository: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(postgres_client));
    let config_store: Arc<dyn ConfigStore> = Arc::new(FsConfigStore::new(&config.upload_dir));

    let auth_token_provider: Arc<dyn AuthTokenProvider> = Arc::new(JwtAuthTokenProvider::new(
        JwtConfig::new(config.jwt_secret.clone(), config.jwt_expiration_hours),
    ));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    // Domain services
    let device_service = Arc::new(DeviceService::new(device_repository, config_store));
    let user_service = Arc::new(UserService::new(
        user_repository,
        auth_token_provider.clone(),
        password_service,
    ));

    let state = AppState {
        device_service,
        user_service,
        auth_token_provider,
        session_expiration_hours: config.jwt_expiration_hours,
        secure_cookies: config.secure_cookies,
    };

    let server_config = HttpServerConfig {
        host: config.http_host.clone(),
        port: config.http_port,
        cors_config: Some(CorsConfig::from_comma_separated(
            &config.cors_allowed_origins,
        )),
    };

    let api = ConfhubApi::new(state, server_config);

    // Shutdown token, cancelled on SIGINT/SIGTERM
    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        signal_token.cancel();
    });

    if let Err(e) = api.run(shutdown_token).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("confhub server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
