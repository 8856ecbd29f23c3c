use std::time::Duration;
use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth};
use service::auth::password::PasswordPolicy;
use service::auth::repo::seaorm::SeaOrmAuthStorage;
use service::auth::repository::AuthStorage;
use service::auth::AuthService;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(c) => (c.server.host.clone(), c.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: wire storage, the auth service and the router, then serve
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(error = %e, "config.toml not usable, falling back to environment");
            None
        }
    };

    // DB connection pool; shared read-only across handlers
    let db = match &cfg {
        Some(c) => models::db::connect_with_config(&c.database).await?,
        None => models::db::connect().await?,
    };

    let auth_cfg = cfg.as_ref().map(|c| c.auth.clone()).unwrap_or_default();
    let passwords = PasswordPolicy::new(
        auth_cfg.hashing.memory_kib,
        auth_cfg.hashing.iterations,
        auth_cfg.hashing.parallelism,
    )?;

    let storage: Arc<dyn AuthStorage> = Arc::new(SeaOrmAuthStorage { db });
    let svc = AuthService::new(storage, passwords, Duration::from_secs(auth_cfg.token_ttl_secs));
    let state = auth::ServerState { auth: Arc::new(svc) };

    let request_timeout = cfg.as_ref().map(|c| c.server.request_timeout_secs).unwrap_or(10);
    let app: Router = routes::build_router(build_cors(), state, Duration::from_secs(request_timeout));

    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, token_ttl_secs = auth_cfg.token_ttl_secs, "starting sso server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
