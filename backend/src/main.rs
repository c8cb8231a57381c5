//! Backend entry-point: loads configuration, prepares storage, and serves the
//! roster API.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::inbound::http::session_config::fingerprint::key_fingerprint;
use roster::inbound::http::session_config::{BuildMode, session_settings_from_env};
use roster::outbound::persistence::{DbPool, run_pending_migrations};
use roster::server::{ServerConfig, create_server};
use roster::settings::RosterSettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RosterSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("loading settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("configuring session cookies")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let bind_addr = settings.bind_addr().wrap_err("parsing bind address")?;
    let mut config = ServerConfig::new(session, bind_addr);

    match settings.pool_config() {
        Some(pool_config) => {
            if settings.run_migrations {
                let url = pool_config.database_url().to_owned();
                let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                    .await
                    .wrap_err("migration task panicked")??;
                info!(applied, "database migrations complete");
            }
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("building database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; using in-memory storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("starting HTTP server")?;
    server.await.wrap_err("HTTP server failed")
}
