use postboard_db::client::{DbClient, DbError};
use serde::Deserialize;
use server::ServerState;
use sqlx::postgres::PgPoolOptions;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod server;
mod service;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error connecting to the database: {0}")]
    DbConnect(sqlx::Error),
    #[error("Error preparing the database: {0}")]
    Db(#[from] DbError),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

fn default_max_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    server_address: IpAddr,
    server_port: u16,
    database_url: String,
    #[serde(default = "default_max_connections")]
    database_max_connections: u32,
    #[serde(default = "default_run_migrations")]
    run_migrations: bool,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "postboard_api=debug,\
                postboard_db=debug,\
                tower_http=debug,axum::rejection=trace,sqlx=warn"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

async fn connect_db(env: &Env) -> Result<DbClient, InitError> {
    let pool = PgPoolOptions::new()
        .max_connections(env.database_max_connections)
        .connect(&env.database_url)
        .await
        .map_err(InitError::DbConnect)?;
    let db_client = DbClient::new(pool);

    if env.run_migrations {
        db_client.migrate().await?;
        info!("Database migrations applied");
    }

    Ok(db_client)
}

fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();

    let signal_token = token.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Could not listen for shutdown signal");
            return;
        }
        info!("Shutting down");
        signal_token.cancel();
    });

    token
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let db_client = connect_db(&env).await?;
    let state = ServerState {
        post_service: Arc::new(db_client),
    };

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes().with_state(state).layer(tracing_layer);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on_ctrl_c().cancelled_owned())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
