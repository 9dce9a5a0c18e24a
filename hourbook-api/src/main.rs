use std::process::exit;

use anyhow::Context;
use axum::http::HeaderName;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app_state::AppState, auth::AuthSettings, domain::models::UserId};

mod adapters;
mod app_state;
mod auth;
mod config;
mod domain;
mod router;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!("Failed to start hourbook: {:#}", err);
        exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = config::read_config().context("failed to read configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect_with(settings.database.with_db())
        .await
        .context("could not connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let auth = AuthSettings {
        user_header: HeaderName::try_from(settings.application.user_header.as_str())
            .context("application.user_header is not a valid header name")?,
        dev_user_id: settings.application.dev_user_id.map(UserId::new),
    };
    if let Some(user_id) = auth.dev_user_id {
        tracing::warn!("Requests without {} act as user {}", auth.user_header, user_id);
    }

    let app_state = AppState::new(pool, auth, &settings.reports.currency_symbol);
    let app = router::create(app_state, &settings.application.app_url);

    let address = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
