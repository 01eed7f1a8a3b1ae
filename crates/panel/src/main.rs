//! Peony Panel binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use peony_panel::config::PanelConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let config = PanelConfig::from_env().expect("Failed to load configuration");

    // Sentry must come up before the tracing subscriber
    let _sentry_guard = peony_panel::init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "peony_panel=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry::integrations::tracing::layer().event_filter(peony_panel::sentry_event_filter))
        .init();

    peony_panel::serve(config).await.expect("Server error");
}
