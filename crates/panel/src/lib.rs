//! Peony Panel - Staff-facing order management.
//!
//! Serves the orders screen on port 3010 (by default).
//!
//! # Architecture
//!
//! - Axum web framework, server-side rendering with Askama
//! - Orders live in a hosted Sanity Content Lake; the panel holds no
//!   database of its own
//! - A background task follows the store's change feed and announces
//!   newly received orders (webhook alert, browser toast, list refresh)
//!
//! The library target exists so the CLI can reuse the store client and
//! configuration; the panel binary is a thin wrapper around [`serve`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod feed;
pub mod filters;
pub mod notify;
pub mod routes;
pub mod sanity;
pub mod screen;
pub mod state;

use sentry::integrations::tracing as sentry_tracing;

use crate::config::PanelConfig;
use crate::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
#[must_use]
pub fn init_sentry(config: &PanelConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
#[must_use]
pub fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Run the panel: change-feed task plus HTTP server, until shutdown.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or the server
/// fails while running.
pub async fn serve(config: PanelConfig) -> Result<(), std::io::Error> {
    let state = AppState::new(config);

    // Change-feed task, stopped via watch channel after the server exits
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let feed_task = tokio::spawn(feed::run(state.clone(), shutdown_rx));

    let app = routes::router()
        .with_state(state.clone())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = state.config().socket_addr();
    tracing::info!("panel listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    let _ = feed_task.await;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
