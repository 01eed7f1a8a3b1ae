//! Shared application state.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};

use crate::config::PanelConfig;
use crate::notify::Notifier;
use crate::sanity::SanityClient;
use crate::screen::ScreenState;

/// Capacity of the browser event channel. Slow subscribers lose old
/// events rather than blocking publishers.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Event pushed to connected browsers over the live event stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelEvent {
    /// Transient toast to show in the corner.
    Toast { message: String },
    /// The order list changed server-side; clients should reload it.
    OrdersRefreshed,
}

/// Application state shared across all request handlers.
///
/// Cheap to clone; all clones share the same inner state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PanelConfig,
    sanity: SanityClient,
    notifier: Notifier,
    screen: RwLock<ScreenState>,
    events: broadcast::Sender<PanelEvent>,
}

impl AppState {
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        let sanity = SanityClient::new(&config.sanity);
        let notifier = Notifier::new(config.webhook_url.clone());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                sanity,
                notifier,
                screen: RwLock::new(ScreenState::default()),
                events,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn sanity(&self) -> &SanityClient {
        &self.inner.sanity
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    #[must_use]
    pub fn screen(&self) -> &RwLock<ScreenState> {
        &self.inner.screen
    }

    /// Subscribe to panel events for one browser connection.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<PanelEvent> {
        self.inner.events.subscribe()
    }

    /// Broadcast an event to every connected browser. Lagging or absent
    /// subscribers are fine.
    pub fn publish_event(&self, event: PanelEvent) {
        let _ = self.inner.events.send(event);
    }

    /// Refetch the order list under the current filters.
    ///
    /// The store is queried outside the state lock. On failure the
    /// previous orders stay on screen; the error is logged and reported,
    /// not surfaced as a hard failure.
    pub async fn refresh_orders(&self) {
        let (seq, filters) = {
            let mut screen = self.inner.screen.write().await;
            (screen.begin_fetch(), screen.filters)
        };

        let result = self.inner.sanity.recent_orders(&filters).await;

        let mut screen = self.inner.screen.write().await;
        match result {
            Ok(orders) => {
                if screen.finish_fetch::<crate::sanity::SanityError>(seq, Ok(orders)) {
                    tracing::debug!(count = screen.orders.len(), "order list refreshed");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to refresh orders, keeping previous list");
                sentry::capture_error(&e);
                let _ = screen.finish_fetch(seq, Err(e));
            }
        }
    }
}
