//! Live event stream for connected browsers.

use std::convert::Infallible;

use async_stream::stream;
use axum::extract::State;
use axum::response::Sse;
use axum::response::sse::{Event, KeepAlive};
use tokio::sync::broadcast;

use crate::state::AppState;

/// Relay panel events to one browser as server-sent events.
///
/// A client that falls behind the channel skips the missed events and
/// keeps going; the next full page load resynchronizes it anyway.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.subscribe_events();

    let event_stream = stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_else(|_| {
                        r#"{"kind":"error","message":"Failed to serialize event"}"#.to_string()
                    });
                    yield Ok(Event::default().data(json));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "browser event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
