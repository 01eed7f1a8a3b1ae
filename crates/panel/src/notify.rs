//! New-order alerts via incoming webhook.
//!
//! Alerts are best-effort. A dead webhook must never take the panel
//! down, so failures are logged and swallowed.

use peony_core::Order;
use serde::Serialize;
use tracing::instrument;

/// Posts new-order alerts to an incoming webhook, if one is configured.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct WebhookMessage {
    text: String,
}

impl Notifier {
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Whether alerts are configured at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Announce a newly received order. Fire-and-forget.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn new_order(&self, order: &Order) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let message = WebhookMessage {
            text: alert_text(order),
        };

        match self.client.post(url).json(&message).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("new-order alert delivered");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "webhook rejected new-order alert");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deliver new-order alert");
            }
        }
    }
}

fn alert_text(order: &Order) -> String {
    let reference = order
        .order_number
        .as_deref()
        .unwrap_or(order.id.as_str());
    format!(
        "New order received! {} from {} ({})",
        reference, order.customer_name, order.total_price
    )
}
