//! Order commands.
//!
//! # Environment Variables
//!
//! - `SANITY_PROJECT_ID` - Content Lake project id
//! - `SANITY_DATASET` - Dataset holding the order documents
//! - `SANITY_API_TOKEN` - Token with read + write access to orders

use futures::StreamExt;
use peony_core::{OrderFilters, StatusField, StatusUpdate};
use peony_panel::config::{ConfigError, PanelConfig};
use peony_panel::sanity::{ListenEvent, SanityClient, SanityError, groq};
use thiserror::Error;

/// Errors that can occur during order commands.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store rejected or failed the request.
    #[error("Store error: {0}")]
    Store(#[from] SanityError),

    /// A status argument is not in the relevant vocabulary.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

fn connect() -> Result<SanityClient, OrdersError> {
    dotenvy::dotenv().ok();
    let config = PanelConfig::from_env()?;
    Ok(SanityClient::new(&config.sanity))
}

/// List recent orders, optionally filtered per dimension.
pub async fn list(
    status: Option<&str>,
    payment: Option<&str>,
    delivery: Option<&str>,
) -> Result<(), OrdersError> {
    let filters = OrderFilters {
        status: status
            .map(str::parse)
            .transpose()
            .map_err(|e: peony_core::ParseStatusError| OrdersError::InvalidStatus(e.to_string()))?,
        payment_status: payment
            .map(str::parse)
            .transpose()
            .map_err(|e: peony_core::ParseStatusError| OrdersError::InvalidStatus(e.to_string()))?,
        delivery_status: delivery
            .map(str::parse)
            .transpose()
            .map_err(|e: peony_core::ParseStatusError| OrdersError::InvalidStatus(e.to_string()))?,
    };

    let client = connect()?;
    let orders = client.recent_orders(&filters).await?;

    if orders.is_empty() {
        tracing::info!("No orders found");
        return Ok(());
    }

    tracing::info!("{} order(s):", orders.len());
    for order in &orders {
        tracing::info!(
            "  {}  {}  {}  [{} / {} / {}]  {}",
            order.id,
            order.order_date.format("%Y-%m-%d %H:%M"),
            order.customer_name,
            order.status,
            order.payment_status,
            order.delivery_status,
            order.total_price,
        );
    }

    Ok(())
}

/// Patch one status field on an order.
pub async fn set_status(order_id: &str, field: &str, value: &str) -> Result<(), OrdersError> {
    let field: StatusField = field.parse().map_err(OrdersError::InvalidStatus)?;
    let update =
        StatusUpdate::parse(field, value).map_err(|e| OrdersError::InvalidStatus(e.to_string()))?;

    let client = connect()?;
    let commit = client.update_order(order_id, &update).await?;

    tracing::info!(
        "Updated {} on {} to {} (transaction {})",
        field.document_field(),
        order_id,
        update.value(),
        commit.transaction_id,
    );

    Ok(())
}

/// Tail the change feed for the recent-orders window, logging each event
/// until the stream closes or the process is interrupted.
pub async fn watch() -> Result<(), OrdersError> {
    let client = connect()?;
    let stream = client.listen(&groq::order_feed_query());
    let mut stream = std::pin::pin!(stream);

    tracing::info!("Watching the order change feed (Ctrl+C to stop)");

    while let Some(item) = stream.next().await {
        match item {
            Ok(ListenEvent::Welcome) => tracing::info!("Feed connected"),
            Ok(ListenEvent::Mutation(mutation)) => {
                let customer = mutation
                    .result
                    .as_ref()
                    .map_or("-", |o| o.customer_name.as_str());
                tracing::info!(
                    "{:?}: {} ({})",
                    mutation.transition,
                    mutation.document_id,
                    customer
                );
            }
            Ok(ListenEvent::ChannelError { message }) => {
                tracing::error!("Feed error: {message}");
            }
            Err(e) => tracing::error!("Stream error: {e}"),
        }
    }

    tracing::warn!("Feed closed by server");
    Ok(())
}
