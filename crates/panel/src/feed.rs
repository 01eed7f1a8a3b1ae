//! Change-feed listener.
//!
//! A single background task holds the listen connection for the
//! recent-orders window and reacts to arriving orders. Only documents
//! entering the window matter here: an `appear` transition announces the
//! order and refreshes the list, while `update` and `disappear` are
//! deliberately ignored so that staff edits made through the panel do
//! not echo back as alerts.

use futures::StreamExt;
use peony_core::Order;
use tokio::sync::watch;

use crate::sanity::{ListenEvent, Transition, groq};
use crate::state::{AppState, PanelEvent};

/// What one feed event asks the panel to do.
#[derive(Debug)]
enum FeedPlan {
    /// A new order entered the window; announce it and refresh.
    NewOrder(Option<Box<Order>>),
    /// No reaction.
    Nothing,
}

/// Decide the reaction to one feed event. Pure, so the transition rules
/// are testable without a connection.
fn plan_event(event: ListenEvent) -> FeedPlan {
    match event {
        ListenEvent::Mutation(mutation) if mutation.transition == Transition::Appear => {
            FeedPlan::NewOrder(mutation.result.map(Box::new))
        }
        ListenEvent::Welcome | ListenEvent::Mutation(_) | ListenEvent::ChannelError { .. } => {
            FeedPlan::Nothing
        }
    }
}

/// Run the change-feed loop until shutdown is signalled or the server
/// closes the stream.
///
/// Stream and subscription errors are logged and reported but do not
/// stop the loop; a closed stream does stop it. Reconnection is left to
/// process supervision.
pub async fn run(state: AppState, mut shutdown: watch::Receiver<bool>) {
    let query = groq::order_feed_query();

    let stream = state.sanity().listen(&query);
    let mut stream = std::pin::pin!(stream);

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("order change feed shutting down");
                return;
            }
            item = stream.next() => {
                let Some(item) = item else {
                    tracing::warn!("order change feed closed by server");
                    return;
                };
                match item {
                    Ok(ListenEvent::Welcome) => {
                        tracing::info!("order change feed connected");
                    }
                    Ok(ListenEvent::ChannelError { message }) => {
                        tracing::error!(message, "order change feed reported an error");
                    }
                    Ok(event) => handle_event(&state, event).await,
                    Err(e) => {
                        tracing::error!(error = %e, "order change feed stream error");
                        sentry::capture_error(&e);
                    }
                }
            }
        }
    }
}

async fn handle_event(state: &AppState, event: ListenEvent) {
    match plan_event(event) {
        FeedPlan::NewOrder(order) => {
            tracing::info!(order_id = order.as_deref().map(|o| o.id.as_str()), "new order appeared");
            if let Some(order) = order.as_deref() {
                state.notifier().new_order(order).await;
            }
            state.publish_event(PanelEvent::Toast {
                message: "New order received!".to_string(),
            });
            state.refresh_orders().await;
            state.publish_event(PanelEvent::OrdersRefreshed);
        }
        FeedPlan::Nothing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanity::MutationEvent;
    use chrono::Utc;
    use peony_core::{DeliveryStatus, OrderStatus, PaymentStatus};

    fn order() -> Order {
        Order {
            id: "order-1".to_string(),
            order_number: Some("PA-1042".to_string()),
            customer_name: "Lina".to_string(),
            phone: None,
            delivery_address: None,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            delivery_status: DeliveryStatus::Pending,
            total_price: rust_decimal::Decimal::ZERO,
            order_date: Utc::now(),
            products: vec![],
        }
    }

    fn mutation(transition: Transition, result: Option<Order>) -> ListenEvent {
        ListenEvent::Mutation(MutationEvent {
            transition,
            document_id: "order-1".to_string(),
            result,
        })
    }

    #[test]
    fn test_appear_plans_announcement() {
        let plan = plan_event(mutation(Transition::Appear, Some(order())));
        let FeedPlan::NewOrder(announced) = plan else {
            panic!("appear must announce");
        };
        assert_eq!(announced.expect("order included").id, "order-1");
    }

    #[test]
    fn test_appear_without_result_still_announces() {
        assert!(matches!(
            plan_event(mutation(Transition::Appear, None)),
            FeedPlan::NewOrder(_)
        ));
    }

    #[test]
    fn test_update_and_disappear_are_ignored() {
        assert!(matches!(
            plan_event(mutation(Transition::Update, Some(order()))),
            FeedPlan::Nothing
        ));
        assert!(matches!(
            plan_event(mutation(Transition::Disappear, None)),
            FeedPlan::Nothing
        ));
    }

    #[test]
    fn test_welcome_is_ignored() {
        assert!(matches!(plan_event(ListenEvent::Welcome), FeedPlan::Nothing));
    }
}
