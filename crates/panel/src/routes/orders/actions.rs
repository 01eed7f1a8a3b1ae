//! Form actions for the orders screen.
//!
//! All actions mutate the shared screen state and bounce the browser
//! back to `/`, which re-renders from that state. Validation happens at
//! the type boundary: a field or value outside the vocabularies never
//! reaches the store.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use axum::Form;
use peony_core::{
    DeliveryStatus, FilterChange, OrderStatus, PaymentStatus, StatusField, StatusUpdate,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::screen::PickerKey;
use crate::state::{AppState, PanelEvent};

/// Payload of the picker's submit form.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateForm {
    /// Status dimension key ("order", "payment", "delivery").
    pub field: String,
    /// New vocabulary value.
    pub value: String,
}

/// Payload of one filter chip.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    /// Status dimension key.
    pub field: String,
    /// Vocabulary value, or "all" to clear the dimension.
    pub value: String,
}

/// Open the status picker for one order field, replacing any open picker.
#[instrument(skip(state))]
pub async fn open_picker(
    State(state): State<AppState>,
    Path((order_id, field)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let field: StatusField = field.parse().map_err(AppError::BadRequest)?;

    let mut screen = state.screen().write().await;
    screen.open_picker(PickerKey { order_id, field });
    Ok(Redirect::to("/"))
}

/// Close whichever picker is open.
pub async fn close_picker(State(state): State<AppState>) -> Redirect {
    state.screen().write().await.close_picker();
    Redirect::to("/")
}

/// Apply a status change from the open picker.
///
/// On success the picker closes and the list refreshes. On a store
/// failure the picker stays open with the error shown inline, so the
/// staff member can retry or dismiss without losing their place.
#[instrument(skip(state, form), fields(order_id = %order_id))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Form(form): Form<StatusUpdateForm>,
) -> Result<Redirect, AppError> {
    let field: StatusField = form.field.parse().map_err(AppError::BadRequest)?;
    let update =
        StatusUpdate::parse(field, &form.value).map_err(|e| AppError::BadRequest(e.to_string()))?;

    match state.sanity().update_order(&order_id, &update).await {
        Ok(_) => {
            state.screen().write().await.close_picker();
            state.refresh_orders().await;
            state.publish_event(PanelEvent::OrdersRefreshed);
        }
        Err(e) => {
            tracing::error!(error = %e, "status update failed, keeping picker open");
            sentry::capture_error(&e);
            state
                .screen()
                .write()
                .await
                .set_picker_error("Could not save the status change. Please try again.".to_string());
        }
    }

    Ok(Redirect::to("/"))
}

/// Apply one filter chip.
#[instrument(skip(state, form))]
pub async fn set_filter(
    State(state): State<AppState>,
    Form(form): Form<FilterForm>,
) -> Result<Redirect, AppError> {
    let change =
        parse_filter_change(&form.field, &form.value).map_err(AppError::BadRequest)?;

    state.screen().write().await.set_filter(change);
    Ok(Redirect::to("/"))
}

/// Clear all three filter dimensions.
pub async fn reset_filters(State(state): State<AppState>) -> Redirect {
    state.screen().write().await.reset_filters();
    Redirect::to("/")
}

/// Parse a `(dimension key, value-or-"all")` pair into a filter change.
fn parse_filter_change(field: &str, value: &str) -> Result<FilterChange, String> {
    let field: StatusField = field.parse()?;

    let all = value == "all";
    let change = match field {
        StatusField::Order => {
            FilterChange::Status(if all {
                None
            } else {
                Some(value.parse::<OrderStatus>().map_err(|e| e.to_string())?)
            })
        }
        StatusField::Payment => {
            FilterChange::Payment(if all {
                None
            } else {
                Some(value.parse::<PaymentStatus>().map_err(|e| e.to_string())?)
            })
        }
        StatusField::Delivery => {
            FilterChange::Delivery(if all {
                None
            } else {
                Some(value.parse::<DeliveryStatus>().map_err(|e| e.to_string())?)
            })
        }
    };
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_clears_a_dimension() {
        assert_eq!(
            parse_filter_change("payment", "all"),
            Ok(FilterChange::Payment(None))
        );
    }

    #[test]
    fn test_vocabulary_value_parses() {
        assert_eq!(
            parse_filter_change("delivery", "out_for_delivery"),
            Ok(FilterChange::Delivery(Some(DeliveryStatus::OutForDelivery)))
        );
    }

    #[test]
    fn test_cross_vocabulary_value_rejected() {
        assert!(parse_filter_change("order", "received").is_err());
        assert!(parse_filter_change("payments", "pending").is_err());
    }
}
