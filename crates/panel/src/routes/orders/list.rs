//! Orders list page handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{filters, state::AppState};

use super::views::{FilterGroupView, OrderCardView, PickerView, filter_groups};

/// The whole orders screen: cards, filter chips, and the open picker.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    /// Orders to display, newest first.
    pub orders: Vec<OrderCardView>,
    /// Whether a fetch is still in flight.
    pub loading: bool,
    /// Whether any filter dimension is constrained.
    pub filtered: bool,
    /// The three filter dimensions with their chips.
    pub filter_groups: Vec<FilterGroupView>,
    /// The open status picker, if any.
    pub picker: Option<PickerView>,
}

/// Orders list page handler.
///
/// Every page load refetches under the current filters. A fetch failure
/// is not fatal here: the previous list stays on screen.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    state.refresh_orders().await;

    let screen = state.screen().read().await;

    let template = OrdersIndexTemplate {
        orders: screen.orders.iter().map(OrderCardView::from).collect(),
        loading: screen.loading,
        filtered: !screen.filters.is_unfiltered(),
        filter_groups: filter_groups(&screen.filters),
        picker: screen
            .open_picker
            .as_ref()
            .and_then(|key| PickerView::build(key, &screen)),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
