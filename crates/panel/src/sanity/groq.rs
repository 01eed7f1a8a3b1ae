//! GROQ query composition for order reads.
//!
//! Pure string building, nothing executed here. Filter clauses are
//! equality-only, AND-combined; a dimension set to "all" contributes no
//! clause. Both queries are windowed to the most recent
//! [`RECENT_WINDOW`] orders - re-running a query always returns the
//! current top of the window, there is no pagination cursor.

use peony_core::OrderFilters;

/// Fixed size of the recent-orders window.
pub const RECENT_WINDOW: usize = 20;

/// Projection for the list view: identity, the three status fields,
/// totals, and line items with the product snapshot dereferenced.
const ORDER_PROJECTION: &str = concat!(
    "{ _id, orderNumber, customerName, phone, deliveryAddress, ",
    "status, deliveryStatus, paymentStatus, totalPrice, orderDate, ",
    "products[]{ quantity, product->{ name, price, \"image\": image.asset->url } } }"
);

/// Build the filtered list query, newest first.
#[must_use]
pub fn order_list_query(filters: &OrderFilters) -> String {
    format!(
        "*[{}] | order(orderDate desc) [0...{RECENT_WINDOW}] {ORDER_PROJECTION}",
        constraint_clauses(filters).join(" && ")
    )
}

/// Build the change-feed query. No projection: the listen API is asked to
/// include the full resulting document with each event.
#[must_use]
pub fn order_feed_query() -> String {
    format!("*[_type == \"order\"] | order(orderDate desc) [0...{RECENT_WINDOW}]")
}

/// Equality clauses for the current selection. The `_type` clause is
/// always present; each non-"all" dimension appends one clause.
fn constraint_clauses(filters: &OrderFilters) -> Vec<String> {
    let mut clauses = vec!["_type == \"order\"".to_string()];
    if let Some(status) = filters.status {
        clauses.push(format!("status == \"{status}\""));
    }
    if let Some(status) = filters.delivery_status {
        clauses.push(format!("deliveryStatus == \"{status}\""));
    }
    if let Some(status) = filters.payment_status {
        clauses.push(format!("paymentStatus == \"{status}\""));
    }
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use peony_core::{DeliveryStatus, OrderStatus, PaymentStatus};

    #[test]
    fn test_unfiltered_query_has_only_type_clause() {
        let query = order_list_query(&OrderFilters::default());
        assert!(query.starts_with("*[_type == \"order\"] | order(orderDate desc) [0...20]"));
        assert!(!query.contains("status =="));
        assert!(!query.contains(" && "));
    }

    #[test]
    fn test_clauses_match_non_all_dimensions_exactly() {
        let filters = OrderFilters {
            status: Some(OrderStatus::Shipped),
            payment_status: None,
            delivery_status: Some(DeliveryStatus::Pending),
        };
        let clauses = constraint_clauses(&filters);
        assert_eq!(
            clauses,
            vec![
                "_type == \"order\"".to_string(),
                "status == \"shipped\"".to_string(),
                "deliveryStatus == \"pending\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_fully_filtered_query_is_and_combined() {
        let filters = OrderFilters {
            status: Some(OrderStatus::Pending),
            payment_status: Some(PaymentStatus::Received),
            delivery_status: Some(DeliveryStatus::OutForDelivery),
        };
        let query = order_list_query(&filters);
        assert!(query.contains(
            "_type == \"order\" && status == \"pending\" && \
             deliveryStatus == \"out_for_delivery\" && paymentStatus == \"received\""
        ));
    }

    #[test]
    fn test_projection_resolves_product_snapshot() {
        let query = order_list_query(&OrderFilters::default());
        assert!(query.contains("products[]{ quantity, product->{ name, price,"));
        assert!(query.contains("\"image\": image.asset->url"));
    }

    #[test]
    fn test_feed_query_is_windowed_and_unprojected() {
        let query = order_feed_query();
        assert_eq!(query, "*[_type == \"order\"] | order(orderDate desc) [0...20]");
    }
}
