//! In-memory state for the orders screen.
//!
//! One screen, one state value. Concurrent fetches are serialized by
//! sequence number rather than by cancellation: every fetch takes a
//! ticket from [`ScreenState::begin_fetch`], and only the newest ticket
//! is allowed to land its result. A stale response can therefore never
//! overwrite data from a fetch issued after it.

use peony_core::{FilterChange, Order, OrderFilters, StatusField};

/// Identifies the one status picker that may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerKey {
    /// Order the picker belongs to.
    pub order_id: String,
    /// Which of the three status fields it edits.
    pub field: StatusField,
}

/// Mutable state behind the orders screen.
#[derive(Debug, Default)]
pub struct ScreenState {
    /// Active filter selection.
    pub filters: OrderFilters,
    /// The single open picker, if any.
    pub open_picker: Option<PickerKey>,
    /// Error to surface inside the open picker after a failed update.
    pub picker_error: Option<String>,
    /// Orders currently displayed, newest first.
    pub orders: Vec<Order>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Ticket of the most recently issued fetch.
    issued_seq: u64,
}

impl ScreenState {
    /// Apply a filter change. Changing any dimension closes the filter
    /// UI's concern here; the caller is expected to refetch.
    pub const fn set_filter(&mut self, change: FilterChange) {
        self.filters.apply(change);
    }

    /// Clear all three filter dimensions back to "all".
    pub fn reset_filters(&mut self) {
        self.filters.reset();
    }

    /// Open a status picker, replacing any picker already open. A fresh
    /// picker starts without an error banner.
    pub fn open_picker(&mut self, key: PickerKey) {
        self.open_picker = Some(key);
        self.picker_error = None;
    }

    /// Close whichever picker is open.
    pub fn close_picker(&mut self) {
        self.open_picker = None;
        self.picker_error = None;
    }

    /// Record a failed status update against the open picker. No-op when
    /// no picker is open (the failure raced a close).
    pub fn set_picker_error(&mut self, message: String) {
        if self.open_picker.is_some() {
            self.picker_error = Some(message);
        }
    }

    /// Take a ticket for a new fetch and mark the screen loading.
    pub const fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.loading = true;
        self.issued_seq
    }

    /// Land a fetch result. Returns `true` if the result was applied.
    ///
    /// Only the holder of the newest ticket may apply; older tickets are
    /// discarded unseen. A failed fetch clears the loading flag but keeps
    /// the previous orders on screen.
    pub fn finish_fetch<E>(&mut self, seq: u64, result: Result<Vec<Order>, E>) -> bool {
        if seq != self.issued_seq {
            return false;
        }
        self.loading = false;
        if let Ok(orders) = result {
            self.orders = orders;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use peony_core::{DeliveryStatus, OrderStatus, PaymentStatus};

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            order_number: None,
            customer_name: "Test".to_string(),
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

    #[test]
    fn test_at_most_one_picker_open() {
        let mut state = ScreenState::default();
        state.open_picker(PickerKey {
            order_id: "order-1".to_string(),
            field: StatusField::Order,
        });
        state.open_picker(PickerKey {
            order_id: "order-2".to_string(),
            field: StatusField::Payment,
        });

        let open = state.open_picker.as_ref().expect("picker open");
        assert_eq!(open.order_id, "order-2");
        assert_eq!(open.field, StatusField::Payment);
    }

    #[test]
    fn test_opening_picker_clears_previous_error() {
        let mut state = ScreenState::default();
        state.open_picker(PickerKey {
            order_id: "order-1".to_string(),
            field: StatusField::Order,
        });
        state.set_picker_error("update failed".to_string());
        assert!(state.picker_error.is_some());

        state.open_picker(PickerKey {
            order_id: "order-1".to_string(),
            field: StatusField::Delivery,
        });
        assert!(state.picker_error.is_none());
    }

    #[test]
    fn test_error_requires_open_picker() {
        let mut state = ScreenState::default();
        state.set_picker_error("update failed".to_string());
        assert!(state.picker_error.is_none());
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let mut state = ScreenState::default();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        // Newest ticket lands first
        assert!(state.finish_fetch::<()>(second, Ok(vec![order("new")])));
        assert!(!state.loading);

        // The older response arrives late and must not apply
        assert!(!state.finish_fetch::<()>(first, Ok(vec![order("old")])));
        assert_eq!(state.orders.len(), 1);
        assert_eq!(state.orders[0].id, "new");
    }

    #[test]
    fn test_failed_fetch_keeps_stale_orders() {
        let mut state = ScreenState::default();
        let seq = state.begin_fetch();
        assert!(state.finish_fetch::<()>(seq, Ok(vec![order("kept")])));

        let seq = state.begin_fetch();
        assert!(state.loading);
        assert!(state.finish_fetch(seq, Err("store unreachable")));
        assert!(!state.loading);
        assert_eq!(state.orders[0].id, "kept");
    }

    #[test]
    fn test_filter_change_flows_through() {
        let mut state = ScreenState::default();
        state.set_filter(FilterChange::Payment(Some(PaymentStatus::Received)));
        assert_eq!(state.filters.payment_status, Some(PaymentStatus::Received));

        state.reset_filters();
        assert!(state.filters.is_unfiltered());
    }
}
