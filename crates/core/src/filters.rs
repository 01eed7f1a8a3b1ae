//! The staff filter selection.
//!
//! Three independent dimensions, each either "all" (no constraint, the
//! `None` case) or one concrete vocabulary value. Because the options are
//! typed enums, a `Some` value is a vocabulary member by construction.

use serde::{Deserialize, Serialize};

use crate::status::{DeliveryStatus, OrderStatus, PaymentStatus};

/// Current filter selection for the orders list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilters {
    /// Order status constraint, `None` = all.
    pub status: Option<OrderStatus>,
    /// Payment status constraint, `None` = all.
    pub payment_status: Option<PaymentStatus>,
    /// Delivery status constraint, `None` = all.
    pub delivery_status: Option<DeliveryStatus>,
}

impl OrderFilters {
    /// True when no dimension constrains the list.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.status.is_none() && self.payment_status.is_none() && self.delivery_status.is_none()
    }

    /// Restore all three dimensions to "all".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one dimension change.
    pub const fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Status(v) => self.status = v,
            FilterChange::Payment(v) => self.payment_status = v,
            FilterChange::Delivery(v) => self.delivery_status = v,
        }
    }
}

/// A single-dimension filter change; `None` selects "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// Change the order status constraint.
    Status(Option<OrderStatus>),
    /// Change the payment status constraint.
    Payment(Option<PaymentStatus>),
    /// Change the delivery status constraint.
    Delivery(Option<DeliveryStatus>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unfiltered() {
        assert!(OrderFilters::default().is_unfiltered());
    }

    #[test]
    fn test_apply_and_reset() {
        let mut filters = OrderFilters::default();
        filters.apply(FilterChange::Status(Some(OrderStatus::Shipped)));
        filters.apply(FilterChange::Payment(Some(PaymentStatus::Pending)));
        assert!(!filters.is_unfiltered());
        assert_eq!(filters.status, Some(OrderStatus::Shipped));

        // Setting a dimension back to "all" only clears that dimension
        filters.apply(FilterChange::Status(None));
        assert_eq!(filters.status, None);
        assert_eq!(filters.payment_status, Some(PaymentStatus::Pending));

        filters.reset();
        assert!(filters.is_unfiltered());
    }
}
