//! The three status vocabularies and their badge styling.
//!
//! Each dimension (order, payment, delivery) is a fixed, closed vocabulary.
//! Documents in the store may still carry values outside the vocabulary
//! (old schema revisions, manual Studio edits), so every enum keeps an
//! `Unknown` catch-all that deserializes instead of failing and renders
//! with fallback styling. `Unknown` is never offered in pickers and never
//! accepted for filters or mutations.

use serde::{Deserialize, Serialize};

/// Badge color for values outside a vocabulary.
pub const FALLBACK_COLOR: &str = "#6B7280";

// =============================================================================
// Vocabularies
// =============================================================================

/// Overall order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet confirmed by staff.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Being prepared.
    Processing,
    /// Handed to the courier.
    Shipped,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled.
    Cancelled,
    /// Any value outside the vocabulary.
    #[serde(other)]
    Unknown,
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment not yet received.
    Pending,
    /// Payment received.
    Received,
    /// Any value outside the vocabulary.
    #[serde(other)]
    Unknown,
}

/// Delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Not yet dispatched.
    Pending,
    /// With the courier.
    OutForDelivery,
    /// Delivered.
    Delivered,
    /// Any value outside the vocabulary.
    #[serde(other)]
    Unknown,
}

/// Parse error for a value that is not in the target vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{value}\" is not a valid {field} value")]
pub struct ParseStatusError {
    /// The rejected input.
    pub value: String,
    /// The dimension it was parsed against.
    pub field: StatusField,
}

macro_rules! vocabulary {
    ($ty:ident, $field:expr, [$(($variant:ident, $str:literal, $color:literal)),+ $(,)?]) => {
        impl $ty {
            /// The vocabulary, in order, excluding `Unknown`.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire value stored in the document.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                    Self::Unknown => "unknown",
                }
            }

            /// Badge background color, falling back to gray for `Unknown`.
            #[must_use]
            pub const fn badge_color(self) -> &'static str {
                match self {
                    $(Self::$variant => $color,)+
                    Self::Unknown => FALLBACK_COLOR,
                }
            }

            /// Human label: underscores become spaces, first letter capitalized.
            #[must_use]
            pub fn label(self) -> String {
                label_from_wire(self.as_str())
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ParseStatusError;

            /// Accepts vocabulary members only; `Unknown` cannot be parsed.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(ParseStatusError {
                        value: s.to_string(),
                        field: $field,
                    }),
                }
            }
        }
    };
}

vocabulary!(
    OrderStatus,
    StatusField::Order,
    [
        (Pending, "pending", "#F59E0B"),
        (Confirmed, "confirmed", "#3B82F6"),
        (Processing, "processing", "#8B5CF6"),
        (Shipped, "shipped", "#06B6D4"),
        (Delivered, "delivered", "#10B981"),
        (Cancelled, "cancelled", "#EF4444"),
    ]
);

vocabulary!(
    PaymentStatus,
    StatusField::Payment,
    [(Pending, "pending", "#F59E0B"), (Received, "received", "#10B981")]
);

vocabulary!(
    DeliveryStatus,
    StatusField::Delivery,
    [
        (Pending, "pending", "#F59E0B"),
        (OutForDelivery, "out_for_delivery", "#3B82F6"),
        (Delivered, "delivered", "#10B981"),
    ]
);

impl OrderStatus {
    /// Badge icon (Feather icon name).
    ///
    /// Terminal states get their own icon; everything else, including
    /// unknown values, shows the generic package.
    #[must_use]
    pub const fn badge_icon(self) -> &'static str {
        match self {
            Self::Delivered => "check-circle",
            Self::Cancelled => "x-circle",
            _ => "package",
        }
    }
}

impl PaymentStatus {
    /// Badge icon (Feather icon name). Constant for the dimension.
    #[must_use]
    pub const fn badge_icon(self) -> &'static str {
        "credit-card"
    }
}

impl DeliveryStatus {
    /// Badge icon (Feather icon name). Constant for the dimension.
    #[must_use]
    pub const fn badge_icon(self) -> &'static str {
        "truck"
    }
}

/// Human label for a wire value: underscores become spaces, first letter
/// capitalized.
#[must_use]
pub fn label_from_wire(wire: &str) -> String {
    let spaced = wire.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

// =============================================================================
// Status dimensions
// =============================================================================

/// One of the three status dimensions on an order document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusField {
    /// Overall order status.
    Order,
    /// Payment status.
    Payment,
    /// Delivery status.
    Delivery,
}

impl StatusField {
    /// The field name on the order document.
    #[must_use]
    pub const fn document_field(self) -> &'static str {
        match self {
            Self::Order => "status",
            Self::Payment => "paymentStatus",
            Self::Delivery => "deliveryStatus",
        }
    }

    /// URL-safe key used in routes and form payloads.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Delivery => "delivery",
        }
    }

    /// Heading shown in the status picker ("Update ... Status").
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Order => "Order",
            Self::Payment => "Payment",
            Self::Delivery => "Delivery",
        }
    }
}

impl std::fmt::Display for StatusField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for StatusField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order" => Ok(Self::Order),
            "payment" => Ok(Self::Payment),
            "delivery" => Ok(Self::Delivery),
            other => Err(format!("unknown status dimension: {other}")),
        }
    }
}

// =============================================================================
// Validated status updates
// =============================================================================

/// A validated `(dimension, vocabulary value)` pair for a partial update.
///
/// Construction is the validation: a value outside the dimension's
/// vocabulary never becomes a `StatusUpdate`, so a patch can only write
/// legal values. No transition graph is enforced - any vocabulary value
/// may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Set the overall order status.
    Order(OrderStatus),
    /// Set the payment status.
    Payment(PaymentStatus),
    /// Set the delivery status.
    Delivery(DeliveryStatus),
}

impl StatusUpdate {
    /// Parse a raw `(field, value)` pair, e.g. from a form payload.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not in the field's vocabulary.
    pub fn parse(field: StatusField, value: &str) -> Result<Self, ParseStatusError> {
        match field {
            StatusField::Order => value.parse().map(Self::Order),
            StatusField::Payment => value.parse().map(Self::Payment),
            StatusField::Delivery => value.parse().map(Self::Delivery),
        }
    }

    /// The dimension this update targets.
    #[must_use]
    pub const fn field(self) -> StatusField {
        match self {
            Self::Order(_) => StatusField::Order,
            Self::Payment(_) => StatusField::Payment,
            Self::Delivery(_) => StatusField::Delivery,
        }
    }

    /// The wire value to write.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Order(s) => s.as_str(),
            Self::Payment(s) => s.as_str(),
            Self::Delivery(s) => s.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_order() {
        assert_eq!(
            OrderStatus::ALL,
            &[
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ]
        );
        assert_eq!(PaymentStatus::ALL.len(), 2);
        assert_eq!(DeliveryStatus::ALL.len(), 3);
    }

    #[test]
    fn test_unknown_value_deserializes_with_fallback_styling() {
        let status: OrderStatus = serde_json::from_str("\"on_hold\"").expect("must not fail");
        assert_eq!(status, OrderStatus::Unknown);
        assert_eq!(status.badge_color(), FALLBACK_COLOR);
        assert_eq!(status.badge_icon(), "package");
    }

    #[test]
    fn test_unknown_is_not_parseable() {
        assert!("unknown".parse::<OrderStatus>().is_err());
        assert!("on_hold".parse::<DeliveryStatus>().is_err());
    }

    #[test]
    fn test_round_trip_wire_values() {
        for s in OrderStatus::ALL {
            assert_eq!(s.as_str().parse::<OrderStatus>().as_ref(), Ok(s));
        }
        for s in DeliveryStatus::ALL {
            assert_eq!(s.as_str().parse::<DeliveryStatus>().as_ref(), Ok(s));
        }
    }

    #[test]
    fn test_delivered_badge() {
        assert_eq!(OrderStatus::Delivered.badge_color(), "#10B981");
        assert_eq!(OrderStatus::Delivered.badge_icon(), "check-circle");
    }

    #[test]
    fn test_labels() {
        assert_eq!(DeliveryStatus::OutForDelivery.label(), "Out for delivery");
        assert_eq!(OrderStatus::Pending.label(), "Pending");
    }

    #[test]
    fn test_status_update_validates_vocabulary() {
        let update = StatusUpdate::parse(StatusField::Payment, "received").expect("valid");
        assert_eq!(update.field().document_field(), "paymentStatus");
        assert_eq!(update.value(), "received");

        // "received" is payment vocabulary, not delivery
        assert!(StatusUpdate::parse(StatusField::Delivery, "received").is_err());
        assert!(StatusUpdate::parse(StatusField::Order, "unknown").is_err());
    }
}
