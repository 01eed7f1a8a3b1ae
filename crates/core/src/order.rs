//! Order documents and line items.
//!
//! These deserialize straight from the GROQ projection the panel queries,
//! so field names follow the store's camelCase schema. Orders are created
//! and owned by the store; the panel only reads them and patches status
//! fields. A fetched collection is an ephemeral snapshot, fully replaced
//! on every fetch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status::{DeliveryStatus, OrderStatus, PaymentStatus};

/// One customer purchase, as projected from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned document id (stable, unique).
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing order number, when the schema carries one.
    #[serde(default)]
    pub order_number: Option<String>,
    /// Customer name.
    #[serde(default)]
    pub customer_name: String,
    /// Customer phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Delivery address as free text.
    #[serde(default)]
    pub delivery_address: Option<String>,
    /// Overall order status.
    #[serde(default = "default_order_status")]
    pub status: OrderStatus,
    /// Payment status.
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
    /// Delivery status.
    #[serde(default = "default_delivery_status")]
    pub delivery_status: DeliveryStatus,
    /// Total price (non-negative by store convention).
    #[serde(default)]
    pub total_price: Decimal,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Ordered line items.
    #[serde(default)]
    pub products: Vec<LineItem>,
}

/// A quantity plus the product snapshot resolved at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Number of units ordered (positive).
    pub quantity: u32,
    /// Resolved product snapshot; `None` when the reference dangles.
    #[serde(default)]
    pub product: Option<ProductSnapshot>,
}

/// Product fields dereferenced into the order projection.
///
/// The order does not own product data - this is a join result, so a
/// later product edit shows up on the next fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Unit price.
    #[serde(default)]
    pub price: Decimal,
    /// Resolved image URL, when the product has one.
    #[serde(default)]
    pub image: Option<String>,
}

const fn default_order_status() -> OrderStatus {
    OrderStatus::Unknown
}

const fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Unknown
}

const fn default_delivery_status() -> DeliveryStatus {
    DeliveryStatus::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_projected_document() {
        let json = r#"{
            "_id": "order-abc",
            "orderNumber": "PA-1042",
            "customerName": "Farhana A.",
            "phone": "+8801712345678",
            "deliveryAddress": "12 Lake Road, Dhaka",
            "status": "shipped",
            "deliveryStatus": "out_for_delivery",
            "paymentStatus": "received",
            "totalPrice": 1849.5,
            "orderDate": "2026-08-20T14:02:11Z",
            "products": [
                { "quantity": 2, "product": { "name": "Peony bouquet", "price": 650, "image": "https://cdn.sanity.io/images/p/d/img-800x600.jpg" } },
                { "quantity": 1, "product": null }
            ]
        }"#;

        let order: Order = serde_json::from_str(json).expect("valid document");
        assert_eq!(order.id, "order-abc");
        assert_eq!(order.order_number.as_deref(), Some("PA-1042"));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.delivery_status, DeliveryStatus::OutForDelivery);
        assert_eq!(order.payment_status, PaymentStatus::Received);
        assert_eq!(order.products.len(), 2);
        assert!(order.products[1].product.is_none());
    }

    #[test]
    fn test_missing_statuses_fall_back_to_unknown() {
        let json = r#"{ "_id": "order-x", "orderDate": "2026-01-01T00:00:00Z" }"#;
        let order: Order = serde_json::from_str(json).expect("sparse document");
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.payment_status, PaymentStatus::Unknown);
        assert_eq!(order.delivery_status, DeliveryStatus::Unknown);
        assert!(order.products.is_empty());
    }
}
