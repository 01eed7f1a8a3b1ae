//! Template-facing view models for the orders screen.

use peony_core::{
    DeliveryStatus, Order, OrderFilters, OrderStatus, PaymentStatus, StatusField, label_from_wire,
};
use rust_decimal::Decimal;

use crate::sanity::image;
use crate::screen::{PickerKey, ScreenState};

/// How many product lines a card shows before collapsing the rest.
const CARD_PRODUCT_LINES: usize = 2;

/// Thumbnail width requested from the image CDN.
const THUMBNAIL_WIDTH: u32 = 100;

/// One status badge on a card.
#[derive(Debug, Clone)]
pub struct StatusBadgeView {
    /// Which field this badge reflects ("order", "payment", "delivery").
    pub field_key: &'static str,
    /// Field heading shown next to the badge.
    pub heading: &'static str,
    /// Human label of the current value.
    pub label: String,
    /// Badge background color (hex).
    pub color: &'static str,
    /// Feather icon name.
    pub icon: &'static str,
}

/// One product line on a card.
#[derive(Debug, Clone)]
pub struct ProductLineView {
    pub name: String,
    pub quantity: u32,
    pub thumbnail: Option<String>,
}

/// One order card.
#[derive(Debug, Clone)]
pub struct OrderCardView {
    pub id: String,
    /// Order number if assigned, otherwise the document id.
    pub reference: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    pub total_price: Decimal,
    /// e.g. "21 Aug 2026, 09:30"
    pub order_date: String,
    pub badges: Vec<StatusBadgeView>,
    pub product_lines: Vec<ProductLineView>,
    /// Lines beyond the visible ones, 0 when everything fits.
    pub more_products: usize,
}

impl From<&Order> for OrderCardView {
    fn from(order: &Order) -> Self {
        let badges = vec![
            StatusBadgeView {
                field_key: StatusField::Order.key(),
                heading: StatusField::Order.heading(),
                label: order.status.label(),
                color: order.status.badge_color(),
                icon: order.status.badge_icon(),
            },
            StatusBadgeView {
                field_key: StatusField::Payment.key(),
                heading: StatusField::Payment.heading(),
                label: order.payment_status.label(),
                color: order.payment_status.badge_color(),
                icon: order.payment_status.badge_icon(),
            },
            StatusBadgeView {
                field_key: StatusField::Delivery.key(),
                heading: StatusField::Delivery.heading(),
                label: order.delivery_status.label(),
                color: order.delivery_status.badge_color(),
                icon: order.delivery_status.badge_icon(),
            },
        ];

        let product_lines: Vec<ProductLineView> = order
            .products
            .iter()
            .take(CARD_PRODUCT_LINES)
            .map(|line| {
                let (name, thumbnail) = line.product.as_ref().map_or_else(
                    || ("Unavailable product".to_string(), None),
                    |p| {
                        (
                            p.name.clone(),
                            p.image
                                .as_deref()
                                .map(|url| image::thumbnail_url(url, THUMBNAIL_WIDTH)),
                        )
                    },
                );
                ProductLineView {
                    name,
                    quantity: line.quantity,
                    thumbnail,
                }
            })
            .collect();

        Self {
            id: order.id.clone(),
            reference: order
                .order_number
                .clone()
                .unwrap_or_else(|| order.id.clone()),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            delivery_address: order.delivery_address.clone(),
            total_price: order.total_price,
            order_date: order.order_date.format("%d %b %Y, %H:%M").to_string(),
            badges,
            more_products: order.products.len().saturating_sub(CARD_PRODUCT_LINES),
            product_lines,
        }
    }
}

/// One selectable value inside an open picker.
#[derive(Debug, Clone)]
pub struct PickerOptionView {
    pub value: &'static str,
    pub label: String,
    pub color: &'static str,
    pub icon: &'static str,
    pub selected: bool,
}

/// The open status picker modal.
#[derive(Debug, Clone)]
pub struct PickerView {
    pub order_id: String,
    pub field_key: &'static str,
    pub heading: &'static str,
    pub options: Vec<PickerOptionView>,
    /// Inline banner after a failed update.
    pub error: Option<String>,
}

impl PickerView {
    /// Build the picker for `key`, marking the order's current value.
    /// Returns `None` when the order is no longer on screen.
    #[must_use]
    pub fn build(key: &PickerKey, screen: &ScreenState) -> Option<Self> {
        let order = screen.orders.iter().find(|o| o.id == key.order_id)?;

        let options = match key.field {
            StatusField::Order => OrderStatus::ALL
                .iter()
                .map(|s| PickerOptionView {
                    value: s.as_str(),
                    label: s.label(),
                    color: s.badge_color(),
                    icon: s.badge_icon(),
                    selected: *s == order.status,
                })
                .collect(),
            StatusField::Payment => PaymentStatus::ALL
                .iter()
                .map(|s| PickerOptionView {
                    value: s.as_str(),
                    label: s.label(),
                    color: s.badge_color(),
                    icon: s.badge_icon(),
                    selected: *s == order.payment_status,
                })
                .collect(),
            StatusField::Delivery => DeliveryStatus::ALL
                .iter()
                .map(|s| PickerOptionView {
                    value: s.as_str(),
                    label: s.label(),
                    color: s.badge_color(),
                    icon: s.badge_icon(),
                    selected: *s == order.delivery_status,
                })
                .collect(),
        };

        Some(Self {
            order_id: key.order_id.clone(),
            field_key: key.field.key(),
            heading: key.field.heading(),
            options,
            error: screen.picker_error.clone(),
        })
    }
}

/// One chip in a filter group; `value` is the wire value or "all".
#[derive(Debug, Clone)]
pub struct FilterOptionView {
    pub value: &'static str,
    pub label: String,
    pub active: bool,
}

/// One filter dimension with its chips.
#[derive(Debug, Clone)]
pub struct FilterGroupView {
    pub field_key: &'static str,
    pub heading: &'static str,
    pub options: Vec<FilterOptionView>,
}

/// Build the three filter groups from the active selection.
#[must_use]
pub fn filter_groups(filters: &OrderFilters) -> Vec<FilterGroupView> {
    fn group<S: Copy + PartialEq>(
        field: StatusField,
        all: &[S],
        current: Option<S>,
        as_str: impl Fn(S) -> &'static str,
    ) -> FilterGroupView {
        let mut options = vec![FilterOptionView {
            value: "all",
            label: "All".to_string(),
            active: current.is_none(),
        }];
        options.extend(all.iter().map(|s| FilterOptionView {
            value: as_str(*s),
            label: label_from_wire(as_str(*s)),
            active: current == Some(*s),
        }));
        FilterGroupView {
            field_key: field.key(),
            heading: field.heading(),
            options,
        }
    }

    vec![
        group(StatusField::Order, OrderStatus::ALL, filters.status, |s| {
            s.as_str()
        }),
        group(
            StatusField::Payment,
            PaymentStatus::ALL,
            filters.payment_status,
            |s| s.as_str(),
        ),
        group(
            StatusField::Delivery,
            DeliveryStatus::ALL,
            filters.delivery_status,
            |s| s.as_str(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use peony_core::{LineItem, ProductSnapshot};

    fn order_with_products(count: usize) -> Order {
        Order {
            id: "order-1".to_string(),
            order_number: Some("PA-1042".to_string()),
            customer_name: "Maya".to_string(),
            phone: Some("+8801700000000".to_string()),
            delivery_address: None,
            status: OrderStatus::Delivered,
            payment_status: PaymentStatus::Received,
            delivery_status: DeliveryStatus::Delivered,
            total_price: Decimal::new(120_000, 2),
            order_date: Utc.with_ymd_and_hms(2026, 8, 21, 9, 30, 0).single().unwrap(),
            products: (0..count)
                .map(|i| LineItem {
                    quantity: 1,
                    product: Some(ProductSnapshot {
                        name: format!("Peony bouquet {i}"),
                        price: Decimal::new(4000, 2),
                        image: Some(format!("https://cdn.sanity.io/images/p/d/img-{i}.jpg")),
                    }),
                })
                .collect(),
        }
    }

    #[test]
    fn test_card_collapses_long_product_lists() {
        let card = OrderCardView::from(&order_with_products(5));
        assert_eq!(card.product_lines.len(), 2);
        assert_eq!(card.more_products, 3);
    }

    #[test]
    fn test_card_shows_all_when_short() {
        let card = OrderCardView::from(&order_with_products(2));
        assert_eq!(card.product_lines.len(), 2);
        assert_eq!(card.more_products, 0);
    }

    #[test]
    fn test_card_badges_carry_vocabulary_styling() {
        let card = OrderCardView::from(&order_with_products(1));
        assert_eq!(card.badges.len(), 3);
        let delivered = &card.badges[0];
        assert_eq!(delivered.label, "Delivered");
        assert_eq!(delivered.color, "#10B981");
        assert_eq!(delivered.icon, "check-circle");
    }

    #[test]
    fn test_thumbnail_is_sized() {
        let card = OrderCardView::from(&order_with_products(1));
        let thumb = card.product_lines[0].thumbnail.as_deref().unwrap();
        assert!(thumb.ends_with("?w=100&fit=max&auto=format"));
    }

    #[test]
    fn test_picker_marks_current_value() {
        let mut screen = ScreenState::default();
        let seq = screen.begin_fetch();
        assert!(screen.finish_fetch::<()>(seq, Ok(vec![order_with_products(1)])));

        let key = PickerKey {
            order_id: "order-1".to_string(),
            field: StatusField::Order,
        };
        let picker = PickerView::build(&key, &screen).expect("order on screen");
        assert_eq!(picker.options.len(), OrderStatus::ALL.len());
        let selected: Vec<&str> = picker
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["delivered"]);
    }

    #[test]
    fn test_picker_for_missing_order_is_none() {
        let screen = ScreenState::default();
        let key = PickerKey {
            order_id: "gone".to_string(),
            field: StatusField::Payment,
        };
        assert!(PickerView::build(&key, &screen).is_none());
    }

    #[test]
    fn test_filter_groups_default_to_all() {
        let groups = filter_groups(&OrderFilters::default());
        assert_eq!(groups.len(), 3);
        for group in &groups {
            assert!(group.options[0].active, "{} should default to All", group.field_key);
            assert_eq!(group.options[0].value, "all");
        }
        // order statuses + "All"
        assert_eq!(groups[0].options.len(), OrderStatus::ALL.len() + 1);
    }

    #[test]
    fn test_filter_group_marks_active_value() {
        let filters = OrderFilters {
            status: None,
            payment_status: Some(PaymentStatus::Received),
            delivery_status: None,
        };
        let groups = filter_groups(&filters);
        let payment = &groups[1];
        let active: Vec<&str> = payment
            .options
            .iter()
            .filter(|o| o.active)
            .map(|o| o.value)
            .collect();
        assert_eq!(active, vec!["received"]);
    }
}
