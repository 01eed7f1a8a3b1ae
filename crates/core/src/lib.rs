//! Peony Core - Shared domain types.
//!
//! This crate provides the types shared between the Peony components:
//! - `panel` - Staff-facing order management panel
//! - `cli` - Command-line tools for ops work against the same store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Orders
//! live in a hosted Sanity Content Lake; these types deserialize straight
//! from the projected documents the panel queries.
//!
//! # Modules
//!
//! - [`status`] - The three status vocabularies and their badge styling
//! - [`order`] - Order documents and line items
//! - [`filters`] - The staff filter selection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filters;
pub mod order;
pub mod status;

pub use filters::{FilterChange, OrderFilters};
pub use order::{LineItem, Order, ProductSnapshot};
pub use status::{
    DeliveryStatus, OrderStatus, ParseStatusError, PaymentStatus, StatusField, StatusUpdate,
    label_from_wire,
};
