//! Orders screen: list page, pickers, filters.

pub mod actions;
pub mod list;
pub mod views;
