//! Core types for Naked Pineapple.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod line_item;
pub mod price;

pub use id::*;
pub use line_item::CartLineItem;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
