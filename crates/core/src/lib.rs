//! Naked Pineapple Core - Shared types library.
//!
//! This crate provides the domain types shared by the cart components:
//! - `cart` - Client-side cart store and its durable storage
//! - `cli` - Command-line front end for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices, and the cart line item

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
