//! Naked Pineapple cart store.
//!
//! A client-side shopping cart: line items held in memory, merged by ID,
//! totalled on demand, and mirrored to a durable key-value slot after every
//! change so the cart survives restarts.
//!
//! # Example
//!
//! ```rust
//! use naked_pineapple_cart::{CartStore, MemoryStore, SlotPersistence};
//! use naked_pineapple_core::CartLineItem;
//!
//! let mut cart = CartStore::open(SlotPersistence::new(MemoryStore::new()));
//!
//! cart.add_item(CartLineItem::new("tee:m", "tee", "Pineapple Tee", 2, 500));
//! cart.add_item(CartLineItem::new("mug", "mug", "Pineapple Mug", 1, 1000));
//! cart.add_item(CartLineItem::new("tee:m", "tee", "Pineapple Tee", 1, 500));
//!
//! assert_eq!(cart.line_count(), 2);
//! assert_eq!(cart.item_count(), 4);
//! assert_eq!(cart.subtotal(), 2500);
//! ```
//!
//! # Modules
//!
//! - [`store`] - The cart store and its invariants
//! - [`persistence`] - Load/save capability handed to the store
//! - [`document`] - Persisted document schema and version migrations
//! - [`storage`] - Key-value backends (memory, file)
//! - [`config`] - Environment configuration
//! - [`error`] - Storage and document errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod document;
pub mod error;
pub mod persistence;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use document::{CURRENT_VERSION, CartDocument};
pub use error::{DocumentError, StorageError};
pub use persistence::{CartPersistence, DEFAULT_STORAGE_KEY, SlotError, SlotPersistence};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::CartStore;
