//! Integration tests for Naked Pineapple.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p naked-pineapple-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - File-backed rehydration, migration and recovery
//! - `cart_reconcile` - Two store instances sharing one slot
//!
//! This library holds the fixtures shared by the test files.

use std::path::Path;

use naked_pineapple_cart::{CartStore, FileStore, SlotPersistence};
use naked_pineapple_core::CartLineItem;

/// Store type used throughout the integration tests.
pub type FileCart = CartStore<SlotPersistence<FileStore>>;

/// Open a file-backed cart in `dir` using the default slot key.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn open_cart(dir: &Path) -> FileCart {
    let backend = FileStore::open(dir).expect("failed to open cart directory");
    CartStore::open(SlotPersistence::new(backend))
}

/// A representative three-line cart, one line with variant options.
#[must_use]
pub fn sample_items() -> Vec<CartLineItem> {
    vec![
        CartLineItem::new("tee:m", "tee", "Pineapple Tee", 2, 2500)
            .with_variant("tee-m")
            .with_option("Size", "M")
            .with_option("Color", "Natural")
            .with_image_url("https://cdn.example/tee.jpg"),
        CartLineItem::new("mug", "mug", "Pineapple Mug", 1, 1400).with_seller("np-home"),
        CartLineItem::new("sticker", "sticker", "Sticker Pack", 4, 300),
    ]
}
