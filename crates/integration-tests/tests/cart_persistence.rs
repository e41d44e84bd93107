//! Integration tests for the file-backed cart slot.
//!
//! These tests drop one store instance and open another over the same
//! directory, the way a page reload would.

#![allow(clippy::unwrap_used)]

use naked_pineapple_cart::{CURRENT_VERSION, CartDocument, DEFAULT_STORAGE_KEY};
use naked_pineapple_integration_tests::{open_cart, sample_items};

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_reload_restores_identical_cart() {
    let tmp = tempfile::tempdir().unwrap();

    let (expected, subtotal, count) = {
        let mut cart = open_cart(tmp.path());
        for item in sample_items() {
            cart.add_item(item);
        }
        (cart.checkout_lines(), cart.subtotal(), cart.item_count())
    };

    let cart = open_cart(tmp.path());
    assert_eq!(cart.checkout_lines(), expected);
    assert_eq!(cart.subtotal(), subtotal);
    assert_eq!(cart.item_count(), count);
    assert_eq!(subtotal, 2 * 2500 + 1400 + 4 * 300);
    assert_eq!(count, 7);

    let tee = cart.get("tee:m").unwrap();
    let options = tee.variant_options.as_ref().unwrap();
    assert_eq!(options.get("Size").map(String::as_str), Some("M"));
    assert_eq!(options.get("Color").map(String::as_str), Some("Natural"));
}

#[test]
fn test_reload_after_every_mutation_kind() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let mut cart = open_cart(tmp.path());
        for item in sample_items() {
            cart.add_item(item);
        }
    }
    {
        let mut cart = open_cart(tmp.path());
        cart.update_quantity("sticker", 10);
        cart.remove_item("mug");
    }
    {
        let cart = open_cart(tmp.path());
        let ids: Vec<&str> = cart.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["tee:m", "sticker"]);
        assert_eq!(cart.get("sticker").unwrap().quantity, 10);
        assert_eq!(cart.revision(), 5);
    }
    {
        let mut cart = open_cart(tmp.path());
        cart.clear_cart();
    }

    let cart = open_cart(tmp.path());
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), 0);
}

#[test]
fn test_slot_file_is_versioned_json() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cart = open_cart(tmp.path());
    cart.add_item(sample_items().remove(0));

    let raw = std::fs::read_to_string(tmp.path().join(DEFAULT_STORAGE_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["version"], CURRENT_VERSION);
    assert_eq!(value["revision"], 1);
    assert_eq!(value["writer"], cart.writer().to_string());
    assert_eq!(value["items"][0]["id"], "tee:m");
    assert_eq!(value["items"][0]["variantOptions"]["Size"], "M");
}

// =============================================================================
// Recovery & Migration
// =============================================================================

#[test]
fn test_corrupt_slot_file_starts_empty_and_is_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let slot = tmp.path().join(DEFAULT_STORAGE_KEY);
    std::fs::write(&slot, "{\"version\": 1, \"items\": [trunc").unwrap();

    let mut cart = open_cart(tmp.path());
    assert!(cart.is_empty());

    cart.add_item(sample_items().remove(1));
    let document = CartDocument::decode(&std::fs::read_to_string(&slot).unwrap()).unwrap();
    assert_eq!(document.items.len(), 1);
    assert_eq!(document.revision, 1);
}

#[test]
fn test_legacy_slot_file_is_migrated() {
    let tmp = tempfile::tempdir().unwrap();
    let legacy = serde_json::to_string(&sample_items()).unwrap();
    std::fs::write(tmp.path().join(DEFAULT_STORAGE_KEY), legacy).unwrap();

    let mut cart = open_cart(tmp.path());
    assert_eq!(cart.line_count(), 3);
    assert_eq!(cart.revision(), 0);

    cart.add_item(sample_items().remove(2));
    assert_eq!(cart.get("sticker").unwrap().quantity, 8);

    let raw = std::fs::read_to_string(tmp.path().join(DEFAULT_STORAGE_KEY)).unwrap();
    let document = CartDocument::decode(&raw).unwrap();
    assert_eq!(document.version, CURRENT_VERSION);
    assert_eq!(document.revision, 1);
}

#[test]
fn test_newer_schema_is_not_read() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(DEFAULT_STORAGE_KEY),
        r#"{"version":7,"lines":{"tee:m":{"qty":1}}}"#,
    )
    .unwrap();

    let cart = open_cart(tmp.path());
    assert!(cart.is_empty());
}
