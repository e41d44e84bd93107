//! Integration tests for two cart instances sharing one slot.
//!
//! Writes are last-write-wins on the slot. `reconcile` adopts what a sibling
//! wrote, or saves again when a stale sibling overwrote a newer cart.

#![allow(clippy::unwrap_used)]

use naked_pineapple_core::CartLineItem;
use naked_pineapple_integration_tests::open_cart;

#[test]
fn test_sibling_sees_update_after_reconcile() {
    let tmp = tempfile::tempdir().unwrap();
    let mut tab_a = open_cart(tmp.path());
    let mut tab_b = open_cart(tmp.path());

    tab_a.add_item(CartLineItem::new("mug", "mug", "Mug", 1, 1400));
    assert!(tab_b.is_empty());

    assert!(tab_b.reconcile());
    assert_eq!(tab_b.item_count(), 1);

    tab_b.update_quantity("mug", 3);
    assert!(tab_a.reconcile());
    assert_eq!(tab_a.get("mug").unwrap().quantity, 3);
    assert!(!tab_a.reconcile());
}

#[test]
fn test_unreconciled_write_clobbers_sibling() {
    let tmp = tempfile::tempdir().unwrap();
    let mut tab_a = open_cart(tmp.path());
    let mut tab_b = open_cart(tmp.path());

    tab_a.add_item(CartLineItem::new("mug", "mug", "Mug", 1, 1400));
    tab_b.add_item(CartLineItem::new("hat", "hat", "Hat", 1, 900));

    // Both wrote revision 1; the slot holds tab_b's cart only.
    let reloaded = open_cart(tmp.path());
    let ids: Vec<&str> = reloaded.items().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["hat"]);
}

#[test]
fn test_equal_revisions_converge_on_slot() {
    let tmp = tempfile::tempdir().unwrap();
    let mut tab_a = open_cart(tmp.path());
    let mut tab_b = open_cart(tmp.path());

    tab_a.add_item(CartLineItem::new("mug", "mug", "Mug", 1, 1400));
    tab_b.add_item(CartLineItem::new("hat", "hat", "Hat", 1, 900));

    // Slot holds tab_b's revision 1, whichever writer id is larger.
    assert!(tab_a.reconcile());
    assert!(!tab_b.reconcile());

    let slot = open_cart(tmp.path());
    assert_eq!(tab_a.checkout_lines(), tab_b.checkout_lines());
    assert_eq!(slot.checkout_lines(), tab_b.checkout_lines());
    assert_eq!(tab_a.get("hat").unwrap().quantity, 1);
    assert!(!tab_a.contains("mug"));
}

#[test]
fn test_clobbered_newer_cart_is_republished() {
    let tmp = tempfile::tempdir().unwrap();
    let mut tab_a = open_cart(tmp.path());
    let mut tab_b = open_cart(tmp.path());

    tab_a.add_item(CartLineItem::new("mug", "mug", "Mug", 1, 1400));
    tab_a.update_quantity("mug", 2);
    tab_b.add_item(CartLineItem::new("hat", "hat", "Hat", 1, 900));

    // tab_a is at revision 2 but the slot holds tab_b's revision 1.
    assert!(!tab_a.reconcile());
    assert!(tab_b.reconcile());
    assert!(!tab_a.reconcile());

    let slot = open_cart(tmp.path());
    assert_eq!(tab_b.checkout_lines(), tab_a.checkout_lines());
    assert_eq!(slot.checkout_lines(), tab_a.checkout_lines());
    assert_eq!(slot.get("mug").unwrap().quantity, 2);
}
