//! The cart aggregation store.
//!
//! Holds the shopper's line items in insertion order, keyed by line item ID,
//! and mirrors the whole cart to its [`CartPersistence`] after every mutation.
//!
//! # Invariants
//!
//! - At most one line item per ID. Adding an ID that is already present
//!   increases its quantity instead of inserting a second entry.
//! - Setting a quantity of zero or less through [`CartStore::update_quantity`]
//!   removes the line item.
//! - A stored line item's price and display fields never change after it is
//!   first added.
//!
//! Mutators never fail. Input is not validated here; callers are expected to
//! pass sensible quantities and prices.

use indexmap::IndexMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use naked_pineapple_core::{CartLineItem, CurrencyCode, LineItemId, Price};

use crate::document::CartDocument;
use crate::persistence::CartPersistence;

/// Client-side shopping cart with durable persistence.
///
/// Construct one per application instance with [`CartStore::open`] and pass
/// it by reference to whatever renders or submits the cart.
#[derive(Debug)]
pub struct CartStore<P> {
    items: IndexMap<LineItemId, CartLineItem>,
    persistence: P,
    writer: Uuid,
    revision: u64,
    /// `(revision, writer)` of the last document this instance wrote or adopted.
    last_seen: (u64, Uuid),
}

impl<P: CartPersistence> CartStore<P> {
    /// Create a store, restoring any cart held by `persistence`.
    ///
    /// An absent or unreadable document yields an empty cart.
    pub fn open(persistence: P) -> Self {
        let writer = Uuid::new_v4();
        let mut store = Self {
            items: IndexMap::new(),
            persistence,
            writer,
            revision: 0,
            last_seen: (0, Uuid::nil()),
        };

        if let Some(document) = store.persistence.load() {
            store.adopt(document);
            info!(
                lines = store.items.len(),
                revision = store.revision,
                "Restored persisted cart"
            );
        }

        store
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a line item, merging with an existing entry of the same ID.
    ///
    /// On merge only the quantity changes; the existing entry's price and
    /// display fields are kept.
    #[instrument(skip(self, item), fields(line_item_id = %item.id, quantity = item.quantity))]
    pub fn add_item(&mut self, item: CartLineItem) {
        if let Some(existing) = self.items.get_mut(&item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            debug!(total_quantity = existing.quantity, "Merged into existing line item");
        } else {
            debug!("Appended new line item");
            self.items.insert(item.id.clone(), item);
        }
        self.persist();
    }

    /// Remove a line item. Removing an absent ID is a no-op.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &str) {
        if self.items.shift_remove(id).is_some() {
            debug!("Removed line item");
        }
        self.persist();
    }

    /// Set a line item's quantity, removing it when `quantity <= 0`.
    ///
    /// Does nothing (beyond persisting) if `id` is not in the cart.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            if self.items.shift_remove(id).is_some() {
                debug!("Removed line item on non-positive quantity");
            }
        } else if let Some(item) = self.items.get_mut(id) {
            item.quantity = quantity;
            debug!("Updated line item quantity");
        }
        self.persist();
    }

    /// Remove every line item.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
        self.persist();
    }

    /// Bring this instance and the persisted slot back in line after other
    /// instances may have written to it.
    ///
    /// The slot is last-write-wins, so a document written by someone else is
    /// adopted when its revision is at least this instance's. If the slot holds
    /// an older revision from another writer, this instance's save was
    /// overwritten by a stale one and its cart is saved again so siblings pick
    /// it up on their next reconcile.
    ///
    /// Returns `true` if the in-memory cart was replaced. Nothing calls this
    /// automatically; invoke it when the slot is known to have changed.
    #[instrument(skip(self))]
    pub fn reconcile(&mut self) -> bool {
        let Some(document) = self.persistence.load() else {
            return false;
        };

        if (document.revision, document.writer) == self.last_seen {
            return false;
        }

        if document.revision < self.revision {
            info!(
                revision = self.revision,
                persisted_revision = document.revision,
                "Republishing cart over older persisted revision"
            );
            self.persist();
            return false;
        }

        info!(
            from_revision = self.revision,
            to_revision = document.revision,
            "Adopting persisted cart from another writer"
        );
        self.adopt(document);
        true
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Sum of `price_cents × quantity` over all line items, in minor units.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.items
            .values()
            .map(CartLineItem::line_total_cents)
            .fold(0, i64::saturating_add)
    }

    /// The subtotal as a [`Price`] in `currency`.
    #[must_use]
    pub fn subtotal_price(&self, currency: CurrencyCode) -> Price {
        Price::from_cents(self.subtotal(), currency)
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items
            .values()
            .map(|item| item.quantity)
            .fold(0, i64::saturating_add)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Look up a line item by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.get(id)
    }

    /// Whether a line item with this ID is in the cart.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &CartLineItem> {
        self.items.values()
    }

    /// Owned copy of every line item, in insertion order, for building a
    /// checkout submission.
    #[must_use]
    pub fn checkout_lines(&self) -> Vec<CartLineItem> {
        self.items.values().cloned().collect()
    }

    /// Revision of the in-memory cart. Increases by one on every save.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Random ID of this store instance, stamped on every document it saves.
    #[must_use]
    pub const fn writer(&self) -> Uuid {
        self.writer
    }

    /// The persistence backend.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn persist(&mut self) {
        self.revision = self.revision.saturating_add(1);
        let document = CartDocument::new(self.checkout_lines(), self.revision, self.writer);
        self.persistence.save(&document);
        self.last_seen = (self.revision, self.writer);
    }

    /// Replace the in-memory cart with `document`.
    ///
    /// Duplicate IDs in the document are merged the same way `add_item`
    /// merges them, so a hand-edited or legacy document cannot break the
    /// one-entry-per-ID rule.
    fn adopt(&mut self, document: CartDocument) {
        let mut items: IndexMap<LineItemId, CartLineItem> =
            IndexMap::with_capacity(document.items.len());
        for item in document.items {
            if let Some(existing) = items.get_mut(&item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            } else {
                items.insert(item.id.clone(), item);
            }
        }

        self.items = items;
        self.revision = document.revision;
        self.last_seen = (document.revision, document.writer);
    }
}
