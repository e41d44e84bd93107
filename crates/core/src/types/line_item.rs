//! Cart line item type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{LineItemId, ProductId, SellerId, VariantId};

/// One entry in the shopper's cart.
///
/// Display fields (`product_name`, `variant_options`, `image_url`) are
/// copied from the catalog when the item is added and are never refreshed.
/// `price_cents` is likewise captured at add time.
///
/// Serialized with camelCase field names; this is the shape stored in the
/// durable cart slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique key for this purchasable configuration within the cart.
    pub id: LineItemId,
    /// Underlying product.
    pub product_id: ProductId,
    /// Product name at add time.
    pub product_name: String,
    /// Selected variant, if the product has variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    /// Option name to chosen value (e.g. "Size" → "M").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_options: Option<BTreeMap<String, String>>,
    /// Number of units.
    pub quantity: i64,
    /// Unit price in minor currency units.
    pub price_cents: i64,
    /// Display image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Seller, used when splitting orders downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
}

impl CartLineItem {
    /// Create a line item with the required fields; optional fields are empty.
    #[must_use]
    pub fn new(
        id: impl Into<LineItemId>,
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        quantity: i64,
        price_cents: i64,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            product_name: product_name.into(),
            variant_id: None,
            variant_options: None,
            quantity,
            price_cents,
            image_url: None,
            seller_id: None,
        }
    }

    /// Set the variant ID.
    #[must_use]
    pub fn with_variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// Add a selected variant option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variant_options
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the display image.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the seller.
    #[must_use]
    pub fn with_seller(mut self, seller_id: impl Into<SellerId>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }

    /// Line total in minor units (`price_cents × quantity`).
    ///
    /// Saturates instead of overflowing.
    #[must_use]
    pub const fn line_total_cents(&self) -> i64 {
        self.price_cents.saturating_mul(self.quantity)
    }
}
