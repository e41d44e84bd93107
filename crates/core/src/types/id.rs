//! Newtype IDs for type-safe entity references.
//!
//! Cart data arrives from the Storefront API as opaque string IDs (Shopify
//! GIDs, handles, or composite `product:variant` keys). Use the `define_id!`
//! macro to wrap them so a product ID can never be passed where a line item
//! ID is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Borrow<str>` implementations
///
/// # Example
///
/// ```rust
/// # use naked_pineapple_core::define_id;
/// define_id!(LineItemId);
/// define_id!(ProductId);
///
/// let line = LineItemId::new("gid://shopify/ProductVariant/1");
/// let product = ProductId::new("gid://shopify/Product/1");
///
/// // These are different types, so this won't compile:
/// // let _: LineItemId = product;
/// assert_eq!(line.as_str(), "gid://shopify/ProductVariant/1");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

// Cart entity IDs
define_id!(LineItemId);
define_id!(ProductId);
define_id!(VariantId);
define_id!(SellerId);
