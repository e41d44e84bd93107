//! Persisted cart document schema and migrations.
//!
//! # Versions
//!
//! - **0** - legacy, unversioned: a bare JSON array of line items. An object
//!   of the form `{"version": 0, "items": [...]}` is read the same way.
//! - **1** - current:
//!
//! ```json
//! {
//!   "version": 1,
//!   "revision": 7,
//!   "writer": "5f0c6a1e-8f0e-4a43-9b8e-0d7f3f9d2a11",
//!   "savedAt": "2026-10-18T12:00:00Z",
//!   "items": [{ "id": "tee-m", "productId": "tee", "productName": "Tee", "quantity": 1, "priceCents": 2500 }]
//! }
//! ```
//!
//! Every older version is migrated forward on read; documents are always
//! written at [`CURRENT_VERSION`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use naked_pineapple_core::CartLineItem;

use crate::error::DocumentError;

/// Schema version written by this build.
pub const CURRENT_VERSION: u64 = 1;

/// The full cart as stored in the durable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDocument {
    /// Schema version tag.
    pub version: u64,
    /// Number of saves in this cart's history. Legacy documents start at 0.
    #[serde(default)]
    pub revision: u64,
    /// Store instance that wrote this document (nil for legacy documents).
    #[serde(default)]
    pub writer: Uuid,
    /// Wall-clock time of the save, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Line items in insertion order.
    pub items: Vec<CartLineItem>,
}

impl CartDocument {
    /// Build a current-version document stamped with the current time.
    #[must_use]
    pub fn new(items: Vec<CartLineItem>, revision: u64, writer: Uuid) -> Self {
        Self {
            version: CURRENT_VERSION,
            revision,
            writer,
            saved_at: Some(Utc::now()),
            items,
        }
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored document of any known version and migrate it to
    /// [`CURRENT_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if the text is not JSON, has no recognizable
    /// shape, or carries a version newer than this build understands.
    pub fn decode(raw: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(raw)?;
        let version = match &value {
            Value::Array(_) => 0,
            Value::Object(map) => map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or(DocumentError::Malformed("missing numeric version tag"))?,
            _ => return Err(DocumentError::Malformed("expected an object or an array")),
        };
        migrate(version, value)
    }
}

/// Upgrade a parsed document from `version` to [`CURRENT_VERSION`].
fn migrate(version: u64, value: Value) -> Result<CartDocument, DocumentError> {
    match version {
        0 => from_v0(value),
        CURRENT_VERSION => Ok(serde_json::from_value(value)?),
        found => Err(DocumentError::UnsupportedVersion {
            found,
            supported: CURRENT_VERSION,
        }),
    }
}

fn from_v0(value: Value) -> Result<CartDocument, DocumentError> {
    let items = match value {
        items @ Value::Array(_) => items,
        Value::Object(mut map) => map
            .remove("items")
            .ok_or(DocumentError::Malformed("version 0 object has no items"))?,
        _ => return Err(DocumentError::Malformed("expected an item list")),
    };

    Ok(CartDocument {
        version: CURRENT_VERSION,
        revision: 0,
        writer: Uuid::nil(),
        saved_at: None,
        items: serde_json::from_value(items)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tee() -> CartLineItem {
        CartLineItem::new("tee-m", "tee", "Pineapple Tee", 2, 2500)
    }

    #[test]
    fn test_encode_decode_current_version() {
        let writer = Uuid::new_v4();
        let doc = CartDocument::new(vec![tee()], 3, writer);

        let decoded = CartDocument::decode(&doc.encode().unwrap()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_encoded_shape() {
        let doc = CartDocument::new(vec![tee()], 1, Uuid::nil());
        let value: Value = serde_json::from_str(&doc.encode().unwrap()).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["revision"], 1);
        assert!(value["savedAt"].is_string());
        assert_eq!(value["items"][0]["priceCents"], 2500);
    }

    #[test]
    fn test_decode_legacy_bare_array() {
        let raw = r#"[
            {"id":"a","productId":"p1","productName":"Hat","quantity":1,"priceCents":900},
            {"id":"b","productId":"p2","productName":"Mug","quantity":3,"priceCents":1200,
             "variantOptions":{"Color":"Yellow"}}
        ]"#;

        let doc = CartDocument::decode(raw).unwrap();
        assert_eq!(doc.version, CURRENT_VERSION);
        assert_eq!(doc.revision, 0);
        assert!(doc.writer.is_nil());
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[1].quantity, 3);
    }

    #[test]
    fn test_decode_legacy_object() {
        let raw = r#"{"version":0,"items":[{"id":"a","productId":"p","productName":"Hat","quantity":1,"priceCents":900}]}"#;

        let doc = CartDocument::decode(raw).unwrap();
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn test_decode_future_version_is_rejected() {
        let raw = r#"{"version":2,"items":[]}"#;
        assert!(matches!(
            CartDocument::decode(raw),
            Err(DocumentError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_decode_corrupt_json() {
        assert!(matches!(
            CartDocument::decode("{not json"),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_decode_missing_version_tag() {
        assert!(matches!(
            CartDocument::decode(r#"{"items":[]}"#),
            Err(DocumentError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_wrong_item_shape() {
        let raw = r#"{"version":1,"items":[{"id":"a"}]}"#;
        assert!(matches!(
            CartDocument::decode(raw),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_decode_scalar_is_malformed() {
        assert!(matches!(
            CartDocument::decode("42"),
            Err(DocumentError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_keeps_max_revision() {
        let raw = format!(r#"{{"version":1,"revision":{},"items":[]}}"#, u64::MAX);
        let doc = CartDocument::decode(&raw).unwrap();
        assert_eq!(doc.revision, u64::MAX);
    }
}
