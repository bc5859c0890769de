//! Durable representation of a [`CartSnapshot`].
//!
//! Records carry a `version` discriminator. A record whose version is not
//! known to this build fails to decode and is treated as corrupt, so older or
//! newer layouts are discarded instead of being misread.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::PersistenceError;
use super::model::{Attributes, CartLineItem, CartSnapshot, WishlistEntry};
use crate::domain::shared::value_objects::ProductId;

/// Fixed key the snapshot is stored under within a device scope.
pub const SNAPSHOT_KEY: &str = "cart.snapshot";

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "version")]
enum PersistedSnapshot {
    #[serde(rename = "v1")]
    V1(SnapshotV1),
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotV1 {
    items: Vec<LineItemV1>,
    wishlist: Vec<ProductId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LineItemV1 {
    product_id: ProductId,
    #[serde(default)]
    attributes: Attributes,
    quantity: u32,
    price: BigDecimal,
}

impl From<&CartSnapshot> for PersistedSnapshot {
    fn from(snapshot: &CartSnapshot) -> Self {
        PersistedSnapshot::V1(SnapshotV1 {
            items: snapshot
                .items()
                .iter()
                .map(|item| LineItemV1 {
                    product_id: item.product_id.clone(),
                    attributes: item.attributes.clone(),
                    quantity: item.quantity,
                    price: item.price.clone(),
                })
                .collect(),
            wishlist: snapshot
                .wishlist()
                .iter()
                .map(|entry| entry.product_id.clone())
                .collect(),
        })
    }
}

impl TryFrom<PersistedSnapshot> for CartSnapshot {
    type Error = PersistenceError;

    fn try_from(record: PersistedSnapshot) -> Result<Self, Self::Error> {
        match record {
            PersistedSnapshot::V1(v1) => {
                let items = v1
                    .items
                    .into_iter()
                    .map(|item| CartLineItem {
                        product_id: item.product_id,
                        attributes: item.attributes,
                        quantity: item.quantity,
                        price: item.price,
                    })
                    .collect();
                let wishlist = v1
                    .wishlist
                    .into_iter()
                    .map(|product_id| WishlistEntry { product_id })
                    .collect();

                CartSnapshot::from_parts(items, wishlist).map_err(PersistenceError::ReadCorrupt)
            }
        }
    }
}

/// Serializes a snapshot into its current versioned layout.
pub fn encode(snapshot: &CartSnapshot) -> Result<String, PersistenceError> {
    serde_json::to_string(&PersistedSnapshot::from(snapshot))
        .map_err(|e| PersistenceError::EncodeFailed(e.to_string()))
}

/// Parses a stored payload. Unknown versions, malformed JSON and records that
/// break cart invariants all yield [`PersistenceError::ReadCorrupt`].
pub fn decode(payload: &str) -> Result<CartSnapshot, PersistenceError> {
    let record: PersistedSnapshot = serde_json::from_str(payload)
        .map_err(|e| PersistenceError::ReadCorrupt(e.to_string()))?;
    CartSnapshot::try_from(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn sample() -> CartSnapshot {
        let shirt = CartLineItem::new(
            ProductId::new("shirt"),
            Attributes::from([("size".to_string(), "M".to_string())]),
            "19.99".parse().unwrap(),
            2,
        )
        .unwrap();
        let mug = CartLineItem::new(
            ProductId::new("mug"),
            Attributes::new(),
            BigDecimal::from(8),
            1,
        )
        .unwrap();
        let wish = WishlistEntry {
            product_id: ProductId::new("lamp"),
        };

        CartSnapshot::from_parts(vec![shirt, mug], vec![wish]).unwrap()
    }

    #[test]
    fn should_reproduce_snapshot_after_encode_and_decode() {
        let snapshot = sample();

        let payload = encode(&snapshot).unwrap();
        let restored = decode(&payload).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.items()[0].product_id.as_str(), "shirt");
    }

    #[test]
    fn should_tag_payload_with_version() {
        let payload = encode(&CartSnapshot::empty()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(value["version"], "v1");
    }

    #[test]
    fn should_reject_unknown_version() {
        let payload = r#"{"version":"v99","items":[],"wishlist":[]}"#;

        let result = decode(payload);

        assert!(matches!(result, Err(PersistenceError::ReadCorrupt(_))));
    }

    #[test]
    fn should_reject_untagged_payload() {
        let payload = r#"{"items":[],"wishlist":[]}"#;

        assert!(matches!(
            decode(payload),
            Err(PersistenceError::ReadCorrupt(_))
        ));
    }

    #[test]
    fn should_reject_malformed_json() {
        assert!(matches!(
            decode("{not json"),
            Err(PersistenceError::ReadCorrupt(_))
        ));
    }

    #[test]
    fn should_reject_record_breaking_invariants() {
        let payload = r#"{"version":"v1","items":[
            {"product_id":"A","quantity":0,"price":"1"}
        ],"wishlist":[]}"#;

        assert!(matches!(
            decode(payload),
            Err(PersistenceError::ReadCorrupt(_))
        ));
    }

    fn snapshots() -> impl Strategy<Value = CartSnapshot> {
        let lines = prop::collection::btree_map(
            ("[a-e]", prop::option::of("[SML]")),
            (1u32..100, 1i64..1_000_000),
            0..6,
        );
        let wishlist = prop::collection::btree_set("[a-h]", 0..5);
        (lines, wishlist).prop_map(|(lines, wishlist): (BTreeMap<_, _>, _)| {
            let items = lines
                .into_iter()
                .map(|((product, size), (quantity, cents))| {
                    let attributes = size
                        .map(|size| Attributes::from([("size".to_string(), size)]))
                        .unwrap_or_default();
                    CartLineItem::new(
                        ProductId::new(&product),
                        attributes,
                        BigDecimal::new(cents.into(), 2),
                        quantity,
                    )
                    .unwrap()
                })
                .collect();
            let wishlist = wishlist
                .into_iter()
                .map(|product| WishlistEntry {
                    product_id: ProductId::new(&product),
                })
                .collect();
            CartSnapshot::from_parts(items, wishlist).unwrap()
        })
    }

    proptest! {
        #[test]
        fn should_decode_any_encoded_snapshot_unchanged(snapshot in snapshots()) {
            let payload = encode(&snapshot).unwrap();

            prop_assert_eq!(decode(&payload).unwrap(), snapshot);
        }
    }
}
