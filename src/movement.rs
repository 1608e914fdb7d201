//! Movement records.
//!
//! A [`Movement`] is emitted for every field-level product change:
//! registration, quantity change, name change, deletion. [`Change`] is the
//! payload a caller hands to the recorder; each variant carries exactly the
//! before/after fields its kind requires, so a movement can never be built
//! with missing or extraneous fields.

use crate::types::{MovementId, MovementKind, ProductId};
use chrono::{DateTime, Utc};

/// Immutable audit record of one field-level change to a product.
///
/// Wire shape (camelCase, optional fields omitted when absent, `createdAt`
/// as ISO-8601) is consumed by the existing client and must stay stable.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: MovementId,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    /// Product the change applied to; the product may since have been deleted.
    pub product_id: ProductId,
    /// Product name snapshot at event time (post-change name for updates).
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_before: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_after: Option<String>,
    /// Actor attributed to the change; null when auth is disabled.
    pub modified_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One field-level change, with exactly the fields its kind records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// Product entered the catalog with this initial quantity.
    Registration { quantity_after: u64 },
    /// Quantity moved from `before` to `after`.
    Quantity { before: u64, after: u64 },
    /// Name moved from `before` to `after`.
    Name { before: String, after: String },
    /// Product left the catalog holding this quantity.
    Deletion { quantity_before: u64 },
}

impl Change {
    pub fn kind(&self) -> MovementKind {
        match self {
            Change::Registration { .. } => MovementKind::Registration,
            Change::Quantity { .. } => MovementKind::QuantityChange,
            Change::Name { .. } => MovementKind::NameChange,
            Change::Deletion { .. } => MovementKind::Deletion,
        }
    }

    /// Splits the payload into the movement's optional slots:
    /// (quantity_before, quantity_after, name_before, name_after).
    pub(crate) fn into_slots(self) -> (Option<u64>, Option<u64>, Option<String>, Option<String>) {
        match self {
            Change::Registration { quantity_after } => (None, Some(quantity_after), None, None),
            Change::Quantity { before, after } => (Some(before), Some(after), None, None),
            Change::Name { before, after } => (None, None, Some(before), Some(after)),
            Change::Deletion { quantity_before } => (Some(quantity_before), None, None, None),
        }
    }
}
