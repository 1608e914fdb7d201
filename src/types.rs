//! Core types and IDs for the inventory catalog.
//!
//! Identifiers are newtype wrappers. [`Product`] is the catalog entity;
//! [`NewProduct`] and [`ProductUpdate`] are the mutation messages accepted by
//! [`crate::catalog::Catalog`]. [`MovementKind`] names the four audited
//! field-level changes and carries the exact wire tokens the existing client
//! consumes.

/// Unique product identifier. Monotonically assigned, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Movement identifier. Monotonically assigned, append-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct MovementId(pub u64);

impl std::fmt::Display for MovementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of audited change. Wire tokens are the literal strings the existing
/// client matches on and must not be altered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MovementKind {
    /// A product entered the catalog.
    #[serde(rename = "cadastro")]
    Registration,
    /// A product's quantity changed.
    #[serde(rename = "alteração_quantidade")]
    QuantityChange,
    /// A product was renamed.
    #[serde(rename = "alteração_nome")]
    NameChange,
    /// A product left the catalog.
    #[serde(rename = "exclusão")]
    Deletion,
}

/// Catalog entity.
///
/// `name` is non-empty after trimming; `quantity` is never negative. Both
/// invariants are enforced by [`crate::catalog::Catalog`], the only writer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u64,
}

/// Request to add a product to the catalog.
///
/// `quantity` is optional on the wire; a missing value means 0. A negative
/// value is rejected, not clamped.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Partial update for a product. Absent fields are untouched; provided but
/// invalid fields (empty name, negative quantity) are skipped rather than
/// rejected, so a partially bad update still applies its good fields.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}
