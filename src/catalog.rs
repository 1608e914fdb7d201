//! Single-entry catalog service.
//!
//! Owns the product lifecycle and delegates audit emission so the HTTP layer
//! can mutate products without managing the store, the recorder, or id
//! assignment directly. Every mutating call takes the acting user explicitly;
//! there is no ambient session state in the core.

use crate::audit::{InMemoryMovementLog, MovementLog, Recorder};
use crate::error::CatalogError;
use crate::movement::{Change, Movement};
use crate::store::{InMemoryProductStore, ProductStore};
use crate::types::{NewProduct, Product, ProductId, ProductUpdate};
use log::info;

/// Inventory catalog holding the current products and, through its
/// [`Recorder`], the movement log.
///
/// Use [`Catalog::add`], [`Catalog::update`], and [`Catalog::remove`] to
/// mutate; each successful field-level change appends exactly one movement.
/// Product ids come from a monotonic counter independent of the collection
/// size, so ids are never reused after a removal.
#[derive(Debug)]
pub struct Catalog<S = InMemoryProductStore, L = InMemoryMovementLog> {
    store: S,
    recorder: Recorder<L>,
    next_product_id: u64,
}

impl Catalog {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        Self::with_store(InMemoryProductStore::new(), InMemoryMovementLog::new())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ProductStore, L: MovementLog> Catalog<S, L> {
    /// Builds a catalog over existing storage. The product id counter resumes
    /// past the highest stored id; movement ids continue from the log.
    pub fn with_store(store: S, log: L) -> Self {
        let next_product_id = store.max_id().map_or(1, |id| id.0 + 1);
        Self {
            store,
            recorder: Recorder::new(log),
            next_product_id,
        }
    }

    /// Adds a product: validates the name and quantity, assigns the next
    /// sequential id, and records a registration movement.
    ///
    /// A missing quantity defaults to 0; a negative one is rejected. Returns
    /// `Err` without touching catalog or log on invalid input.
    pub fn add(&mut self, new: NewProduct, actor: Option<&str>) -> Result<Product, CatalogError> {
        info!(
            "product add requested name={:?} quantity={:?} actor={:?}",
            new.name, new.quantity, actor
        );
        let name = new.name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        let quantity = new.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(CatalogError::Validation(
                "quantity must be a non-negative integer".to_string(),
            ));
        }
        let id = ProductId(self.next_product_id);
        self.next_product_id += 1;
        let product = Product {
            id,
            name: name.to_string(),
            quantity: quantity as u64,
        };
        self.recorder.record(
            &product,
            Change::Registration {
                quantity_after: product.quantity,
            },
            actor,
        );
        self.store.insert(product.clone());
        Ok(product)
    }

    /// Applies the provided fields of `update` to the product with `id`.
    ///
    /// A name updates only if non-empty after trimming; a quantity only if
    /// non-negative; other provided values are skipped. One movement is
    /// recorded per field whose value actually changed (name change first),
    /// so an update that changes nothing leaves the log untouched.
    pub fn update(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
        actor: Option<&str>,
    ) -> Result<Product, CatalogError> {
        let mut product = self.store.find(id).ok_or(CatalogError::NotFound(id))?;
        let name_before = product.name.clone();
        let quantity_before = product.quantity;

        if let Some(name) = update.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                product.name = name.to_string();
            }
        }
        if let Some(quantity) = update.quantity {
            if quantity >= 0 {
                product.quantity = quantity as u64;
            }
        }

        if product.name != name_before {
            self.recorder.record(
                &product,
                Change::Name {
                    before: name_before,
                    after: product.name.clone(),
                },
                actor,
            );
        }
        if product.quantity != quantity_before {
            self.recorder.record(
                &product,
                Change::Quantity {
                    before: quantity_before,
                    after: product.quantity,
                },
                actor,
            );
        }
        self.store.insert(product.clone());
        info!(
            "product updated id={} name={:?} quantity={}",
            product.id, product.name, product.quantity
        );
        Ok(product)
    }

    /// Removes the product with `id`, recording a deletion movement that
    /// captures the quantity it held. The movement is recorded before the
    /// product leaves the store so it always references a valid last state.
    ///
    /// Returns `Err(NotFound)` for an unknown id, leaving the log unchanged.
    pub fn remove(&mut self, id: ProductId, actor: Option<&str>) -> Result<(), CatalogError> {
        let product = self.store.find(id).ok_or(CatalogError::NotFound(id))?;
        self.recorder.record(
            &product,
            Change::Deletion {
                quantity_before: product.quantity,
            },
            actor,
        );
        let _ = self.store.remove(id);
        info!("product removed id={} name={:?}", id, product.name);
        Ok(())
    }

    /// All products, unfiltered, in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.store.list()
    }

    /// All recorded movements in append order.
    pub fn movements(&self) -> Vec<Movement> {
        self.recorder.log().entries()
    }

    /// Read access to the movement log (for history queries).
    pub fn log(&self) -> &L {
        self.recorder.log()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MovementKind;

    fn init_log() {
        let _ = env_logger::try_init();
    }

    fn new_product(name: &str, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            quantity: Some(quantity),
        }
    }

    #[test]
    fn add_assigns_sequential_ids_and_records_registration() {
        init_log();
        let mut catalog = Catalog::new();
        let first = catalog.add(new_product("Widget", 10), Some("alice")).unwrap();
        let second = catalog.add(new_product("Bolt", 3), Some("alice")).unwrap();
        assert_eq!(first.id, ProductId(1));
        assert_eq!(second.id, ProductId(2));

        let movements = catalog.movements();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].kind, MovementKind::Registration);
        assert_eq!(movements[0].product_id, ProductId(1));
        assert_eq!(movements[0].quantity_after, Some(10));
        assert_eq!(movements[0].modified_by.as_deref(), Some("alice"));
    }

    #[test]
    fn add_trims_name_and_defaults_missing_quantity_to_zero() {
        init_log();
        let mut catalog = Catalog::new();
        let product = catalog
            .add(
                NewProduct {
                    name: "  Widget  ".to_string(),
                    quantity: None,
                },
                None,
            )
            .unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 0);
        assert_eq!(catalog.movements()[0].quantity_after, Some(0));
    }

    #[test]
    fn add_empty_name_is_rejected_and_log_unchanged() {
        init_log();
        let mut catalog = Catalog::new();
        let err = catalog.add(new_product("   ", 5), None).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(catalog.list().is_empty());
        assert!(catalog.log().is_empty());
    }

    #[test]
    fn add_negative_quantity_is_rejected() {
        init_log();
        let mut catalog = Catalog::new();
        let err = catalog.add(new_product("Widget", -1), None).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(catalog.log().is_empty());
    }

    #[test]
    fn update_both_fields_records_name_change_then_quantity_change() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), Some("alice")).unwrap();
        let updated = catalog
            .update(
                ProductId(1),
                ProductUpdate {
                    name: Some("B".to_string()),
                    quantity: Some(1),
                },
                Some("bob"),
            )
            .unwrap();
        assert_eq!(updated.name, "B");
        assert_eq!(updated.quantity, 1);

        let movements = catalog.movements();
        assert_eq!(movements.len(), 3);
        assert_eq!(movements[1].kind, MovementKind::NameChange);
        assert_eq!(movements[1].name_before.as_deref(), Some("A"));
        assert_eq!(movements[1].name_after.as_deref(), Some("B"));
        // Snapshot name is the post-change name.
        assert_eq!(movements[1].product_name, "B");
        assert_eq!(movements[2].kind, MovementKind::QuantityChange);
        assert_eq!(movements[2].quantity_before, Some(3));
        assert_eq!(movements[2].quantity_after, Some(1));
        assert_eq!(movements[2].modified_by.as_deref(), Some("bob"));
    }

    #[test]
    fn update_with_same_values_emits_no_movement() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), None).unwrap();
        catalog
            .update(
                ProductId(1),
                ProductUpdate {
                    name: Some("A".to_string()),
                    quantity: Some(3),
                },
                None,
            )
            .unwrap();
        assert_eq!(catalog.log().len(), 1, "only the registration is logged");
    }

    #[test]
    fn update_skips_invalid_fields_instead_of_failing() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), None).unwrap();
        let updated = catalog
            .update(
                ProductId(1),
                ProductUpdate {
                    name: Some("   ".to_string()),
                    quantity: Some(-4),
                },
                None,
            )
            .unwrap();
        assert_eq!(updated.name, "A");
        assert_eq!(updated.quantity, 3);
        assert_eq!(catalog.log().len(), 1);
    }

    #[test]
    fn update_trims_name_before_comparing() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), None).unwrap();
        catalog
            .update(
                ProductId(1),
                ProductUpdate {
                    name: Some("  A  ".to_string()),
                    quantity: None,
                },
                None,
            )
            .unwrap();
        assert_eq!(catalog.log().len(), 1, "trimmed name is unchanged");
    }

    #[test]
    fn update_unknown_id_returns_not_found() {
        init_log();
        let mut catalog = Catalog::new();
        let err = catalog
            .update(ProductId(99), ProductUpdate::default(), None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ProductId(99))));
    }

    #[test]
    fn remove_records_deletion_before_the_product_disappears() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), Some("alice")).unwrap();
        catalog.remove(ProductId(1), Some("alice")).unwrap();
        assert!(catalog.list().is_empty());

        let movements = catalog.movements();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[1].kind, MovementKind::Deletion);
        assert_eq!(movements[1].quantity_before, Some(3));
        assert_eq!(movements[1].product_name, "A");
    }

    #[test]
    fn remove_unknown_id_returns_not_found_and_log_unchanged() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), None).unwrap();
        let err = catalog.remove(ProductId(7), None).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ProductId(7))));
        assert_eq!(catalog.log().len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 1), None).unwrap();
        catalog.add(new_product("B", 1), None).unwrap();
        catalog.remove(ProductId(2), None).unwrap();
        let third = catalog.add(new_product("C", 1), None).unwrap();
        assert_eq!(third.id, ProductId(3));
    }

    #[test]
    fn list_returns_products_in_insertion_order() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 1), None).unwrap();
        catalog.add(new_product("B", 2), None).unwrap();
        catalog.add(new_product("C", 3), None).unwrap();
        let names: Vec<String> = catalog.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn full_lifecycle_leaves_four_movements() {
        init_log();
        let mut catalog = Catalog::new();
        catalog.add(new_product("A", 3), Some("alice")).unwrap();
        catalog
            .update(
                ProductId(1),
                ProductUpdate {
                    name: Some("B".to_string()),
                    quantity: Some(1),
                },
                Some("alice"),
            )
            .unwrap();
        catalog.remove(ProductId(1), Some("alice")).unwrap();

        assert!(catalog.list().is_empty());
        let movements = catalog.movements();
        let kinds: Vec<MovementKind> = movements.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            [
                MovementKind::Registration,
                MovementKind::NameChange,
                MovementKind::QuantityChange,
                MovementKind::Deletion,
            ]
        );
        assert!(movements.iter().all(|m| m.product_id == ProductId(1)));
    }
}
