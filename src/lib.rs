//! # Stockroom
//!
//! Inventory tracking core: a product catalog whose every mutation is
//! recorded in an append-only movement log, plus history queries over
//! that log and the REST layer exposing both.
//!
//! ## Entry point
//!
//! Use [`Catalog`] as the single entry point: create with [`Catalog::new`],
//! then [`Catalog::add`], [`Catalog::update`], and [`Catalog::remove`]. Each
//! mutation takes the acting user explicitly and appends movements through
//! the internal [`Recorder`].
//!
//! ## Example
//!
//! ```rust
//! use stockroom::{history, Catalog, HistoryFilter, MovementKind, NewProduct, ProductUpdate};
//!
//! let mut catalog = Catalog::new();
//! let product = catalog
//!     .add(
//!         NewProduct {
//!             name: "Widget".into(),
//!             quantity: Some(3),
//!         },
//!         Some("alice"),
//!     )
//!     .unwrap();
//! catalog
//!     .update(
//!         product.id,
//!         ProductUpdate {
//!             name: None,
//!             quantity: Some(5),
//!         },
//!         Some("alice"),
//!     )
//!     .unwrap();
//!
//! let movements = history::query(catalog.log(), &HistoryFilter::default());
//! assert_eq!(movements.len(), 2);
//! // Newest first: the quantity change, then the registration.
//! assert_eq!(movements[0].kind, MovementKind::QuantityChange);
//! assert_eq!(movements[1].kind, MovementKind::Registration);
//! ```
//!
//! ## Lower-level API
//!
//! You can also use the [`ProductStore`] and [`MovementLog`] traits directly
//! to run the catalog over your own storage, and [`history::query`] over any
//! log implementation.

pub mod activity;
pub mod api;
pub mod audit;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod history;
pub mod movement;
pub mod store;
pub mod types;

pub use activity::{
    replay_into_catalog, ActivityConfig, ActivityGen, ActivityOp, CatalogOp, ReplayStats,
};
pub use audit::{InMemoryMovementLog, MovementLog, Recorder};
pub use auth::{Auth, AuthUser, Session};
pub use catalog::Catalog;
pub use error::{AuthError, CatalogError};
pub use history::{query, HistoryFilter};
pub use movement::{Change, Movement};
pub use store::{InMemoryProductStore, ProductStore};
pub use types::{MovementId, MovementKind, NewProduct, Product, ProductId, ProductUpdate};
