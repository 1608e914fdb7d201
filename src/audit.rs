//! Append-only movement log and the recorder that writes to it.
//!
//! The [`Recorder`] is the single writer: it assigns sequential movement ids,
//! stamps timestamps, attributes the actor, and appends. Everything else
//! reads. [`MovementLog`] is the storage seam: the in-memory implementation
//! backs this process; a durable store can be swapped in behind the same
//! trait without touching audit semantics.

use crate::movement::{Change, Movement};
use crate::types::{MovementId, Product};
use chrono::Utc;
use log::info;

/// Storage for movement records. Implementations must be append-only: a
/// record, once appended, is never mutated or removed, so the log length is
/// monotonically non-decreasing for the life of the store.
pub trait MovementLog {
    /// Appends one record. Infallible for in-memory storage; a durable
    /// implementation that can fail must not acknowledge the enclosing
    /// mutation until the append has succeeded.
    fn append(&mut self, movement: Movement);

    /// All records in append order.
    fn entries(&self) -> Vec<Movement>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vec-backed movement log. The default storage for a running process.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMovementLog {
    entries: Vec<Movement>,
}

impl InMemoryMovementLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovementLog for InMemoryMovementLog {
    fn append(&mut self, movement: Movement) {
        self.entries.push(movement);
    }

    fn entries(&self) -> Vec<Movement> {
        self.entries.clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Single writer to the movement log.
///
/// Constructs one [`Movement`] per recorded change and appends it. Never
/// rejects a call: [`Change`] variants carry exactly the fields their kind
/// requires, so a well-formed record is guaranteed at compile time.
#[derive(Clone, Debug)]
pub struct Recorder<L = InMemoryMovementLog> {
    log: L,
    next_id: u64,
}

impl<L: MovementLog> Recorder<L> {
    /// Wraps a log. Ids continue from the current length; the log never
    /// shrinks, so sequential ids stay collision-free.
    pub fn new(log: L) -> Self {
        let next_id = log.len() as u64 + 1;
        Self { log, next_id }
    }

    /// Records one change against a product snapshot, attributed to `actor`.
    /// Assigns the next sequential id and stamps the current time.
    pub fn record(&mut self, product: &Product, change: Change, actor: Option<&str>) -> Movement {
        let id = MovementId(self.next_id);
        self.next_id += 1;
        let kind = change.kind();
        let (quantity_before, quantity_after, name_before, name_after) = change.into_slots();
        let movement = Movement {
            id,
            kind,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity_before,
            quantity_after,
            name_before,
            name_after,
            modified_by: actor.map(str::to_string),
            created_at: Utc::now(),
        };
        info!(
            "movement recorded id={} kind={:?} product_id={} actor={:?}",
            movement.id, movement.kind, movement.product_id, movement.modified_by
        );
        self.log.append(movement.clone());
        movement
    }

    /// Read access to the underlying log.
    pub fn log(&self) -> &L {
        &self.log
    }
}

impl Default for Recorder<InMemoryMovementLog> {
    fn default() -> Self {
        Self::new(InMemoryMovementLog::new())
    }
}
