//! Synthetic catalog activity generator.
//!
//! Deterministic, configurable stream of catalog operations for replay tests,
//! demos, and load tests. Same seed ⇒ same sequence of operations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audit::MovementLog;
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::store::ProductStore;
use crate::types::{NewProduct, ProductUpdate};

/// Configuration for the synthetic activity generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct ActivityConfig {
    /// RNG seed. Same seed ⇒ same operation stream.
    pub seed: u64,
    /// Number of operations to generate (used when collecting via [`ActivityGen::all_ops`]).
    pub num_ops: usize,
    /// Probability of an add (0.0..=1.0).
    pub add_ratio: f64,
    /// Probability of an update (0.0..=1.0). Removes take the remainder.
    pub update_ratio: f64,
    /// Quantity range (inclusive) for adds and quantity updates.
    pub quantity_min: i64,
    pub quantity_max: i64,
    /// Number of distinct acting users (user1..=userN).
    pub num_actors: u64,
    /// Probability an operation carries no acting user.
    pub anonymous_ratio: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_ops: 1000,
            add_ratio: 0.5,
            update_ratio: 0.35,
            quantity_min: 1,
            quantity_max: 100,
            num_actors: 5,
            anonymous_ratio: 0.1,
        }
    }
}

/// One catalog mutation. `slot` indexes the live product list at replay time,
/// interpreted modulo its length, so a generated stream stays valid no matter
/// how many products earlier operations removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogOp {
    Add { name: String, quantity: i64 },
    Update {
        slot: usize,
        name: Option<String>,
        quantity: Option<i64>,
    },
    Remove { slot: usize },
}

/// A catalog operation plus the user performing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityOp {
    pub op: CatalogOp,
    pub actor: Option<String>,
}

/// Deterministic operation stream. Create with [`ActivityGen::new`]; call
/// [`ActivityGen::next_op`] (or the collectors) to get operations.
pub struct ActivityGen {
    rng: StdRng,
    config: ActivityConfig,
    next_item: u64,
}

impl ActivityGen {
    /// Builds a generator with the given config. Same config (including seed) ⇒ same stream.
    pub fn new(config: ActivityConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            rng,
            config,
            next_item: 1,
        }
    }

    fn fresh_name(&mut self) -> String {
        let name = format!("Item {}", self.next_item);
        self.next_item += 1;
        name
    }

    /// Generates the next operation. Advances internal state (item counter, RNG).
    pub fn next_op(&mut self) -> ActivityOp {
        let r = self.rng.gen::<f64>();
        let op = if r < self.config.add_ratio {
            CatalogOp::Add {
                name: self.fresh_name(),
                quantity: self
                    .rng
                    .gen_range(self.config.quantity_min..=self.config.quantity_max),
            }
        } else if r < self.config.add_ratio + self.config.update_ratio {
            let slot = self.rng.gen::<usize>();
            // Rename, requantify, or both.
            match self.rng.gen_range(0..3u8) {
                0 => CatalogOp::Update {
                    slot,
                    name: Some(self.fresh_name()),
                    quantity: None,
                },
                1 => CatalogOp::Update {
                    slot,
                    name: None,
                    quantity: Some(
                        self.rng
                            .gen_range(self.config.quantity_min..=self.config.quantity_max),
                    ),
                },
                _ => CatalogOp::Update {
                    slot,
                    name: Some(self.fresh_name()),
                    quantity: Some(
                        self.rng
                            .gen_range(self.config.quantity_min..=self.config.quantity_max),
                    ),
                },
            }
        } else {
            CatalogOp::Remove {
                slot: self.rng.gen::<usize>(),
            }
        };
        let actor = if self.rng.gen::<f64>() < self.config.anonymous_ratio {
            None
        } else {
            Some(format!(
                "user{}",
                self.rng.gen_range(1..=self.config.num_actors.max(1))
            ))
        };
        ActivityOp { op, actor }
    }

    /// Returns a vector of exactly `n` operations. Advances the generator state.
    pub fn take_ops(&mut self, n: usize) -> Vec<ActivityOp> {
        (0..n).map(|_| self.next_op()).collect()
    }

    /// Returns the full stream of operations as defined by `config.num_ops`.
    pub fn all_ops(&mut self) -> Vec<ActivityOp> {
        self.take_ops(self.config.num_ops)
    }
}

/// Counts from one replay run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Operations applied to the catalog.
    pub applied: usize,
    /// Updates/removes dropped because the catalog was empty at that point.
    pub skipped: usize,
    /// Movements appended during the replay.
    pub movements: usize,
}

/// Replays a sequence of operations into the catalog. Returns counts (or the
/// first catalog error, which a generated stream never produces).
pub fn replay_into_catalog<S, L>(
    catalog: &mut Catalog<S, L>,
    ops: impl IntoIterator<Item = ActivityOp>,
) -> Result<ReplayStats, CatalogError>
where
    S: ProductStore,
    L: MovementLog,
{
    let movements_before = catalog.log().len();
    let mut stats = ReplayStats::default();
    for ActivityOp { op, actor } in ops {
        let actor = actor.as_deref();
        match op {
            CatalogOp::Add { name, quantity } => {
                catalog.add(
                    NewProduct {
                        name,
                        quantity: Some(quantity),
                    },
                    actor,
                )?;
                stats.applied += 1;
            }
            CatalogOp::Update {
                slot,
                name,
                quantity,
            } => {
                let list = catalog.list();
                if list.is_empty() {
                    stats.skipped += 1;
                    continue;
                }
                let id = list[slot % list.len()].id;
                catalog.update(id, ProductUpdate { name, quantity }, actor)?;
                stats.applied += 1;
            }
            CatalogOp::Remove { slot } => {
                let list = catalog.list();
                if list.is_empty() {
                    stats.skipped += 1;
                    continue;
                }
                let id = list[slot % list.len()].id;
                catalog.remove(id, actor)?;
                stats.applied += 1;
            }
        }
    }
    stats.movements = catalog.log().len() - movements_before;
    Ok(stats)
}
