//! Property-based and deterministic invariant tests.
//!
//! Uses proptest to generate (seed, num_ops); replays synthetic catalog
//! activity and asserts: the movement log only ever grows, each operation
//! appends its bounded number of movements, movement ids increase by exactly
//! one, and every movement carries only the fields its kind defines.
//! Deterministic replay: same config ⇒ same outcome.

use proptest::prelude::*;
use stockroom::activity::{replay_into_catalog, ActivityConfig, ActivityGen, ActivityOp, CatalogOp};
use stockroom::{history, Catalog, HistoryFilter, Movement, MovementKind, NewProduct, ProductUpdate};

/// Asserts that a movement fills exactly the before/after slots its kind
/// defines and leaves the others empty.
fn assert_slots_match_kind(m: &Movement) {
    let (qb, qa, nb, na) = (
        m.quantity_before.is_some(),
        m.quantity_after.is_some(),
        m.name_before.is_some(),
        m.name_after.is_some(),
    );
    let expected = match m.kind {
        MovementKind::Registration => (false, true, false, false),
        MovementKind::QuantityChange => (true, true, false, false),
        MovementKind::NameChange => (false, false, true, true),
        MovementKind::Deletion => (true, false, false, false),
    };
    assert_eq!(
        (qb, qa, nb, na),
        expected,
        "movement {:?} kind {:?} has wrong slots",
        m.id,
        m.kind
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// For any (seed, num_ops) in range: replaying op by op, the log never
    /// shrinks, already-appended movements never change, and each operation
    /// appends exactly 1 movement (add, remove), 0 (skipped on an empty
    /// catalog), or 0..=2 (update).
    #[test]
    fn prop_log_is_append_only_with_bounded_deltas(
        seed in 0u64..100_000u64,
        num_ops in 10usize..150usize,
    ) {
        let ops = ActivityGen::new(ActivityConfig {
            seed,
            num_ops,
            ..Default::default()
        })
        .all_ops();
        let mut catalog = Catalog::new();

        for ActivityOp { op, actor } in ops {
            let entries_before = catalog.movements();
            let actor = actor.as_deref();
            let (min_delta, max_delta) = match op {
                CatalogOp::Add { name, quantity } => {
                    catalog
                        .add(NewProduct { name, quantity: Some(quantity) }, actor)
                        .unwrap();
                    (1, 1)
                }
                CatalogOp::Update { slot, name, quantity } => {
                    let list = catalog.list();
                    if list.is_empty() {
                        (0, 0)
                    } else {
                        let id = list[slot % list.len()].id;
                        catalog
                            .update(id, ProductUpdate { name, quantity }, actor)
                            .unwrap();
                        (0, 2)
                    }
                }
                CatalogOp::Remove { slot } => {
                    let list = catalog.list();
                    if list.is_empty() {
                        (0, 0)
                    } else {
                        let id = list[slot % list.len()].id;
                        catalog.remove(id, actor).unwrap();
                        (1, 1)
                    }
                }
            };

            let entries_after = catalog.movements();
            prop_assert!(entries_after.len() >= entries_before.len(), "log never shrinks");
            let delta = entries_after.len() - entries_before.len();
            prop_assert!(
                (min_delta..=max_delta).contains(&delta),
                "delta {} outside {}..={}",
                delta,
                min_delta,
                max_delta
            );
            prop_assert_eq!(
                &entries_after[..entries_before.len()],
                &entries_before[..],
                "appended entries must not rewrite earlier ones"
            );
        }
    }

    /// After any replay: movement ids are 1,2,3,..; every movement carries
    /// exactly its kind's fields; the catalog size equals registrations minus
    /// deletions; product names are non-empty and ids strictly ascending.
    #[test]
    fn prop_replay_leaves_consistent_state(
        seed in 0u64..100_000u64,
        num_ops in 10usize..150usize,
    ) {
        let ops = ActivityGen::new(ActivityConfig {
            seed,
            num_ops,
            ..Default::default()
        })
        .all_ops();
        let mut catalog = Catalog::new();
        replay_into_catalog(&mut catalog, ops).unwrap();

        let movements = catalog.movements();
        let mut registrations = 0usize;
        let mut deletions = 0usize;
        for (i, m) in movements.iter().enumerate() {
            prop_assert_eq!(m.id.0, i as u64 + 1, "ids increase by exactly one");
            assert_slots_match_kind(m);
            match m.kind {
                MovementKind::Registration => registrations += 1,
                MovementKind::Deletion => deletions += 1,
                _ => {}
            }
        }

        let products = catalog.list();
        prop_assert_eq!(products.len(), registrations - deletions);
        for pair in products.windows(2) {
            prop_assert!(pair[0].id < pair[1].id, "list is ordered by ascending id");
        }
        for p in &products {
            prop_assert!(!p.name.trim().is_empty(), "stored names stay non-empty");
        }
    }
}

/// Deterministic replay: same config ⇒ the same history, down to the
/// filtered query results (timestamps aside).
#[test]
fn deterministic_replay_same_seed_same_history() {
    let config = ActivityConfig {
        seed: 999,
        num_ops: 80,
        ..Default::default()
    };

    let mut catalog1 = Catalog::new();
    replay_into_catalog(&mut catalog1, ActivityGen::new(config.clone()).all_ops()).unwrap();
    let mut catalog2 = Catalog::new();
    replay_into_catalog(&mut catalog2, ActivityGen::new(config).all_ops()).unwrap();

    let filter = HistoryFilter {
        kind: Some(MovementKind::QuantityChange),
        actor: Some("user1".to_string()),
    };
    let fingerprint = |catalog: &Catalog| {
        history::query(catalog.log(), &filter)
            .into_iter()
            .map(|m| (m.id, m.product_id, m.quantity_before, m.quantity_after, m.modified_by))
            .collect::<Vec<_>>()
    };
    assert_eq!(fingerprint(&catalog1), fingerprint(&catalog2));
    assert_eq!(catalog1.list(), catalog2.list());
}
