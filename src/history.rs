//! Movement history queries.
//!
//! [`query`] is a pure read over a [`MovementLog`]: filter by movement kind
//! and/or acting user, then order newest first. The log itself is never
//! mutated by a query.

use crate::audit::MovementLog;
use crate::movement::Movement;
use crate::types::MovementKind;
use serde::Deserialize;

/// Filter criteria for a history query. Both fields are optional and combine
/// with AND. An actor filter that is empty or whitespace matches everything,
/// so a cleared search box behaves like no filter at all.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HistoryFilter {
    /// Restrict to one movement kind (wire token, e.g. `cadastro`).
    #[serde(rename = "type")]
    pub kind: Option<MovementKind>,
    /// Case-insensitive substring match against `modifiedBy`.
    pub actor: Option<String>,
}

/// Query the movement log: apply `filter`, then sort by `createdAt`
/// descending with movement id descending as the tie-break, so equal
/// timestamps still order newest-appended first.
///
/// Movements without an acting user never match a non-empty actor filter.
pub fn query(log: &impl MovementLog, filter: &HistoryFilter) -> Vec<Movement> {
    let actor_needle = filter
        .actor
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut movements: Vec<Movement> = log
        .entries()
        .into_iter()
        .filter(|m| filter.kind.map_or(true, |kind| m.kind == kind))
        .filter(|m| {
            actor_needle.as_ref().map_or(true, |needle| {
                m.modified_by
                    .as_deref()
                    .is_some_and(|by| by.to_lowercase().contains(needle))
            })
        })
        .collect();

    movements.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    movements
}
