//! One-time migration of legacy numeric positions into order keys.
//!
//! # Responsibility
//! - Convert `position`-ordered records into key-ordered items per group.
//!
//! # Invariants
//! - Within one group, `position[a] < position[b]` implies `key[a] < key[b]`.
//! - Equal positions keep input order and still get distinct keys.
//! - Records without a position land after every positioned record.
//! - Output keeps input order; only keys are new.

use crate::key::{initial_key, key_after, key_between, position_to_key, Key};
use crate::model::item::{GroupId, Item, ItemId, ItemKind};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record shape written before order keys existed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPlacement {
    /// Stable item ID carried over unchanged.
    pub id: ItemId,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub group: GroupId,
    /// Legacy numeric coordinate; `None` when the record never had one.
    #[serde(default)]
    pub position: Option<f64>,
}

/// Assigns keys to legacy records, returning items in input order.
pub fn migrate_legacy_positions(records: &[LegacyPlacement]) -> Vec<Item> {
    let hint = records.len();
    let mut by_group: BTreeMap<&GroupId, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        by_group.entry(&record.group).or_default().push(index);
    }

    let mut keys: Vec<Option<Key>> = vec![None; records.len()];
    for members in by_group.values() {
        let (mut positioned, unpositioned): (Vec<usize>, Vec<usize>) = members
            .iter()
            .copied()
            .partition(|&index| records[index].position.is_some());
        positioned.sort_by(|&left, &right| {
            let left = records[left].position.unwrap_or_default();
            let right = records[right].position.unwrap_or_default();
            left.total_cmp(&right)
        });

        let raw: Vec<Key> = positioned
            .iter()
            .map(|&index| position_to_key(records[index].position.unwrap_or_default(), hint))
            .collect();
        let mut previous: Option<Key> = None;
        for (slot, &index) in positioned.iter().enumerate() {
            let key = separate(previous.as_ref(), &raw[slot], &raw[slot + 1..]);
            keys[index] = Some(key.clone());
            previous = Some(key);
        }

        for index in unpositioned {
            let key = previous.as_ref().map(key_after).unwrap_or_else(initial_key);
            keys[index] = Some(key.clone());
            previous = Some(key);
        }
    }

    info!(
        "event=legacy_migrate module=group status=ok records={} groups={}",
        records.len(),
        by_group.len()
    );

    records
        .iter()
        .zip(keys)
        .map(|(record, key)| {
            Item::with_id(
                record.id,
                record.kind,
                record.group.clone(),
                key.unwrap_or_else(initial_key),
            )
            .with_content(record.content.clone())
        })
        .collect()
}

/// Keeps `candidate` unless it collides with `previous`; then mints a key
/// between `previous` and the next distinct raw key.
fn separate(previous: Option<&Key>, candidate: &Key, upcoming: &[Key]) -> Key {
    let Some(previous) = previous else {
        return candidate.clone();
    };
    if candidate > previous {
        return candidate.clone();
    }
    upcoming
        .iter()
        .find(|next| *next > previous)
        .and_then(|next| key_between(previous, next).ok())
        .unwrap_or_else(|| key_after(previous))
}
