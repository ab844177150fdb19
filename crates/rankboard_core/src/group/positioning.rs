//! Group-scoped filtering, ordering, and repositioning.
//!
//! # Responsibility
//! - Partition items by `GroupId` and order each partition by key.
//! - Compute keys for append, in-group moves, and cross-group moves.
//!
//! # Invariants
//! - Display order inside a group is ascending key; ties keep input order.
//! - Repositioning returns a new value and never touches other items.
//! - Functions here never fail; out-of-range indices are clamped.

use crate::key::{generate_key, initial_key, key_after, Key, KeyResult};
use crate::model::item::{GroupId, Item, ItemKind, Placed, Reposition};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Returns items belonging to `group`, in input order.
pub fn items_in_group<'a, T: Placed>(items: &'a [T], group: &GroupId) -> Vec<&'a T> {
    items.iter().filter(|item| item.group() == group).collect()
}

/// Stable ascending sort by key.
pub fn sort_by_key<T: Placed>(items: &mut [T]) {
    items.sort_by(|left, right| left.key().cmp(right.key()));
}

/// Partitions `items` by group and sorts every partition by key.
///
/// Preferred entry point before rendering or any index-based operation.
pub fn group_and_sort<T: Placed>(items: &[T]) -> BTreeMap<GroupId, Vec<&T>> {
    let mut groups: BTreeMap<GroupId, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(item.group().clone()).or_default().push(item);
    }
    for members in groups.values_mut() {
        sort_by_key(members);
    }
    groups
}

/// Generates a key between two optional neighbors.
///
/// # Errors
/// - Same as [`generate_key`].
pub fn key_between_items<T: Placed>(before: Option<&T>, after: Option<&T>) -> KeyResult<Key> {
    generate_key(before.map(Placed::key), after.map(Placed::key))
}

/// Creates a new item placed after the last item of `group`.
///
/// Uses [`initial_key`] when the group is empty.
pub fn append_to_group<T: Placed>(kind: ItemKind, group: GroupId, existing: &[T]) -> Item {
    let key = last_key_in_group(existing, &group)
        .map(key_after)
        .unwrap_or_else(initial_key);
    debug!(
        "event=group_append module=group status=ok group={} key_len={}",
        group,
        key.len()
    );
    Item::new(kind, group, key)
}

/// Repositions `item` to `target_index` among the other items of its group.
///
/// The moving item is excluded before indexing. Negative indices clamp to
/// the front, indices past the end clamp to the back.
pub fn move_within_group<T: Reposition>(item: &T, target_index: i64, group_items: &[T]) -> T {
    move_to_group(item, item.group().clone(), target_index, group_items)
}

/// Repositions `item` into `group` at `target_index`.
///
/// `destination_items` may contain items of other groups; only members of
/// `group` other than `item` are considered.
pub fn move_to_group<T: Reposition>(
    item: &T,
    group: GroupId,
    target_index: i64,
    destination_items: &[T],
) -> T {
    let mut others: Vec<&T> = destination_items
        .iter()
        .filter(|other| other.group() == &group && other.id() != item.id())
        .collect();
    sort_by_key(&mut others);

    let index = target_index.clamp(0, others.len() as i64) as usize;
    let key = key_for_slot(&others, index);
    debug!(
        "event=group_move module=group status=ok group={} index={} siblings={}",
        group,
        index,
        others.len()
    );
    item.with_placement(group, key)
}

/// Returns a key for slot `index` of a sorted list, `0..=sorted.len()`.
///
/// Falls back to a key after the lower neighbor when the neighbors leave no
/// gap, which only happens with duplicated or corrupted keys.
pub(crate) fn key_for_slot<T: Placed>(sorted: &[T], index: usize) -> Key {
    let before = index.checked_sub(1).and_then(|i| sorted.get(i));
    let after = sorted.get(index);
    match key_between_items(before, after) {
        Ok(key) => key,
        Err(err) => {
            warn!(
                "event=slot_key module=group status=fallback index={} error={}",
                index, err
            );
            match (before, after) {
                (Some(before), _) => key_after(before.key()),
                (None, Some(after)) => after.key().clone(),
                (None, None) => initial_key(),
            }
        }
    }
}

fn last_key_in_group<'a, T: Placed>(items: &'a [T], group: &GroupId) -> Option<&'a Key> {
    items
        .iter()
        .filter(|item| item.group() == group)
        .map(Placed::key)
        .max()
}
