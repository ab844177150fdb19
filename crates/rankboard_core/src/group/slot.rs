//! Drop-slot to key mapping for drag-and-drop reordering.
//!
//! # Responsibility
//! - Turn a visual drop index into a key for the dropped item.
//!
//! # Invariants
//! - Input lists are already sorted by key (see `group_and_sort`).
//! - Dropping on or past the last visible item appends to the end; pointer
//!   math is imprecise at list boundaries and users expect "last" there.

use super::positioning::key_for_slot;
use crate::key::{initial_key, key_after, Key};
use crate::model::item::{ItemId, Placed};
use log::trace;

/// Key for reordering `moving_id` inside its own group.
///
/// `sorted_group` is the visible list, moving item included; `drop_index` is
/// the index the item is dropped at in that list.
pub fn slot_to_key_intra_group<T: Placed>(
    sorted_group: &[T],
    moving_id: ItemId,
    drop_index: usize,
) -> Key {
    let others: Vec<&T> = sorted_group
        .iter()
        .filter(|item| item.id() != moving_id)
        .collect();
    let Some(last) = others.last() else {
        // Alone in the group: nothing to reorder against.
        return sorted_group
            .iter()
            .find(|item| item.id() == moving_id)
            .map(|item| item.key().clone())
            .unwrap_or_else(initial_key);
    };

    let last_visible = sorted_group.len().saturating_sub(1);
    let key = if drop_index >= last_visible {
        key_after(last.key())
    } else {
        key_for_slot(&others, drop_index)
    };
    trace!(
        "event=slot_intra module=group status=ok drop_index={} last_visible={}",
        drop_index,
        last_visible
    );
    key
}

/// Key for dropping an item from another group into `sorted_destination`.
///
/// `sorted_destination` does not contain the moving item.
pub fn slot_to_key_inter_group<T: Placed>(sorted_destination: &[T], drop_index: usize) -> Key {
    let Some(last) = sorted_destination.last() else {
        return initial_key();
    };

    let last_visible = sorted_destination.len() - 1;
    let key = if drop_index >= last_visible {
        key_after(last.key())
    } else {
        key_for_slot(sorted_destination, drop_index)
    };
    trace!(
        "event=slot_inter module=group status=ok drop_index={} last_visible={}",
        drop_index,
        last_visible
    );
    key
}
