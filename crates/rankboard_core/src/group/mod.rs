//! Group Positioning: apply the key algebra to grouped collections.
//!
//! # Responsibility
//! - Filter, sort, and partition items by group.
//! - Map insert/move/drop intents onto neighbor keys.
//! - Migrate legacy numeric positions.
//!
//! # Invariants
//! - Operations are pure; inputs are never mutated.
//! - Moving an item in one group never changes keys in another group.

pub mod migration;
pub mod positioning;
pub mod slot;

pub use migration::{migrate_legacy_positions, LegacyPlacement};
pub use positioning::{
    append_to_group, group_and_sort, items_in_group, key_between_items, move_to_group,
    move_within_group, sort_by_key,
};
pub use slot::{slot_to_key_inter_group, slot_to_key_intra_group};
