//! Kanban board use-case service.
//!
//! # Responsibility
//! - Own one board document (`Vec<Item>`) and apply positioning intents.
//! - Translate drag-and-drop tuples into a single new key per drop.
//! - Provide column delete modes that rewrite membership without touching
//!   unrelated keys.
//!
//! # Invariants
//! - Item IDs are unique within one board.
//! - Every mutation rewrites only the items it names.
//! - Callers serialize mutations; the board is not shared across threads.

use crate::group::{
    append_to_group, group_and_sort, items_in_group, move_to_group, slot_to_key_inter_group,
    slot_to_key_intra_group,
};
use crate::key::{initial_key, key_after, Key};
use crate::model::item::{GroupId, Item, ItemId, ItemKind, Placed, Reposition};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Column delete mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDeleteMode {
    /// Remove the column only and move its items to the default group.
    Dissolve,
    /// Remove the column together with its items.
    DeleteAll,
}

/// Errors from board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Two items share one ID.
    DuplicateItem(ItemId),
    /// Drop event names a source group the item is no longer in.
    StaleSourceGroup {
        item_id: ItemId,
        expected: GroupId,
        actual: GroupId,
    },
    /// No item belongs to the named group.
    GroupNotFound(GroupId),
    /// The default group has no column to delete.
    DefaultGroupNotDeletable,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "board item not found: {id}"),
            Self::DuplicateItem(id) => write!(f, "duplicate board item: {id}"),
            Self::StaleSourceGroup {
                item_id,
                expected,
                actual,
            } => write!(
                f,
                "item {item_id} is in group `{actual}`, drop event expected `{expected}`"
            ),
            Self::GroupNotFound(group) => write!(f, "group not found: {group}"),
            Self::DefaultGroupNotDeletable => write!(f, "the default group cannot be deleted"),
        }
    }
}

impl Error for BoardError {}

/// One drag-and-drop gesture as reported by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRequest {
    pub item_id: ItemId,
    #[serde(default)]
    pub source_group: GroupId,
    #[serde(default)]
    pub destination_group: GroupId,
    /// Index in the destination list as rendered when the drop happened.
    pub destination_index: usize,
}

/// In-memory board document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct Board {
    items: Vec<Item>,
}

impl TryFrom<Vec<Item>> for Board {
    type Error = BoardError;

    fn try_from(value: Vec<Item>) -> Result<Self, Self::Error> {
        Self::from_items(value)
    }
}

impl From<Board> for Vec<Item> {
    fn from(value: Board) -> Self {
        value.items
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from loaded items.
    ///
    /// # Errors
    /// - `BoardError::DuplicateItem` when two items share one ID.
    pub fn from_items(items: Vec<Item>) -> Result<Self, BoardError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.uuid) {
                return Err(BoardError::DuplicateItem(item.uuid));
            }
        }
        Ok(Self { items })
    }

    /// All items in storage order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Loads one item by ID.
    pub fn get(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.uuid == item_id)
    }

    /// Items of one group in display order.
    pub fn list_group(&self, group: &GroupId) -> Vec<&Item> {
        let mut members = items_in_group(&self.items, group);
        crate::group::sort_by_key(&mut members);
        members
    }

    /// Every group in display order.
    pub fn columns(&self) -> BTreeMap<GroupId, Vec<&Item>> {
        group_and_sort(&self.items)
    }

    /// Creates one item at the end of `group`.
    pub fn add_item(
        &mut self,
        kind: ItemKind,
        group: GroupId,
        content: impl Into<String>,
    ) -> &Item {
        let item = append_to_group(kind, group, &self.items).with_content(content);
        info!(
            "event=board_add module=board status=ok item={} group={}",
            item.uuid, item.group
        );
        self.push(item)
    }

    /// Creates one item at `index` inside `group`.
    pub fn insert_item(
        &mut self,
        kind: ItemKind,
        group: GroupId,
        index: i64,
        content: impl Into<String>,
    ) -> &Item {
        let draft = Item::new(kind, group.clone(), initial_key()).with_content(content);
        let item = move_to_group(&draft, group, index, &self.items);
        info!(
            "event=board_insert module=board status=ok item={} group={} index={}",
            item.uuid, item.group, index
        );
        self.push(item)
    }

    /// Removes one item.
    ///
    /// # Errors
    /// - `BoardError::ItemNotFound` when `item_id` is unknown.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<Item, BoardError> {
        let position = self.position_of(item_id)?;
        Ok(self.items.remove(position))
    }

    /// Moves one item into `group` at `target_index` and returns its new key.
    ///
    /// # Errors
    /// - `BoardError::ItemNotFound` when `item_id` is unknown.
    pub fn move_item(
        &mut self,
        item_id: ItemId,
        group: GroupId,
        target_index: i64,
    ) -> Result<Key, BoardError> {
        let position = self.position_of(item_id)?;
        let moved = move_to_group(&self.items[position], group, target_index, &self.items);
        info!(
            "event=board_move module=board status=ok item={} group={} index={}",
            item_id, moved.group, target_index
        );
        Ok(self.replace(position, moved))
    }

    /// Applies one drag-and-drop gesture and returns the dropped item's key.
    ///
    /// # Errors
    /// - `BoardError::ItemNotFound` when the item is unknown.
    /// - `BoardError::StaleSourceGroup` when the item already left
    ///   `source_group`.
    pub fn apply_drop(&mut self, request: &DropRequest) -> Result<Key, BoardError> {
        let position = self.position_of(request.item_id)?;
        let current = &self.items[position];
        if current.group != request.source_group {
            return Err(BoardError::StaleSourceGroup {
                item_id: request.item_id,
                expected: request.source_group.clone(),
                actual: current.group.clone(),
            });
        }

        let destination = self.list_group(&request.destination_group);
        let key = if request.source_group == request.destination_group {
            slot_to_key_intra_group(&destination, request.item_id, request.destination_index)
        } else {
            slot_to_key_inter_group(&destination, request.destination_index)
        };

        let moved = self.items[position].with_placement(request.destination_group.clone(), key);
        info!(
            "event=board_drop module=board status=ok item={} from={} to={} index={}",
            request.item_id,
            request.source_group,
            request.destination_group,
            request.destination_index
        );
        Ok(self.replace(position, moved))
    }

    /// Deletes one named column and returns how many items it affected.
    ///
    /// # Errors
    /// - `BoardError::DefaultGroupNotDeletable` for `GroupId::Default`.
    /// - `BoardError::GroupNotFound` when no item belongs to `group`.
    pub fn delete_group(
        &mut self,
        group: &GroupId,
        mode: GroupDeleteMode,
    ) -> Result<usize, BoardError> {
        if *group == GroupId::Default {
            return Err(BoardError::DefaultGroupNotDeletable);
        }
        let members: Vec<ItemId> = self.list_group(group).iter().map(|item| item.id()).collect();
        if members.is_empty() {
            return Err(BoardError::GroupNotFound(group.clone()));
        }

        match mode {
            GroupDeleteMode::Dissolve => self.dissolve_into_default(&members),
            GroupDeleteMode::DeleteAll => self.items.retain(|item| item.group != *group),
        }
        info!(
            "event=board_delete_group module=board status=ok group={} mode={:?} items={}",
            group,
            mode,
            members.len()
        );
        Ok(members.len())
    }

    /// Appends `members` to the default group, keeping their relative order.
    fn dissolve_into_default(&mut self, members: &[ItemId]) {
        let mut last = self
            .list_group(&GroupId::Default)
            .last()
            .map(|item| item.key.clone());
        for &item_id in members {
            let key = last.as_ref().map(key_after).unwrap_or_else(initial_key);
            if let Some(item) = self.items.iter_mut().find(|item| item.uuid == item_id) {
                *item = item.with_placement(GroupId::Default, key.clone());
            }
            last = Some(key);
        }
    }

    fn position_of(&self, item_id: ItemId) -> Result<usize, BoardError> {
        self.items
            .iter()
            .position(|item| item.uuid == item_id)
            .ok_or(BoardError::ItemNotFound(item_id))
    }

    fn push(&mut self, item: Item) -> &Item {
        self.items.push(item);
        let last = self.items.len() - 1;
        &self.items[last]
    }

    fn replace(&mut self, position: usize, item: Item) -> Key {
        let key = item.key.clone();
        self.items[position] = item;
        key
    }
}
