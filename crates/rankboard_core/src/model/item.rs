//! Board item model.
//!
//! # Responsibility
//! - Define the canonical card record shown in topics/columns.
//! - Define `GroupId` and the `Placed` contract used by Group Positioning.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another item.
//! - `key` is only replaced through repositioning, never edited in place.

use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every board item.
pub type ItemId = Uuid;

/// Group (topic/column) membership of an item.
///
/// Serialized as `null` for `Default` and as the plain name otherwise, so
/// persisted data keeps its `string | null` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum GroupId {
    /// Implicit group for items without a topic.
    #[default]
    Default,
    /// Named topic/column.
    Named(String),
}

impl GroupId {
    /// Creates a named group.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the group name, or `None` for the default group.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Named(name) => Some(name.as_str()),
        }
    }
}

impl From<Option<String>> for GroupId {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Default, Self::Named)
    }
}

impl From<GroupId> for Option<String> {
    fn from(value: GroupId) -> Self {
        match value {
            GroupId::Default => None,
            GroupId::Named(name) => Some(name),
        }
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("<default>"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Normalizes an optional group name read from outside the core.
pub fn normalize_group(group: Option<&str>) -> GroupId {
    group.map_or(GroupId::Default, GroupId::from)
}

/// Card category rendered by the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Free-form markdown note.
    #[default]
    Note,
    /// Checklist entry.
    Task,
    /// Section heading inside a topic.
    Heading,
}

/// Anything Group Positioning can order.
///
/// Implement this for a record to use it with the `group` functions.
pub trait Placed {
    /// Stable identifier.
    fn id(&self) -> ItemId;
    /// Current group membership.
    fn group(&self) -> &GroupId;
    /// Current order key.
    fn key(&self) -> &Key;
}

/// Records that can produce a repositioned copy of themselves.
pub trait Reposition: Placed + Sized {
    /// Returns a copy placed in `group` with `key`; all other fields keep
    /// their values.
    fn with_placement(&self, group: GroupId, key: Key) -> Self;
}

impl<T: Placed + ?Sized> Placed for &T {
    fn id(&self) -> ItemId {
        (**self).id()
    }

    fn group(&self) -> &GroupId {
        (**self).group()
    }

    fn key(&self) -> &Key {
        (**self).key()
    }
}

/// Canonical board card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable global ID used by drag events and persistence.
    pub uuid: ItemId,
    /// Serialized as `type` to match the persisted document shape.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    /// Missing and `null` both mean the default group.
    #[serde(default)]
    pub group: GroupId,
    /// Order key within `group`.
    pub key: Key,
}

impl Item {
    /// Creates a new item with a generated stable ID.
    pub fn new(kind: ItemKind, group: GroupId, key: Key) -> Self {
        Self::with_id(Uuid::new_v4(), kind, group, key)
    }

    /// Creates an item with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: ItemId, kind: ItemKind, group: GroupId, key: Key) -> Self {
        Self {
            uuid,
            kind,
            content: String::new(),
            group,
            key,
        }
    }

    /// Sets the markdown body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

impl Placed for Item {
    fn id(&self) -> ItemId {
        self.uuid
    }

    fn group(&self) -> &GroupId {
        &self.group
    }

    fn key(&self) -> &Key {
        &self.key
    }
}

impl Reposition for Item {
    fn with_placement(&self, group: GroupId, key: Key) -> Self {
        Self {
            group,
            key,
            ..self.clone()
        }
    }
}
