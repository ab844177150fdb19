//! Ordering core for the rankboard note/kanban tool.
//! Order keys, group positioning, and the board document built on them.

pub mod config;
pub mod group;
pub mod key;
pub mod logging;
pub mod model;
pub mod service;

pub use config::{default_log_level, ConfigError, LogConfig, LogLevel};
pub use group::{
    append_to_group, group_and_sort, items_in_group, key_between_items, migrate_legacy_positions,
    move_to_group, move_within_group, slot_to_key_inter_group, slot_to_key_intra_group,
    sort_by_key, LegacyPlacement,
};
pub use key::{
    batch_keys, generate_key, initial_key, is_valid_key, key_after, key_before, key_between,
    position_to_key, Key, KeyError, KeyResult,
};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::item::{normalize_group, GroupId, Item, ItemId, ItemKind, Placed, Reposition};
pub use service::board_service::{Board, BoardError, DropRequest, GroupDeleteMode};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
