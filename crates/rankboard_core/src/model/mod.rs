//! Board domain model: cards, groups, and the positioning contract.
//!
//! # Responsibility
//! - Define the records Group Positioning operates on.
//! - Model group membership as a sum type instead of a nullable string.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - A missing group and an explicit `null` group are the same `GroupId`.

pub mod item;
