//! Use-case services over the positioning core.
//!
//! # Responsibility
//! - Hold a board document and route UI intents into Group Positioning.
//! - Keep UI layers decoupled from key arithmetic.

pub mod board_service;
