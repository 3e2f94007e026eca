//! Bot module for handling WhatsApp conversations
//!
//! This module is split into several submodules for better organization:
//! - `engine`: Drives each inbound message through the dialogue state machine
//! - `session`: Owns the per-sender session map
//! - `ui_builder`: Formats numbered menus and localized display names

pub mod engine;
pub mod session;
pub mod ui_builder;

// Re-export the main types for use in main.rs
pub use engine::Engine;
pub use session::SessionStore;

// Re-export utility functions that might be used elsewhere
pub use ui_builder::{display_name, format_item_list, format_numbered_list};
