//! Voxpad Core crate - Shared vocabulary for the Voxpad dictation pad.
//!
//! Defines the error type, domain types (locales, transcript, timestamps),
//! domain events with their broadcast bus, and the TOML configuration that
//! the other crates build on.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::VoxpadConfig;
pub use error::{Result, VoxpadError};
pub use events::{DomainEvent, EventBus};
pub use types::*;
