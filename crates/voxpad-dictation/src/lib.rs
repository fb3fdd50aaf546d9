//! Voxpad Dictation crate - Dictation session lifecycle and transcript state.
//!
//! Provides the controller that owns at most one recognition session bound
//! to the current locale and reconciles the session's terminal events with
//! the transcript through a strict two-state machine: Idle <-> Listening.

pub mod controller;
pub mod state;

pub use controller::{DictationController, SessionSlot};
pub use state::{DictationState, StateMachine};
