//! Dictation state machine with thread-safe transitions.
//!
//! Enforces valid state transitions for the listening lifecycle:
//! - Idle -> Listening (start a listening attempt)
//! - Listening -> Idle (result, end-without-result, or abandonment)

use std::fmt;
use std::sync::{Arc, Mutex};

use voxpad_core::error::VoxpadError;

/// Operational state of the dictation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictationState {
    /// No listening attempt in progress. Ready to start.
    Idle,
    /// Actively capturing speech; waiting for the session's terminal event.
    Listening,
}

impl fmt::Display for DictationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictationState::Idle => write!(f, "Idle"),
            DictationState::Listening => write!(f, "Listening"),
        }
    }
}

impl DictationState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &DictationState) -> bool {
        matches!(
            (self, target),
            (DictationState::Idle, DictationState::Listening)
                | (DictationState::Listening, DictationState::Idle)
        )
    }
}

/// Thread-safe state machine for dictation state transitions.
///
/// Wraps `DictationState` in an `Arc<Mutex<>>` to allow safe concurrent
/// access. All transitions are validated before being applied, returning an
/// error if the requested transition is not permitted.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<DictationState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DictationState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> DictationState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    ///
    /// Returns `Ok(())` if the transition is valid, or a
    /// `VoxpadError::Dictation` if the transition is not allowed from the
    /// current state.
    pub fn transition(&self, target: DictationState) -> Result<(), VoxpadError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Dictation state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(VoxpadError::Dictation(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }

    /// Force the state machine back to Idle (used for error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        tracing::warn!("Dictation state machine reset to Idle from {}", *state);
        *state = DictationState::Idle;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(DictationState::Idle.to_string(), "Idle");
        assert_eq!(DictationState::Listening.to_string(), "Listening");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(DictationState::Idle.can_transition_to(&DictationState::Listening));
        assert!(DictationState::Listening.can_transition_to(&DictationState::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot transition to self.
        assert!(!DictationState::Idle.can_transition_to(&DictationState::Idle));
        assert!(!DictationState::Listening.can_transition_to(&DictationState::Listening));
    }

    #[test]
    fn test_state_machine_round_trip() {
        let sm = StateMachine::new();
        assert_eq!(sm.current(), DictationState::Idle);

        sm.transition(DictationState::Listening).unwrap();
        assert_eq!(sm.current(), DictationState::Listening);

        sm.transition(DictationState::Idle).unwrap();
        assert_eq!(sm.current(), DictationState::Idle);
    }

    #[test]
    fn test_state_machine_invalid_transition() {
        let sm = StateMachine::new();
        let result = sm.transition(DictationState::Idle);
        assert!(result.is_err());
        assert_eq!(sm.current(), DictationState::Idle);
    }

    #[test]
    fn test_state_machine_double_listen_rejected() {
        let sm = StateMachine::new();
        sm.transition(DictationState::Listening).unwrap();
        assert!(sm.transition(DictationState::Listening).is_err());
        assert_eq!(sm.current(), DictationState::Listening);
    }

    #[test]
    fn test_state_machine_reset() {
        let sm = StateMachine::new();
        sm.transition(DictationState::Listening).unwrap();
        sm.reset();
        assert_eq!(sm.current(), DictationState::Idle);
    }

    #[test]
    fn test_state_machine_clone_is_shared() {
        let sm1 = StateMachine::new();
        let sm2 = sm1.clone();

        sm1.transition(DictationState::Listening).unwrap();
        assert_eq!(sm2.current(), DictationState::Listening);
    }

    #[test]
    fn test_state_machine_transition_error_message() {
        let sm = StateMachine::new();
        let result = sm.transition(DictationState::Idle);
        match result {
            Err(VoxpadError::Dictation(msg)) => {
                assert!(msg.contains("Idle"));
            }
            _ => panic!("Expected Dictation error variant"),
        }
    }
}
