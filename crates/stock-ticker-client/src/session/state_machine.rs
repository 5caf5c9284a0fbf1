/*
[INPUT]:  ConnectionState and ConnectionEvent from the ws module
[OUTPUT]: Validated connection state transitions
[POS]:    Session domain logic - state machine for connection lifecycle
[UPDATE]: When connection states or events change
*/

use thiserror::Error;

use crate::ws::{ConnectionEvent, ConnectionState};

/// Errors occurring during state transitions
#[derive(Debug, Clone, Error)]
pub enum StateError {
    #[error("Invalid transition: {from:?} -> {event}")]
    InvalidTransition {
        from: ConnectionState,
        event: &'static str,
    },
}

/// State machine tracking one connection from `Connecting` to `Closed`
#[derive(Debug)]
pub struct ConnectionMachine {
    current_state: ConnectionState,
}

impl Default for ConnectionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionMachine {
    pub fn new() -> Self {
        Self {
            current_state: ConnectionState::Connecting,
        }
    }

    /// Check whether the event is acceptable in the current state
    pub fn can_apply(&self, event: &ConnectionEvent) -> bool {
        matches!(
            (self.current_state, event),
            (ConnectionState::Connecting, ConnectionEvent::Opened)
                | (ConnectionState::Open, ConnectionEvent::Message(_))
                | (
                    ConnectionState::Connecting | ConnectionState::Open,
                    ConnectionEvent::Error(_) | ConnectionEvent::Closed
                )
        )
    }

    /// Apply an event, moving to the next state
    pub fn apply(&mut self, event: &ConnectionEvent) -> Result<ConnectionState, StateError> {
        if !self.can_apply(event) {
            return Err(StateError::InvalidTransition {
                from: self.current_state,
                event: event.name(),
            });
        }

        self.current_state = match event {
            ConnectionEvent::Opened => ConnectionState::Open,
            ConnectionEvent::Closed => ConnectionState::Closed,
            ConnectionEvent::Message(_) | ConnectionEvent::Error(_) => self.current_state,
        };
        Ok(self.current_state)
    }

    pub fn state(&self) -> ConnectionState {
        self.current_state
    }
}
