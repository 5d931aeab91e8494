//! Request cycle state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions. The
//! runtime owns the state and executes the returned effects.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, ERROR_NOTIFICATION, FALLBACK_REPLY};
pub use event::Event;
pub use state::CycleState;
pub use transition::{transition, TransitionError, TransitionResult};
