//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime and the domain/worker layers. It owns
//! the classification state machine and nothing else; it performs no I/O.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and transition coordination
//! - [`modes`]: The [`Phase`] state machine type
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, Advisory};
pub use handler::{handle_event, Event};
pub use modes::{Completion, Phase};
pub use state::AppState;
