//! wamon-app - Application state and orchestration for wamon
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: a `Message` enum, a pure `update()` function, and an
//! `ActionContext` that executes the side effects update() asks for. The
//! pairing poller and its registry live here too, generic over the
//! gateway trait so they can be tested without a network.

pub mod actions;
pub mod config;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod pairing;
pub mod registry;
pub mod signals;
pub mod state;
pub mod wizard;

// Re-export primary types
pub use actions::ActionContext;
pub use config::Settings;
pub use handler::{update, Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use pairing::{PairingEvent, PairingPhase, PairingRegistry, PairingSession};
pub use registry::InstanceRegistry;
pub use state::{AppState, UiMode};
pub use wizard::{WizardField, WizardState, WizardStep};
