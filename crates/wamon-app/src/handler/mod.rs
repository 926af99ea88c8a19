//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `lifecycle`: Instance refresh/logout/delete handlers
//! - `wizard`: Provisioning wizard handlers
//! - `pairing`: Pairing event handlers

pub(crate) mod keys;
pub(crate) mod lifecycle;
pub(crate) mod pairing;
pub(crate) mod update;
pub(crate) mod wizard;


use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn a background gateway task
    SpawnTask(Task),

    /// Start a pairing poll for an instance, replacing any existing poll
    /// for the same name. `number` is forwarded to the connect request.
    StartPairing {
        name: String,
        number: Option<String>,
    },

    /// Cancel the pairing poll for an instance (also reaps finished polls)
    CancelPairing { name: String },

    /// Cancel every running pairing poll (quit path)
    CancelAllPairing,
}

/// Background gateway tasks to spawn
#[derive(Debug, Clone)]
pub enum Task {
    /// Fetch the instance list
    FetchInstances,
    /// Create a new instance
    CreateInstance { name: String, number: String },
    /// Log out an instance
    Logout { name: String },
    /// Delete an instance record
    DeleteInstance { name: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn message_and_action(msg: Message, action: UpdateAction) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}
