//! Message types for the application (TEA pattern)

use wamon_core::Instance;

use crate::input_key::InputKey;
use crate::pairing::PairingEvent;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit (may show confirmation dialog while pairing)
    RequestQuit,
    /// Force quit without confirmation (Ctrl+C, signal handler)
    Quit,
    /// Confirm quit from confirmation dialog
    ConfirmQuit,
    /// Cancel quit from confirmation dialog
    CancelQuit,

    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────
    /// Re-fetch the instance list from the gateway
    RefreshInstances,
    /// Fetch completed
    InstancesLoaded { instances: Vec<Instance> },
    /// Fetch failed
    InstancesLoadFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Wizard
    // ─────────────────────────────────────────────────────────
    /// Enter pressed on the current wizard step
    WizardSubmit,
    /// Esc pressed: leave the wizard, cancelling its poll
    WizardCancel,
    /// Create request completed
    InstanceCreated { name: String },
    /// Create request failed
    InstanceCreateFailed { name: String, error: String },

    // ─────────────────────────────────────────────────────────
    // Pairing
    // ─────────────────────────────────────────────────────────
    /// Start (or restart) a pairing poll for an existing instance
    StartPairing { name: String },
    /// Stop the pairing poll for an instance
    StopPairing { name: String },
    /// Progress report from a running poll
    Pairing(PairingEvent),

    // ─────────────────────────────────────────────────────────
    // Instance lifecycle
    // ─────────────────────────────────────────────────────────
    /// Log out an instance, keeping its record
    Logout { name: String },
    LogoutCompleted { name: String },
    LogoutFailed { name: String, error: String },

    /// Delete an instance record entirely
    Delete { name: String },
    DeleteCompleted { name: String },
    DeleteFailed { name: String, error: String },
}
