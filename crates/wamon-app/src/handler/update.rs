//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{keys::handle_key, lifecycle, pairing, wizard, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::action(UpdateAction::CancelAllPairing)
        }

        Message::ConfirmQuit => {
            state.confirm_quit();
            UpdateResult::action(UpdateAction::CancelAllPairing)
        }

        Message::CancelQuit => {
            state.cancel_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.prune_notices();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Registry
        // ─────────────────────────────────────────────────────────
        Message::RefreshInstances => lifecycle::handle_refresh(state),
        Message::InstancesLoaded { instances } => {
            lifecycle::handle_instances_loaded(state, instances)
        }
        Message::InstancesLoadFailed { error } => {
            lifecycle::handle_instances_load_failed(state, error)
        }

        // ─────────────────────────────────────────────────────────
        // Wizard
        // ─────────────────────────────────────────────────────────
        Message::WizardSubmit => wizard::handle_submit(state),
        Message::WizardCancel => wizard::handle_cancel(state),
        Message::InstanceCreated { name } => wizard::handle_created(state, name),
        Message::InstanceCreateFailed { name, error } => {
            wizard::handle_create_failed(state, name, error)
        }

        // ─────────────────────────────────────────────────────────
        // Pairing
        // ─────────────────────────────────────────────────────────
        Message::StartPairing { name } => pairing::handle_start_pairing(state, name),
        Message::StopPairing { name } => pairing::handle_stop_pairing(state, name),
        Message::Pairing(event) => pairing::handle_pairing_event(state, event),

        // ─────────────────────────────────────────────────────────
        // Instance lifecycle
        // ─────────────────────────────────────────────────────────
        Message::Logout { name } => lifecycle::handle_logout(state, name),
        Message::LogoutCompleted { name } => lifecycle::handle_logout_completed(state, name),
        Message::LogoutFailed { name, error } => {
            lifecycle::handle_logout_failed(state, name, error)
        }
        Message::Delete { name } => lifecycle::handle_delete(state, name),
        Message::DeleteCompleted { name } => lifecycle::handle_delete_completed(state, name),
        Message::DeleteFailed { name, error } => {
            lifecycle::handle_delete_failed(state, name, error)
        }
    }
}
