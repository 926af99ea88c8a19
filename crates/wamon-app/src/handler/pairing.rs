//! Pairing handlers: poll start/stop and poll event application

use tracing::info;

use crate::message::Message;
use crate::pairing::{PairingEvent, PairingPhase};
use crate::state::AppState;
use crate::wizard::WizardStep;

use super::{UpdateAction, UpdateResult};

/// Start (or restart) a poll for an existing instance from the registry
/// view. The registry enforces at-most-one poll per name, so a repeated
/// start simply replaces the old poll.
pub fn handle_start_pairing(state: &mut AppState, name: String) -> UpdateResult {
    if state.registry.get(&name).is_none() {
        return UpdateResult::none();
    }
    state.set_pairing_phase(&name, PairingPhase::Requesting);
    state.notice_info(format!("Pairing {name}..."));
    UpdateResult::action(UpdateAction::StartPairing { name, number: None })
}

pub fn handle_stop_pairing(state: &mut AppState, name: String) -> UpdateResult {
    state.set_pairing_phase(&name, PairingPhase::Cancelled);
    state.notice_info(format!("Pairing of {name} cancelled"));
    UpdateResult::action(UpdateAction::CancelPairing { name })
}

/// Apply a progress event from a running poll.
pub fn handle_pairing_event(state: &mut AppState, event: PairingEvent) -> UpdateResult {
    match event {
        PairingEvent::CodeReady { name, code } => {
            state.set_pairing_phase(&name, PairingPhase::Polling);
            state.set_pairing_code(&name, code.clone());
            if state.wizard_owns(&name) {
                state.wizard.pairing_code = Some(code);
            }
            UpdateResult::none()
        }

        PairingEvent::Connected { name } => {
            info!(instance = %name, "instance connected");
            state.set_pairing_phase(&name, PairingPhase::Connected);
            state.notice_info(format!("{name} connected"));

            if state.wizard_owns(&name) {
                state.wizard.connected = true;
                state.wizard.step = WizardStep::Finish;
                // The wizard's Finish step owns the refresh; only reap the
                // finished poll here.
                UpdateResult::action(UpdateAction::CancelPairing { name })
            } else {
                UpdateResult::message_and_action(
                    Message::RefreshInstances,
                    UpdateAction::CancelPairing { name },
                )
            }
        }

        PairingEvent::TimedOut { name } => {
            state.set_pairing_phase(&name, PairingPhase::TimedOut);
            state.notice_error(format!("Pairing of {name} timed out"));
            if state.wizard_owns(&name) {
                state.wizard.error = Some("Pairing timed out".to_string());
            }
            UpdateResult::action(UpdateAction::CancelPairing { name })
        }

        PairingEvent::RequestFailed { name, error } => {
            state.set_pairing_phase(&name, PairingPhase::Cancelled);
            state.notice_error(format!("Pairing of {name} failed: {error}"));
            if state.wizard_owns(&name) {
                state.wizard.error = Some(error);
            }
            UpdateResult::action(UpdateAction::CancelPairing { name })
        }
    }
}
