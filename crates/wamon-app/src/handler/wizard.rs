//! Provisioning wizard handlers
//!
//! Create -> Connect -> Finish. The Connect step is entered automatically
//! when the create task completes; the Finish step when the pairing poll
//! reports Connected. Leaving the wizard cancels its poll.

use tracing::info;

use crate::message::Message;
use crate::pairing::PairingPhase;
use crate::state::AppState;
use crate::wizard::WizardStep;

use super::{Task, UpdateAction, UpdateResult};

/// Enter on the current step.
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    match state.wizard.step {
        WizardStep::Create => {
            if !state.wizard.can_submit_create() {
                if state.wizard.instance_name().is_empty() {
                    state.wizard.error = Some("Instance name is required".to_string());
                }
                return UpdateResult::none();
            }
            state.wizard.creating = true;
            state.wizard.error = None;
            UpdateResult::action(UpdateAction::SpawnTask(Task::CreateInstance {
                name: state.wizard.instance_name().to_string(),
                number: state.wizard.phone_number().to_string(),
            }))
        }

        // Advancing out of Connect is driven by the pairing poll, not the
        // keyboard.
        WizardStep::Connect => UpdateResult::none(),

        WizardStep::Finish => {
            let name = state.wizard.instance_name().to_string();
            info!(instance = %name, "wizard finished");
            state.close_wizard();
            // The single refresh for the whole wizard flow happens here.
            UpdateResult::message(Message::RefreshInstances)
        }
    }
}

/// Esc: leave the wizard, cancelling a still-running poll.
pub fn handle_cancel(state: &mut AppState) -> UpdateResult {
    let poll_to_cancel = (state.wizard.created && !state.wizard.connected)
        .then(|| state.wizard.instance_name().to_string());

    state.close_wizard();

    match poll_to_cancel {
        Some(name) => {
            state.set_pairing_phase(&name, PairingPhase::Cancelled);
            UpdateResult::action(UpdateAction::CancelPairing { name })
        }
        None => UpdateResult::none(),
    }
}

/// The create task completed.
pub fn handle_created(state: &mut AppState, name: String) -> UpdateResult {
    state.notice_info(format!("Instance {name} created"));

    if state.wizard_owns(&name) && state.wizard.step == WizardStep::Create {
        state.wizard.creating = false;
        state.wizard.created = true;
        state.wizard.step = WizardStep::Connect;
        state.set_pairing_phase(&name, PairingPhase::Requesting);

        let number = state.wizard.phone_number();
        let number = (!number.is_empty()).then(|| number.to_string());
        return UpdateResult::action(UpdateAction::StartPairing { name, number });
    }

    // Wizard already closed (create outlived a cancel): just refresh.
    UpdateResult::message(Message::RefreshInstances)
}

pub fn handle_create_failed(state: &mut AppState, name: String, error: String) -> UpdateResult {
    state.notice_error(format!("Create of {name} failed: {error}"));
    if state.wizard_owns(&name) {
        state.wizard.creating = false;
        state.wizard.error = Some(error);
    }
    UpdateResult::none()
}
