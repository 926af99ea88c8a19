//! Key event handlers for UI modes
//!
//! Translates raw key events into messages. Text input mutates wizard
//! state directly; everything with side effects goes through a message so
//! `update` stays the single decision point.

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};
use crate::wizard::WizardStep;

pub fn handle_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    // Ctrl+C force-quits from any mode
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Registry => handle_registry_key(state, key),
        UiMode::Wizard => handle_wizard_key(state, key),
        UiMode::ConfirmQuit => handle_confirm_quit_key(key),
    }
}

fn handle_registry_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::RequestQuit),
        InputKey::Char('r') => Some(Message::RefreshInstances),
        InputKey::Char('n') => {
            state.open_wizard();
            None
        }

        InputKey::Up | InputKey::Char('k') => {
            state.registry.select_prev();
            None
        }
        InputKey::Down | InputKey::Char('j') => {
            state.registry.select_next();
            None
        }

        InputKey::Char('c') | InputKey::Enter => state
            .registry
            .selected_instance()
            .map(|i| Message::StartPairing {
                name: i.name.clone(),
            }),
        InputKey::Char('x') => {
            let name = state.registry.selected_instance()?.name.clone();
            state
                .pairing_active(&name)
                .then_some(Message::StopPairing { name })
        }
        InputKey::Char('l') => state
            .registry
            .selected_instance()
            .map(|i| Message::Logout {
                name: i.name.clone(),
            }),
        InputKey::Char('d') => state
            .registry
            .selected_instance()
            .map(|i| Message::Delete {
                name: i.name.clone(),
            }),

        _ => None,
    }
}

fn handle_wizard_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::WizardCancel),
        InputKey::Enter => Some(Message::WizardSubmit),
        InputKey::Tab | InputKey::BackTab => {
            if state.wizard.step == WizardStep::Create {
                state.wizard.toggle_focus();
            }
            None
        }
        InputKey::Backspace => {
            state.wizard.backspace();
            None
        }
        InputKey::Char(c) => {
            state.wizard.insert_char(c);
            None
        }
        _ => None,
    }
}

fn handle_confirm_quit_key(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y') | InputKey::Enter => Some(Message::ConfirmQuit),
        InputKey::Char('n') | InputKey::Esc => Some(Message::CancelQuit),
        _ => None,
    }
}
