//! Instance lifecycle handlers: refresh, logout, delete
//!
//! Mutating operations never update the cached list optimistically; their
//! completion messages trigger a full re-fetch instead.

use tracing::info;

use wamon_core::ConnectionStatus;

use crate::message::Message;
use crate::state::AppState;

use super::{Task, UpdateAction, UpdateResult};

pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    if state.refreshing {
        return UpdateResult::none();
    }
    state.refreshing = true;
    UpdateResult::action(UpdateAction::SpawnTask(Task::FetchInstances))
}

pub fn handle_instances_loaded(
    state: &mut AppState,
    instances: Vec<wamon_core::Instance>,
) -> UpdateResult {
    state.refreshing = false;
    info!(count = instances.len(), "instance list refreshed");
    state.registry.set_instances(instances);
    UpdateResult::none()
}

pub fn handle_instances_load_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.refreshing = false;
    state.notice_error(format!("Failed to load instances: {error}"));
    UpdateResult::none()
}

pub fn handle_logout(state: &mut AppState, name: String) -> UpdateResult {
    if state.registry.get(&name).is_none() {
        return UpdateResult::none();
    }
    state.notice_info(format!("Logging out {name}..."));
    UpdateResult::action(UpdateAction::SpawnTask(Task::Logout { name }))
}

pub fn handle_logout_completed(state: &mut AppState, name: String) -> UpdateResult {
    state.notice_info(format!("{name} logged out"));
    UpdateResult::message(Message::RefreshInstances)
}

pub fn handle_logout_failed(state: &mut AppState, name: String, error: String) -> UpdateResult {
    state.notice_error(format!("Logout of {name} failed: {error}"));
    UpdateResult::none()
}

/// Delete is refused while the instance is connected; the operator has to
/// log it out first.
pub fn handle_delete(state: &mut AppState, name: String) -> UpdateResult {
    let Some(instance) = state.registry.get(&name) else {
        return UpdateResult::none();
    };
    if instance.status == ConnectionStatus::Open {
        state.notice_error(format!("{name} is connected; log it out before deleting"));
        return UpdateResult::none();
    }
    state.notice_info(format!("Deleting {name}..."));
    UpdateResult::action(UpdateAction::SpawnTask(Task::DeleteInstance { name }))
}

pub fn handle_delete_completed(state: &mut AppState, name: String) -> UpdateResult {
    state.pairing.remove(&name);
    state.notice_info(format!("{name} deleted"));
    UpdateResult::message_and_action(
        Message::RefreshInstances,
        UpdateAction::CancelPairing { name },
    )
}

pub fn handle_delete_failed(state: &mut AppState, name: String, error: String) -> UpdateResult {
    state.notice_error(format!("Delete of {name} failed: {error}"));
    UpdateResult::none()
}
