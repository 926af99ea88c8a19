//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use tokio::sync::mpsc;

use wamon_app::message::Message;
use wamon_app::state::AppState;
use wamon_app::{signals, update, ActionContext, Settings};
use wamon_core::prelude::*;
use wamon_gateway::{GatewayClient, StaticApiKey};

use crate::{event, render, terminal};

/// Run the TUI application against the configured gateway.
pub async fn run(settings: Settings) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let gateway = GatewayClient::new(
        &settings.gateway.base_url,
        Arc::new(StaticApiKey::new(&settings.gateway.api_key)),
        settings.request_timeout(),
    )?;
    info!(gateway = %settings.gateway.base_url, "connecting to gateway");

    let mut term = ratatui::init();
    let mut state = AppState::new(settings.clone());

    // Unified message channel (terminal events, task completions, signals)
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

    // Spawn signal handler (sends Message::Quit on SIGINT/SIGTERM)
    signals::spawn_signal_handler(msg_tx.clone());

    let mut actions = ActionContext::new(gateway, msg_tx.clone(), &settings.pairing);

    // Load the instance list straight away
    let _ = msg_tx.try_send(Message::RefreshInstances);

    let result = run_loop(&mut term, &mut state, msg_rx, &mut actions);

    // Restore terminal
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    actions: &mut ActionContext<GatewayClient>,
) -> Result<()> {
    while !state.should_quit() {
        // Process external messages (task completions, poll events, signals)
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, actions);
        }

        // Render
        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events (50ms timeout produces Tick)
        if let Some(message) = event::poll()? {
            process_message(state, message, actions);
        }
    }

    Ok(())
}

/// Process a message through the TEA update function, executing emitted
/// actions and following up on chained messages.
fn process_message(state: &mut AppState, message: Message, actions: &mut ActionContext<GatewayClient>) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(state, m);
        if let Some(action) = result.action {
            actions.handle_action(action);
        }
        msg = result.message;
    }
}
