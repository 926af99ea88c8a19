//! Action executor - spawns background gateway tasks
//!
//! `update()` stays pure; everything that touches the network goes through
//! here. Each task reports back into the message loop, never directly into
//! state.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use wamon_gateway::GatewayApi;

use crate::config::PairingSettings;
use crate::handler::{Task, UpdateAction};
use crate::message::Message;
use crate::pairing::{PairingEvent, PairingRegistry};

/// Owns the gateway handle and the pairing registry for the lifetime of
/// the run loop.
pub struct ActionContext<G> {
    gateway: G,
    msg_tx: mpsc::Sender<Message>,
    pairing: PairingRegistry,
    pairing_events: mpsc::Sender<PairingEvent>,
    poll_interval: Duration,
    max_poll_ticks: u64,
}

impl<G: GatewayApi + Clone + 'static> ActionContext<G> {
    pub fn new(gateway: G, msg_tx: mpsc::Sender<Message>, pairing: &PairingSettings) -> Self {
        // Single forwarder from poll events into the message loop; every
        // poller gets a clone of the sender.
        let (ev_tx, mut ev_rx) = mpsc::channel::<PairingEvent>(64);
        let forward_tx = msg_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = ev_rx.recv().await {
                if forward_tx.send(Message::Pairing(event)).await.is_err() {
                    break;
                }
            }
        });

        Self {
            gateway,
            msg_tx,
            pairing: PairingRegistry::new(),
            pairing_events: ev_tx,
            poll_interval: Duration::from_secs(pairing.poll_interval_secs),
            max_poll_ticks: pairing.max_poll_ticks,
        }
    }

    pub fn handle_action(&mut self, action: UpdateAction) {
        match action {
            UpdateAction::SpawnTask(task) => self.spawn_task(task),

            UpdateAction::StartPairing { name, number } => {
                self.pairing.start(
                    self.gateway.clone(),
                    &name,
                    number,
                    self.poll_interval,
                    self.max_poll_ticks,
                    self.pairing_events.clone(),
                );
            }

            UpdateAction::CancelPairing { name } => self.pairing.cancel(&name),

            UpdateAction::CancelAllPairing => self.pairing.cancel_all(),
        }
    }

    fn spawn_task(&self, task: Task) {
        let gateway = self.gateway.clone();
        let tx = self.msg_tx.clone();

        tokio::spawn(async move {
            let message = match task {
                Task::FetchInstances => match gateway.fetch_instances().await {
                    Ok(instances) => Message::InstancesLoaded { instances },
                    Err(err) => {
                        warn!(error = %err, "instance fetch failed");
                        Message::InstancesLoadFailed {
                            error: err.to_string(),
                        }
                    }
                },

                Task::CreateInstance { name, number } => {
                    match gateway.create_instance(&name, &number).await {
                        Ok(_) => Message::InstanceCreated { name },
                        Err(err) => {
                            warn!(instance = %name, error = %err, "instance create failed");
                            Message::InstanceCreateFailed {
                                name,
                                error: err.to_string(),
                            }
                        }
                    }
                }

                Task::Logout { name } => match gateway.logout(&name).await {
                    Ok(()) => Message::LogoutCompleted { name },
                    Err(err) => {
                        warn!(instance = %name, error = %err, "logout failed");
                        Message::LogoutFailed {
                            name,
                            error: err.to_string(),
                        }
                    }
                },

                Task::DeleteInstance { name } => match gateway.delete_instance(&name).await {
                    Ok(()) => Message::DeleteCompleted { name },
                    Err(err) => {
                        warn!(instance = %name, error = %err, "delete failed");
                        Message::DeleteFailed {
                            name,
                            error: err.to_string(),
                        }
                    }
                },
            };

            let _ = tx.send(message).await;
        });
    }
}
