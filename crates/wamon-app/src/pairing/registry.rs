//! At-most-one active poll per instance
//!
//! The registry owns the cancel handle and the task handle for every
//! running [`PairingPoller`]. Starting a poll for a name that already has
//! one cancels the old poll first (replace semantics).

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use wamon_gateway::GatewayApi;

use super::poller::{PairingEvent, PairingPoller};
use super::session::PairingSession;

struct ActivePoll {
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Map of instance name to its running poll.
#[derive(Default)]
pub struct PairingRegistry {
    polls: HashMap<String, ActivePoll>,
}

impl PairingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a poll for `name`, cancelling any existing poll for the same
    /// instance first. Events are delivered on `events`.
    pub fn start<G>(
        &mut self,
        gateway: G,
        name: &str,
        number: Option<String>,
        interval: Duration,
        max_ticks: u64,
        events: mpsc::Sender<PairingEvent>,
    ) where
        G: GatewayApi + 'static,
    {
        self.cancel(name);

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let poller = PairingPoller::new(
            gateway,
            PairingSession::new(name, max_ticks),
            number,
            interval,
            cancel_rx,
            events,
        );
        let task = tokio::spawn(poller.run());

        debug!(instance = name, "pairing poll started");
        self.polls
            .insert(name.to_string(), ActivePoll { cancel_tx, task });
    }

    /// Cancel the poll for `name`, if any. Idempotent; also used to reap
    /// entries whose poll already finished.
    pub fn cancel(&mut self, name: &str) {
        if let Some(poll) = self.polls.remove(name) {
            // The receiver is gone when the poll already terminated on its
            // own; that send failing is fine.
            let _ = poll.cancel_tx.send(true);
            debug!(instance = name, "pairing poll cancelled");
        }
    }

    /// Cancel every running poll. Idempotent.
    pub fn cancel_all(&mut self) {
        for (name, poll) in self.polls.drain() {
            let _ = poll.cancel_tx.send(true);
            debug!(instance = %name, "pairing poll cancelled");
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.polls
            .get(name)
            .is_some_and(|poll| !poll.task.is_finished())
    }

    pub fn len(&self) -> usize {
        self.polls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polls.is_empty()
    }
}
