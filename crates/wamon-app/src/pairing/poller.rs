//! Async driver for a pairing session
//!
//! Owns a [`PairingSession`] and a gateway handle. Requests the pairing
//! code, then queries connection state once per interval until the session
//! reaches a terminal phase or the cancel flag flips.
//!
//! Ticks are serialized: a new query starts only after the previous one
//! completed, so results cannot arrive out of order from this driver. The
//! session's last-write-wins guard still applies as a second line.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use wamon_gateway::GatewayApi;

use super::session::PairingSession;

/// Progress report from a running poll, forwarded into the message loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingEvent {
    /// The gateway handed out a pairing code; polling has started.
    CodeReady { name: String, code: String },
    /// The instance reached the open state.
    Connected { name: String },
    /// The tick budget ran out before the instance opened.
    TimedOut { name: String },
    /// The connect request itself failed; the poll is over.
    RequestFailed { name: String, error: String },
}

impl PairingEvent {
    pub fn instance_name(&self) -> &str {
        match self {
            PairingEvent::CodeReady { name, .. }
            | PairingEvent::Connected { name }
            | PairingEvent::TimedOut { name }
            | PairingEvent::RequestFailed { name, .. } => name,
        }
    }
}

/// Drives one pairing session against the gateway.
pub struct PairingPoller<G> {
    gateway: G,
    session: PairingSession,
    number: Option<String>,
    interval: Duration,
    cancel_rx: watch::Receiver<bool>,
    events: mpsc::Sender<PairingEvent>,
}

impl<G: GatewayApi> PairingPoller<G> {
    pub fn new(
        gateway: G,
        session: PairingSession,
        number: Option<String>,
        interval: Duration,
        cancel_rx: watch::Receiver<bool>,
        events: mpsc::Sender<PairingEvent>,
    ) -> Self {
        Self {
            gateway,
            session,
            number,
            interval,
            cancel_rx,
            events,
        }
    }

    /// Run the poll to completion. Consumes the poller; the task ends when
    /// the session reaches a terminal phase or cancellation is observed.
    pub async fn run(mut self) {
        let name = self.session.name().to_string();

        self.session.begin_request();
        let code = loop {
            if self.cancelled() {
                self.session.cancel();
                return;
            }
            let result = self
                .gateway
                .request_connection(&name, self.number.as_deref())
                .await;
            // The cancel flag may have flipped while the connect request
            // was in flight; a cancelled session discards the outcome.
            if self.cancelled() {
                self.session.cancel();
                return;
            }
            match result {
                Ok(Some(code)) => break code,
                Ok(None) => {
                    debug!(instance = %name, "pairing code not ready, retrying");
                    if !self.session.on_request_retry() {
                        debug!(instance = %name, "connect retry budget exhausted");
                        let _ = self.events.send(PairingEvent::TimedOut { name }).await;
                        return;
                    }
                }
                Err(err) => {
                    warn!(instance = %name, error = %err, "pairing request failed");
                    self.session.cancel();
                    let _ = self
                        .events
                        .send(PairingEvent::RequestFailed {
                            name,
                            error: err.to_string(),
                        })
                        .await;
                    return;
                }
            }
            if self.wait_interval().await {
                self.session.cancel();
                return;
            }
        };

        self.session.on_pairing_code(Some(code.clone()));
        let _ = self
            .events
            .send(PairingEvent::CodeReady {
                name: name.clone(),
                code,
            })
            .await;

        loop {
            if self.wait_interval().await {
                self.session.cancel();
                return;
            }

            let Some(tick_id) = self.session.next_tick() else {
                debug!(instance = %name, "tick budget exhausted");
                let _ = self.events.send(PairingEvent::TimedOut { name }).await;
                return;
            };

            match self.gateway.connection_state(&name).await {
                Ok(state) => {
                    // The cancel flag may have flipped while the query was
                    // in flight; a cancelled session discards the result.
                    if self.cancelled() {
                        self.session.cancel();
                        return;
                    }
                    if self.session.on_tick_result(tick_id, &state) {
                        let _ = self.events.send(PairingEvent::Connected { name }).await;
                        return;
                    }
                }
                Err(err) => {
                    // Swallowed: a failed tick consumes budget but the poll
                    // keeps going.
                    warn!(instance = %name, tick = tick_id, error = %err, "poll tick failed");
                }
            }
        }
    }

    fn cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Sleep one interval, waking early on cancellation. Returns `true`
    /// when the poll should stop.
    async fn wait_interval(&mut self) -> bool {
        tokio::select! {
            changed = self.cancel_rx.changed() => match changed {
                Ok(()) => *self.cancel_rx.borrow(),
                // Sender dropped: the owning registry is gone, stop.
                Err(_) => true,
            },
            _ = tokio::time::sleep(self.interval) => self.cancelled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::session::PairingSession;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;
    use wamon_core::{ConnectionState, ConnectionStatus, Error, Instance, Result};

    /// Gateway stub that serves a fixed pairing code and a scripted
    /// sequence of connection states, counting every state query.
    #[derive(Clone, Default)]
    struct ScriptedGateway {
        code: Option<String>,
        states: Arc<Mutex<VecDeque<Result<ConnectionState>>>>,
        state_calls: Arc<AtomicUsize>,
        /// When set, `connection_state` blocks until notified and signals
        /// entry on `entered`.
        gate: Option<Arc<Notify>>,
        entered: Option<Arc<Notify>>,
        /// Same pair for `request_connection`.
        request_gate: Option<Arc<Notify>>,
        request_entered: Option<Arc<Notify>>,
    }

    impl ScriptedGateway {
        fn new(code: &str, states: Vec<Result<ConnectionState>>) -> Self {
            Self {
                code: Some(code.to_string()),
                states: Arc::new(Mutex::new(states.into())),
                ..Default::default()
            }
        }

        fn state_calls(&self) -> usize {
            self.state_calls.load(Ordering::SeqCst)
        }
    }

    impl GatewayApi for ScriptedGateway {
        async fn create_instance(&self, _name: &str, _number: &str) -> Result<serde_json::Value> {
            Ok(serde_json::Value::Null)
        }

        async fn fetch_instances(&self) -> Result<Vec<Instance>> {
            Ok(Vec::new())
        }

        async fn request_connection(
            &self,
            _name: &str,
            _number: Option<&str>,
        ) -> Result<Option<String>> {
            if let Some(entered) = &self.request_entered {
                entered.notify_one();
            }
            if let Some(gate) = &self.request_gate {
                gate.notified().await;
            }
            Ok(self.code.clone())
        }

        async fn connection_state(&self, _name: &str) -> Result<ConnectionState> {
            if let Some(entered) = &self.entered {
                entered.notify_one();
            }
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.state_calls.fetch_add(1, Ordering::SeqCst);
            self.states
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ConnectionState::new(ConnectionStatus::Close)))
        }

        async fn logout(&self, _name: &str) -> Result<()> {
            Ok(())
        }

        async fn delete_instance(&self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    fn open() -> Result<ConnectionState> {
        Ok(ConnectionState::new(ConnectionStatus::Open))
    }

    fn close() -> Result<ConnectionState> {
        Ok(ConnectionState::new(ConnectionStatus::Close))
    }

    fn spawn_poller(
        gateway: ScriptedGateway,
        max_ticks: u64,
    ) -> (
        watch::Sender<bool>,
        mpsc::Receiver<PairingEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (ev_tx, ev_rx) = mpsc::channel(16);
        let poller = PairingPoller::new(
            gateway,
            PairingSession::new("shop1", max_ticks),
            None,
            Duration::from_millis(1),
            cancel_rx,
            ev_tx,
        );
        let handle = tokio::spawn(poller.run());
        (cancel_tx, ev_rx, handle)
    }

    #[tokio::test]
    async fn test_code_ready_carries_exact_code() {
        let gateway = ScriptedGateway::new("ABC123", vec![open()]);
        let (_cancel, mut events, handle) = spawn_poller(gateway, 60);

        assert_eq!(
            events.recv().await,
            Some(PairingEvent::CodeReady {
                name: "shop1".to_string(),
                code: "ABC123".to_string(),
            })
        );
        assert_eq!(
            events.recv().await,
            Some(PairingEvent::Connected {
                name: "shop1".to_string()
            })
        );
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_connected_after_exactly_two_ticks() {
        let gateway = ScriptedGateway::new("ABC123", vec![close(), open()]);
        let (_cancel, mut events, handle) = spawn_poller(gateway.clone(), 60);

        let _code = events.recv().await;
        assert_eq!(
            events.recv().await,
            Some(PairingEvent::Connected {
                name: "shop1".to_string()
            })
        );
        handle.await.unwrap();

        // No third query after Connected
        assert_eq!(gateway.state_calls(), 2);
    }

    #[tokio::test]
    async fn test_budget_exhaustion_emits_timed_out() {
        let gateway = ScriptedGateway::new("ABC123", vec![close(), close(), close()]);
        let (_cancel, mut events, handle) = spawn_poller(gateway.clone(), 3);

        let _code = events.recv().await;
        assert_eq!(
            events.recv().await,
            Some(PairingEvent::TimedOut {
                name: "shop1".to_string()
            })
        );
        handle.await.unwrap();
        assert_eq!(gateway.state_calls(), 3);
    }

    #[tokio::test]
    async fn test_tick_errors_are_swallowed() {
        let gateway = ScriptedGateway::new(
            "ABC123",
            vec![Err(Error::transport("connection reset")), open()],
        );
        let (_cancel, mut events, handle) = spawn_poller(gateway, 60);

        let _code = events.recv().await;
        assert_eq!(
            events.recv().await,
            Some(PairingEvent::Connected {
                name: "shop1".to_string()
            })
        );
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_failure_ends_the_poll() {
        #[derive(Clone)]
        struct FailingGateway;
        impl GatewayApi for FailingGateway {
            async fn create_instance(
                &self,
                _name: &str,
                _number: &str,
            ) -> Result<serde_json::Value> {
                Ok(serde_json::Value::Null)
            }
            async fn fetch_instances(&self) -> Result<Vec<Instance>> {
                Ok(Vec::new())
            }
            async fn request_connection(
                &self,
                _name: &str,
                _number: Option<&str>,
            ) -> Result<Option<String>> {
                Err(Error::gateway(404, "Instance not found"))
            }
            async fn connection_state(&self, _name: &str) -> Result<ConnectionState> {
                Ok(ConnectionState::new(ConnectionStatus::Close))
            }
            async fn logout(&self, _name: &str) -> Result<()> {
                Ok(())
            }
            async fn delete_instance(&self, _name: &str) -> Result<()> {
                Ok(())
            }
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (ev_tx, mut ev_rx) = mpsc::channel(16);
        let poller = PairingPoller::new(
            FailingGateway,
            PairingSession::new("ghost", 60),
            None,
            Duration::from_millis(1),
            cancel_rx,
            ev_tx,
        );
        tokio::spawn(poller.run()).await.unwrap();
        drop(cancel_tx);

        match ev_rx.recv().await {
            Some(PairingEvent::RequestFailed { name, error }) => {
                assert_eq!(name, "ghost");
                assert!(error.contains("Instance not found"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
        assert!(ev_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_tick_result() {
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let gateway = ScriptedGateway {
            code: Some("ABC123".to_string()),
            states: Arc::new(Mutex::new(vec![open()].into())),
            gate: Some(gate.clone()),
            entered: Some(entered.clone()),
            ..Default::default()
        };

        let (cancel_tx, mut events, handle) = spawn_poller(gateway, 60);

        let _code = events.recv().await;
        // Wait until the poller is inside the state query, cancel, then
        // let the query return `open`.
        entered.notified().await;
        cancel_tx.send(true).unwrap();
        gate.notify_one();

        handle.await.unwrap();
        // The open result arrived after cancellation: no Connected event.
        assert_eq!(events.recv().await, None);
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_connect_result() {
        let entered = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let gateway = ScriptedGateway {
            code: Some("ABC123".to_string()),
            states: Arc::new(Mutex::new(vec![open()].into())),
            request_gate: Some(gate.clone()),
            request_entered: Some(entered.clone()),
            ..Default::default()
        };

        let (cancel_tx, mut events, handle) = spawn_poller(gateway, 60);

        // Cancel while the connect request is in flight, then let it
        // return a code.
        entered.notified().await;
        cancel_tx.send(true).unwrap();
        gate.notify_one();

        handle.await.unwrap();
        // The code arrived after cancellation: no CodeReady, no polling.
        assert_eq!(events.recv().await, None);
    }

    #[tokio::test]
    async fn test_code_never_ready_times_out() {
        // `code: None` makes every connect request report not-ready.
        let gateway = ScriptedGateway::default();
        let (_cancel, mut events, handle) = spawn_poller(gateway.clone(), 3);

        assert_eq!(
            events.recv().await,
            Some(PairingEvent::TimedOut {
                name: "shop1".to_string()
            })
        );
        handle.await.unwrap();
        // The poll never reached the state-query phase
        assert_eq!(gateway.state_calls(), 0);
    }
}
