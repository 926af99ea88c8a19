//! Pure pairing state machine
//!
//! `PairingSession` tracks one instance's pairing lifecycle without doing
//! any I/O. The async driver ([`super::PairingPoller`]) feeds it the
//! pairing code and the result of each connection-state query; the session
//! decides which results count.
//!
//! Tick ids are allocated by `next_tick` and applied last-write-wins by
//! `on_tick_result`, so a stale query result can never overwrite a newer
//! one and a result arriving after cancellation is discarded.

use wamon_core::ConnectionState;

/// Lifecycle phase of a pairing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingPhase {
    /// Created but no gateway request issued yet
    Idle,
    /// Waiting for the gateway to hand out a pairing code
    Requesting,
    /// Code received, polling connection state
    Polling,
    /// Gateway reported the instance as open
    Connected,
    /// Cancelled by the operator (or superseded by a newer poll)
    Cancelled,
    /// Tick budget exhausted without reaching open
    TimedOut,
}

impl PairingPhase {
    /// Terminal phases accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PairingPhase::Connected | PairingPhase::Cancelled | PairingPhase::TimedOut
        )
    }

    /// True while the session still has work in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, PairingPhase::Requesting | PairingPhase::Polling)
    }
}

/// State machine for pairing a single instance.
#[derive(Debug, Clone)]
pub struct PairingSession {
    name: String,
    phase: PairingPhase,
    code: Option<String>,
    next_tick_id: u64,
    last_applied_tick: Option<u64>,
    max_ticks: u64,
}

impl PairingSession {
    /// Create an idle session for `name` with a tick budget.
    pub fn new(name: impl Into<String>, max_ticks: u64) -> Self {
        Self {
            name: name.into(),
            phase: PairingPhase::Idle,
            code: None,
            next_tick_id: 1,
            last_applied_tick: None,
            max_ticks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> PairingPhase {
        self.phase
    }

    /// The pairing code, available once the session reached Polling.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Mark the gateway request as issued. Only valid from Idle.
    pub fn begin_request(&mut self) {
        if self.phase == PairingPhase::Idle {
            self.phase = PairingPhase::Requesting;
        }
    }

    /// Record the outcome of the connect request. `Some(code)` moves the
    /// session to Polling; `None` means the gateway has no code yet and
    /// the caller should retry the request.
    pub fn on_pairing_code(&mut self, code: Option<String>) {
        if self.phase != PairingPhase::Requesting {
            return;
        }
        if let Some(code) = code {
            self.code = Some(code);
            self.phase = PairingPhase::Polling;
        }
    }

    /// Count a connect retry against the tick budget, so a gateway that
    /// never hands out a code cannot keep the session in Requesting
    /// forever. Returns `false` when the budget is spent, transitioning
    /// to TimedOut.
    pub fn on_request_retry(&mut self) -> bool {
        if self.phase != PairingPhase::Requesting {
            return false;
        }
        if self.next_tick_id > self.max_ticks {
            self.phase = PairingPhase::TimedOut;
            return false;
        }
        self.next_tick_id += 1;
        true
    }

    /// Allocate the next tick id, or transition to TimedOut when the
    /// budget is spent. Returns `None` in any phase other than Polling.
    pub fn next_tick(&mut self) -> Option<u64> {
        if self.phase != PairingPhase::Polling {
            return None;
        }
        if self.next_tick_id > self.max_ticks {
            self.phase = PairingPhase::TimedOut;
            return None;
        }
        let id = self.next_tick_id;
        self.next_tick_id += 1;
        Some(id)
    }

    /// Apply a connection-state query result. Last-write-wins: the result
    /// is discarded unless the session is still Polling and `tick_id` is
    /// newer than the last applied tick. Returns `true` exactly once, on
    /// the transition to Connected.
    pub fn on_tick_result(&mut self, tick_id: u64, state: &ConnectionState) -> bool {
        if self.phase != PairingPhase::Polling {
            return false;
        }
        if self.last_applied_tick.is_some_and(|last| tick_id <= last) {
            return false;
        }
        self.last_applied_tick = Some(tick_id);

        if state.is_open() {
            self.phase = PairingPhase::Connected;
            return true;
        }
        false
    }

    /// Cancel the session. Idempotent; a no-op on terminal phases.
    pub fn cancel(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = PairingPhase::Cancelled;
        }
    }
}
