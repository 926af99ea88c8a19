//! Pairing: connect an instance to WhatsApp via a pairing code
//!
//! Three layers:
//! - [`PairingSession`]: pure state machine, no I/O
//! - [`PairingPoller`]: async driver ticking a session against the gateway
//! - [`PairingRegistry`]: at-most-one running poll per instance name

mod poller;
mod registry;
mod session;

pub use poller::{PairingEvent, PairingPoller};
pub use registry::PairingRegistry;
pub use session::{PairingPhase, PairingSession};
