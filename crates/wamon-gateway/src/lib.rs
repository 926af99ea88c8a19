//! wamon-gateway - HTTP client for the messaging gateway
//!
//! All instance lifecycle operations (create, list, pair, state query,
//! logout, delete) live on the remote gateway; this crate is the single
//! place that knows the wire format and the `apikey` credential scheme.
//!
//! The application layer depends on the [`GatewayApi`] trait rather than
//! the concrete [`GatewayClient`], which keeps the pairing poller and the
//! update handlers testable against scripted stubs.

pub mod api;
pub mod client;
pub mod credentials;
pub mod types;

pub use api::{GatewayApi, LocalGatewayApi};
pub use client::GatewayClient;
pub use credentials::{CredentialProvider, StaticApiKey};
pub use types::{ConnectResponse, ConnectionStateResponse, CreateInstanceRequest, InstanceRecord};
