//! Gateway operations as a trait seam
//!
//! The application layer (poller, handlers) is generic over [`GatewayApi`]
//! so tests can substitute scripted stub gateways for the HTTP client.

use serde_json::Value;

use wamon_core::{ConnectionState, Instance, Result};

/// One operation per gateway capability, each a request/response pair.
///
/// No retries and no backoff live here; callers apply their own policy
/// (the pairing poller swallows tick errors, everything else surfaces the
/// failure as a notice).
#[trait_variant::make(GatewayApi: Send)]
pub trait LocalGatewayApi {
    /// Create a new instance. The returned payload is opaque; callers only
    /// care about success.
    async fn create_instance(&self, name: &str, number: &str) -> Result<Value>;

    /// Fetch the full ordered list of known instances.
    async fn fetch_instances(&self) -> Result<Vec<Instance>>;

    /// Request a pairing code for an instance. `None` means the gateway has
    /// not produced a code yet and the caller may retry.
    async fn request_connection(&self, name: &str, number: Option<&str>)
        -> Result<Option<String>>;

    /// Query the current connection state of an instance.
    async fn connection_state(&self, name: &str) -> Result<ConnectionState>;

    /// End the instance's session, keeping the instance record.
    async fn logout(&self, name: &str) -> Result<()>;

    /// Remove the instance record entirely.
    async fn delete_instance(&self, name: &str) -> Result<()>;
}
