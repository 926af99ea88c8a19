//! Wire types for the gateway's `/instance` API
//!
//! The gateway speaks JSON with camelCase keys (and a couple of snake_case
//! stragglers on the create payload). These types mirror the wire format
//! exactly; the rest of the codebase only sees the domain types from
//! `wamon-core`.

use serde::{Deserialize, Serialize};

use wamon_core::{ConnectionState, ConnectionStatus, Instance};

/// Body for `POST /instance/create`.
///
/// The flag set matches what the gateway expects for a QR-paired
/// WHATSAPP-BAILEYS instance; only `instance_name` and `number` vary.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInstanceRequest {
    #[serde(rename = "instanceName")]
    pub instance_name: String,

    /// Instance-level token; empty string lets the gateway generate one.
    pub token: String,

    /// Operator-entered phone number (E.164, digits only accepted too)
    pub number: String,

    /// Ask the gateway to provision QR pairing for this instance
    pub qrcode: bool,

    pub integration: String,

    pub reject_call: bool,

    #[serde(rename = "alwaysOnline")]
    pub always_online: bool,
}

impl CreateInstanceRequest {
    pub fn new(instance_name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            token: String::new(),
            number: number.into(),
            qrcode: true,
            integration: "WHATSAPP-BAILEYS".to_string(),
            reject_call: false,
            always_online: true,
        }
    }
}

/// One element of the `GET /instance/fetchInstances` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceEnvelope {
    pub instance: InstanceRecord,
}

/// The gateway's representation of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRecord {
    pub instance_name: String,

    #[serde(default)]
    pub status: ConnectionStatus,

    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

impl From<InstanceRecord> for Instance {
    fn from(record: InstanceRecord) -> Self {
        Instance {
            name: record.instance_name,
            status: record.status,
            profile_picture_url: record.profile_picture_url,
        }
    }
}

/// Response of `GET /instance/connect/{name}`.
///
/// The canonical field is `code`. Older gateway builds spelled it `qrCode`;
/// that spelling is accepted on deserialization only and never produced.
/// A missing/null code means pairing is not ready yet and the caller may
/// retry the request.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectResponse {
    #[serde(default, alias = "qrCode")]
    pub code: Option<String>,
}

/// Response of `GET /instance/connectionState/{name}`.
///
/// Two shapes exist in the wild: the nested `{"instance": {"state": ...}}`
/// envelope and a flat `{"state": ..., "details": ...}` object. Both are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConnectionStateResponse {
    Nested { instance: StateBody },
    Flat {
        state: String,
        #[serde(default)]
        details: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateBody {
    pub state: String,
}

impl ConnectionStateResponse {
    /// Collapse both wire shapes into the domain type. Raw transitional
    /// state strings (anything other than open/close) are kept as detail.
    pub fn into_state(self) -> ConnectionState {
        let (raw, details) = match self {
            ConnectionStateResponse::Nested { instance } => (instance.state, None),
            ConnectionStateResponse::Flat { state, details } => (state, details),
        };
        let status = ConnectionStatus::from_state_str(&raw);
        let detail = details.or_else(|| {
            let canonical = raw.eq_ignore_ascii_case("open") || raw.eq_ignore_ascii_case("close");
            (!canonical).then_some(raw)
        });
        ConnectionState { status, detail }
    }
}

/// Error body the gateway attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
