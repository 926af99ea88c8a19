//! Core domain types shared across all wamon crates

use serde::{Deserialize, Deserializer, Serialize};

/// Connection status of an instance as reported by the gateway.
///
/// The gateway's canonical values are `"open"` and `"close"`. Some gateway
/// versions report transitional strings (e.g. `"connecting"`) from the
/// connectionState endpoint; anything that is not `"open"` deserializes as
/// [`ConnectionStatus::Close`] so the UI never shows a paired indicator for
/// an unpaired instance. The raw string is preserved in
/// [`ConnectionState::detail`] where the gateway supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Open,
    #[default]
    Close,
}

impl<'de> Deserialize<'de> for ConnectionStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ConnectionStatus::from_state_str(&raw))
    }
}

impl ConnectionStatus {
    /// Map a raw gateway state string to a status.
    pub fn from_state_str(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("open") {
            ConnectionStatus::Open
        } else {
            ConnectionStatus::Close
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionStatus::Open)
    }

    /// Wire representation (lowercase, as the gateway sends it)
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Open => "open",
            ConnectionStatus::Close => "close",
        }
    }

    /// Status indicator character for table rows
    pub fn icon(&self) -> &'static str {
        match self {
            ConnectionStatus::Open => "●",
            ConnectionStatus::Close => "○",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named logical messaging session managed by the external gateway.
///
/// The gateway is the sole source of truth; wamon only ever holds a
/// transient cached copy refreshed by re-fetching the full list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Operator-chosen unique identifier
    pub name: String,

    /// Last observed connection status
    pub status: ConnectionStatus,

    /// Optional profile picture URL reported by the gateway
    pub profile_picture_url: Option<String>,
}

impl Instance {
    pub fn new(name: impl Into<String>, status: ConnectionStatus) -> Self {
        Self {
            name: name.into(),
            status,
            profile_picture_url: None,
        }
    }

    /// Single-character avatar fallback (first letter, uppercased)
    pub fn avatar_initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Result of a connectionState query: the status plus whatever free-text
/// detail the gateway attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub detail: Option<String>,
}

impl ConnectionState {
    pub fn new(status: ConnectionStatus) -> Self {
        Self {
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}
