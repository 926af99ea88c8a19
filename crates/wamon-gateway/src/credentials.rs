//! Gateway credential abstraction
//!
//! The gateway authenticates every call with an `apikey` header. The header
//! value is obtained through [`CredentialProvider`] so per-operator
//! credentials can be substituted without touching the client.

/// Source of the `apikey` header value attached to every gateway call.
pub trait CredentialProvider: Send + Sync {
    /// The credential to attach to the next request.
    fn api_key(&self) -> String;
}

/// A fixed shared-secret credential, as configured in `wamon.toml`.
#[derive(Debug, Clone)]
pub struct StaticApiKey(String);

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl CredentialProvider for StaticApiKey {
    fn api_key(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_api_key() {
        let creds = StaticApiKey::new("mude-me");
        assert_eq!(creds.api_key(), "mude-me");
    }

    #[test]
    fn test_provider_is_object_safe() {
        let creds: Box<dyn CredentialProvider> = Box::new(StaticApiKey::new("k"));
        assert_eq!(creds.api_key(), "k");
    }
}
