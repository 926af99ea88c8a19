//! HTTP implementation of the gateway API
//!
//! A thin request/response wrapper: one method per gateway endpoint, the
//! `apikey` header on every call, no retries. Callers own their policy.

use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Response;
use serde_json::Value;
use tracing::debug;
use url::Url;

use wamon_core::{ConnectionState, Error, Instance, Result};

use crate::api::GatewayApi;
use crate::credentials::CredentialProvider;
use crate::types::{
    ConnectResponse, ConnectionStateResponse, CreateInstanceRequest, GatewayErrorBody,
    InstanceEnvelope,
};

/// Characters percent-encoded when an instance name is used as a path
/// segment. CONTROLS plus everything that would terminate or split the
/// segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Fallback when a non-2xx response carries no usable message body.
const GENERIC_FAILURE: &str = "Gateway request failed";

/// Client for the gateway's `/instance` REST surface.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl GatewayClient {
    /// Build a client against `base_url` with the given credential source.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialProvider>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
    }

    fn instance_endpoint(&self, op: &str, name: &str) -> Result<Url> {
        let encoded = utf8_percent_encode(name, PATH_SEGMENT);
        self.endpoint(&format!("/instance/{op}/{encoded}"))
    }

    /// Check the HTTP status, converting non-2xx responses into
    /// `Error::Gateway` with the body's `message` field when present.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<GatewayErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            Err(_) => GENERIC_FAILURE.to_string(),
        };

        Err(Error::gateway(status.as_u16(), message))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request
            .header("apikey", self.credentials.api_key())
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        Self::check_status(response).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| Error::transport(format!("malformed gateway response: {e}")))
    }
}

impl GatewayApi for GatewayClient {
    async fn create_instance(&self, name: &str, number: &str) -> Result<Value> {
        let url = self.endpoint("/instance/create")?;
        let payload = CreateInstanceRequest::new(name, number);
        debug!(instance = name, "creating instance");

        let response = self.send(self.http.post(url).json(&payload)).await?;
        Self::read_json(response).await
    }

    async fn fetch_instances(&self) -> Result<Vec<Instance>> {
        let url = self.endpoint("/instance/fetchInstances")?;
        let response = self.send(self.http.get(url)).await?;

        let envelopes: Vec<InstanceEnvelope> = Self::read_json(response).await?;
        Ok(envelopes
            .into_iter()
            .map(|e| Instance::from(e.instance))
            .collect())
    }

    async fn request_connection(
        &self,
        name: &str,
        number: Option<&str>,
    ) -> Result<Option<String>> {
        let mut url = self.instance_endpoint("connect", name)?;
        if let Some(number) = number {
            url.query_pairs_mut().append_pair("number", number);
        }
        debug!(instance = name, "requesting pairing code");

        let response = self.send(self.http.get(url)).await?;
        let connect: ConnectResponse = Self::read_json(response).await?;
        Ok(connect.code)
    }

    async fn connection_state(&self, name: &str) -> Result<ConnectionState> {
        let url = self.instance_endpoint("connectionState", name)?;
        let response = self.send(self.http.get(url)).await?;

        let state: ConnectionStateResponse = Self::read_json(response).await?;
        Ok(state.into_state())
    }

    async fn logout(&self, name: &str) -> Result<()> {
        let url = self.instance_endpoint("logout", name)?;
        debug!(instance = name, "logging out instance");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn delete_instance(&self, name: &str) -> Result<()> {
        let url = self.instance_endpoint("delete", name)?;
        debug!(instance = name, "deleting instance");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
