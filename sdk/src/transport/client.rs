//! Default transport backed by reqwest.

use std::collections::HashMap;

use reqwest::Identity;
use tracing::debug;

use super::error::TransportError;
use super::http::{HttpRequest, RawResponse, TimeoutPolicy, Transport};

const POLICIES: [TimeoutPolicy; 2] = [TimeoutPolicy::Exchange, TimeoutPolicy::TransportDefault];

/// reqwest-backed [`Transport`].
///
/// reqwest fixes timeouts and TLS identity per client, so one client is
/// built for each (timeout policy, client certificate) combination.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    clients: HashMap<(TimeoutPolicy, bool), reqwest::Client>,
    has_identity: bool,
}

impl ReqwestTransport {
    /// Creates a transport, optionally presenting `identity` on requests
    /// that ask for the client certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if a reqwest client cannot be built.
    pub fn new(identity: Option<Identity>) -> Result<Self, TransportError> {
        let mut clients = HashMap::new();

        for policy in POLICIES {
            clients.insert((policy, false), build_client(policy, None)?);
            if let Some(ref identity) = identity {
                clients.insert((policy, true), build_client(policy, Some(identity.clone()))?);
            }
        }

        Ok(Self {
            clients,
            has_identity: identity.is_some(),
        })
    }

    /// Returns true if a client certificate is configured.
    #[must_use]
    pub const fn has_identity(&self) -> bool {
        self.has_identity
    }

    fn client_for(
        &self,
        policy: TimeoutPolicy,
        client_cert: bool,
    ) -> Result<&reqwest::Client, TransportError> {
        if client_cert && !self.has_identity {
            debug!("client certificate requested but none configured");
        }
        let key = (policy, client_cert && self.has_identity);
        self.clients
            .get(&key)
            .ok_or_else(|| TransportError::Setup(format!("no client for {key:?}")))
    }
}

fn build_client(
    policy: TimeoutPolicy,
    identity: Option<Identity>,
) -> Result<reqwest::Client, TransportError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = policy.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = policy.read_timeout() {
        builder = builder.read_timeout(timeout);
    }
    if let Some(identity) = identity {
        builder = builder.identity(identity);
    }

    builder
        .build()
        .map_err(|e| TransportError::Setup(e.to_string()))
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let client = self.client_for(request.timeouts, request.client_cert)?;

        let mut builder = client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
            url,
        })
    }
}
