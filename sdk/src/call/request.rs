//! Call descriptors.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::profile::{Body, CallProfile, HeaderSet};
use super::response::CallResponse;
use crate::error::CallError;
use crate::exchange::{CallType, Exchange, RegionError};
use crate::session::Session;
use crate::transport::{HttpRequest, RawResponse, Transport, TransportError};

/// Order placement method; its instructions count against the hourly limit.
pub const PLACE_ORDERS: &str = "SportsAPING/v1.0/placeOrders";

/// Order replacement method; its instructions count against the hourly limit.
pub const REPLACE_ORDERS: &str = "SportsAPING/v1.0/replaceOrders";

const JSON_RPC_VERSION: &str = "2.0";
const JSON_RPC_ID: u32 = 1;

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: Option<&'a str>,
    params: Option<&'a Value>,
    id: u32,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// One call to the exchange.
///
/// The endpoint URL is resolved when the descriptor is built; calling it
/// performs exactly one HTTP round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeCall {
    call_type: CallType,
    method: Option<String>,
    params: Option<Value>,
    exchange: Exchange,
    url: String,
    instructions_length: usize,
}

impl ExchangeCall {
    /// Builds a descriptor for `call_type`.
    ///
    /// Without an `exchange` override the session's region is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be resolved.
    pub fn new<T>(
        session: &Session<T>,
        call_type: CallType,
        method: Option<String>,
        params: Option<Value>,
        exchange: Option<Exchange>,
    ) -> Result<Self, RegionError> {
        let (exchange, url) = initiate_exchange(session, exchange, call_type)?;
        let instructions_length = match method.as_deref() {
            Some(PLACE_ORDERS | REPLACE_ORDERS) => count_instructions(params.as_ref()),
            _ => 0,
        };

        Ok(Self {
            call_type,
            method,
            params,
            exchange,
            url,
            instructions_length,
        })
    }

    /// Certificate login.
    ///
    /// # Errors
    ///
    /// Returns an error if the login endpoint is not configured.
    pub fn login<T>(session: &Session<T>) -> Result<Self, RegionError> {
        Self::new(session, CallType::Login, None, None, None)
    }

    /// Session keep-alive.
    ///
    /// # Errors
    ///
    /// Returns an error if the keep-alive endpoint is not configured.
    pub fn keep_alive<T>(session: &Session<T>) -> Result<Self, RegionError> {
        Self::new(session, CallType::KeepAlive, None, None, None)
    }

    /// Logout.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout endpoint is not configured.
    pub fn logout<T>(session: &Session<T>) -> Result<Self, RegionError> {
        Self::new(session, CallType::Logout, None, None, None)
    }

    /// Betting JSON-RPC request.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange has no betting endpoint.
    pub fn betting<T>(
        session: &Session<T>,
        method: impl Into<String>,
        params: Value,
        exchange: Option<Exchange>,
    ) -> Result<Self, RegionError> {
        Self::new(
            session,
            CallType::Betting,
            Some(method.into()),
            Some(params),
            exchange,
        )
    }

    /// Account JSON-RPC request.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange has no account endpoint.
    pub fn account<T>(
        session: &Session<T>,
        method: impl Into<String>,
        params: Value,
        exchange: Option<Exchange>,
    ) -> Result<Self, RegionError> {
        Self::new(
            session,
            CallType::Account,
            Some(method.into()),
            Some(params),
            exchange,
        )
    }

    /// Scores JSON-RPC request, always on the session's exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the session's exchange has no scores endpoint.
    pub fn scores<T>(
        session: &Session<T>,
        method: impl Into<String>,
        params: Value,
    ) -> Result<Self, RegionError> {
        Self::new(
            session,
            CallType::Scores,
            Some(method.into()),
            Some(params),
            None,
        )
    }

    /// Navigation menu request.
    ///
    /// # Errors
    ///
    /// Returns an error if the navigation endpoint is not configured.
    pub fn navigation<T>(session: &Session<T>, params: Option<Value>) -> Result<Self, RegionError> {
        Self::new(session, CallType::Navigation, None, params, None)
    }

    /// Call type of this descriptor.
    #[must_use]
    pub const fn call_type(&self) -> CallType {
        self.call_type
    }

    /// Profile driving how this call is sent.
    #[must_use]
    pub const fn profile(&self) -> CallProfile {
        CallProfile::of(self.call_type)
    }

    /// JSON-RPC method, if any.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Call parameters, if any.
    #[must_use]
    pub const fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Resolved exchange region.
    #[must_use]
    pub const fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Resolved endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of order instructions, zero unless this places or replaces
    /// orders.
    #[must_use]
    pub const fn instructions_length(&self) -> usize {
        self.instructions_length
    }

    /// Returns true if the method places or replaces orders.
    #[must_use]
    pub fn is_order_placement(&self) -> bool {
        matches!(self.method(), Some(PLACE_ORDERS | REPLACE_ORDERS))
    }

    /// Serializes the JSON-RPC envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters cannot be serialized.
    pub fn create_req(&self) -> Result<Vec<u8>, CallError> {
        let envelope = JsonRpcRequest {
            jsonrpc: JSON_RPC_VERSION,
            method: self.method(),
            params: self.params(),
            id: JSON_RPC_ID,
        };
        serde_json::to_vec(&envelope).map_err(|e| CallError::Encode(e.to_string()))
    }

    /// Sends the call through the session's default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction limit would be exceeded, the
    /// request fails, or the exchange answers with a status other than 200.
    pub async fn call<T: Transport>(&self, session: &Session<T>) -> Result<CallResponse, CallError> {
        self.call_with(session, session.transport()).await
    }

    /// Sends the call through `transport` instead of the session's default.
    ///
    /// # Errors
    ///
    /// See [`Self::call`].
    pub async fn call_with<T, U: Transport>(
        &self,
        session: &Session<T>,
        transport: &U,
    ) -> Result<CallResponse, CallError> {
        let profile = self.profile();
        let sent_at = Utc::now();

        if profile.transaction_check && self.is_order_placement() {
            session.check_transaction_count(self.instructions_length)?;
        }

        let request = self.build_request(session, &profile)?;
        debug!(
            call_type = %self.call_type,
            exchange = %self.exchange,
            method = self.method().unwrap_or_default(),
            url = %self.url,
            "Sending exchange request"
        );

        let response = transport
            .send(request)
            .await
            .map_err(|e| self.transport_error(&profile, e))?;

        self.create_resp(response, sent_at)
    }

    /// Turns a received response into the call result.
    ///
    /// Status 200 yields the decoded body; any other status is an error of
    /// this call's kind, whatever the body says.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Status`] for non-200 responses and
    /// [`CallError::Decode`] for a 200 response that is not JSON.
    pub fn create_resp(
        &self,
        response: RawResponse,
        sent_at: DateTime<Utc>,
    ) -> Result<CallResponse, CallError> {
        let kind = self.profile().error_kind;

        if response.status != StatusCode::OK {
            warn!(
                call_type = %self.call_type,
                status = %response.status,
                "Exchange returned error status"
            );
            return Err(CallError::Status {
                kind,
                response,
                params: self.params.clone(),
                method: self.method.clone(),
            });
        }

        match response.json::<Value>() {
            Ok(body) => Ok(CallResponse {
                body,
                raw: response,
                sent_at,
            }),
            Err(source) => Err(CallError::Decode {
                kind,
                response,
                params: self.params.clone(),
                method: self.method.clone(),
                source,
            }),
        }
    }

    fn build_request<T>(
        &self,
        session: &Session<T>,
        profile: &CallProfile,
    ) -> Result<HttpRequest, CallError> {
        let body = match profile.body {
            Body::JsonRpc => Some(self.create_req()?),
            Body::Credentials => {
                let credentials = Credentials {
                    username: session.username(),
                    password: session.password(),
                };
                let form = serde_urlencoded::to_string(&credentials)
                    .map_err(|e| CallError::Encode(e.to_string()))?;
                Some(form.into_bytes())
            }
            Body::Empty => None,
        };

        let headers = match profile.headers {
            HeaderSet::Request => session.request_headers(),
            HeaderSet::Login => session.login_headers(),
            HeaderSet::KeepAlive => session.keep_alive_headers(),
        };

        Ok(HttpRequest {
            method: profile.verb.method(),
            url: self.url.clone(),
            headers,
            body,
            timeouts: profile.timeouts,
            client_cert: profile.client_cert,
        })
    }

    fn transport_error(&self, profile: &CallProfile, source: TransportError) -> CallError {
        warn!(call_type = %self.call_type, url = %self.url, "Request failed: {}", source);

        let params = self.params.clone();
        let method = if profile.reports_method {
            self.method.clone()
        } else {
            None
        };

        if profile.connection_marker && source.is_connect() {
            CallError::Connection {
                params,
                method,
                source,
            }
        } else {
            CallError::Transport {
                params,
                method,
                source,
            }
        }
    }
}

/// Picks the exchange and resolves the endpoint for a call type.
fn initiate_exchange<T>(
    session: &Session<T>,
    exchange: Option<Exchange>,
    call_type: CallType,
) -> Result<(Exchange, String), RegionError> {
    let exchange = exchange.unwrap_or_else(|| session.exchange());
    let url = session.resolve_url(exchange, call_type)?;
    Ok((exchange, url.to_string()))
}

fn count_instructions(params: Option<&Value>) -> usize {
    params
        .and_then(|p| p.get("instructions"))
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
