//! Oracle client struct and builder.

use std::str::FromStr;
use std::time::Duration;

use oracle_stream::{DecoderConfig, MalformedPolicy};
use oracle_types::{ConsultRequest, OracleError, StreamHandle};

use crate::config::ConfigError;
use crate::conversation::collect_reply;
use crate::error::{map_http_status, map_reqwest_error, parse_retry_after};
use crate::mapping::{to_gateway_request, to_relay_request};
use crate::streaming::stream_completion;

/// Default connect timeout for new clients.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the relay function under the project base URL.
const RELAY_PATH: &str = "/functions/v1/oracle-chat";

/// Path of the OpenAI-compatible chat completions endpoint.
const GATEWAY_PATH: &str = "/v1/chat/completions";

/// Where requests are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// The Oracle relay function, which owns persona and model choice.
    #[default]
    Relay,
    /// An OpenAI-compatible gateway called directly.
    Gateway,
}

impl FromStr for Route {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relay" => Ok(Self::Relay),
            "gateway" => Ok(Self::Gateway),
            _ => Err(ConfigError::Invalid {
                name: "route",
                value: s.to_string(),
            }),
        }
    }
}

/// Client for the Oracle chat endpoint.
///
/// # Example
///
/// ```no_run
/// use oracle_client::{OracleClient, Route};
///
/// let client = OracleClient::new("https://ai.gateway.example.dev")
///     .api_key("sk-...")
///     .route(Route::Gateway)
///     .max_line_bytes(256 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct OracleClient {
    /// Project or gateway base URL, without a trailing path.
    pub(crate) base_url: String,
    /// Bearer token, if the endpoint requires one.
    pub(crate) api_key: Option<String>,
    /// Which endpoint shape to speak.
    pub(crate) route: Route,
    /// Gateway model override; `None` picks by mode.
    pub(crate) model: Option<String>,
    /// Decoder settings applied to every response.
    pub(crate) decoder: DecoderConfig,
    /// Connect timeout the HTTP client was built with.
    pub(crate) connect_timeout: Duration,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl OracleClient {
    /// Create a client for `base_url` with the relay route and default decoder settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            route: Route::default(),
            model: None,
            decoder: DecoderConfig::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            client: build_http_client(DEFAULT_CONNECT_TIMEOUT),
        }
    }

    /// Send `Authorization: Bearer <key>` on every request.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Choose the endpoint shape.
    #[must_use]
    pub fn route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    /// Pin the gateway model instead of choosing by mode. Ignored by the relay.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Cap on unresolved input per response stream.
    #[must_use]
    pub fn max_line_bytes(mut self, limit: usize) -> Self {
        self.decoder = self.decoder.max_line_bytes(limit);
        self
    }

    /// How malformed `data:` payloads are handled.
    #[must_use]
    pub fn malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.decoder = self.decoder.malformed(policy);
        self
    }

    /// Rebuild the HTTP client with a different connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.client = build_http_client(timeout);
        self
    }

    /// Use a preconfigured HTTP client (proxies, custom TLS, ...).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Build the endpoint URL for the configured route.
    pub(crate) fn endpoint_url(&self) -> String {
        let path = match self.route {
            Route::Relay => RELAY_PATH,
            Route::Gateway => GATEWAY_PATH,
        };
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Send a request and return the decoded reply stream.
    ///
    /// HTTP-level failures are returned here; failures after the stream has
    /// started arrive as a terminal [`StreamEvent::Error`](oracle_types::StreamEvent::Error).
    pub async fn consult(&self, request: &ConsultRequest) -> Result<StreamHandle, OracleError> {
        let url = self.endpoint_url();
        let body = match self.route {
            Route::Relay => to_relay_request(request),
            Route::Gateway => to_gateway_request(request, self.model.as_deref()),
        };

        tracing::debug!(
            url = %url,
            route = ?self.route,
            mode = ?request.mode,
            messages = request.messages.len(),
            "consulting the oracle"
        );

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("accept", "text/event-stream")
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.connect_timeout))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let body_text = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, self.connect_timeout))?;
            tracing::warn!(status = %status, "oracle request rejected");
            return Err(map_http_status(status, retry_after, &body_text));
        }

        Ok(stream_completion(response, self.decoder))
    }

    /// Send a request and wait for the whole reply.
    pub async fn ask(&self, request: &ConsultRequest) -> Result<String, OracleError> {
        let handle = self.consult(request).await?;
        Ok(collect_reply(handle).await?)
    }
}

fn build_http_client(connect_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                ?connect_timeout,
                "failed to build HTTP client, falling back to defaults without a connect timeout"
            );
            reqwest::Client::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_route_is_relay() {
        let client = OracleClient::new("https://project.example.co");
        assert_eq!(client.route, Route::Relay);
        assert!(client.api_key.is_none());
        assert_eq!(client.decoder, DecoderConfig::default());
    }

    #[test]
    fn relay_url_includes_function_path() {
        let client = OracleClient::new("https://project.example.co/");
        assert_eq!(
            client.endpoint_url(),
            "https://project.example.co/functions/v1/oracle-chat"
        );
    }

    #[test]
    fn gateway_url_includes_completions_path() {
        let client = OracleClient::new("http://localhost:9999").route(Route::Gateway);
        assert_eq!(
            client.endpoint_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn builder_sets_fields() {
        let client = OracleClient::new("http://localhost")
            .api_key("anon-key")
            .model("google/gemini-2.5-flash")
            .max_line_bytes(1024)
            .malformed_policy(MalformedPolicy::Skip)
            .connect_timeout(Duration::from_secs(3));
        assert_eq!(client.api_key.as_deref(), Some("anon-key"));
        assert_eq!(client.model.as_deref(), Some("google/gemini-2.5-flash"));
        assert_eq!(client.decoder.max_line_bytes, 1024);
        assert_eq!(client.decoder.malformed, MalformedPolicy::Skip);
        assert_eq!(client.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn route_parses_case_insensitively() {
        assert_eq!("Gateway".parse::<Route>().unwrap(), Route::Gateway);
        assert_eq!(" relay ".parse::<Route>().unwrap(), Route::Relay);
        assert!("carrier-pigeon".parse::<Route>().is_err());
    }
}
