//! External arbitration - delegating a yes/no decision to another service.
//!
//! The request carries the interaction payload and a full dialogue snapshot:
//!
//! ```json
//! {"interactionData": {...}, "dialogueData": {...}}
//! ```
//!
//! The service answers with a JSON object whose boolean `response` field is the
//! decision. Anything else counts as "no".

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::ArbitrationConfig;
use crate::error::ArbitrationError;

/// Field of the response object holding the decision.
pub const RESPONSE_FIELD: &str = "response";

/// Body sent to an arbitration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrationRequest {
    #[serde(rename = "interactionData")]
    pub interaction_data: Value,

    #[serde(rename = "dialogueData")]
    pub dialogue_data: Value,
}

impl ArbitrationRequest {
    pub fn new(interaction_data: Value, dialogue_data: Value) -> Self {
        Self {
            interaction_data,
            dialogue_data,
        }
    }
}

/// Read the decision out of an endpoint response.
pub fn decision(response: &Value) -> bool {
    response
        .get(RESPONSE_FIELD)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Performs the request/response call to an arbitration endpoint.
pub trait ArbitrationClient: Send + Sync {
    fn call(&self, uri: &str, request: &ArbitrationRequest) -> Result<Value, ArbitrationError>;
}

/// Arbitration over HTTP: `POST` the request as JSON, parse a JSON reply.
///
/// Uses reqwest's blocking client, so it must not be called from inside an
/// async runtime's worker thread.
#[derive(Clone)]
pub struct HttpArbitrationClient {
    client: reqwest::blocking::Client,
}

impl HttpArbitrationClient {
    pub fn new(config: &ArbitrationConfig) -> Self {
        Self::with_timeout(config.timeout(), &config.user_agent)
    }

    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self { client }
    }
}

impl Default for HttpArbitrationClient {
    fn default() -> Self {
        Self::new(&ArbitrationConfig::default())
    }
}

impl ArbitrationClient for HttpArbitrationClient {
    fn call(&self, uri: &str, request: &ArbitrationRequest) -> Result<Value, ArbitrationError> {
        let response = self
            .client
            .post(uri)
            .json(request)
            .send()
            .map_err(|source| ArbitrationError::Transport {
                uri: uri.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArbitrationError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().map_err(|e| ArbitrationError::Decode {
            uri: uri.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request() -> ArbitrationRequest {
        ArbitrationRequest::new(json!({}), json!({"history": []}))
    }

    #[test]
    fn test_decision() {
        assert!(decision(&json!({"response": true})));
        assert!(!decision(&json!({"response": false})));
        assert!(!decision(&json!({"response": "yes"})));
        assert!(!decision(&json!({})));
        assert!(!decision(&Value::Null));
    }

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(request()).unwrap();
        assert_eq!(
            body,
            json!({"interactionData": {}, "dialogueData": {"history": []}})
        );
    }

    #[test]
    fn test_http_call_posts_json() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/judge")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({"interactionData": {}})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": true}"#)
            .create();

        let client = HttpArbitrationClient::default();
        let response = client
            .call(&format!("{}/judge", server.url()), &request())
            .unwrap();

        mock.assert();
        assert!(decision(&response));
    }

    #[test]
    fn test_http_error_status() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/judge").with_status(503).create();

        let client = HttpArbitrationClient::default();
        let result = client.call(&format!("{}/judge", server.url()), &request());

        assert!(matches!(
            result,
            Err(ArbitrationError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn test_http_undecodable_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/judge")
            .with_status(200)
            .with_body("definitely not json")
            .create();

        let client = HttpArbitrationClient::default();
        let result = client.call(&format!("{}/judge", server.url()), &request());

        assert!(matches!(result, Err(ArbitrationError::Decode { .. })));
    }

    #[test]
    fn test_unreachable_endpoint() {
        let client = HttpArbitrationClient::with_timeout(Duration::from_millis(200), "test");
        let result = client.call("http://127.0.0.1:9/judge", &request());

        assert!(matches!(result, Err(ArbitrationError::Transport { .. })));
    }
}
