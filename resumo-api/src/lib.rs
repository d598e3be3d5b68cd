pub mod endpoints;
mod error;
mod macros;
pub mod testing;
mod transport;

pub use crate::error::RequestError;
pub use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportFailure};

use endpoints::auth::{Credentials, SignupRequest, extract_token};
use endpoints::summaries::SummarizeRequest;
use endpoints::{LOGIN_PATH, SIGNUP_PATH, SUMMARIZE_PATH};
use macros::setter;
use reqwest::{Method, StatusCode};
use resumo_auth::TokenStorage;
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:8080/api";

/// How a single call to [`Client::request`] should be made.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    body: Option<Value>,
    require_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            require_auth: false,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    setter!(opt body: Value);
    setter!(require_auth: bool);
}

pub struct Client<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    tokens: Arc<dyn TokenStorage>,
}

impl Client {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStorage>) -> Self {
        Self::with_transport(ReqwestTransport::new(), base_url, tokens)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(
        transport: T,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStorage>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStorage> {
        &self.tokens
    }

    /// Sends a request to `base_url + path` and classifies the outcome.
    ///
    /// With `require_auth` the stored token is attached as a bearer
    /// credential when there is one; without a token the request still goes
    /// out and the server decides. A 401 or 403 clears the token on any
    /// path, whether or not auth was requested.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, RequestError> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = vec![("Content-Type", "application/json".to_string())];
        if options.require_auth {
            match self.tokens.get_token() {
                Ok(Some(token)) if !token.expose_secret().is_empty() => {
                    headers.push(("Authorization", format!("Bearer {}", token.expose_secret())));
                }
                Ok(_) => tracing::debug!(path, "No session token, sending without credentials"),
                Err(e) => tracing::warn!(path, "Could not read session token: {}", e),
            }
        }

        let body = options
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let method = options.method;
        tracing::debug!(%method, %url, "Sending request");

        let response = self
            .transport
            .send(HttpRequest {
                method: method.clone(),
                url,
                headers,
                body,
            })
            .await
            .map_err(|failure| {
                tracing::warn!(%method, path, "Request failed: {}", failure.message);
                RequestError::from(failure)
            })?;

        let status = response.status;
        tracing::debug!(%method, path, %status, "Received response");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(path, %status, "Session rejected by server, clearing token");
            if let Err(e) = self.tokens.clear_token() {
                tracing::warn!("Failed to clear session token: {}", e);
            }
            return Err(RequestError::AuthRejected { status });
        }

        let body = response.body.map_err(|failure| {
            tracing::warn!(path, %status, "Failed to read response body: {}", failure.message);
            RequestError::from(failure)
        })?;

        parse_payload(status, &body)
    }

    pub async fn signup(&self, user: &SignupRequest) -> Result<Value, RequestError> {
        let body = serde_json::to_value(user)?;
        self.request(SIGNUP_PATH, RequestOptions::post().body(body))
            .await
    }

    /// Logs in and stores the returned token, if the payload carries one.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, RequestError> {
        let body = serde_json::to_value(credentials)?;
        let payload = self
            .request(LOGIN_PATH, RequestOptions::post().body(body))
            .await?;

        match extract_token(&payload) {
            Some(token) => {
                self.tokens.set_token(token)?;
                tracing::info!(username = %credentials.username, "Session token stored");
            }
            None => tracing::warn!("Login response did not include a token"),
        }

        Ok(payload)
    }

    pub async fn summarize_text(&self, text: &str) -> Result<Value, RequestError> {
        let body = serde_json::to_value(SummarizeRequest::new(text))?;
        self.request(
            SUMMARIZE_PATH,
            RequestOptions::post().body(body).require_auth(true),
        )
        .await
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Forgets the stored token. No request is made.
    pub fn logout(&self) -> Result<(), RequestError> {
        self.tokens.clear_token()?;
        Ok(())
    }
}

fn parse_payload(status: StatusCode, body: &str) -> Result<Value, RequestError> {
    let payload = if body.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(body) {
            Ok(payload) => payload,
            Err(e) if status.is_success() => {
                return Err(RequestError::Application {
                    message: format!("Resposta inválida do servidor: {}", e),
                    status,
                });
            }
            // An unreadable error body still gets the generic message below
            Err(_) => Value::Null,
        }
    };

    if !status.is_success() {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Erro {}", status.as_u16()));

        return Err(RequestError::Application { message, status });
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_payload_returns_success_body_unchanged() {
        let payload = parse_payload(StatusCode::OK, r#"{"resumo":"curto","extra":[1,2]}"#).unwrap();
        assert_eq!(payload, json!({ "resumo": "curto", "extra": [1, 2] }));
    }

    #[test]
    fn parse_payload_empty_success_body_is_null() {
        assert_eq!(parse_payload(StatusCode::NO_CONTENT, "").unwrap(), Value::Null);
    }

    #[test]
    fn parse_payload_uses_server_message() {
        let err = parse_payload(StatusCode::BAD_REQUEST, r#"{"message":"texto muito curto"}"#)
            .unwrap_err();
        match err {
            RequestError::Application { message, status } => {
                assert_eq!(message, "texto muito curto");
                assert_eq!(status, StatusCode::BAD_REQUEST);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn parse_payload_generic_message_without_server_message() {
        let err = parse_payload(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Erro 500");

        let err = parse_payload(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "Erro 502");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn parse_payload_rejects_malformed_success_body() {
        let err = parse_payload(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, RequestError::Application { status, .. } if status == StatusCode::OK));
    }

    #[test]
    fn request_options_builder() {
        let options = RequestOptions::post().body(json!({ "a": 1 })).require_auth(true);
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body, Some(json!({ "a": 1 })));
        assert!(options.require_auth);

        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.body.is_none());
        assert!(!options.require_auth);
    }
}
