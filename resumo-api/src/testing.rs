use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use serde_json::Value;

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportFailure};

/// Scripted transport for tests (no network)
///
/// Responses are handed out in the order they were pushed, and every request
/// that reaches the transport is recorded. Clones share the same script and
/// log, so a test can keep one handle while the client owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw body
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.push(Ok(HttpResponse {
            status,
            body: Ok(body.to_string()),
        }))
    }

    /// Queue a response whose headers arrive but whose body cannot be read
    pub fn respond_unreadable(&self, status: u16, message: &str) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.push(Ok(HttpResponse {
            status,
            body: Err(TransportFailure {
                message: message.to_string(),
                unreachable: false,
            }),
        }))
    }

    /// Queue a response with a JSON body
    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, &body.to_string())
    }

    /// Queue a failure that happens before any response
    pub fn fail(&self, message: &str, unreachable: bool) -> &Self {
        self.push(Err(TransportFailure {
            message: message.to_string(),
            unreachable,
        }))
    }

    /// All requests sent so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Body of the last request, parsed as JSON
    pub fn last_body(&self) -> Option<Value> {
        self.last_request()
            .and_then(|request| request.body)
            .map(|body| serde_json::from_str(&body).expect("request body is JSON"))
    }

    fn push(&self, response: Result<HttpResponse, TransportFailure>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportFailure {
                    message: "no scripted response left".to_string(),
                    unreachable: false,
                })
            })
    }
}
