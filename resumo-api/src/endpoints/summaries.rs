use serde::{Deserialize, Serialize};
use serde_json::Value;

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest {
    pub texto: String,
}

impl SummarizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { texto: text.into() }
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Summary {
    pub resumo: String,
}

impl Summary {
    /// Reads the summary out of a raw `/resumo` payload.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(payload)
    }
}
