//! HTTP layer: status mapping and body decoding for the SKI-PEM endpoint.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes. Requests are sent once; there is no retry loop.

use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::table::TrustAnchorTable;

/// HTTP backend for making requests.
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// GET `url` and decode the `{ "data": { ski: pem } }` body.
    pub(crate) async fn fetch_ski_pem(&self, url: &str) -> Result<TrustAnchorTable, FetchError> {
        let body = self.get_text(url).await?;
        parse_ski_pem_body(&body)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "SKI-PEM response");

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            message: format!("failed to read response body: {}", e),
        })
    }
}

/// Decode an SKI-PEM response body.
pub(crate) fn parse_ski_pem_body(body: &str) -> Result<TrustAnchorTable, FetchError> {
    let json: Value = serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse {
        reason: format!("body is not valid JSON: {}", e),
    })?;

    let data = match json.get("data") {
        Some(Value::Object(data)) => data,
        Some(other) => {
            return Err(FetchError::MalformedResponse {
                reason: format!("`data` must be an object, got {}", json_kind(other)),
            })
        }
        None => {
            return Err(FetchError::MalformedResponse {
                reason: format!("missing `data` field in {}", json_kind(&json)),
            })
        }
    };

    TrustAnchorTable::from_data_object(data)
        .map_err(|reason| FetchError::MalformedResponse { reason })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
