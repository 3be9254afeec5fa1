//! Request execution and response classification.
//!
//! Only `200 OK` counts as success. Any other status becomes
//! [`ClientError::ApiError`] carrying the human-readable message extracted from
//! the body, or the status reason phrase when the body has none.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Maximum length for error response bodies in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Send a request and map any non-200 status to [`ClientError::ApiError`].
pub(crate) async fn send_request(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    let status = response.status();

    if status == StatusCode::OK {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), url = %url, "Request failed");

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message: error_message(status, &body),
    })
}

/// Deserialize a successful response body, mapping decode failures to
/// [`ClientError::ShapeMismatch`].
pub(crate) async fn parse_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &'static str,
) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::ShapeMismatch {
        endpoint,
        message: e.to_string(),
    })
}

/// Extract a human-readable message from an error body.
///
/// Looks at `message`, then `error`, then `errors[0].message`. Falls back to
/// the canonical reason phrase for `status`.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value["message"]
                .as_str()
                .or_else(|| value["error"].as_str())
                .or_else(|| value["errors"][0]["message"].as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty());

    match from_body {
        Some(message) => truncate(&message),
        None => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string()),
    }
}

fn truncate(message: &str) -> String {
    if message.len() <= MAX_ERROR_BODY_LENGTH {
        return message.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &message[..end])
}
