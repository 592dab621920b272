//! HTTP client for the storefront backend.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod storefront;

pub use storefront::StorefrontClient;

use reqwest::StatusCode;

/// Errors produced by the SDK HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Human-readable message from the backend error body, when it carries
    /// one. Customers see this in preference to a generic failure line.
    pub fn backend_message(&self) -> Option<String> {
        match self {
            ClientError::Api { body, .. } => {
                let value: serde_json::Value = serde_json::from_str(body).ok()?;
                value.get("message")?.as_str().map(str::to_owned)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_extraction() {
        let json_body = ClientError::Api {
            status: StatusCode::CONFLICT,
            body: r#"{"message":"slot already booked"}"#.to_string(),
        };
        let html_body = ClientError::Api {
            status: StatusCode::BAD_GATEWAY,
            body: "<html>bad gateway</html>".to_string(),
        };

        assert_eq!(
            json_body.backend_message().as_deref(),
            Some("slot already booked")
        );
        assert_eq!(html_body.backend_message(), None);
    }
}
