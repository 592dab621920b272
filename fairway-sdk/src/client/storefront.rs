//! Storefront API client (booking frontend → facility backend).

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::ClientError;
use crate::objects::checkout::{CheckoutPayload, CheckoutSessionResponse};

/// Typed HTTP client for the storefront backend.
///
/// Endpoints used by the checkout and reconciliation flows:
///
/// - `POST /stripe/create-checkout` – open a hosted payment session.
/// - `GET /stripe/by-session/{id}` – look up what a checkout session
///   settled into.
/// - `GET /bookings/me` – the caller's booking history.
///
/// The lookup endpoints return raw JSON ([`Value`]): their envelope shape
/// drifts between backend builds, and normalization belongs to the
/// consumer, not the transport.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl StorefrontClient {
    /// Create a client against the backend root URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Attach a bearer token to every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// `POST /stripe/create-checkout` – open a hosted payment session for
    /// a finished draft.
    pub async fn create_checkout(
        &self,
        payload: &CheckoutPayload,
    ) -> Result<CheckoutSessionResponse, ClientError> {
        let url = self.base_url.join("/stripe/create-checkout")?;

        let resp = self
            .authorize(self.http.post(url))
            .json(payload)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /stripe/by-session/{session_id}` – the booking (or bookings)
    /// a settled checkout session produced.
    pub async fn booking_by_session(&self, session_id: &str) -> Result<Value, ClientError> {
        let url = self.base_url.join(&format!(
            "/stripe/by-session/{}",
            urlencoding::encode(session_id)
        ))?;

        let resp = self.authorize(self.http.get(url)).send().await?;

        parse_loose(resp).await
    }

    /// `GET /bookings/me` – every booking belonging to the caller.
    pub async fn my_bookings(&self) -> Result<Value, ClientError> {
        let url = self.base_url.join("/bookings/me")?;

        let resp = self.authorize(self.http.get(url)).send().await?;

        parse_loose(resp).await
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

/// Like [`parse_response`], but for endpoints whose body shape drifts: a
/// successful status with a non-JSON body degrades to `Value::Null` so the
/// caller's envelope normalization can treat it as empty.
async fn parse_loose(resp: reqwest::Response) -> Result<Value, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes).unwrap_or_else(|error| {
        debug!(%error, "response body was not json");
        Value::Null
    }))
}
