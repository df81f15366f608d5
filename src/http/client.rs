//! Authenticated JSON transport shared by every resource facade.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{
    Client, Method, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::{Value, json};

use super::error::ApiError;
use crate::config::{API_VERSION, Config};

const USER_AGENT: &str = concat!("escrow-client/", env!("CARGO_PKG_VERSION"));

/// Sends one request against the versioned API and normalizes the outcome.
///
/// `path` is relative to the version segment and already carries any query
/// string. `body` is only sent for verbs that take a payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SendRequest: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;
}

/// reqwest-backed implementation of [`SendRequest`].
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    host: String,
}

impl HttpClient {
    /// Builds a client whose every request carries Basic auth and JSON
    /// content negotiation headers.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&config.credentials.basic_auth())
            .context("Credentials cannot be encoded in an Authorization header")?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        debug!(
            "Authenticating as {} with API key {} against {} ({})",
            config.credentials.email(),
            config.credentials.masked_key(),
            config.host(),
            config.environment
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::from_client(client, config.host()))
    }

    /// Wraps an already configured reqwest Client.
    pub fn from_client(client: Client, host: &str) -> Self {
        Self {
            client,
            host: host.trim_end_matches('/').to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Absolute URL for a relative endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}{}", self.host, API_VERSION, path)
    }
}

#[async_trait]
impl SendRequest for HttpClient {
    #[tracing::instrument(skip(self, body))]
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);

        if let Some(body) = body {
            if accepts_body(&method) {
                request = request.json(&body);
            } else {
                debug!("Ignoring request body for {} {}", method, url);
            }
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", method, url))?;

        info!("{} {} -> {}", method, url, response.status().as_u16());

        decode_response(response).await
    }
}

fn accepts_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

async fn decode_response(response: Response) -> Result<Value> {
    let status = response.status();

    if !status.is_success() {
        // An unreadable error body still yields an ApiError with the status.
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, body).into());
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_json_media_type);

    let text = response
        .text()
        .await
        .context("Failed to read response body from Escrow API")?;

    // Action acks may be a bare 2xx with a JSON content type and no body.
    if is_json && !text.trim().is_empty() {
        serde_json::from_str(&text).context("Failed to parse JSON response from Escrow API")
    } else {
        Ok(json!({ "data": text }))
    }
}

/// `application/json` or any `+json` structured suffix, ignoring case and
/// parameters such as `charset`.
fn is_json_media_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
