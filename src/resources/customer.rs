use anyhow::Result;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;

use super::query::segment;
use crate::http::SendRequest;

/// Customer profile, API keys, disbursement methods and webhooks.
#[derive(Clone)]
pub struct CustomerApi {
    transport: Arc<dyn SendRequest>,
}

impl CustomerApi {
    pub fn new(transport: Arc<dyn SendRequest>) -> Self {
        Self { transport }
    }

    /// The authenticated customer.
    #[tracing::instrument(skip(self))]
    pub async fn me(&self) -> Result<Value> {
        self.transport.send(Method::GET, "/customer/me", None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, customer_id: &str) -> Result<Value> {
        let path = format!("/customer/{}", segment(customer_id));
        self.transport.send(Method::GET, &path, None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn api_keys(&self) -> Result<Value> {
        self.transport
            .send(Method::GET, "/customer/me/api_key", None)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_api_key(&self, name: &str) -> Result<Value> {
        self.transport
            .send(
                Method::POST,
                "/customer/me/api_key",
                Some(json!({ "name": name })),
            )
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn disbursement_methods(&self) -> Result<Value> {
        self.transport
            .send(Method::GET, "/customer/me/disbursement_methods", None)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn webhooks(&self) -> Result<Value> {
        self.transport
            .send(Method::GET, "/customer/me/webhook", None)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_webhook(&self, url: &str) -> Result<Value> {
        self.transport
            .send(
                Method::POST,
                "/customer/me/webhook",
                Some(json!({ "url": url })),
            )
            .await
    }
}
