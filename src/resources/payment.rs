use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::query::{segment, with_query};
use crate::http::SendRequest;

/// Payment method discovery and selection for a transaction.
#[derive(Clone)]
pub struct PaymentApi {
    transport: Arc<dyn SendRequest>,
}

impl PaymentApi {
    pub fn new(transport: Arc<dyn SendRequest>) -> Self {
        Self { transport }
    }

    /// Payment methods available to the buyer of a transaction.
    #[tracing::instrument(skip(self))]
    pub async fn methods(&self, transaction_id: &str) -> Result<Value> {
        let path = format!("/transaction/{}/payment_methods", segment(transaction_id));
        self.transport.send(Method::GET, &path, None).await
    }

    /// Selects a payment method, e.g. `wire_transfer` or `credit_card`.
    #[tracing::instrument(skip(self))]
    pub async fn select(&self, transaction_id: &str, method: &str) -> Result<Value> {
        let path = format!(
            "/transaction/{}/payment_methods/{}",
            segment(transaction_id),
            segment(method)
        );
        self.transport.send(Method::POST, &path, None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn wire_details(&self, transaction_id: &str) -> Result<Value> {
        let path = format!(
            "/transaction/{}/payment_methods/wire_transfer",
            segment(transaction_id)
        );
        self.transport.send(Method::GET, &path, None).await
    }

    /// Fetches the PayPal checkout link, optionally returning the buyer to
    /// `return_url` afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn paypal_redirect(
        &self,
        transaction_id: &str,
        return_url: Option<&str>,
    ) -> Result<Value> {
        let base = format!(
            "/transaction/{}/payment_methods/paypal",
            segment(transaction_id)
        );
        let path = match return_url {
            Some(url) => with_query(&base, &[("return_url", url)]),
            None => base,
        };
        self.transport.send(Method::GET, &path, None).await
    }
}
