use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::query::{ListParams, segment};
use crate::http::SendRequest;

/// Transaction listing, lookup, creation and generic actions.
#[derive(Clone)]
pub struct TransactionApi {
    transport: Arc<dyn SendRequest>,
}

impl TransactionApi {
    pub fn new(transport: Arc<dyn SendRequest>) -> Self {
        Self { transport }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, params: &ListParams) -> Result<Value> {
        let path = format!("/transaction?{}", params.to_query("per_page"));
        self.transport.send(Method::GET, &path, None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, transaction_id: &str) -> Result<Value> {
        let path = format!("/transaction/{}", segment(transaction_id));
        self.transport.send(Method::GET, &path, None).await
    }

    /// Looks a transaction up by the caller-supplied reference.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_reference(&self, reference: &str) -> Result<Value> {
        let path = format!("/transaction/reference/{}", segment(reference));
        self.transport.send(Method::GET, &path, None).await
    }

    #[tracing::instrument(skip(self, payload))]
    pub async fn create(&self, payload: Value) -> Result<Value> {
        self.transport
            .send(Method::POST, "/transaction", Some(payload))
            .await
    }

    /// Applies an action payload (`{"action": ...}`) to a transaction.
    #[tracing::instrument(skip(self, action))]
    pub async fn patch(&self, transaction_id: &str, action: Value) -> Result<Value> {
        let path = format!("/transaction/{}", segment(transaction_id));
        self.transport
            .send(Method::PATCH, &path, Some(action))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn timeline(&self, transaction_id: &str) -> Result<Value> {
        let path = format!("/transaction/{}/timeline-entries", segment(transaction_id));
        self.transport.send(Method::GET, &path, None).await
    }
}
