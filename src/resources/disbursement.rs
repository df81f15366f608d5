use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::query::segment;
use crate::http::SendRequest;

/// Disbursement method of the authenticated party on one transaction.
#[derive(Clone)]
pub struct DisbursementApi {
    transport: Arc<dyn SendRequest>,
}

impl DisbursementApi {
    pub fn new(transport: Arc<dyn SendRequest>) -> Self {
        Self { transport }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, transaction_id: &str) -> Result<Value> {
        let path = format!("/transaction/{}/disbursement_methods", segment(transaction_id));
        self.transport.send(Method::GET, &path, None).await
    }

    #[tracing::instrument(skip(self, method))]
    pub async fn set(&self, transaction_id: &str, method: Value) -> Result<Value> {
        let path = format!("/transaction/{}/disbursement_methods", segment(transaction_id));
        self.transport
            .send(Method::PATCH, &path, Some(method))
            .await
    }
}
