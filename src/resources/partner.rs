use anyhow::{Context, Result};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::query::{ListParams, segment, with_query};
use crate::http::SendRequest;
use crate::payload::ReportRequest;

/// Partner-level listings and reports. Page size is sent as `limit`.
#[derive(Clone)]
pub struct PartnerApi {
    transport: Arc<dyn SendRequest>,
}

impl PartnerApi {
    pub fn new(transport: Arc<dyn SendRequest>) -> Self {
        Self { transport }
    }

    #[tracing::instrument(skip(self))]
    pub async fn transactions(&self, params: &ListParams) -> Result<Value> {
        let path = format!("/partner/transactions?{}", params.to_query("limit"));
        self.transport.send(Method::GET, &path, None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn customers(&self, params: &ListParams) -> Result<Value> {
        let path = format!("/partner/customers?{}", params.to_query("limit"));
        self.transport.send(Method::GET, &path, None).await
    }

    /// Starts report generation. The report is built asynchronously; poll
    /// [`PartnerApi::reports`] for its status.
    #[tracing::instrument(skip(self))]
    pub async fn generate_report(&self, request: &ReportRequest) -> Result<Value> {
        let body = serde_json::to_value(request).context("Failed to encode report request")?;
        self.transport
            .send(Method::POST, "/partner/reports", Some(body))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn reports(&self, params: &ListParams) -> Result<Value> {
        let path = format!("/partner/reports?{}", params.to_query("limit"));
        self.transport.send(Method::GET, &path, None).await
    }

    /// Downloads a generated report. Without `as_json` the server sends the
    /// raw file, which comes back as `{"data": "<contents>"}`.
    #[tracing::instrument(skip(self))]
    pub async fn download_report(&self, report_id: &str, as_json: bool) -> Result<Value> {
        let base = format!("/partner/reports/{}/download", segment(report_id));
        let path = if as_json {
            with_query(&base, &[("format", "json")])
        } else {
            base
        };
        self.transport.send(Method::GET, &path, None).await
    }
}
