//! Client for the Escrow.com REST API (version `2017-09-01`).
//!
//! [`EscrowClient`] bundles one facade per resource family over a shared,
//! Basic-authenticated JSON transport. Responses are returned as
//! `serde_json::Value`; non-2xx responses surface as [`ApiError`] inside
//! `anyhow::Error`.

pub mod config;
pub mod escrow;
pub mod http;
pub mod payload;
pub mod probe;
pub mod resources;
pub mod status;

pub use config::{Config, Credentials, Environment};
pub use escrow::EscrowClient;
pub use http::{ApiError, HttpClient, SendRequest};
pub use status::TransactionStatus;

/// Test utilities for building mock transports.
#[cfg(test)]
pub mod test_utils {
    use crate::http::{MockSendRequest, SendRequest};
    use reqwest::Method;
    use serde_json::Value;
    use std::sync::Arc;

    /// A transport that expects exactly one call with the given method,
    /// path and body, and answers it with `response`.
    pub fn expect_call(
        method: Method,
        path: &str,
        body: Option<Value>,
        response: Value,
    ) -> Arc<dyn SendRequest> {
        let mut transport = MockSendRequest::new();
        let path = path.to_string();

        transport
            .expect_send()
            .withf(move |m, p, b| *m == method && p == path.as_str() && *b == body)
            .times(1)
            .returning(move |_, _, _| Ok(response.clone()));

        Arc::new(transport)
    }
}
