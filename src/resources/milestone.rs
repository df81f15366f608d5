use anyhow::Result;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::query::segment;
use crate::http::SendRequest;
use crate::payload::TransactionAction;

/// Actions on individual line items (milestones) of a transaction.
#[derive(Clone)]
pub struct MilestoneApi {
    transport: Arc<dyn SendRequest>,
}

impl MilestoneApi {
    pub fn new(transport: Arc<dyn SendRequest>) -> Self {
        Self { transport }
    }

    #[tracing::instrument(skip(self, action))]
    pub async fn apply(&self, transaction_id: &str, item_id: &str, action: Value) -> Result<Value> {
        let path = format!(
            "/transaction/{}/item/{}",
            segment(transaction_id),
            segment(item_id)
        );
        self.transport
            .send(Method::PATCH, &path, Some(action))
            .await
    }

    pub async fn apply_action(
        &self,
        transaction_id: &str,
        item_id: &str,
        action: &TransactionAction,
    ) -> Result<Value> {
        self.apply(transaction_id, item_id, action.to_value()?)
            .await
    }

    /// Link to the web page where a party performs `action` on the item.
    #[tracing::instrument(skip(self))]
    pub async fn web_link(&self, transaction_id: &str, item_id: &str, action: &str) -> Result<Value> {
        let path = format!(
            "/transaction/{}/item/{}/web_link/{}",
            segment(transaction_id),
            segment(item_id),
            segment(action)
        );
        self.transport.send(Method::GET, &path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::expect_call;
    use serde_json::json;

    #[tokio::test]
    async fn test_apply() {
        let transport = expect_call(
            Method::PATCH,
            "/transaction/12/item/34",
            Some(json!({"action": "accept"})),
            json!({"id": 34}),
        );
        let api = MilestoneApi::new(transport);
        api.apply("12", "34", json!({"action": "accept"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_apply_ship_action() {
        let transport = expect_call(
            Method::PATCH,
            "/transaction/12/item/34",
            Some(json!({
                "action": "ship",
                "shipping_information": {
                    "tracking_information": {"carrier": "FedEx", "tracking_id": "7788"}
                }
            })),
            json!({}),
        );
        let api = MilestoneApi::new(transport);
        api.apply_action("12", "34", &TransactionAction::ship("FedEx", "7788"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_web_link() {
        let transport = expect_call(
            Method::GET,
            "/transaction/12/item/34/web_link/receive",
            None,
            json!({"web_link": "https://www.escrow-sandbox.com/..."}),
        );
        let api = MilestoneApi::new(transport);
        let link = api.web_link("12", "34", "receive").await.unwrap();
        assert!(link["web_link"].is_string());
    }

    #[tokio::test]
    async fn test_item_path_escapes_ids() {
        let transport = expect_call(
            Method::GET,
            "/transaction/12/item/a%2F..%2Fb/web_link/receive",
            None,
            json!({}),
        );
        let api = MilestoneApi::new(transport);
        api.web_link("12", "a/../b", "receive").await.unwrap();
    }
}
