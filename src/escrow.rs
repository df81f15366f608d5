//! One client composed of every resource facade, plus multi-step helpers.

use anyhow::Result;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::http::{HttpClient, SendRequest};
use crate::payload::{BasicTransaction, TransactionAction};
use crate::resources::{
    CustomerApi, DisbursementApi, MilestoneApi, PartnerApi, PaymentApi, TransactionApi,
};
use crate::status::{TransactionStatus, classify_value};

/// All facades over one shared transport.
#[derive(Clone)]
pub struct EscrowClient {
    pub customer: CustomerApi,
    pub transaction: TransactionApi,
    pub payment: PaymentApi,
    pub disbursement: DisbursementApi,
    pub milestone: MilestoneApi,
    pub partner: PartnerApi,
}

impl EscrowClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = HttpClient::new(config)?;
        Ok(Self::with_transport(Arc::new(http_client)))
    }

    pub fn with_transport(transport: Arc<dyn SendRequest>) -> Self {
        Self {
            customer: CustomerApi::new(Arc::clone(&transport)),
            transaction: TransactionApi::new(Arc::clone(&transport)),
            payment: PaymentApi::new(Arc::clone(&transport)),
            disbursement: DisbursementApi::new(Arc::clone(&transport)),
            milestone: MilestoneApi::new(Arc::clone(&transport)),
            partner: PartnerApi::new(transport),
        }
    }

    /// Creates a two-party, single-item transaction with the escrow fee
    /// split evenly.
    #[tracing::instrument(skip(self))]
    pub async fn create_basic_transaction(&self, request: &BasicTransaction) -> Result<Value> {
        let payload = request.to_payload().to_value()?;
        debug!(
            "Creating transaction '{}' between {} and {}",
            request.title, request.buyer, request.seller
        );
        self.transaction.create(payload).await
    }

    pub async fn apply_action(&self, transaction_id: &str, action: &TransactionAction) -> Result<Value> {
        debug!("Applying '{}' to transaction {}", action.name(), transaction_id);
        self.transaction
            .patch(transaction_id, action.to_value()?)
            .await
    }

    pub async fn agree(&self, transaction_id: &str) -> Result<Value> {
        self.apply_action(transaction_id, &TransactionAction::Agree)
            .await
    }

    pub async fn ship(&self, transaction_id: &str, carrier: &str, tracking_id: &str) -> Result<Value> {
        self.apply_action(transaction_id, &TransactionAction::ship(carrier, tracking_id))
            .await
    }

    pub async fn accept(&self, transaction_id: &str) -> Result<Value> {
        self.apply_action(transaction_id, &TransactionAction::Accept)
            .await
    }

    pub async fn reject(&self, transaction_id: &str, reason: &str) -> Result<Value> {
        self.apply_action(transaction_id, &TransactionAction::reject(reason))
            .await
    }

    pub async fn cancel(&self, transaction_id: &str, reason: &str) -> Result<Value> {
        self.apply_action(transaction_id, &TransactionAction::cancel(reason))
            .await
    }

    /// Fetches a transaction and derives its status.
    #[tracing::instrument(skip(self))]
    pub async fn status(&self, transaction_id: &str) -> Result<TransactionStatus> {
        let transaction = self.transaction.get(transaction_id).await?;
        classify_value(&transaction)
    }
}

/// Extracts the transaction id from a create/get response. The API returns
/// it as a number; strings are accepted too.
pub fn transaction_id(transaction: &Value) -> Option<String> {
    match transaction.get("id")? {
        Value::Number(id) => Some(id.to_string()),
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        _ => None,
    }
}
