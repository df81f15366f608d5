//! Request bodies the client builds itself.
//!
//! Responses stay opaque `serde_json::Value`s; only the payloads assembled
//! by helpers get types here.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Inspection period applied to every item of a basic transaction: 3 days.
pub const DEFAULT_INSPECTION_PERIOD_SECS: u64 = 259_200;

pub const DEFAULT_CURRENCY: &str = "usd";

pub const DEFAULT_ITEM_TYPE: &str = "general_merchandise";

/// Fee type split between buyer and seller.
pub const ESCROW_FEE_TYPE: &str = "escrow";

const HALF_SPLIT: &str = "0.5";

/// Lifecycle action sent to `PATCH /transaction/{id}` (or to an item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TransactionAction {
    Agree,
    Ship {
        shipping_information: ShippingInformation,
    },
    Accept,
    Reject {
        reject_information: RejectInformation,
    },
    Cancel {
        cancel_information: CancelInformation,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingInformation {
    pub tracking_information: TrackingInformation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingInformation {
    pub carrier: String,
    pub tracking_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectInformation {
    pub rejection_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelInformation {
    pub cancellation_reason: String,
}

impl TransactionAction {
    pub fn ship(carrier: impl Into<String>, tracking_id: impl Into<String>) -> Self {
        TransactionAction::Ship {
            shipping_information: ShippingInformation {
                tracking_information: TrackingInformation {
                    carrier: carrier.into(),
                    tracking_id: tracking_id.into(),
                },
            },
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        TransactionAction::Reject {
            reject_information: RejectInformation {
                rejection_reason: reason.into(),
            },
        }
    }

    pub fn cancel(reason: impl Into<String>) -> Self {
        TransactionAction::Cancel {
            cancel_information: CancelInformation {
                cancellation_reason: reason.into(),
            },
        }
    }

    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionAction::Agree => "agree",
            TransactionAction::Ship { .. } => "ship",
            TransactionAction::Accept => "accept",
            TransactionAction::Reject { .. } => "reject",
            TransactionAction::Cancel { .. } => "cancel",
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .with_context(|| format!("Failed to encode '{}' action", self.name()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    Buyer,
    Seller,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub role: PartyRole,
    pub customer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub amount: String,
    pub payer_customer: String,
    pub beneficiary_customer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fee {
    #[serde(rename = "type")]
    pub fee_type: String,
    pub split: String,
    pub payer_customer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub inspection_period: u64,
    pub quantity: u32,
    pub schedule: Vec<ScheduleEntry>,
    pub fees: Vec<Fee>,
}

/// Body of `POST /transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    pub parties: Vec<Party>,
    pub currency: String,
    pub description: String,
    pub items: Vec<Item>,
}

impl NewTransaction {
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).context("Failed to encode transaction payload")
    }
}

/// Inputs for a two-party, single-item transaction with the escrow fee split
/// evenly between buyer and seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicTransaction {
    pub buyer: String,
    pub seller: String,
    pub title: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
}

impl BasicTransaction {
    /// Description defaults to the title and currency to `usd`.
    pub fn new(
        buyer: impl Into<String>,
        seller: impl Into<String>,
        title: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        let title = title.into();
        Self {
            buyer: buyer.into(),
            seller: seller.into(),
            description: title.clone(),
            title,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn to_payload(&self) -> NewTransaction {
        let fee = |payer: &str| Fee {
            fee_type: ESCROW_FEE_TYPE.to_string(),
            split: HALF_SPLIT.to_string(),
            payer_customer: payer.to_string(),
        };

        NewTransaction {
            parties: vec![
                Party {
                    role: PartyRole::Buyer,
                    customer: self.buyer.clone(),
                },
                Party {
                    role: PartyRole::Seller,
                    customer: self.seller.clone(),
                },
            ],
            currency: self.currency.clone(),
            description: self.description.clone(),
            items: vec![Item {
                title: self.title.clone(),
                description: self.description.clone(),
                item_type: DEFAULT_ITEM_TYPE.to_string(),
                inspection_period: DEFAULT_INSPECTION_PERIOD_SECS,
                quantity: 1,
                schedule: vec![ScheduleEntry {
                    amount: format!("{:.2}", self.amount),
                    payer_customer: self.buyer.clone(),
                    beneficiary_customer: self.seller.clone(),
                }],
                fees: vec![fee(&self.buyer), fee(&self.seller)],
            }],
        }
    }
}

/// Body of `POST /partner/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl ReportRequest {
    pub fn new(report_type: impl Into<String>) -> Self {
        Self {
            report_type: report_type.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// Restricts the report to `start..=end` (ISO 8601 dates).
    #[must_use]
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }
}
