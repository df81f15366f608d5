//! Derived transaction status.
//!
//! The API reports lifecycle progress as scattered flags on parties, items
//! and schedules. [`classify`] folds them into a single status by walking
//! [`RULES`] in order; the first rule that matches wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Cancelled,
    Draft,
    PendingAgreement,
    PendingPayment,
    PendingShipment,
    PendingAcceptance,
    Completed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Draft => "draft",
            TransactionStatus::PendingAgreement => "pending_agreement",
            TransactionStatus::PendingPayment => "pending_payment",
            TransactionStatus::PendingShipment => "pending_shipment",
            TransactionStatus::PendingAcceptance => "pending_acceptance",
            TransactionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields of a transaction record the classifier reads. Anything
/// missing counts as false or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransactionSnapshot {
    pub is_cancelled: bool,
    pub is_draft: bool,
    pub parties: Vec<PartySnapshot>,
    pub items: Vec<ItemSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartySnapshot {
    pub agreed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemSnapshot {
    pub status: ItemStatus,
    pub schedule: Vec<ScheduleSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemStatus {
    pub shipped: bool,
    pub accepted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleSnapshot {
    pub status: ScheduleStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleStatus {
    pub secured: bool,
}

impl TransactionSnapshot {
    pub fn all_parties_agreed(&self) -> bool {
        self.parties.iter().all(|party| party.agreed)
    }

    pub fn any_schedule_secured(&self) -> bool {
        self.items
            .iter()
            .flat_map(|item| &item.schedule)
            .any(|entry| entry.status.secured)
    }

    pub fn any_item_shipped(&self) -> bool {
        self.items.iter().any(|item| item.status.shipped)
    }

    pub fn any_item_accepted(&self) -> bool {
        self.items.iter().any(|item| item.status.accepted)
    }
}

/// A status and the condition under which it applies.
pub struct Rule {
    pub status: TransactionStatus,
    pub applies: fn(&TransactionSnapshot) -> bool,
}

/// Classification rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        status: TransactionStatus::Cancelled,
        applies: |t| t.is_cancelled,
    },
    Rule {
        status: TransactionStatus::Draft,
        applies: |t| t.is_draft,
    },
    Rule {
        status: TransactionStatus::PendingAgreement,
        applies: |t| !t.all_parties_agreed(),
    },
    Rule {
        status: TransactionStatus::PendingPayment,
        applies: |t| !t.any_schedule_secured(),
    },
    Rule {
        status: TransactionStatus::PendingShipment,
        applies: |t| !t.any_item_shipped(),
    },
    Rule {
        status: TransactionStatus::PendingAcceptance,
        applies: |t| !t.any_item_accepted(),
    },
];

pub fn classify(transaction: &TransactionSnapshot) -> TransactionStatus {
    RULES
        .iter()
        .find(|rule| (rule.applies)(transaction))
        .map_or(TransactionStatus::Completed, |rule| rule.status)
}

/// Classifies a decoded transaction record as returned by the API.
pub fn classify_value(transaction: &Value) -> Result<TransactionStatus> {
    let snapshot = TransactionSnapshot::deserialize(transaction)
        .context("Response does not look like a transaction record")?;
    Ok(classify(&snapshot))
}
