//! Manual smoke test against a live (usually sandbox) account.
//!
//! Runs a fixed sequence of read-only calls and, when buyer and seller
//! emails are supplied, creates a transaction, inspects it and cancels it
//! again. Failures are printed and counted, never propagated.

use anyhow::Result;
use log::{info, warn};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::escrow::{EscrowClient, transaction_id};
use crate::payload::BasicTransaction;
use crate::resources::ListParams;

const PREVIEW_CHARS: usize = 120;

pub const PROBE_ITEM_TITLE: &str = "escrow-client probe item";

pub const PROBE_CANCEL_REASON: &str = "Automated probe cleanup";

#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    pub buyer: Option<String>,
    pub seller: Option<String>,
}

impl ProbeOptions {
    /// Both parties, when the probe may create a transaction.
    fn parties(&self) -> Option<(&str, &str)> {
        match (self.buyer.as_deref(), self.seller.as_deref()) {
            (Some(buyer), Some(seller)) if !buyer.is_empty() && !seller.is_empty() => {
                Some((buyer, seller))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub passed: usize,
    pub failed: usize,
    /// Id of the transaction the probe created, if any.
    pub created_transaction: Option<String>,
    pub cancelled: bool,
}

impl ProbeReport {
    fn record(&mut self, name: &str, outcome: Result<Value>) -> Option<Value> {
        match outcome {
            Ok(value) => {
                self.passed += 1;
                println!("  [ok]     {}: {}", name, preview(&value));
                Some(value)
            }
            Err(e) => {
                self.failed += 1;
                warn!("Probe '{}' failed: {:#}", name, e);
                println!("  [failed] {}: {}", name, e);
                None
            }
        }
    }
}

#[tracing::instrument(skip(client))]
pub async fn run(client: &EscrowClient, options: &ProbeOptions) -> ProbeReport {
    let mut report = ProbeReport::default();
    let defaults = ListParams::default();

    println!("Read-only probes:");
    report.record("customer me", client.customer.me().await);
    report.record("transaction list", client.transaction.list(&defaults).await);
    report.record(
        "partner transactions",
        client.partner.transactions(&defaults).await,
    );
    report.record("partner customers", client.partner.customers(&defaults).await);

    match options.parties() {
        Some((buyer, seller)) => run_write_probes(client, buyer, seller, &mut report).await,
        None => println!(
            "Skipping write probes: set ESCROW_TEST_BUYER_EMAIL and ESCROW_TEST_SELLER_EMAIL to enable."
        ),
    }

    println!("{} passed, {} failed", report.passed, report.failed);
    info!(
        "Probe finished: {} passed, {} failed",
        report.passed, report.failed
    );
    report
}

async fn run_write_probes(
    client: &EscrowClient,
    buyer: &str,
    seller: &str,
    report: &mut ProbeReport,
) {
    println!("Write probes:");
    let request = BasicTransaction::new(buyer, seller, PROBE_ITEM_TITLE, Decimal::new(10000, 2))
        .description("Created by escrow-client probe; cancelled automatically");

    let Some(created) = report.record(
        "create transaction",
        client.create_basic_transaction(&request).await,
    ) else {
        return;
    };

    let Some(id) = transaction_id(&created) else {
        report.failed += 1;
        println!("  [failed] create transaction: response has no id");
        return;
    };
    report.created_transaction = Some(id.clone());

    report.record("get transaction", client.transaction.get(&id).await);

    match client.status(&id).await {
        Ok(status) => {
            report.passed += 1;
            println!("  [ok]     transaction status: {}", status);
        }
        Err(e) => {
            report.failed += 1;
            println!("  [failed] transaction status: {}", e);
        }
    }

    report.record("payment methods", client.payment.methods(&id).await);

    println!("Cleanup:");
    if report
        .record(
            "cancel transaction",
            client.cancel(&id, PROBE_CANCEL_REASON).await,
        )
        .is_some()
    {
        report.cancelled = true;
    }
}

/// Single-line, length-capped rendering of a response.
fn preview(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= PREVIEW_CHARS {
        return text;
    }
    let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
