use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;

const ENV_VARS: &[&str] = &[
    "ESCROW_EMAIL",
    "ESCROW_API_KEY",
    "ESCROW_SANDBOX",
    "ESCROW_API_URL",
    "ESCROW_TEST_BUYER_EMAIL",
    "ESCROW_TEST_SELLER_EMAIL",
];

/// Command with a clean ESCROW_* environment.
fn escrow_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("escrow-client"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Command authenticated against the given mock server.
fn escrow_cmd_at(url: &str) -> Command {
    let mut cmd = escrow_cmd();
    cmd.env("ESCROW_EMAIL", "probe@example.com")
        .env("ESCROW_API_KEY", "probe-key")
        .env("ESCROW_API_URL", url);
    cmd
}

fn mock_json(server: &mut Server, method: &str, path: &str, status: usize, body: &str) -> mockito::Mock {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
}

#[test]
fn test_missing_credentials_fails() {
    let mut cmd = escrow_cmd();
    cmd.arg("probe");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ESCROW_EMAIL"));
}

#[test]
fn test_missing_api_key_fails() {
    let mut cmd = escrow_cmd();
    cmd.env("ESCROW_EMAIL", "probe@example.com").arg("probe");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ESCROW_API_KEY"));
}

#[test]
fn test_probe_read_only() {
    let mut server = Server::new();
    let url = server.url();

    // base64("probe@example.com:probe-key")
    let me = server
        .mock("GET", "/2017-09-01/customer/me")
        .match_header(
            "authorization",
            "Basic cHJvYmVAZXhhbXBsZS5jb206cHJvYmUta2V5",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "email": "probe@example.com"}"#)
        .create();
    let transactions = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/transaction?page=1&per_page=10&sort_by=id&sort_direction=desc",
        200,
        "[]",
    )
    .create();
    let partner_transactions = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/partner/transactions?page=1&limit=10&sort_by=id&sort_direction=desc",
        200,
        r#"{"transactions": []}"#,
    )
    .create();
    let partner_customers = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/partner/customers?page=1&limit=10&sort_by=id&sort_direction=desc",
        200,
        r#"{"customers": []}"#,
    )
    .create();

    let mut cmd = escrow_cmd_at(&url);
    cmd.arg("probe");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Skipping write probes"))
        .stdout(predicate::str::contains("4 passed, 0 failed"));

    me.assert();
    transactions.assert();
    partner_transactions.assert();
    partner_customers.assert();
}

#[test]
fn test_probe_failures_are_not_fatal() {
    let mut server = Server::new();
    let url = server.url();

    let _unauthorized = server
        .mock("GET", Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Invalid credentials"}"#)
        .expect(4)
        .create();

    let mut cmd = escrow_cmd_at(&url);
    cmd.arg("probe");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Invalid credentials"))
        .stdout(predicate::str::contains("0 passed, 4 failed"));
}

#[test]
fn test_probe_creates_and_cancels_transaction() {
    let mut server = Server::new();
    let url = server.url();

    let _reads = server
        .mock("GET", Matcher::Regex(r"^/2017-09-01/(customer/me|transaction\?|partner/)".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(4)
        .create();
    let create = server
        .mock("POST", "/2017-09-01/transaction")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "parties": [
                {"role": "buyer", "customer": "buyer@example.com"},
                {"role": "seller", "customer": "seller@example.com"}
            ]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 4242}"#)
        .create();
    let get = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/transaction/4242",
        200,
        r#"{"id": 4242, "parties": [{"agreed": true}, {"agreed": false}]}"#,
    )
    .expect(2)
    .create();
    let methods = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/transaction/4242/payment_methods",
        200,
        r#"{"available_payment_methods": []}"#,
    )
    .create();
    let cancel = server
        .mock("PATCH", "/2017-09-01/transaction/4242")
        .match_body(Matcher::PartialJson(serde_json::json!({"action": "cancel"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 4242}"#)
        .create();

    let mut cmd = escrow_cmd_at(&url);
    cmd.env("ESCROW_TEST_BUYER_EMAIL", "buyer@example.com")
        .env("ESCROW_TEST_SELLER_EMAIL", "seller@example.com")
        .arg("probe");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("transaction status: pending_agreement"))
        .stdout(predicate::str::contains("9 passed, 0 failed"));

    create.assert();
    get.assert();
    methods.assert();
    cancel.assert();
}

#[test]
fn test_show_prints_status() {
    let mut server = Server::new();
    let url = server.url();

    let get = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/transaction/77",
        200,
        r#"{"id": 77, "is_cancelled": true}"#,
    )
    .create();

    let mut cmd = escrow_cmd_at(&url);
    cmd.args(["show", "77"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 77"))
        .stdout(predicate::str::contains("Status: cancelled"));

    get.assert();
}

#[test]
fn test_show_not_found_fails() {
    let mut server = Server::new();
    let url = server.url();

    let _missing = mock_json(
        &mut server,
        "GET",
        "/2017-09-01/transaction/404",
        404,
        r#"{"message": "Transaction not found"}"#,
    )
    .create();

    let mut cmd = escrow_cmd_at(&url);
    cmd.args(["show", "404"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 404"))
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn test_cancel_sends_reason() {
    let mut server = Server::new();
    let url = server.url();

    let cancel = server
        .mock("PATCH", "/2017-09-01/transaction/31")
        .match_body(Matcher::Json(serde_json::json!({
            "action": "cancel",
            "cancel_information": {"cancellation_reason": "duplicate order"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 31}"#)
        .create();

    let mut cmd = escrow_cmd_at(&url);
    cmd.args(["cancel", "31", "--reason", "duplicate order"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Cancelled transaction 31"));

    cancel.assert();
}
