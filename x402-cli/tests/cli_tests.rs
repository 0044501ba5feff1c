//! Binary-level tests: exit codes and JSON output against a mocked node

use serde_json::{Value, json};
use solana_sdk::signature::{Keypair, write_keypair_file};
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SIGNATURE: &str =
    "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";
const RECIPIENT: &str = "FoJ9cZDNMjwWAoHb2ai1UWVoV8mWjzAm8h1Hn3pV3RrC";

async fn run_cli(config_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_x402-cli"))
        .arg("--config")
        .arg(config_dir.path().join("config.json"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("X402_CLI_CONFIG")
        .output()
        .await
        .expect("failed to run x402-cli")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}): {}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

async fn mount(server: &MockServer, rpc_method: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": rpc_method})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": result})),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, status: Value) {
    mount(
        server,
        "getSignatureStatuses",
        json!({"context": {"slot": 100}, "value": [status]}),
    )
    .await;
}

fn transfer_transaction() -> Value {
    json!({
        "slot": 100,
        "blockTime": 1_700_000_000,
        "meta": {"err": null, "fee": 5000, "logMessages": []},
        "transaction": {
            "signatures": [SIGNATURE],
            "message": {
                "instructions": [{
                    "program": "system",
                    "programId": "11111111111111111111111111111111",
                    "parsed": {
                        "type": "transfer",
                        "info": {
                            "source": "6Y6Ub4uSqTvivJ6Tz6w1YyFk1B8mQi8QnGwdrDam8Abe",
                            "destination": RECIPIENT,
                            "lamports": 1_000_000_000u64
                        }
                    }
                }]
            }
        }
    })
}

#[tokio::test]
async fn test_verify_confirmed_exits_zero() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        json!({"slot": 100, "confirmations": 3, "err": null, "confirmationStatus": "confirmed"}),
    )
    .await;
    mount(&server, "getTransaction", transfer_transaction()).await;

    let dir = TempDir::new().unwrap();
    let output = run_cli(
        &dir,
        &["verify", SIGNATURE, "--rpc-url", &server.uri(), "--json"],
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    let result = stdout_json(&output);
    assert_eq!(result["isValid"], json!(true));
    assert_eq!(result["status"], json!("confirmed"));
    assert_eq!(result["amountLamports"], json!(1_000_000_000u64));
    assert_eq!(result["feeLamports"], json!(5000));
    assert_eq!(result["network"], json!("devnet"));
}

#[tokio::test]
async fn test_verify_uses_configured_rpc_url() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        json!({"slot": 100, "confirmations": null, "err": null, "confirmationStatus": "finalized"}),
    )
    .await;
    mount(&server, "getTransaction", transfer_transaction()).await;

    let dir = TempDir::new().unwrap();
    let init = run_cli(&dir, &["init", "--rpc-url", &server.uri(), "--json"]).await;
    assert_eq!(init.status.code(), Some(0));

    let output = run_cli(&dir, &["verify", SIGNATURE, "--json"]).await;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["status"], json!("finalized"));
}

#[tokio::test]
async fn test_verify_pending_exits_two() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        json!({"slot": 100, "confirmations": 0, "err": null, "confirmationStatus": "processed"}),
    )
    .await;
    mount(&server, "getTransaction", Value::Null).await;

    let dir = TempDir::new().unwrap();
    let output = run_cli(
        &dir,
        &["verify", SIGNATURE, "--rpc-url", &server.uri(), "--json"],
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    let result = stdout_json(&output);
    assert_eq!(result["status"], json!("pending"));
    assert_eq!(result["isValid"], json!(false));
}

#[tokio::test]
async fn test_verify_not_found_exits_one() {
    let server = MockServer::start().await;
    mount(
        &server,
        "getSignatureStatuses",
        json!({"context": {"slot": 100}, "value": [null]}),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["verify", SIGNATURE, "--rpc-url", &server.uri()]).await;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not_found"), "{}", stdout);
    assert!(stdout.contains("Signature not found"), "{}", stdout);
}

#[tokio::test]
async fn test_verify_execution_failure_exits_one() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        json!({
            "slot": 100,
            "confirmations": 2,
            "err": {"InstructionError": [0, "Custom"]},
            "confirmationStatus": "confirmed"
        }),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = run_cli(
        &dir,
        &["verify", SIGNATURE, "--rpc-url", &server.uri(), "--json"],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let result = stdout_json(&output);
    assert_eq!(result["status"], json!("failed"));
    assert!(result["error"].as_str().unwrap().contains("InstructionError"));
}

#[tokio::test]
async fn test_verify_rejects_unknown_commitment() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["verify", SIGNATURE, "--commitment", "max", "--json"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["error"]["type"], json!("validation"));
}

#[tokio::test]
async fn test_init_writes_config_file() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        &dir,
        &["init", "-n", "testnet", "-w", "/keys/payer.json"],
    )
    .await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration Summary"), "{}", stdout);
    assert!(stdout.contains("TESTNET"), "{}", stdout);

    let saved: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("config.json")).unwrap())
            .unwrap();
    assert_eq!(
        saved,
        json!({
            "rpcUrl": "https://api.testnet.solana.com",
            "network": "testnet",
            "defaultWallet": "/keys/payer.json"
        })
    );
}

#[tokio::test]
async fn test_init_invalid_network_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["init", "--network", "localnet", "--json"]).await;

    assert_eq!(output.status.code(), Some(1));
    let error = &stdout_json(&output)["error"];
    assert_eq!(error["type"], json!("validation"));
    assert!(error["message"].as_str().unwrap().contains("Invalid network"));
    assert!(!dir.path().join("config.json").exists());
}

#[tokio::test]
async fn test_placeholder_commands_succeed() {
    let dir = TempDir::new().unwrap();

    let output = run_cli(&dir, &["mock-server", "--port", "4000"]).await;
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not yet implemented"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("port=4000, network=devnet"));

    let output = run_cli(&dir, &["verify-stub", SIGNATURE]).await;
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not yet implemented"));
}

#[tokio::test]
async fn test_pay_without_wallet_exits_one() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        &dir,
        &[
            "pay",
            "-r",
            RECIPIENT,
            "-a",
            "0.1",
            "--rpc-url",
            &server.uri(),
            "--json",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let result = stdout_json(&output);
    assert_eq!(result["status"], json!("failed"));
    assert!(
        result["error"]
            .as_str()
            .unwrap()
            .contains("Wallet path required")
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pay_insufficient_balance_exits_one() {
    let server = MockServer::start().await;
    mount(
        &server,
        "getBalance",
        json!({"context": {"slot": 1}, "value": 1000}),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "sendTransaction"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let keypair_path = write_payer(dir.path());
    let output = run_cli(
        &dir,
        &[
            "pay",
            "-r",
            RECIPIENT,
            "-a",
            "1",
            "-f",
            keypair_path.to_str().unwrap(),
            "--rpc-url",
            &server.uri(),
            "--json",
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let result = stdout_json(&output);
    assert_eq!(result["status"], json!("failed"));
    assert_eq!(
        result["error"],
        json!("Insufficient balance. Required: 1.000005000 SOL, Available: 0.000001000 SOL")
    );
}

fn write_payer(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("payer.json");
    write_keypair_file(&Keypair::new(), &path).unwrap();
    path
}
