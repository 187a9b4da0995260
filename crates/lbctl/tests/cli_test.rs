//! Integration tests for the `lbctl` binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without any API; the end-to-end cases point `--api-url` at a wiremock
//! server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `lbctl` binary with env isolation.
///
/// Clears all `LBCTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn lbctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lbctl");
    cmd.env("HOME", "/tmp/lbctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lbctl-test-nonexistent")
        .env_remove("LBCTL_PROFILE")
        .env_remove("LBCTL_API_URL")
        .env_remove("LBCTL_API_KEY")
        .env_remove("LBCTL_OUTPUT")
        .env_remove("LBCTL_INSECURE")
        .env_remove("LBCTL_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// `lbctl` with credentials for `api_url` and the given output format.
fn api_cmd(api_url: &str, output: &str) -> assert_cmd::Command {
    let mut cmd = lbctl_cmd();
    cmd.args(["--api-url", api_url, "--api-key", "test-key", "--output", output]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime so the mock server keeps
/// serving while the binary blocks.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn acl(id: i32, actions: &Value) -> Value {
    json!({
        "data": {
            "id": id, "name": "redirects", "listener_id": 12,
            "conditions": [], "actions": actions,
        }
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lbctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    lbctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("load balancer")
            .and(predicate::str::contains("loadbalancer"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    lbctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lbctl"));
}

#[test]
fn test_loadbalancer_help_lists_resources() {
    lbctl_cmd().args(["lb", "--help"]).assert().success().stdout(
        predicate::str::contains("cluster")
            .and(predicate::str::contains("targetgroup"))
            .and(predicate::str::contains("acl"))
            .and(predicate::str::contains("terraform")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    lbctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    lbctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    lbctl_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    lbctl_cmd()
        .args(["lb", "frobnicate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_acl_create_requires_a_parent() {
    lbctl_cmd()
        .args(["--api-key", "k", "lb", "acl", "create", "--name", "x"])
        .assert()
        .code(2);
}

#[test]
fn test_acl_create_rejects_both_parents() {
    lbctl_cmd()
        .args([
            "--api-key", "k", "lb", "acl", "create", "--name", "x", "--listener", "1",
            "--target-group", "2",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_missing_credentials_exit_code() {
    lbctl_cmd()
        .args(["lb", "cluster", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_invalid_balance_names_allowed_values() {
    // Validation fails before any request, so the URL is never contacted.
    lbctl_cmd()
        .args([
            "--api-url", "http://127.0.0.1:9/", "--api-key", "k", "lb", "tg", "create",
            "--name", "web", "--cluster-id", "1", "--balance", "fastest", "--mode", "http",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("roundrobin"));
}

#[test]
fn test_delete_without_yes_in_pipeline_is_refused() {
    lbctl_cmd()
        .args(["--api-url", "http://127.0.0.1:9/", "--api-key", "k", "lb", "cluster", "delete", "1"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── ACL actions end to end ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_acl_action_create_appends_and_prints() {
    let server = MockServer::start().await;
    let prior = json!({ "name": "deny", "arguments": {} });
    let added = json!({
        "name": "header_matches",
        "arguments": {
            "header": { "name": "header", "value": "host" },
            "value": { "name": "value", "value": "test.com" },
        },
    });

    Mock::given(method("GET"))
        .and(path("/v2/acls/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acl(123, &json!([prior]))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/acls/123"))
        .and(body_json(json!({ "actions": [prior, added] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/acls/123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(acl(123, &json!([prior, added]))),
        )
        .mount(&server)
        .await;

    let mut cmd = api_cmd(&server.uri(), "json");
    cmd.args([
        "lb", "acl", "action", "create", "123", "--name", "header_matches", "--argument",
        "header=host", "--argument", "value=test.com",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed.as_array().unwrap().len(), 2);
    assert_eq!(printed[1]["index"], 1);
    assert_eq!(printed[1]["name"], "header_matches");
    assert_eq!(printed[1]["arguments"]["value"]["value"], "test.com");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_acl_action_delete_last_leaves_empty_list() {
    let server = MockServer::start().await;
    let existing = json!([{ "name": "deny", "arguments": {} }]);

    Mock::given(method("GET"))
        .and(path("/v2/acls/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acl(5, &existing)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/acls/5"))
        .and(body_json(json!({ "actions": [] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/acls/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(acl(5, &json!([]))))
        .mount(&server)
        .await;

    let mut cmd = api_cmd(&server.uri(), "json");
    cmd.args(["--yes", "lb", "acl", "action", "delete", "5", "0"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_acl_action_out_of_range_index_sends_no_patch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/acls/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(acl(5, &json!([{ "name": "deny", "arguments": {} }]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = api_cmd(&server.uri(), "json");
    cmd.args(["lb", "acl", "action", "update", "5", "3", "--name", "allow"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

// ── Bulk operations ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_show_skips_failed_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 1, "name": "web", "deployed": true }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/clusters/2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "title": "Not found", "detail": "Cluster not found", "status": 404 }]
        })))
        .mount(&server)
        .await;

    let mut cmd = api_cmd(&server.uri(), "plain");
    cmd.args(["lb", "cluster", "show", "1", "2", "x"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cluster [2]"), "{stderr}");
    assert_eq!(stderr.matches("Warning:").count(), 2, "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_all_failed_exits_nonzero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut cmd = api_cmd(&server.uri(), "json");
    cmd.args(["lb", "vip", "show", "7", "8"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("all 2 VIP lookups failed"));
}

// ── Terraform wrapper ───────────────────────────────────────────────

#[cfg(unix)]
mod terraform {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use super::*;

    /// Install a fake `terraform` that succeeds, answers `output` with
    /// `[1,"2",3]` and records each invocation's arguments in `calls.log`.
    fn fake_terraform(dir: &Path) {
        let script = dir.join("terraform");
        let log = dir.join("calls.log");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\n\
                 printf '%s\\n' \"$@\" >> '{log}'\n\
                 echo '@@' >> '{log}'\n\
                 if [ \"$1\" = \"output\" ]; then echo '[1,\"2\",3]'; fi\n\
                 exit 0\n",
                log = log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Arguments of every recorded invocation, in order.
    fn invocations(dir: &Path) -> Vec<Vec<String>> {
        let log = std::fs::read_to_string(dir.join("calls.log")).unwrap_or_default();
        let mut calls = Vec::new();
        let mut current = Vec::new();
        for line in log.lines() {
            if line == "@@" {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_owned());
            }
        }
        calls
    }

    /// Run `lbctl lb terraform <tail>` against the fake binary with
    /// credentials that are never used for a plain passthrough.
    fn passthrough(bin: &Path, tail: &[&str]) -> std::process::Output {
        let mut cmd = lbctl_cmd();
        cmd.env("PATH", bin)
            .args(["--api-url", "http://127.0.0.1:9/", "--api-key", "k", "--output", "json"])
            .args(["lb", "terraform"])
            .args(tail);
        cmd.output().unwrap()
    }

    #[test]
    fn test_flags_after_terraform_reach_the_tool_verbatim() {
        let bin = tempfile::tempdir().unwrap();
        fake_terraform(bin.path());

        let tails: [&[&str]; 6] = [
            &["-v"],
            &["--version"],
            &["-q"],
            &["-k", "plan"],
            &["-chdir=infra", "plan", "-out", "tf.plan"],
            &["-o", "--", "-y"],
        ];
        for tail in tails {
            let output = passthrough(bin.path(), tail);
            assert!(output.status.success(), "{tail:?}: {}", combined_output(&output));
        }

        let expected: Vec<Vec<String>> = tails
            .iter()
            .map(|tail| tail.iter().map(|s| (*s).to_owned()).collect())
            .collect();
        assert_eq!(invocations(bin.path()), expected);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_plan_runs_without_deploying() {
        let server = MockServer::start().await;
        let bin = tempfile::tempdir().unwrap();
        fake_terraform(bin.path());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut cmd = api_cmd(&server.uri(), "json");
        cmd.env("PATH", bin.path()).args(["lb", "terraform", "plan"]);
        let output = run(cmd).await;

        assert!(output.status.success(), "{}", combined_output(&output));
        assert!(!String::from_utf8_lossy(&output.stdout).contains("Deploying"));
        assert_eq!(invocations(bin.path()), vec![vec!["plan".to_owned()]]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_apply_deploys_every_cluster_and_reports_failures() {
        let server = MockServer::start().await;
        let bin = tempfile::tempdir().unwrap();
        fake_terraform(bin.path());

        for id in [1, 3] {
            Mock::given(method("POST"))
                .and(path(format!("/v2/clusters/{id}/deploy")))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/v2/clusters/2/deploy"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut cmd = api_cmd(&server.uri(), "json");
        cmd.env("PATH", bin.path())
            .args(["lb", "terraform", "apply", "-auto-approve"]);
        let output = run(cmd).await;

        assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Cluster 1 deployed successfully"), "{stdout}");
        assert!(stdout.contains("Failed to deploy cluster 2"), "{stdout}");
        assert!(stdout.contains("Cluster 3 deployed successfully"), "{stdout}");
        assert!(
            String::from_utf8_lossy(&output.stderr).contains("1 of 3 cluster deployments failed")
        );
        assert_eq!(
            invocations(bin.path()),
            vec![
                vec!["apply".to_owned(), "-auto-approve".to_owned()],
                vec![
                    "output".to_owned(),
                    "-json".to_owned(),
                    "loadbalancer_cluster_ids".to_owned()
                ],
            ]
        );
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let empty = tempfile::tempdir().unwrap();
        lbctl_cmd()
            .env("PATH", empty.path())
            .args(["lb", "terraform", "plan"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("terraform"));
    }
}
