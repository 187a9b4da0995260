// ── Terraform / OpenTofu wrapper ──
//
// Runs the user's command verbatim with the terminal attached. After a
// successful `apply`, reads the `loadbalancer_cluster_ids` output and
// deploys every listed cluster, continuing past individual failures.

#![allow(async_fn_in_trait)]

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use lbctl_api::ClusterService;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{CoreError, ToolExit};

/// Name of the Terraform output holding the clusters to deploy.
pub const CLUSTER_IDS_OUTPUT: &str = "loadbalancer_cluster_ids";

/// Binaries searched for on `PATH`, in order of preference.
pub const CANDIDATES: [&str; 2] = ["terraform", "tofu"];

// ── Subprocess abstraction ──────────────────────────────────────────

/// Captured result of a non-interactive run.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub exit: ToolExit,
    pub stdout: Vec<u8>,
}

/// Runs the located binary.
pub trait ToolRunner {
    /// Run with stdin/stdout/stderr inherited from this process.
    async fn run_inherited(&self, program: &Path, args: &[String]) -> Result<ToolExit, CoreError>;

    /// Run capturing stdout; stderr stays attached to the terminal.
    async fn run_captured(
        &self,
        program: &Path,
        args: &[&str],
    ) -> Result<CapturedOutput, CoreError>;
}

/// [`ToolRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

fn spawn_error(program: &Path, source: std::io::Error) -> CoreError {
    CoreError::ToolSpawn {
        tool: program.display().to_string(),
        source,
    }
}

impl ToolRunner for SystemToolRunner {
    async fn run_inherited(&self, program: &Path, args: &[String]) -> Result<ToolExit, CoreError> {
        debug!(program = %program.display(), ?args, "running");
        let status = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| spawn_error(program, e))?;
        Ok(status.into())
    }

    async fn run_captured(
        &self,
        program: &Path,
        args: &[&str],
    ) -> Result<CapturedOutput, CoreError> {
        debug!(program = %program.display(), ?args, "running (captured)");
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| spawn_error(program, e))?;
        Ok(CapturedOutput {
            exit: output.status.into(),
            stdout: output.stdout,
        })
    }
}

// ── Binary lookup ───────────────────────────────────────────────────

/// Find `terraform`, falling back to `tofu`, on the current `PATH`.
pub fn locate_binary() -> Result<PathBuf, CoreError> {
    let path = std::env::var_os("PATH").unwrap_or_default();
    locate_in(&path)
}

/// Find the first candidate binary in a `PATH`-style list of directories.
/// Every directory is searched for `terraform` before `tofu` is considered.
pub fn locate_in(path: &OsStr) -> Result<PathBuf, CoreError> {
    let dirs: Vec<PathBuf> = std::env::split_paths(path).collect();
    CANDIDATES
        .iter()
        .find_map(|name| {
            dirs.iter()
                .map(|dir| dir.join(executable_name(name)))
                .find(|candidate| is_executable(candidate))
        })
        .ok_or(CoreError::ToolNotFound)
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_owned()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ── Orchestration ───────────────────────────────────────────────────

/// No arguments, or a leading `-h`/`--help`, shows lbctl's own help.
pub fn is_help_request(args: &[String]) -> bool {
    match args.first().map(String::as_str) {
        None | Some("-h" | "--help") => true,
        Some(_) => false,
    }
}

/// Only commands containing the literal `apply` argument trigger a deploy.
pub fn is_apply(args: &[String]) -> bool {
    args.iter().any(|a| a == "apply")
}

/// Parse the JSON value of the cluster IDs output.
///
/// Elements may be integers, floats (truncated toward zero) or numeric
/// strings. The list must not be empty.
pub fn parse_cluster_ids(raw: &[u8]) -> Result<Vec<i32>, CoreError> {
    let invalid = |reason: String| CoreError::ToolOutput {
        output: CLUSTER_IDS_OUTPUT.to_owned(),
        reason,
    };

    let value: Value =
        serde_json::from_slice(raw).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(invalid(format!("expected a JSON array, got {other}"))),
    };
    if items.is_empty() {
        return Err(invalid("no cluster IDs found".to_owned()));
    }

    items
        .iter()
        .map(|item| {
            cluster_id(item).ok_or_else(|| invalid(format!("unsupported cluster ID {item}")))
        })
        .collect()
}

fn cluster_id(item: &Value) -> Option<i32> {
    match item {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate_float))
            .and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i32>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .and_then(truncate_float)
                    .and_then(|v| i32::try_from(v).ok())
            })
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn truncate_float(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t <= i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

/// What a wrapped invocation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The command was not an `apply`; nothing was deployed.
    Passthrough,
    /// Every listed cluster was deployed.
    Deployed(Vec<i32>),
}

/// Run the wrapped command and, after an `apply`, deploy the clusters it
/// reports. Progress lines are written to `out`.
pub async fn run<R, S, W>(
    runner: &R,
    clusters: &S,
    binary: &Path,
    args: &[String],
    out: &mut W,
) -> Result<RunOutcome, CoreError>
where
    R: ToolRunner,
    S: ClusterService,
    W: Write,
{
    let tool = binary
        .file_name()
        .map_or_else(|| binary.display().to_string(), |n| n.to_string_lossy().into_owned());

    let exit = runner.run_inherited(binary, args).await?;
    if !exit.success() {
        return Err(CoreError::ToolFailed { tool, exit });
    }

    if !is_apply(args) {
        debug!("not an apply, skipping deploy");
        return Ok(RunOutcome::Passthrough);
    }

    let captured = runner
        .run_captured(binary, &["output", "-json", CLUSTER_IDS_OUTPUT])
        .await?;
    if !captured.exit.success() {
        return Err(CoreError::ToolOutput {
            output: CLUSTER_IDS_OUTPUT.to_owned(),
            reason: format!("{tool} output {}", captured.exit),
        });
    }
    let ids = parse_cluster_ids(&captured.stdout)?;
    info!(count = ids.len(), "deploying clusters");

    deploy_all(clusters, &ids, out).await?;
    Ok(RunOutcome::Deployed(ids))
}

/// Write one progress line; a closed or broken stream never stops a deploy.
fn progress<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{line}") {
        debug!(error = %e, "failed to write progress line");
    }
}

/// Deploy each cluster in order, attempting all of them before reporting
/// an aggregate failure.
pub async fn deploy_all<S, W>(clusters: &S, ids: &[i32], out: &mut W) -> Result<(), CoreError>
where
    S: ClusterService,
    W: Write,
{
    let mut failed = 0;
    for &id in ids {
        progress(out, format_args!("Deploying cluster {id}..."));
        match clusters.deploy_cluster(id).await {
            Ok(()) => progress(out, format_args!("Cluster {id} deployed successfully")),
            Err(e) => {
                failed += 1;
                progress(out, format_args!("Failed to deploy cluster {id}: {e}"));
            }
        }
    }

    if failed > 0 {
        return Err(CoreError::DeployFailed {
            failed,
            total: ids.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use lbctl_api::ListParams;
    use lbctl_api::types::{Cluster, CreateClusterRequest, PatchClusterRequest};
    use pretty_assertions::assert_eq;

    use super::*;

    // ── Fakes ───────────────────────────────────────────────────────

    struct FakeRunner {
        exit: ToolExit,
        output: Vec<u8>,
        inherited: RefCell<Vec<Vec<String>>>,
        captured: RefCell<Vec<Vec<String>>>,
    }

    impl FakeRunner {
        fn new(output: &str) -> Self {
            Self {
                exit: ToolExit::SUCCESS,
                output: output.as_bytes().to_vec(),
                inherited: RefCell::new(Vec::new()),
                captured: RefCell::new(Vec::new()),
            }
        }
    }

    impl ToolRunner for FakeRunner {
        async fn run_inherited(&self, _program: &Path, args: &[String]) -> Result<ToolExit, CoreError> {
            self.inherited.borrow_mut().push(args.to_vec());
            Ok(self.exit)
        }

        async fn run_captured(
            &self,
            _program: &Path,
            args: &[&str],
        ) -> Result<CapturedOutput, CoreError> {
            self.captured
                .borrow_mut()
                .push(args.iter().map(|a| (*a).to_owned()).collect());
            Ok(CapturedOutput {
                exit: ToolExit::SUCCESS,
                stdout: self.output.clone(),
            })
        }
    }

    #[derive(Default)]
    struct FakeClusters {
        failing: Vec<i32>,
        deployed: RefCell<Vec<i32>>,
    }

    impl ClusterService for FakeClusters {
        async fn get_clusters(&self, _: &ListParams) -> Result<Vec<Cluster>, lbctl_api::Error> {
            Ok(Vec::new())
        }
        async fn get_cluster(&self, id: i32) -> Result<Cluster, lbctl_api::Error> {
            Err(lbctl_api::Error::Api { status: 404, message: format!("cluster {id}") })
        }
        async fn create_cluster(&self, _: &CreateClusterRequest) -> Result<i32, lbctl_api::Error> {
            Ok(1)
        }
        async fn patch_cluster(&self, _: i32, _: &PatchClusterRequest) -> Result<(), lbctl_api::Error> {
            Ok(())
        }
        async fn delete_cluster(&self, _: i32) -> Result<(), lbctl_api::Error> {
            Ok(())
        }
        async fn deploy_cluster(&self, id: i32) -> Result<(), lbctl_api::Error> {
            self.deployed.borrow_mut().push(id);
            if self.failing.contains(&id) {
                Err(lbctl_api::Error::Api {
                    status: 500,
                    message: "deploy failed".into(),
                })
            } else {
                Ok(())
            }
        }
        async fn validate_cluster(&self, _: i32) -> Result<(), lbctl_api::Error> {
            Ok(())
        }
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    // ── Orchestration ───────────────────────────────────────────────

    #[tokio::test]
    async fn plan_runs_without_deploying() {
        let runner = FakeRunner::new("[1]");
        let clusters = FakeClusters::default();
        let mut out = Vec::new();

        let outcome = run(&runner, &clusters, Path::new("/bin/terraform"), &args(&["plan"]), &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Passthrough);
        assert_eq!(*runner.inherited.borrow(), vec![args(&["plan"])]);
        assert!(runner.captured.borrow().is_empty());
        assert!(clusters.deployed.borrow().is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn apply_deploys_every_cluster_despite_failure() {
        let runner = FakeRunner::new(r#"[1,"2",3]"#);
        let clusters = FakeClusters {
            failing: vec![2],
            ..FakeClusters::default()
        };
        let mut out = Vec::new();

        let err = run(&runner, &clusters, Path::new("/bin/terraform"), &args(&["apply"]), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::DeployFailed { failed: 1, total: 3 }));
        assert_eq!(err.to_string(), "1 of 3 cluster deployments failed");
        assert_eq!(*clusters.deployed.borrow(), vec![1, 2, 3]);
        assert_eq!(
            *runner.captured.borrow(),
            vec![args(&["output", "-json", CLUSTER_IDS_OUTPUT])]
        );

        let printed = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines[0], "Deploying cluster 1...");
        assert_eq!(lines[1], "Cluster 1 deployed successfully");
        assert!(lines[3].starts_with("Failed to deploy cluster 2"));
        assert_eq!(lines[5], "Cluster 3 deployed successfully");
    }

    #[tokio::test]
    async fn successful_apply_reports_deployed_ids() {
        let runner = FakeRunner::new("[4, 5.9]\n");
        let clusters = FakeClusters::default();
        let mut out = Vec::new();

        let outcome = run(
            &runner,
            &clusters,
            Path::new("/usr/bin/tofu"),
            &args(&["apply", "-auto-approve"]),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(outcome, RunOutcome::Deployed(vec![4, 5]));
    }

    #[tokio::test]
    async fn failing_command_stops_before_deploy() {
        let mut runner = FakeRunner::new("[1]");
        runner.exit = ToolExit { code: Some(2) };
        let clusters = FakeClusters::default();

        let err = run(&runner, &clusters, Path::new("/bin/terraform"), &args(&["apply"]), &mut Vec::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "terraform command failed: terraform exited with code 2");
        assert!(runner.captured.borrow().is_empty());
        assert!(clusters.deployed.borrow().is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn broken_output_stream_does_not_stop_deploys() {
        let clusters = FakeClusters {
            failing: vec![2],
            ..FakeClusters::default()
        };

        let err = deploy_all(&clusters, &[1, 2, 3], &mut BrokenPipe).await.unwrap_err();

        assert!(matches!(err, CoreError::DeployFailed { failed: 1, total: 3 }));
        assert_eq!(*clusters.deployed.borrow(), vec![1, 2, 3]);

        let healthy = FakeClusters::default();
        deploy_all(&healthy, &[7, 8], &mut BrokenPipe).await.unwrap();
        assert_eq!(*healthy.deployed.borrow(), vec![7, 8]);
    }

    #[tokio::test]
    async fn empty_output_is_fatal() {
        let runner = FakeRunner::new("[]");
        let clusters = FakeClusters::default();
        let err = run(&runner, &clusters, Path::new("terraform"), &args(&["apply"]), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains(CLUSTER_IDS_OUTPUT));
        assert!(clusters.deployed.borrow().is_empty());
    }

    // ── Parsing and gates ───────────────────────────────────────────

    #[test]
    fn cluster_ids_accept_mixed_types() {
        assert_eq!(parse_cluster_ids(br#"[1, "2", 3.7, " 4 ", -1.5]"#).unwrap(), vec![1, 2, 3, 4, -1]);
    }

    #[test]
    fn cluster_ids_reject_bad_shapes() {
        for raw in [&b"{}"[..], b"not json", b"[true]", b"[\"abc\"]", b"[null]", b"[]", b"[9999999999]"] {
            let err = parse_cluster_ids(raw).unwrap_err();
            assert!(
                matches!(err, CoreError::ToolOutput { ref output, .. } if output == CLUSTER_IDS_OUTPUT),
                "unexpected error for {:?}: {err}",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn help_and_apply_gates() {
        assert!(is_help_request(&[]));
        assert!(is_help_request(&args(&["--help"])));
        assert!(is_help_request(&args(&["-h"])));
        assert!(!is_help_request(&args(&["plan", "-h"])));

        assert!(is_apply(&args(&["apply", "-auto-approve"])));
        assert!(is_apply(&args(&["-chdir=infra", "apply"])));
        assert!(!is_apply(&args(&["plan", "-out=apply"])));
    }

    #[cfg(unix)]
    #[test]
    fn locate_prefers_terraform_over_tofu() {
        use std::os::unix::fs::PermissionsExt;

        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let make = |dir: &Path, name: &str| {
            let path = dir.join(name);
            std::fs::write(&path, "#!/bin/sh\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        };

        let tofu = make(first.path(), "tofu");
        let joined = std::env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(locate_in(&joined).unwrap(), tofu);

        let terraform = make(second.path(), "terraform");
        assert_eq!(locate_in(&joined).unwrap(), terraform);
    }

    #[test]
    fn locate_fails_when_nothing_is_installed() {
        let empty = tempfile::tempdir().unwrap();
        assert!(matches!(
            locate_in(empty.path().as_os_str()),
            Err(CoreError::ToolNotFound)
        ));
    }
}
