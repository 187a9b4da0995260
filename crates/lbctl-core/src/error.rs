// ── Core error types ──
//
// Errors surfaced by lbctl-core. API failures are wrapped exactly once
// with the resource/ID they concern ("error retrieving cluster [123]");
// everything else is a local validation or subprocess failure.

use std::fmt;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation errors ────────────────────────────────────────────
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{kind} index [{index}] out of range: ACL has {len} {kind}s")]
    IndexOutOfBounds {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    // ── API errors (with resource context) ───────────────────────────
    #[error("{context}: {source}")]
    Api {
        context: String,
        #[source]
        source: lbctl_api::Error,
    },

    // ── Subprocess errors ────────────────────────────────────────────
    #[error("terraform binary not found: neither terraform nor tofu is on PATH")]
    ToolNotFound,

    #[error("terraform command failed: {tool} {exit}")]
    ToolFailed { tool: String, exit: ToolExit },

    #[error("failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid terraform output {output}: {reason}")]
    ToolOutput { output: String, reason: String },

    // ── Aggregate errors ─────────────────────────────────────────────
    #[error("{failed} of {total} cluster deployments failed")]
    DeployFailed { failed: usize, total: usize },
}

impl CoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn api(context: impl Into<String>, source: lbctl_api::Error) -> Self {
        Self::Api {
            context: context.into(),
            source,
        }
    }

    /// The underlying API error, if this failure came from a request.
    pub fn api_error(&self) -> Option<&lbctl_api::Error> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// How a subprocess ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolExit {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ToolExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}
