//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use lbctl_config::ConfigError;
use lbctl_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(lbctl::connection_failed),
        help(
            "Check that the API is reachable.\n\
             Override the endpoint with --api-url or `lbctl config set api_url <url>`."
        )
    )]
    ConnectionFailed { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(lbctl::timeout),
        help("Increase the timeout with --timeout or `lbctl config set timeout <seconds>`.")
    )]
    Timeout { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(lbctl::auth_failed),
        help("Verify your API key. Run: lbctl config set api_key <key>")
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(lbctl::no_credentials),
        help(
            "Configure credentials with: lbctl config init\n\
             Or set the LBCTL_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("{message}")]
    #[diagnostic(code(lbctl::forbidden))]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(lbctl::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(lbctl::conflict))]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(code(lbctl::api_error))]
    Api { message: String },

    #[error("all {count} {operation}s failed")]
    #[diagnostic(code(lbctl::all_failed), help("See the warnings above for each failure."))]
    AllFailed {
        operation: String,
        count: usize,
        exit: i32,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lbctl::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(
        code(lbctl::index_out_of_range),
        help("List the entries with their indices first, e.g. `lbctl lb acl condition list <acl-id>`.")
    )]
    IndexOutOfRange { message: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(lbctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Terraform ────────────────────────────────────────────────────

    #[error("Neither terraform nor tofu was found on PATH")]
    #[diagnostic(
        code(lbctl::terraform_not_found),
        help("Install Terraform or OpenTofu and make sure it is on your PATH.")
    )]
    ToolNotFound,

    #[error("{message}")]
    #[diagnostic(code(lbctl::terraform))]
    Terraform { message: String },

    #[error("{failed} of {total} cluster deployments failed")]
    #[diagnostic(
        code(lbctl::deploy_failed),
        help("Retry with: lbctl lb cluster deploy <id>...")
    )]
    DeployFailed { failed: usize, total: usize },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(lbctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: lbctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("{message}")]
    #[diagnostic(code(lbctl::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(lbctl::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    #[diagnostic(code(lbctl::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::AllFailed { exit, .. } => *exit,
            Self::Validation { .. }
            | Self::IndexOutOfRange { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            err @ CoreError::IndexOutOfBounds { .. } => Self::IndexOutOfRange {
                message: err.to_string(),
            },
            CoreError::Api { context, source } => from_api(&context, &source),
            CoreError::ToolNotFound => Self::ToolNotFound,
            CoreError::DeployFailed { failed, total } => Self::DeployFailed { failed, total },
            err @ (CoreError::ToolFailed { .. }
            | CoreError::ToolSpawn { .. }
            | CoreError::ToolOutput { .. }) => Self::Terraform {
                message: err.to_string(),
            },
        }
    }
}

fn from_api(context: &str, cause: &lbctl_api::Error) -> CliError {
    use lbctl_api::Error as ApiError;

    let message = format!("{context}: {cause}");
    match cause {
        ApiError::InvalidApiKey | ApiError::Authentication { .. } => {
            CliError::AuthFailed { message }
        }
        ApiError::Tls(_) => CliError::ConnectionFailed { message },
        e if e.is_timeout() => CliError::Timeout { message },
        e if e.is_connection() => CliError::ConnectionFailed { message },
        e if e.is_not_found() => CliError::NotFound { message },
        e => match e.status() {
            Some(401) => CliError::AuthFailed { message },
            Some(403) => CliError::PermissionDenied { message },
            Some(409) => CliError::Conflict { message },
            _ => CliError::Api { message },
        },
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name } => Self::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => Self::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn api(cause: lbctl_api::Error) -> CliError {
        CliError::from(CoreError::api("error retrieving cluster [7]", cause))
    }

    #[test]
    fn api_failures_map_to_exit_codes() {
        let not_found = api(lbctl_api::Error::Api {
            status: 404,
            message: "Resource not found".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(
            not_found.to_string(),
            "error retrieving cluster [7]: API error (HTTP 404): Resource not found"
        );

        assert_eq!(api(lbctl_api::Error::InvalidApiKey).exit_code(), exit_code::AUTH);
        let server = api(lbctl_api::Error::Api {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(server.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn local_failures_are_usage_errors() {
        let bounds = CliError::from(CoreError::IndexOutOfBounds {
            kind: "condition",
            index: 3,
            len: 2,
        });
        assert_eq!(bounds.exit_code(), exit_code::USAGE);
        assert_eq!(
            bounds.to_string(),
            "condition index [3] out of range: ACL has 2 conditions"
        );

        let invalid = CliError::from(CoreError::validation("--balance", "unsupported value 'x'"));
        assert_eq!(invalid.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn missing_key_is_an_auth_error() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "default".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn deploy_failure_keeps_counts() {
        let err = CliError::from(CoreError::DeployFailed {
            failed: 1,
            total: 3,
        });
        assert_eq!(err.to_string(), "1 of 3 cluster deployments failed");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
