//! CLI configuration -- thin wrapper around `lbctl_config` shared types.
//!
//! Re-exports the shared types and adds the resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --api-key, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use lbctl_api::{LoadBalancerClient, TransportConfig};
use lbctl_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use lbctl_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Everything needed to talk to the API, after flag/profile/default
/// precedence has been applied.
#[derive(Debug)]
pub struct Connection {
    pub api_url: url::Url,
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

/// Resolve connection settings: flag (or `LBCTL_*` env) > profile > default.
pub fn resolve_connection(global: &GlobalOpts, cfg: &Config) -> Result<Connection, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => {
            let available: Vec<_> = cfg.profiles.keys().cloned().collect();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    let api_url = match global.api_url.as_deref() {
        Some(raw) => lbctl_config::parse_api_url(raw)?,
        None => profile.api_url()?,
    };

    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => lbctl_config::resolve_api_key(&profile, &profile_name)?,
    };

    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);

    Ok(Connection {
        api_url,
        api_key,
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout),
            danger_accept_invalid_certs: global.insecure,
        },
    })
}

/// Load config and build an authenticated API client.
pub fn build_client(global: &GlobalOpts) -> Result<LoadBalancerClient, CliError> {
    let cfg = load_config_or_default();
    let conn = resolve_connection(global, &cfg)?;
    tracing::debug!(api_url = %conn.api_url, "building API client");

    LoadBalancerClient::from_api_key(conn.api_url.as_str(), &conn.api_key, &conn.transport)
        .map_err(|e| CoreError::api("failed to create API client", e).into())
}
