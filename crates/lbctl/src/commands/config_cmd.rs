//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with stored API keys masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some(REDACTED.into());
        }
    }
    cfg
}

/// TOML-like rendering of an already redacted config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if let Some(ref url) = p.api_url {
            let _ = writeln!(out, "api_url = \"{url}\"");
        }
        if let Some(ref key) = p.api_key {
            let _ = writeln!(out, "api_key = \"{key}\"");
        }
        if let Some(ref env) = p.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::validation("interactive", format!("prompt failed: {e}"))
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    let available: Vec<_> = cfg.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Apply `key = value` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            lbctl_config::parse_api_url(&value)?;
            profile.api_url = Some(value);
        }
        "api_key" | "api-key" => profile.api_key = Some(value),
        "api_key_env" | "api-key-env" => profile.api_key_env = Some(value),
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| CliError::validation("timeout", "must be a number (seconds)"))?,
            );
        }
        other => {
            return Err(CliError::validation(
                other,
                format!(
                    "unknown config key '{other}'. Valid keys: api_url, api_key, api_key_env, timeout"
                ),
            ));
        }
    }
    Ok(())
}

/// Interactive API key step of `config init`.
fn prompt_api_key() -> Result<(Option<String>, Option<String>), CliError> {
    let choices = &[
        "Save the API key in the config file",
        "Read the API key from an environment variable",
    ];
    let selection = Select::new()
        .with_prompt("How should the API key be provided?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        let key = Password::new()
            .with_prompt("API key")
            .interact()
            .map_err(prompt_err)?;
        if key.is_empty() {
            return Err(CliError::validation("api_key", "API key cannot be empty"));
        }
        Ok((Some(key), None))
    } else {
        let env: String = Input::new()
            .with_prompt("Environment variable")
            .default("LBCTL_API_KEY".into())
            .interact_text()
            .map_err(prompt_err)?;
        Ok((None, Some(env)))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("lbctl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("API URL")
                .default(lbctl_config::DEFAULT_API_URL.into())
                .validate_with(|raw: &String| {
                    lbctl_config::parse_api_url(raw)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let (api_key, api_key_env) = prompt_api_key()?;

            // Existing profiles survive a re-run of the wizard.
            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    api_url: Some(api_url),
                    api_key,
                    api_key_env,
                    timeout: None,
                },
            );
            cfg.default_profile = Some(profile_name.clone());

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: lbctl lb cluster list");
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out =
                output::render_single(&global.output, &cfg, format_config, |_| "config".into())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;

            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: lbctl config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.default_profile = Some("prod".into());
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                api_url: Some("https://lb.example.com/".into()),
                api_key: Some("super-secret".into()),
                api_key_env: None,
                timeout: Some(10),
            },
        );
        cfg
    }

    #[test]
    fn show_never_prints_the_key() {
        let out = format_config(&redacted(&sample()));
        assert!(out.contains("api_key = \"****\""));
        assert!(!out.contains("super-secret"));
        assert!(out.contains("[profiles.prod]"));
    }

    #[test]
    fn set_accepts_known_keys() {
        let mut profile = Profile::default();
        set_key(&mut profile, "api-url", "https://lb.example.com/".into()).unwrap();
        set_key(&mut profile, "timeout", "15".into()).unwrap();
        set_key(&mut profile, "api_key_env", "MY_KEY".into()).unwrap();
        assert_eq!(profile.api_url.as_deref(), Some("https://lb.example.com/"));
        assert_eq!(profile.timeout, Some(15));
        assert_eq!(profile.api_key_env.as_deref(), Some("MY_KEY"));
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut profile = Profile::default();
        assert!(set_key(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_key(&mut profile, "api_url", "not a url".into()).is_err());
        let err = set_key(&mut profile, "colour", "red".into()).unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn missing_profile_lists_alternatives() {
        let err = profile_not_found(&sample(), "dev".into());
        let CliError::ProfileNotFound { available, .. } = err else {
            panic!("expected ProfileNotFound");
        };
        assert_eq!(available, "prod");
    }
}
