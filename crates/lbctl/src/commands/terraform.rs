//! `loadbalancer terraform`: run terraform/tofu, then deploy the clusters
//! an `apply` reports.

use std::ffi::OsString;

use clap::CommandFactory;
use lbctl_core::terraform::{self, RunOutcome, SystemToolRunner};

use crate::cli::{Cli, GlobalOpts, TerraformArgs};
use crate::config;
use crate::error::CliError;

use super::util;

/// Split the command line at `loadbalancer terraform`.
///
/// Everything after the subcommand belongs to terraform/tofu and is
/// returned untouched, so clap never interprets `-v`, `--version` or a
/// global flag name meant for the tool. Returns `None` for any other
/// command.
pub fn split_passthrough(mut argv: Vec<OsString>) -> (Vec<OsString>, Option<Vec<OsString>>) {
    let cmd = Cli::command();
    let mut in_loadbalancer = false;
    let mut skip_value = false;
    let mut split_at = None;

    for (i, arg) in argv.iter().enumerate().skip(1) {
        let Some(token) = arg.to_str() else { break };
        if skip_value {
            skip_value = false;
            continue;
        }
        if token == "--" {
            break;
        }
        if token.len() > 1 && token.starts_with('-') {
            skip_value = expects_separate_value(&cmd, token);
            continue;
        }
        match (in_loadbalancer, token) {
            (false, "loadbalancer" | "lb") => in_loadbalancer = true,
            (true, "terraform") => {
                split_at = Some(i + 1);
                break;
            }
            _ => break,
        }
    }

    match split_at {
        Some(at) => {
            let tail = argv.split_off(at);
            (argv, Some(tail))
        }
        None => (argv, None),
    }
}

/// Whether a global option token consumes the following argument as its value.
fn expects_separate_value(cmd: &clap::Command, token: &str) -> bool {
    let takes_value = |arg: &clap::Arg| arg.get_action().takes_values();

    if let Some(long) = token.strip_prefix("--") {
        return !long.contains('=')
            && cmd
                .get_arguments()
                .any(|arg| arg.get_long() == Some(long) && takes_value(arg));
    }

    // Short clusters: the first value-taking flag consumes the rest of the
    // token, or the next argument when it is last.
    let shorts: Vec<char> = token.chars().skip(1).collect();
    for (pos, c) in shorts.iter().enumerate() {
        if cmd
            .get_arguments()
            .any(|arg| arg.get_short() == Some(*c) && takes_value(arg))
        {
            return pos + 1 == shorts.len();
        }
    }
    false
}

fn print_help() -> Result<(), CliError> {
    let mut cmd = Cli::command();
    if let Some(sub) = cmd
        .find_subcommand_mut("loadbalancer")
        .and_then(|lb| lb.find_subcommand_mut("terraform"))
    {
        sub.print_help()?;
    }
    Ok(())
}

pub async fn handle(args: TerraformArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let binary = terraform::locate_binary()?;
    tracing::debug!(binary = %binary.display(), "located terraform binary");

    if terraform::is_help_request(&args.args) {
        return print_help();
    }

    // Credentials are checked before anything is applied.
    let client = config::build_client(global)?;

    let mut stdout = std::io::stdout();
    let outcome =
        terraform::run(&SystemToolRunner, &client, &binary, &args.args, &mut stdout).await?;

    match outcome {
        RunOutcome::Passthrough => {}
        RunOutcome::Deployed(ids) => {
            util::status(global, format!("{} cluster(s) deployed", ids.len()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn argv(raw: &[&str]) -> Vec<OsString> {
        std::iter::once("lbctl").chain(raw.iter().copied()).map(OsString::from).collect()
    }

    fn split(raw: &[&str]) -> (Vec<OsString>, Option<Vec<OsString>>) {
        split_passthrough(argv(raw))
    }

    #[test]
    fn tool_flags_after_terraform_are_not_parsed() {
        for tail in [
            &["-v"][..],
            &["--version"],
            &["-q"],
            &["-y"],
            &["-k", "plan"],
            &["-o"],
            &["--help"],
            &["-chdir=infra", "apply", "-auto-approve"],
            &["--", "plan"],
        ] {
            let mut raw = vec!["lb", "terraform"];
            raw.extend_from_slice(tail);
            let (prefix, passthrough) = split(&raw);
            assert_eq!(prefix, argv(&["lb", "terraform"]));
            assert_eq!(passthrough.unwrap(), argv(tail)[1..].to_vec(), "tail {tail:?}");
        }
    }

    #[test]
    fn global_options_before_terraform_stay_with_lbctl() {
        let (prefix, tail) = split(&[
            "--api-url",
            "http://lb.test/",
            "-p",
            "prod",
            "-vk",
            "loadbalancer",
            "--output=json",
            "terraform",
            "-v",
        ]);
        assert_eq!(
            prefix,
            argv(&[
                "--api-url",
                "http://lb.test/",
                "-p",
                "prod",
                "-vk",
                "loadbalancer",
                "--output=json",
                "terraform"
            ])
        );
        assert_eq!(tail.unwrap(), vec![OsString::from("-v")]);
    }

    #[test]
    fn option_values_are_not_mistaken_for_commands() {
        let (prefix, tail) = split(&["--profile", "lb", "lb", "cluster", "list"]);
        assert_eq!(prefix.len(), 6);
        assert!(tail.is_none());

        let (_, tail) = split(&["-p", "terraform", "lb", "terraform", "plan"]);
        assert_eq!(tail.unwrap(), vec![OsString::from("plan")]);
    }

    #[test]
    fn other_commands_are_left_to_clap() {
        for raw in [
            &["lb", "cluster", "list", "-v"][..],
            &["config", "show"],
            &["terraform", "plan"],
            &["lb"],
            &["--", "lb", "terraform"],
            &[],
        ] {
            let (prefix, tail) = split(raw);
            assert_eq!(prefix, argv(raw));
            assert!(tail.is_none(), "{raw:?}");
        }
    }

    #[test]
    fn bare_terraform_has_an_empty_passthrough() {
        let (_, tail) = split(&["lb", "terraform"]);
        assert!(tail.unwrap().is_empty());
    }
}
