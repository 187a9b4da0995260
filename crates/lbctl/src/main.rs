mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, LoadBalancerArgs, LoadBalancerCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(err) => exit_with(err),
    };

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        exit_with(err);
    }
}

fn exit_with(err: CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

/// Parse argv, handing everything after `loadbalancer terraform` to the
/// tool verbatim instead of to clap.
fn parse_cli() -> Result<Cli, CliError> {
    let (argv, passthrough) = commands::terraform::split_passthrough(std::env::args_os().collect());
    let mut cli = Cli::parse_from(argv);

    if let Some(raw) = passthrough {
        if let Command::Loadbalancer(LoadBalancerArgs {
            command: LoadBalancerCommand::Terraform(tf),
        }) = &mut cli.command
        {
            tf.args = raw
                .into_iter()
                .map(|arg| {
                    arg.into_string().map_err(|arg| {
                        CliError::validation(
                            "terraform",
                            format!("argument is not valid UTF-8: {}", arg.to_string_lossy()),
                        )
                    })
                })
                .collect::<Result<_, _>>()?;
        }
    }
    Ok(cli)
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need an API connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "lbctl", &mut std::io::stdout());
            Ok(())
        }

        Command::Loadbalancer(args) => commands::dispatch(args, &cli.global).await,
    }
}
