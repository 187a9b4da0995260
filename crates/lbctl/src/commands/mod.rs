//! Command dispatch: bridges CLI args -> API services -> output formatting.

pub mod access_ip;
pub mod acl;
pub mod cluster;
pub mod config_cmd;
pub mod configuration;
pub mod deployment;
pub mod listener;
pub mod target_group;
pub mod terraform;
pub mod util;
pub mod vip;

use crate::cli::{GlobalOpts, LoadBalancerArgs, LoadBalancerCommand};
use crate::config;
use crate::error::CliError;

/// Dispatch a `loadbalancer` subcommand to its handler.
pub async fn dispatch(args: LoadBalancerArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // The wrapper locates its binary before it needs credentials.
    let cmd = match args.command {
        LoadBalancerCommand::Terraform(args) => return terraform::handle(args, global).await,
        cmd => cmd,
    };

    let client = config::build_client(global)?;
    tracing::debug!(command = ?cmd, "dispatching command");

    match cmd {
        LoadBalancerCommand::Cluster(args) => cluster::handle(&client, args, global).await,
        LoadBalancerCommand::Configuration(args) => {
            configuration::handle(&client, args, global).await
        }
        LoadBalancerCommand::Listener(args) => listener::handle(&client, args, global).await,
        LoadBalancerCommand::Targetgroup(args) => {
            target_group::handle(&client, args, global).await
        }
        LoadBalancerCommand::Accessip(args) => access_ip::handle(&client, args, global).await,
        LoadBalancerCommand::Acl(args) => acl::handle(&client, args, global).await,
        LoadBalancerCommand::Vip(args) => vip::handle(&client, args, global).await,
        LoadBalancerCommand::Deployment(args) => deployment::handle(&client, args, global).await,
        LoadBalancerCommand::Terraform(_) => unreachable!("handled above"),
    }
}
