//! Deployment command handlers (read-only).

use lbctl_api::DeploymentService;
use lbctl_api::types::Deployment;
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{DeploymentArgs, GlobalOpts, ReadOnlyCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct DeploymentRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Cluster")]
    cluster_id: i32,
    #[tabled(rename = "Successful")]
    successful: String,
    #[tabled(rename = "Requested By")]
    requested_by: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

fn requested_by(d: &Deployment) -> String {
    match (d.requested_by_type.as_deref(), d.requested_by_id.as_deref()) {
        (Some(kind), Some(id)) => format!("{kind} {id}"),
        (Some(kind), None) => kind.to_owned(),
        (None, Some(id)) => id.to_owned(),
        (None, None) => String::new(),
    }
}

impl From<&Deployment> for DeploymentRow {
    fn from(d: &Deployment) -> Self {
        Self {
            id: d.id,
            cluster_id: d.cluster_id,
            successful: util::yes_no(d.successful),
            requested_by: requested_by(d),
            created_at: output::timestamp(d.created_at.as_ref()),
        }
    }
}

fn detail(d: &Deployment) -> String {
    [
        format!("ID:            {}", d.id),
        format!("Cluster:       {}", d.cluster_id),
        format!("Successful:    {}", util::yes_no(d.successful)),
        format!("Requested By:  {}", requested_by(d)),
        format!("Created:       {}", output::timestamp(d.created_at.as_ref())),
        format!("Updated:       {}", output::timestamp(d.updated_at.as_ref())),
    ]
    .join("\n")
}

pub async fn handle<S: DeploymentService>(
    svc: &S,
    args: DeploymentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReadOnlyCommand::List(list) => {
            let params = util::list_params(&list)?;
            let deployments = svc
                .get_deployments(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving deployments", e))?;
            util::print_list(global, &deployments, |d| DeploymentRow::from(d), |d| {
                d.id.to_string()
            })
        }

        ReadOnlyCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.get_deployment(id).await.map_err(|e| {
                        CoreError::api(format!("error retrieving deployment [{id}]"), e)
                    })
                }
            })
            .await;
            let deployments = util::finish_bulk(outcome, "deployment lookup", global)?;
            util::print_items(global, &deployments, |d| DeploymentRow::from(d), detail, |d| {
                d.id.to_string()
            })
        }
    }
}
