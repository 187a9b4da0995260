//! Cluster command handlers.

use lbctl_api::ClusterService;
use lbctl_api::types::{Cluster, CreateClusterRequest, PatchClusterRequest};
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{ClusterArgs, ClusterCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Deployed")]
    deployed: String,
    #[tabled(rename = "Deployed At")]
    deployed_at: String,
}

impl From<&Cluster> for ClusterRow {
    fn from(c: &Cluster) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            deployed: util::yes_no(c.deployed),
            deployed_at: output::timestamp(c.deployed_at.as_ref()),
        }
    }
}

fn detail(c: &Cluster) -> String {
    [
        format!("ID:          {}", c.id),
        format!("Name:        {}", c.name),
        format!("Deployed:    {}", util::yes_no(c.deployed)),
        format!("Deployed At: {}", output::timestamp(c.deployed_at.as_ref())),
        format!("Created:     {}", output::timestamp(c.created_at.as_ref())),
        format!("Updated:     {}", output::timestamp(c.updated_at.as_ref())),
    ]
    .join("\n")
}

async fn fetch<S: ClusterService>(svc: &S, id: i32) -> Result<Cluster, CoreError> {
    svc.get_cluster(id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving cluster [{id}]"), e))
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle<S: ClusterService>(
    svc: &S,
    args: ClusterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ClusterCommand::List(list) => {
            let params = util::list_params(&list)?;
            let clusters = svc
                .get_clusters(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving clusters", e))?;
            util::print_list(global, &clusters, |c| ClusterRow::from(c), |c| c.id.to_string())
        }

        ClusterCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch(svc, id?).await }
            })
            .await;
            let clusters = util::finish_bulk(outcome, "cluster lookup", global)?;
            util::print_items(global, &clusters, |c| ClusterRow::from(c), detail, |c| {
                c.id.to_string()
            })
        }

        ClusterCommand::Create { name } => {
            let req = CreateClusterRequest { name };
            let id = svc
                .create_cluster(&req)
                .await
                .map_err(|e| CoreError::api("error creating cluster", e))?;
            let cluster = fetch(svc, id).await?;
            util::print_single(global, &cluster, detail, |c| c.id.to_string())
        }

        ClusterCommand::Update { ids, name } => {
            let req = &PatchClusterRequest { name };
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_cluster(id, req)
                        .await
                        .map_err(|e| CoreError::api(format!("error updating cluster [{id}]"), e))?;
                    fetch(svc, id).await
                }
            })
            .await;
            let clusters = util::finish_bulk(outcome, "cluster update", global)?;
            util::print_items(global, &clusters, |c| ClusterRow::from(c), detail, |c| {
                c.id.to_string()
            })
        }

        ClusterCommand::Delete(ids) => {
            let prompt = format!("Delete {} cluster(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_cluster(id)
                        .await
                        .map_err(|e| CoreError::api(format!("error removing cluster [{id}]"), e))?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "cluster deletion", global)? {
                util::status(global, format!("Cluster {id} deleted"));
            }
            Ok(())
        }

        ClusterCommand::Deploy(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.deploy_cluster(id)
                        .await
                        .map_err(|e| CoreError::api(format!("error deploying cluster [{id}]"), e))?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "cluster deployment", global)? {
                util::status(global, format!("Cluster {id} deployed"));
            }
            Ok(())
        }

        ClusterCommand::Validate(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.validate_cluster(id).await.map_err(|e| {
                        CoreError::api(format!("error validating cluster [{id}]"), e)
                    })?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "cluster validation", global)? {
                util::status(global, format!("Cluster {id} configuration is valid"));
            }
            Ok(())
        }
    }
}
