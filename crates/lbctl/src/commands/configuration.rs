//! Configuration command handlers. Configuration IDs are opaque strings.

use lbctl_api::ConfigurationService;
use lbctl_api::types::{Configuration, CreateConfigurationRequest, PatchConfigurationRequest};
use lbctl_core::{CoreError, for_each_id};
use tabled::Tabled;

use crate::cli::{ConfigurationArgs, ConfigurationCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ConfigurationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cluster")]
    cluster_id: i32,
}

impl From<&Configuration> for ConfigurationRow {
    fn from(c: &Configuration) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            cluster_id: c.cluster_id,
        }
    }
}

fn detail(c: &Configuration) -> String {
    [
        format!("ID:       {}", c.id),
        format!("Name:     {}", c.name),
        format!("Cluster:  {}", c.cluster_id),
        format!("Created:  {}", output::timestamp(c.created_at.as_ref())),
        format!("Updated:  {}", output::timestamp(c.updated_at.as_ref())),
    ]
    .join("\n")
}

async fn fetch<S: ConfigurationService>(svc: &S, id: &str) -> Result<Configuration, CoreError> {
    svc.get_configuration(id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving configuration [{id}]"), e))
}

pub async fn handle<S: ConfigurationService>(
    svc: &S,
    args: ConfigurationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConfigurationCommand::List(list) => {
            let params = util::list_params(&list)?;
            let configurations = svc
                .get_configurations(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving configurations", e))?;
            util::print_list(
                global,
                &configurations,
                |c| ConfigurationRow::from(c),
                |c| c.id.clone(),
            )
        }

        ConfigurationCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |id| {
                let id = id.clone();
                async move { fetch(svc, &id).await }
            })
            .await;
            let configurations = util::finish_bulk(outcome, "configuration lookup", global)?;
            util::print_items(
                global,
                &configurations,
                |c| ConfigurationRow::from(c),
                detail,
                |c| c.id.clone(),
            )
        }

        ConfigurationCommand::Create { name, cluster_id } => {
            let req = CreateConfigurationRequest { name, cluster_id };
            let id = svc
                .create_configuration(&req)
                .await
                .map_err(|e| CoreError::api("error creating configuration", e))?;
            let configuration = fetch(svc, &id).await?;
            util::print_single(global, &configuration, detail, |c| c.id.clone())
        }

        ConfigurationCommand::Update { ids, name } => {
            let req = &PatchConfigurationRequest { name };
            let outcome = for_each_id(&ids.ids, |id| {
                let id = id.clone();
                async move {
                    svc.patch_configuration(&id, req).await.map_err(|e| {
                        CoreError::api(format!("error updating configuration [{id}]"), e)
                    })?;
                    fetch(svc, &id).await
                }
            })
            .await;
            let configurations = util::finish_bulk(outcome, "configuration update", global)?;
            util::print_items(
                global,
                &configurations,
                |c| ConfigurationRow::from(c),
                detail,
                |c| c.id.clone(),
            )
        }

        ConfigurationCommand::Delete(ids) => {
            let prompt = format!("Delete {} configuration(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |id| {
                let id = id.clone();
                async move {
                    svc.delete_configuration(&id).await.map_err(|e| {
                        CoreError::api(format!("error removing configuration [{id}]"), e)
                    })?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "configuration deletion", global)? {
                util::status(global, format!("Configuration {id} deleted"));
            }
            Ok(())
        }
    }
}
