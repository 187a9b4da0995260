//! Access IP command handlers (by ID). Listing and creating go through
//! `listener accessip`, since access IPs belong to a listener.

use lbctl_api::AccessIpService;
use lbctl_api::types::{AccessIp, PatchAccessIpRequest};
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{AccessIpArgs, AccessIpCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AccessIpRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&AccessIp> for AccessIpRow {
    fn from(a: &AccessIp) -> Self {
        Self {
            id: a.id,
            ip: a.ip.clone(),
            created_at: output::timestamp(a.created_at.as_ref()),
        }
    }
}

fn detail(a: &AccessIp) -> String {
    [
        format!("ID:       {}", a.id),
        format!("IP:       {}", a.ip),
        format!("Created:  {}", output::timestamp(a.created_at.as_ref())),
        format!("Updated:  {}", output::timestamp(a.updated_at.as_ref())),
    ]
    .join("\n")
}

pub(super) async fn fetch<S: AccessIpService>(svc: &S, id: i32) -> Result<AccessIp, CoreError> {
    svc.get_access_ip(id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving access IP [{id}]"), e))
}

pub(super) fn print_list(global: &GlobalOpts, items: &[AccessIp]) -> Result<(), CliError> {
    util::print_list(global, items, |a| AccessIpRow::from(a), |a| a.id.to_string())
}

pub(super) fn print_single(global: &GlobalOpts, item: &AccessIp) -> Result<(), CliError> {
    util::print_single(global, item, detail, |a| a.id.to_string())
}

fn print_items(global: &GlobalOpts, items: &[AccessIp]) -> Result<(), CliError> {
    util::print_items(global, items, |a| AccessIpRow::from(a), detail, |a| {
        a.id.to_string()
    })
}

pub async fn handle<S: AccessIpService>(
    svc: &S,
    args: AccessIpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AccessIpCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch(svc, id?).await }
            })
            .await;
            let access_ips = util::finish_bulk(outcome, "access IP lookup", global)?;
            print_items(global, &access_ips)
        }

        AccessIpCommand::Update { ids, ip } => {
            let req = &PatchAccessIpRequest { ip };
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_access_ip(id, req).await.map_err(|e| {
                        CoreError::api(format!("error updating access IP [{id}]"), e)
                    })?;
                    fetch(svc, id).await
                }
            })
            .await;
            let access_ips = util::finish_bulk(outcome, "access IP update", global)?;
            print_items(global, &access_ips)
        }

        AccessIpCommand::Delete(ids) => {
            let prompt = format!("Delete {} access IP(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_access_ip(id).await.map_err(|e| {
                        CoreError::api(format!("error removing access IP [{id}]"), e)
                    })?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "access IP deletion", global)? {
                util::status(global, format!("Access IP {id} deleted"));
            }
            Ok(())
        }
    }
}
