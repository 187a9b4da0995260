//! VIP command handlers (read-only).

use lbctl_api::VipService;
use lbctl_api::types::Vip;
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ReadOnlyCommand, VipArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct VipRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Cluster")]
    cluster_id: i32,
    #[tabled(rename = "Internal CIDR")]
    internal_cidr: String,
    #[tabled(rename = "External CIDR")]
    external_cidr: String,
    #[tabled(rename = "MAC")]
    mac_address: String,
}

impl From<&Vip> for VipRow {
    fn from(v: &Vip) -> Self {
        Self {
            id: v.id,
            cluster_id: v.cluster_id,
            internal_cidr: v.internal_cidr.clone().unwrap_or_default(),
            external_cidr: v.external_cidr.clone().unwrap_or_default(),
            mac_address: v.mac_address.clone().unwrap_or_default(),
        }
    }
}

fn detail(v: &Vip) -> String {
    [
        format!("ID:             {}", v.id),
        format!("Cluster:        {}", v.cluster_id),
        format!("Internal CIDR:  {}", v.internal_cidr.as_deref().unwrap_or("")),
        format!("External CIDR:  {}", v.external_cidr.as_deref().unwrap_or("")),
        format!("MAC Address:    {}", v.mac_address.as_deref().unwrap_or("")),
        format!("Created:        {}", output::timestamp(v.created_at.as_ref())),
        format!("Updated:        {}", output::timestamp(v.updated_at.as_ref())),
    ]
    .join("\n")
}

pub async fn handle<S: VipService>(
    svc: &S,
    args: VipArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReadOnlyCommand::List(list) => {
            let params = util::list_params(&list)?;
            let vips = svc
                .get_vips(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving VIPs", e))?;
            util::print_list(global, &vips, |v| VipRow::from(v), |v| v.id.to_string())
        }

        ReadOnlyCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.get_vip(id)
                        .await
                        .map_err(|e| CoreError::api(format!("error retrieving VIP [{id}]"), e))
                }
            })
            .await;
            let vips = util::finish_bulk(outcome, "VIP lookup", global)?;
            util::print_items(global, &vips, |v| VipRow::from(v), detail, |v| {
                v.id.to_string()
            })
        }
    }
}
