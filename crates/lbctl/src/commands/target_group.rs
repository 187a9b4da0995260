//! Target group command handlers, including the `target` subcommands.

use lbctl_api::types::{
    CreateTargetGroupRequest, CreateTargetRequest, MonitorHttpVersion, MonitorMethod,
    PatchTargetGroupRequest, PatchTargetRequest, Target, TargetGroup, TargetGroupBalance,
    TargetGroupMode,
};
use lbctl_api::{TargetGroupService, TargetService};
use lbctl_core::validate::{parse_choice, parse_optional_choice};
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{
    GlobalOpts, TargetArgs, TargetCommand, TargetGroupArgs, TargetGroupCommand,
    TargetGroupOptions, TargetOptions,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Target group ────────────────────────────────────────────────────

#[derive(Tabled)]
struct TargetGroupRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cluster")]
    cluster_id: i32,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Mode")]
    mode: String,
}

impl From<&TargetGroup> for TargetGroupRow {
    fn from(t: &TargetGroup) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            cluster_id: t.cluster_id,
            balance: t.balance.to_string(),
            mode: t.mode.to_string(),
        }
    }
}

fn target_group_detail(t: &TargetGroup) -> String {
    let s = |v: Option<&str>| v.unwrap_or("").to_owned();
    [
        format!("ID:                {}", t.id),
        format!("Name:              {}", t.name),
        format!("Cluster:           {}", t.cluster_id),
        format!("Balance:           {}", t.balance),
        format!("Mode:              {}", t.mode),
        format!("Close:             {}", util::yes_no(t.close)),
        format!("Sticky:            {}", util::yes_no(t.sticky)),
        format!("Cookie Options:    {}", s(t.cookie_opts.as_deref())),
        format!("Source:            {}", s(t.source.as_deref())),
        format!("Connect Timeout:   {}", output::opt(t.timeouts_connect)),
        format!("Server Timeout:    {}", output::opt(t.timeouts_server)),
        format!("Custom Options:    {}", s(t.custom_options.as_deref())),
        format!("Monitor URL:       {}", s(t.monitor_url.as_deref())),
        format!("Monitor Method:    {}", output::opt(t.monitor_method)),
        format!("Monitor Host:      {}", s(t.monitor_host.as_deref())),
        format!("Monitor HTTP:      {}", output::opt(t.monitor_http_version)),
        format!("Monitor Expect:    {}", s(t.monitor_expect.as_deref())),
        format!("TCP Monitoring:    {}", util::yes_no(t.monitor_tcp_monitoring)),
        format!("Check Port:        {}", output::opt(t.check_port)),
        format!("Send PROXY:        {}", util::yes_no(t.send_proxy)),
        format!("Send PROXY v2:     {}", util::yes_no(t.send_proxy_v2)),
        format!("SSL:               {}", util::yes_no(t.ssl)),
        format!("SSL Verify:        {}", util::yes_no(t.ssl_verify)),
        format!("SNI:               {}", util::yes_no(t.sni)),
        format!("Created:           {}", output::timestamp(t.created_at.as_ref())),
        format!("Updated:           {}", output::timestamp(t.updated_at.as_ref())),
    ]
    .join("\n")
}

fn create_target_group_request(
    name: String,
    cluster_id: i32,
    balance: &str,
    mode: &str,
    o: TargetGroupOptions,
) -> Result<CreateTargetGroupRequest, CliError> {
    Ok(CreateTargetGroupRequest {
        name,
        cluster_id,
        balance: parse_choice::<TargetGroupBalance>("--balance", balance)?,
        mode: parse_choice::<TargetGroupMode>("--mode", mode)?,
        monitor_method: parse_optional_choice::<MonitorMethod>(
            "--monitor-method",
            o.monitor_method.as_deref(),
        )?,
        monitor_http_version: parse_optional_choice::<MonitorHttpVersion>(
            "--monitor-http-version",
            o.monitor_http_version.as_deref(),
        )?,
        close: o.close,
        sticky: o.sticky,
        cookie_opts: o.cookie_opts,
        source: o.source,
        timeouts_connect: o.timeouts_connect,
        timeouts_server: o.timeouts_server,
        custom_options: o.custom_options,
        monitor_url: o.monitor_url,
        monitor_host: o.monitor_host,
        monitor_expect: o.monitor_expect,
        monitor_tcp_monitoring: o.monitor_tcp_monitoring,
        check_port: o.check_port,
        send_proxy: o.send_proxy,
        send_proxy_v2: o.send_proxy_v2,
        ssl: o.ssl,
        ssl_verify: o.ssl_verify,
        sni: o.sni,
    })
}

fn patch_target_group_request(
    name: Option<String>,
    balance: Option<&str>,
    mode: Option<&str>,
    o: TargetGroupOptions,
) -> Result<PatchTargetGroupRequest, CliError> {
    Ok(PatchTargetGroupRequest {
        name,
        balance: parse_optional_choice::<TargetGroupBalance>("--balance", balance)?,
        mode: parse_optional_choice::<TargetGroupMode>("--mode", mode)?,
        monitor_method: parse_optional_choice::<MonitorMethod>(
            "--monitor-method",
            o.monitor_method.as_deref(),
        )?,
        monitor_http_version: parse_optional_choice::<MonitorHttpVersion>(
            "--monitor-http-version",
            o.monitor_http_version.as_deref(),
        )?,
        close: o.close,
        sticky: o.sticky,
        cookie_opts: o.cookie_opts,
        source: o.source,
        timeouts_connect: o.timeouts_connect,
        timeouts_server: o.timeouts_server,
        custom_options: o.custom_options,
        monitor_url: o.monitor_url,
        monitor_host: o.monitor_host,
        monitor_expect: o.monitor_expect,
        monitor_tcp_monitoring: o.monitor_tcp_monitoring,
        check_port: o.check_port,
        send_proxy: o.send_proxy,
        send_proxy_v2: o.send_proxy_v2,
        ssl: o.ssl,
        ssl_verify: o.ssl_verify,
        sni: o.sni,
    })
}

async fn fetch<S: TargetGroupService>(svc: &S, id: i32) -> Result<TargetGroup, CoreError> {
    svc.get_target_group(id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving target group [{id}]"), e))
}

#[allow(clippy::too_many_lines)]
pub async fn handle<S>(svc: &S, args: TargetGroupArgs, global: &GlobalOpts) -> Result<(), CliError>
where
    S: TargetGroupService + TargetService,
{
    match args.command {
        TargetGroupCommand::List(list) => {
            let params = util::list_params(&list)?;
            let groups = svc
                .get_target_groups(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving target groups", e))?;
            util::print_list(global, &groups, |t| TargetGroupRow::from(t), |t| {
                t.id.to_string()
            })
        }

        TargetGroupCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch(svc, id?).await }
            })
            .await;
            let groups = util::finish_bulk(outcome, "target group lookup", global)?;
            util::print_items(
                global,
                &groups,
                |t| TargetGroupRow::from(t),
                target_group_detail,
                |t| t.id.to_string(),
            )
        }

        TargetGroupCommand::Create {
            name,
            cluster_id,
            balance,
            mode,
            options,
        } => {
            let req = create_target_group_request(name, cluster_id, &balance, &mode, options)?;
            let id = svc
                .create_target_group(&req)
                .await
                .map_err(|e| CoreError::api("error creating target group", e))?;
            let group = fetch(svc, id).await?;
            util::print_single(global, &group, target_group_detail, |t| t.id.to_string())
        }

        TargetGroupCommand::Update {
            ids,
            name,
            balance,
            mode,
            options,
        } => {
            let req = &patch_target_group_request(
                name,
                balance.as_deref(),
                mode.as_deref(),
                options,
            )?;
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_target_group(id, req).await.map_err(|e| {
                        CoreError::api(format!("error updating target group [{id}]"), e)
                    })?;
                    fetch(svc, id).await
                }
            })
            .await;
            let groups = util::finish_bulk(outcome, "target group update", global)?;
            util::print_items(
                global,
                &groups,
                |t| TargetGroupRow::from(t),
                target_group_detail,
                |t| t.id.to_string(),
            )
        }

        TargetGroupCommand::Delete(ids) => {
            let prompt = format!("Delete {} target group(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_target_group(id).await.map_err(|e| {
                        CoreError::api(format!("error removing target group [{id}]"), e)
                    })?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "target group deletion", global)? {
                util::status(global, format!("Target group {id} deleted"));
            }
            Ok(())
        }

        TargetGroupCommand::Target(args) => handle_target(svc, args, global).await,
    }
}

// ── Targets ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Port")]
    port: i32,
    #[tabled(rename = "Weight")]
    weight: i32,
    #[tabled(rename = "Backup")]
    backup: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Target> for TargetRow {
    fn from(t: &Target) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            ip: t.ip.clone(),
            port: t.port,
            weight: t.weight,
            backup: util::yes_no(t.backup),
            active: util::yes_no(t.active),
        }
    }
}

fn target_detail(t: &Target) -> String {
    [
        format!("ID:              {}", t.id),
        format!("Target Group:    {}", t.target_group_id),
        format!("Name:            {}", t.name),
        format!("IP:              {}", t.ip),
        format!("Port:            {}", t.port),
        format!("Weight:          {}", t.weight),
        format!("Backup:          {}", util::yes_no(t.backup)),
        format!("Check Interval:  {}", output::opt(t.check_interval)),
        format!("Check SSL:       {}", util::yes_no(t.check_ssl)),
        format!("Check Rise:      {}", output::opt(t.check_rise)),
        format!("Check Fall:      {}", output::opt(t.check_fall)),
        format!("Disable HTTP/2:  {}", util::yes_no(t.disable_http2)),
        format!("HTTP/2 Only:     {}", util::yes_no(t.http2_only)),
        format!("Active:          {}", util::yes_no(t.active)),
        format!("Created:         {}", output::timestamp(t.created_at.as_ref())),
        format!("Updated:         {}", output::timestamp(t.updated_at.as_ref())),
    ]
    .join("\n")
}

fn create_target_request(
    name: Option<String>,
    ip: String,
    port: i32,
    o: TargetOptions,
) -> CreateTargetRequest {
    CreateTargetRequest {
        name,
        ip,
        port,
        weight: o.weight,
        backup: o.backup,
        check_interval: o.check_interval,
        check_ssl: o.check_ssl,
        check_rise: o.check_rise,
        check_fall: o.check_fall,
        disable_http2: o.disable_http2,
        http2_only: o.http2_only,
        active: o.active,
    }
}

fn patch_target_request(
    name: Option<String>,
    ip: Option<String>,
    port: Option<i32>,
    o: TargetOptions,
) -> PatchTargetRequest {
    PatchTargetRequest {
        name,
        ip,
        port,
        weight: o.weight,
        backup: o.backup,
        check_interval: o.check_interval,
        check_ssl: o.check_ssl,
        check_rise: o.check_rise,
        check_fall: o.check_fall,
        disable_http2: o.disable_http2,
        http2_only: o.http2_only,
        active: o.active,
    }
}

async fn fetch_target<S: TargetService>(
    svc: &S,
    target_group_id: i32,
    id: i32,
) -> Result<Target, CoreError> {
    svc.get_target(target_group_id, id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving target [{id}]"), e))
}

async fn handle_target<S: TargetService>(
    svc: &S,
    args: TargetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TargetCommand::List {
            target_group_id,
            list,
        } => {
            let tg = parse_id(&target_group_id)?;
            let params = util::list_params(&list)?;
            let targets = svc.get_targets(tg, &params).await.map_err(|e| {
                CoreError::api(format!("error retrieving targets for target group [{tg}]"), e)
            })?;
            util::print_list(global, &targets, |t| TargetRow::from(t), |t| t.id.to_string())
        }

        TargetCommand::Show {
            target_group_id,
            ids,
        } => {
            let tg = parse_id(&target_group_id)?;
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch_target(svc, tg, id?).await }
            })
            .await;
            let targets = util::finish_bulk(outcome, "target lookup", global)?;
            util::print_items(
                global,
                &targets,
                |t| TargetRow::from(t),
                target_detail,
                |t| t.id.to_string(),
            )
        }

        TargetCommand::Create {
            target_group_id,
            ip,
            port,
            name,
            options,
        } => {
            let tg = parse_id(&target_group_id)?;
            let req = create_target_request(name, ip, port, options);
            let id = svc
                .create_target(tg, &req)
                .await
                .map_err(|e| CoreError::api("error creating target", e))?;
            let target = fetch_target(svc, tg, id).await?;
            util::print_single(global, &target, target_detail, |t| t.id.to_string())
        }

        TargetCommand::Update {
            target_group_id,
            ids,
            name,
            ip,
            port,
            options,
        } => {
            let tg = parse_id(&target_group_id)?;
            let req = &patch_target_request(name, ip, port, options);
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_target(tg, id, req)
                        .await
                        .map_err(|e| CoreError::api(format!("error updating target [{id}]"), e))?;
                    fetch_target(svc, tg, id).await
                }
            })
            .await;
            let targets = util::finish_bulk(outcome, "target update", global)?;
            util::print_items(
                global,
                &targets,
                |t| TargetRow::from(t),
                target_detail,
                |t| t.id.to_string(),
            )
        }

        TargetCommand::Delete {
            target_group_id,
            ids,
        } => {
            let tg = parse_id(&target_group_id)?;
            let prompt = format!("Delete {} target(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_target(tg, id)
                        .await
                        .map_err(|e| CoreError::api(format!("error removing target [{id}]"), e))?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "target deletion", global)? {
                util::status(global, format!("Target {id} deleted"));
            }
            Ok(())
        }
    }
}
