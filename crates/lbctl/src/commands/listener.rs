//! Listener command handlers, including the listener-scoped certificate,
//! bind and access IP subcommands.

use lbctl_api::types::{
    AccessIp, Bind, Certificate, CreateAccessIpRequest, CreateBindRequest,
    CreateCertificateRequest, CreateListenerRequest, Listener, ListenerMode, PatchBindRequest,
    PatchCertificateRequest, PatchListenerRequest,
};
use lbctl_api::{AccessIpService, BindService, CertificateService, ListenerService};
use lbctl_core::validate::{parse_choice, parse_optional_choice};
use lbctl_core::{CoreError, for_each_id, parse_id};
use tabled::Tabled;

use crate::cli::{
    BindArgs, BindCommand, CertificateArgs, CertificateCommand, GlobalOpts, ListenerAccessIpArgs,
    ListenerAccessIpCommand, ListenerArgs, ListenerCommand, ListenerOptions,
};
use crate::error::CliError;
use crate::output;

use super::{access_ip, util};

// ── Listener ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ListenerRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cluster")]
    cluster_id: i32,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Default Target Group")]
    default_target_group_id: String,
}

impl From<&Listener> for ListenerRow {
    fn from(l: &Listener) -> Self {
        Self {
            id: l.id,
            name: l.name.clone(),
            cluster_id: l.cluster_id,
            mode: l.mode.to_string(),
            default_target_group_id: output::opt(l.default_target_group_id),
        }
    }
}

fn listener_detail(l: &Listener) -> String {
    [
        format!("ID:                   {}", l.id),
        format!("Name:                 {}", l.name),
        format!("Cluster:              {}", l.cluster_id),
        format!("Mode:                 {}", l.mode),
        format!("Default Target Group: {}", output::opt(l.default_target_group_id)),
        format!("HSTS:                 {} (max-age {})", util::yes_no(l.hsts_enabled), l.hsts_maxage),
        format!("Close:                {}", util::yes_no(l.close)),
        format!("Redirect HTTPS:       {}", util::yes_no(l.redirect_https)),
        format!("Access Allow List:    {}", util::yes_no(l.access_is_allow_list)),
        format!("Allow TLS 1.0:        {}", util::yes_no(l.allow_tlsv1)),
        format!("Allow TLS 1.1:        {}", util::yes_no(l.allow_tlsv11)),
        format!("Disable TLS 1.2:      {}", util::yes_no(l.disable_tlsv12)),
        format!("Disable HTTP/2:       {}", util::yes_no(l.disable_http2)),
        format!("HTTP/2 Only:          {}", util::yes_no(l.http2_only)),
        format!("Custom Ciphers:       {}", l.custom_ciphers.as_deref().unwrap_or("")),
        format!("Created:              {}", output::timestamp(l.created_at.as_ref())),
        format!("Updated:              {}", output::timestamp(l.updated_at.as_ref())),
    ]
    .join("\n")
}

fn create_request(
    name: String,
    cluster_id: i32,
    mode: &str,
    o: ListenerOptions,
) -> Result<CreateListenerRequest, CliError> {
    Ok(CreateListenerRequest {
        name,
        cluster_id,
        mode: parse_choice::<ListenerMode>("--mode", mode)?,
        default_target_group_id: o.default_target_group_id,
        hsts_enabled: o.hsts_enabled,
        hsts_maxage: o.hsts_maxage,
        close: o.close,
        redirect_https: o.redirect_https,
        access_is_allow_list: o.access_is_allow_list,
        allow_tlsv1: o.allow_tlsv1,
        allow_tlsv11: o.allow_tlsv11,
        disable_tlsv12: o.disable_tlsv12,
        disable_http2: o.disable_http2,
        http2_only: o.http2_only,
        custom_ciphers: o.custom_ciphers,
    })
}

fn patch_request(
    name: Option<String>,
    mode: Option<&str>,
    o: ListenerOptions,
) -> Result<PatchListenerRequest, CliError> {
    Ok(PatchListenerRequest {
        name,
        mode: parse_optional_choice::<ListenerMode>("--mode", mode)?,
        default_target_group_id: o.default_target_group_id,
        hsts_enabled: o.hsts_enabled,
        hsts_maxage: o.hsts_maxage,
        close: o.close,
        redirect_https: o.redirect_https,
        access_is_allow_list: o.access_is_allow_list,
        allow_tlsv1: o.allow_tlsv1,
        allow_tlsv11: o.allow_tlsv11,
        disable_tlsv12: o.disable_tlsv12,
        disable_http2: o.disable_http2,
        http2_only: o.http2_only,
        custom_ciphers: o.custom_ciphers,
    })
}

async fn fetch<S: ListenerService>(svc: &S, id: i32) -> Result<Listener, CoreError> {
    svc.get_listener(id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving listener [{id}]"), e))
}

pub async fn handle<S>(svc: &S, args: ListenerArgs, global: &GlobalOpts) -> Result<(), CliError>
where
    S: ListenerService + CertificateService + BindService + AccessIpService,
{
    match args.command {
        ListenerCommand::List(list) => {
            let params = util::list_params(&list)?;
            let listeners = svc
                .get_listeners(&params)
                .await
                .map_err(|e| CoreError::api("error retrieving listeners", e))?;
            util::print_list(global, &listeners, |l| ListenerRow::from(l), |l| {
                l.id.to_string()
            })
        }

        ListenerCommand::Show(ids) => {
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch(svc, id?).await }
            })
            .await;
            let listeners = util::finish_bulk(outcome, "listener lookup", global)?;
            util::print_items(
                global,
                &listeners,
                |l| ListenerRow::from(l),
                listener_detail,
                |l| l.id.to_string(),
            )
        }

        ListenerCommand::Create {
            name,
            cluster_id,
            mode,
            options,
        } => {
            let req = create_request(name, cluster_id, &mode, options)?;
            let id = svc
                .create_listener(&req)
                .await
                .map_err(|e| CoreError::api("error creating listener", e))?;
            let listener = fetch(svc, id).await?;
            util::print_single(global, &listener, listener_detail, |l| l.id.to_string())
        }

        ListenerCommand::Update {
            ids,
            name,
            mode,
            options,
        } => {
            let req = &patch_request(name, mode.as_deref(), options)?;
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_listener(id, req).await.map_err(|e| {
                        CoreError::api(format!("error updating listener [{id}]"), e)
                    })?;
                    fetch(svc, id).await
                }
            })
            .await;
            let listeners = util::finish_bulk(outcome, "listener update", global)?;
            util::print_items(
                global,
                &listeners,
                |l| ListenerRow::from(l),
                listener_detail,
                |l| l.id.to_string(),
            )
        }

        ListenerCommand::Delete(ids) => {
            let prompt = format!("Delete {} listener(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_listener(id).await.map_err(|e| {
                        CoreError::api(format!("error removing listener [{id}]"), e)
                    })?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "listener deletion", global)? {
                util::status(global, format!("Listener {id} deleted"));
            }
            Ok(())
        }

        ListenerCommand::Certificate(args) => handle_certificate(svc, args, global).await,
        ListenerCommand::Bind(args) => handle_bind(svc, args, global).await,
        ListenerCommand::Accessip(args) => handle_access_ip(svc, args, global).await,
    }
}

// ── Certificates ────────────────────────────────────────────────────

#[derive(Tabled)]
struct CertificateRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Listener")]
    listener_id: i32,
    #[tabled(rename = "Expires")]
    expires_at: String,
}

impl From<&Certificate> for CertificateRow {
    fn from(c: &Certificate) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            listener_id: c.listener_id,
            expires_at: output::timestamp(c.expires_at.as_ref()),
        }
    }
}

fn certificate_detail(c: &Certificate) -> String {
    [
        format!("ID:        {}", c.id),
        format!("Name:      {}", c.name),
        format!("Listener:  {}", c.listener_id),
        format!("Expires:   {}", output::timestamp(c.expires_at.as_ref())),
        format!("Created:   {}", output::timestamp(c.created_at.as_ref())),
        format!("Updated:   {}", output::timestamp(c.updated_at.as_ref())),
    ]
    .join("\n")
}

async fn fetch_certificate<S: CertificateService>(
    svc: &S,
    listener_id: i32,
    id: i32,
) -> Result<Certificate, CoreError> {
    svc.get_listener_certificate(listener_id, id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving certificate [{id}]"), e))
}

async fn handle_certificate<S: CertificateService>(
    svc: &S,
    args: CertificateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CertificateCommand::List { listener_id, list } => {
            let listener_id = parse_id(&listener_id)?;
            let params = util::list_params(&list)?;
            let certificates = svc
                .get_listener_certificates(listener_id, &params)
                .await
                .map_err(|e| {
                    CoreError::api(
                        format!("error retrieving certificates for listener [{listener_id}]"),
                        e,
                    )
                })?;
            util::print_list(global, &certificates, |c| CertificateRow::from(c), |c| {
                c.id.to_string()
            })
        }

        CertificateCommand::Show { listener_id, ids } => {
            let listener_id = parse_id(&listener_id)?;
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch_certificate(svc, listener_id, id?).await }
            })
            .await;
            let certificates = util::finish_bulk(outcome, "certificate lookup", global)?;
            util::print_items(
                global,
                &certificates,
                |c| CertificateRow::from(c),
                certificate_detail,
                |c| c.id.to_string(),
            )
        }

        CertificateCommand::Create {
            listener_id,
            name,
            key_file,
            certificate_file,
            ca_bundle_file,
        } => {
            let listener_id = parse_id(&listener_id)?;
            let req = CreateCertificateRequest {
                name,
                key: util::read_pem("--key-file", &key_file)?,
                certificate: util::read_pem("--certificate-file", &certificate_file)?,
                ca_bundle: util::read_optional_pem("--ca-bundle-file", ca_bundle_file.as_deref())?,
            };
            let id = svc
                .create_listener_certificate(listener_id, &req)
                .await
                .map_err(|e| CoreError::api("error creating certificate", e))?;
            let certificate = fetch_certificate(svc, listener_id, id).await?;
            util::print_single(global, &certificate, certificate_detail, |c| {
                c.id.to_string()
            })
        }

        CertificateCommand::Update {
            listener_id,
            ids,
            name,
            key_file,
            certificate_file,
            ca_bundle_file,
        } => {
            let listener_id = parse_id(&listener_id)?;
            let req = &PatchCertificateRequest {
                name,
                key: util::read_optional_pem("--key-file", key_file.as_deref())?,
                certificate: util::read_optional_pem(
                    "--certificate-file",
                    certificate_file.as_deref(),
                )?,
                ca_bundle: util::read_optional_pem("--ca-bundle-file", ca_bundle_file.as_deref())?,
            };
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_listener_certificate(listener_id, id, req)
                        .await
                        .map_err(|e| {
                            CoreError::api(format!("error updating certificate [{id}]"), e)
                        })?;
                    fetch_certificate(svc, listener_id, id).await
                }
            })
            .await;
            let certificates = util::finish_bulk(outcome, "certificate update", global)?;
            util::print_items(
                global,
                &certificates,
                |c| CertificateRow::from(c),
                certificate_detail,
                |c| c.id.to_string(),
            )
        }

        CertificateCommand::Delete { listener_id, ids } => {
            let listener_id = parse_id(&listener_id)?;
            let prompt = format!("Delete {} certificate(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_listener_certificate(listener_id, id)
                        .await
                        .map_err(|e| {
                            CoreError::api(format!("error removing certificate [{id}]"), e)
                        })?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "certificate deletion", global)? {
                util::status(global, format!("Certificate {id} deleted"));
            }
            Ok(())
        }
    }
}

// ── Binds ───────────────────────────────────────────────────────────

#[derive(Tabled)]
struct BindRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Listener")]
    listener_id: i32,
    #[tabled(rename = "VIP")]
    vip_id: i32,
    #[tabled(rename = "Port")]
    port: i32,
}

impl From<&Bind> for BindRow {
    fn from(b: &Bind) -> Self {
        Self {
            id: b.id,
            listener_id: b.listener_id,
            vip_id: b.vip_id,
            port: b.port,
        }
    }
}

fn bind_detail(b: &Bind) -> String {
    [
        format!("ID:        {}", b.id),
        format!("Listener:  {}", b.listener_id),
        format!("VIP:       {}", b.vip_id),
        format!("Port:      {}", b.port),
        format!("Created:   {}", output::timestamp(b.created_at.as_ref())),
        format!("Updated:   {}", output::timestamp(b.updated_at.as_ref())),
    ]
    .join("\n")
}

async fn fetch_bind<S: BindService>(svc: &S, listener_id: i32, id: i32) -> Result<Bind, CoreError> {
    svc.get_listener_bind(listener_id, id)
        .await
        .map_err(|e| CoreError::api(format!("error retrieving bind [{id}]"), e))
}

async fn handle_bind<S: BindService>(
    svc: &S,
    args: BindArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BindCommand::List { listener_id, list } => {
            let listener_id = parse_id(&listener_id)?;
            let params = util::list_params(&list)?;
            let binds = svc
                .get_listener_binds(listener_id, &params)
                .await
                .map_err(|e| {
                    CoreError::api(
                        format!("error retrieving binds for listener [{listener_id}]"),
                        e,
                    )
                })?;
            util::print_list(global, &binds, |b| BindRow::from(b), |b| b.id.to_string())
        }

        BindCommand::Show { listener_id, ids } => {
            let listener_id = parse_id(&listener_id)?;
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move { fetch_bind(svc, listener_id, id?).await }
            })
            .await;
            let binds = util::finish_bulk(outcome, "bind lookup", global)?;
            util::print_items(global, &binds, |b| BindRow::from(b), bind_detail, |b| {
                b.id.to_string()
            })
        }

        BindCommand::Create {
            listener_id,
            vip_id,
            port,
        } => {
            let listener_id = parse_id(&listener_id)?;
            let req = CreateBindRequest { vip_id, port };
            let id = svc
                .create_listener_bind(listener_id, &req)
                .await
                .map_err(|e| CoreError::api("error creating bind", e))?;
            let bind = fetch_bind(svc, listener_id, id).await?;
            util::print_single(global, &bind, bind_detail, |b| b.id.to_string())
        }

        BindCommand::Update {
            listener_id,
            ids,
            vip_id,
            port,
        } => {
            let listener_id = parse_id(&listener_id)?;
            let req = &PatchBindRequest { vip_id, port };
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.patch_listener_bind(listener_id, id, req)
                        .await
                        .map_err(|e| CoreError::api(format!("error updating bind [{id}]"), e))?;
                    fetch_bind(svc, listener_id, id).await
                }
            })
            .await;
            let binds = util::finish_bulk(outcome, "bind update", global)?;
            util::print_items(global, &binds, |b| BindRow::from(b), bind_detail, |b| {
                b.id.to_string()
            })
        }

        BindCommand::Delete { listener_id, ids } => {
            let listener_id = parse_id(&listener_id)?;
            let prompt = format!("Delete {} bind(s)?", ids.ids.len());
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let outcome = for_each_id(&ids.ids, |raw| {
                let id = parse_id(raw);
                async move {
                    let id = id?;
                    svc.delete_listener_bind(listener_id, id)
                        .await
                        .map_err(|e| CoreError::api(format!("error removing bind [{id}]"), e))?;
                    Ok::<_, CoreError>(id)
                }
            })
            .await;
            for id in util::finish_bulk(outcome, "bind deletion", global)? {
                util::status(global, format!("Bind {id} deleted"));
            }
            Ok(())
        }
    }
}

// ── Access IPs ──────────────────────────────────────────────────────

async fn handle_access_ip<S: AccessIpService>(
    svc: &S,
    args: ListenerAccessIpArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ListenerAccessIpCommand::List { listener_id, list } => {
            let listener_id = parse_id(&listener_id)?;
            let params = util::list_params(&list)?;
            let access_ips: Vec<AccessIp> = svc
                .get_listener_access_ips(listener_id, &params)
                .await
                .map_err(|e| {
                    CoreError::api(
                        format!("error retrieving access IPs for listener [{listener_id}]"),
                        e,
                    )
                })?;
            access_ip::print_list(global, &access_ips)
        }

        ListenerAccessIpCommand::Create { listener_id, ip } => {
            let listener_id = parse_id(&listener_id)?;
            let id = svc
                .create_listener_access_ip(listener_id, &CreateAccessIpRequest { ip })
                .await
                .map_err(|e| CoreError::api("error creating access IP", e))?;
            let access_ip = access_ip::fetch(svc, id).await?;
            access_ip::print_single(global, &access_ip)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::cli::{Cli, Command, LoadBalancerCommand};

    fn parse(args: &[&str]) -> ListenerCommand {
        let mut argv = vec!["lbctl", "lb", "listener"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Loadbalancer(lb) => match lb.command {
                LoadBalancerCommand::Listener(l) => l.command,
                other => panic!("unexpected command {other:?}"),
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn create_request_only_carries_supplied_flags() {
        let ListenerCommand::Create {
            name,
            cluster_id,
            mode,
            options,
        } = parse(&[
            "create",
            "--name",
            "web",
            "--cluster-id",
            "3",
            "--mode",
            "https",
            "--hsts-enabled",
            "true",
            "--disable-http2",
            "false",
        ])
        else {
            panic!("expected create");
        };

        let req = create_request(name, cluster_id, &mode, options).unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "web",
                "cluster_id": 3,
                "mode": "https",
                "hsts_enabled": true,
                "disable_http2": false,
            })
        );
    }

    #[test]
    fn unsupported_mode_is_rejected() {
        let ListenerCommand::Update {
            name, mode, options, ..
        } = parse(&["update", "1", "--mode", "udp"])
        else {
            panic!("expected update");
        };

        let err = patch_request(name, mode.as_deref(), options).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--mode"), "{msg}");
        assert!(msg.contains("'udp'"), "{msg}");
        assert!(msg.contains("http, https, tcp"), "{msg}");
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let ListenerCommand::Update {
            name, mode, options, ..
        } = parse(&["update", "1", "2"])
        else {
            panic!("expected update");
        };
        let req = patch_request(name, mode.as_deref(), options).unwrap();
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({}));
    }
}
