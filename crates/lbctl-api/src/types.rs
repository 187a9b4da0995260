// Wire types for the load balancer API (v2).
//
// Response envelopes: `{"data": T}` for single items, `{"data": [T],
// "meta": {"pagination": {...}}}` for collections. Create endpoints answer
// with `{"data": {"id": ...}}`. Request DTOs skip `None` fields so the API
// can distinguish "absent" from an explicit zero/false.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Envelopes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total: u32,
    pub count: u32,
    pub per_page: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollectionMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: CollectionMeta,
}

/// Body of a create response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedId<I> {
    pub id: I,
}

// ── Cluster ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub deployed: bool,
    #[serde(default)]
    pub deployed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateClusterRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchClusterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ── Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: String,
    pub name: String,
    pub cluster_id: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateConfigurationRequest {
    pub name: String,
    pub cluster_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchConfigurationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ── Listener ────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListenerMode {
    Http,
    Https,
    Tcp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Listener {
    pub id: i32,
    pub name: String,
    pub cluster_id: i32,
    pub mode: ListenerMode,
    #[serde(default)]
    pub hsts_enabled: bool,
    #[serde(default)]
    pub hsts_maxage: i32,
    #[serde(default)]
    pub close: bool,
    #[serde(default)]
    pub redirect_https: bool,
    #[serde(default)]
    pub default_target_group_id: Option<i32>,
    #[serde(default)]
    pub access_is_allow_list: bool,
    #[serde(default)]
    pub allow_tlsv1: bool,
    #[serde(default)]
    pub allow_tlsv11: bool,
    #[serde(default)]
    pub disable_tlsv12: bool,
    #[serde(default)]
    pub disable_http2: bool,
    #[serde(default)]
    pub http2_only: bool,
    #[serde(default)]
    pub custom_ciphers: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateListenerRequest {
    pub name: String,
    pub cluster_id: i32,
    pub mode: ListenerMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target_group_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_maxage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_is_allow_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tlsv1: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tlsv11: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_tlsv12: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ciphers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchListenerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ListenerMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target_group_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_maxage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_is_allow_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tlsv1: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_tlsv11: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_tlsv12: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ciphers: Option<String>,
}

// ── Target group ────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::VariantNames,
)]
pub enum TargetGroupBalance {
    #[serde(rename = "roundrobin")]
    #[strum(serialize = "roundrobin")]
    RoundRobin,
    #[serde(rename = "static-rr")]
    #[strum(serialize = "static-rr")]
    StaticRoundRobin,
    #[serde(rename = "leastconn")]
    #[strum(serialize = "leastconn")]
    LeastConnections,
    #[serde(rename = "source")]
    #[strum(serialize = "source")]
    Source,
    #[serde(rename = "uri")]
    #[strum(serialize = "uri")]
    Uri,
    #[serde(rename = "url_param")]
    #[strum(serialize = "url_param")]
    UrlParam,
    #[serde(rename = "hdr")]
    #[strum(serialize = "hdr")]
    Header,
    #[serde(rename = "rdp-cookie")]
    #[strum(serialize = "rdp-cookie")]
    RdpCookie,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetGroupMode {
    Http,
    Tcp,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::VariantNames,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MonitorMethod {
    Get,
    Head,
    Options,
    Post,
    Put,
    Delete,
    Patch,
    Trace,
    Connect,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
    strum::Display, strum::EnumString, strum::VariantNames,
)]
pub enum MonitorHttpVersion {
    #[serde(rename = "1.0")]
    #[strum(serialize = "1.0")]
    Http10,
    #[serde(rename = "1.1")]
    #[strum(serialize = "1.1")]
    Http11,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct TargetGroup {
    pub id: i32,
    pub name: String,
    pub cluster_id: i32,
    pub balance: TargetGroupBalance,
    pub mode: TargetGroupMode,
    #[serde(default)]
    pub close: bool,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub cookie_opts: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timeouts_connect: Option<i32>,
    #[serde(default)]
    pub timeouts_server: Option<i32>,
    #[serde(default)]
    pub custom_options: Option<String>,
    #[serde(default)]
    pub monitor_url: Option<String>,
    #[serde(default)]
    pub monitor_method: Option<MonitorMethod>,
    #[serde(default)]
    pub monitor_host: Option<String>,
    #[serde(default)]
    pub monitor_http_version: Option<MonitorHttpVersion>,
    #[serde(default)]
    pub monitor_expect: Option<String>,
    #[serde(default)]
    pub monitor_tcp_monitoring: bool,
    #[serde(default)]
    pub check_port: Option<i32>,
    #[serde(default)]
    pub send_proxy: bool,
    #[serde(default)]
    pub send_proxy_v2: bool,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default)]
    pub ssl_verify: bool,
    #[serde(default)]
    pub sni: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTargetGroupRequest {
    pub name: String,
    pub cluster_id: i32,
    pub balance: TargetGroupBalance,
    pub mode: TargetGroupMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_opts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_connect: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_server: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_method: Option<MonitorMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_http_version: Option<MonitorHttpVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_expect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_tcp_monitoring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_proxy_v2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchTargetGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<TargetGroupBalance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TargetGroupMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_opts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_connect: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_server: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_method: Option<MonitorMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_http_version: Option<MonitorHttpVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_expect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_tcp_monitoring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_proxy_v2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<bool>,
}

// ── Target ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Target {
    pub id: i32,
    pub target_group_id: i32,
    #[serde(default)]
    pub name: String,
    pub ip: String,
    pub port: i32,
    #[serde(default)]
    pub weight: i32,
    #[serde(default)]
    pub backup: bool,
    #[serde(default)]
    pub check_interval: Option<i32>,
    #[serde(default)]
    pub check_ssl: bool,
    #[serde(default)]
    pub check_rise: Option<i32>,
    #[serde(default)]
    pub check_fall: Option<i32>,
    #[serde(default)]
    pub disable_http2: bool,
    #[serde(default)]
    pub http2_only: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTargetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ip: String,
    pub port: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_rise: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_fall: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchTargetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_interval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_rise: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_fall: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_http2: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

// ── Certificate ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i32,
    pub listener_id: i32,
    pub name: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCertificateRequest {
    pub name: String,
    pub key: String,
    pub certificate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchCertificateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
}

// ── Access IP ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessIp {
    pub id: i32,
    pub ip: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAccessIpRequest {
    pub ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchAccessIpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

// ── Bind ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bind {
    pub id: i32,
    pub listener_id: i32,
    pub vip_id: i32,
    pub port: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBindRequest {
    pub vip_id: i32,
    pub port: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchBindRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

// ── VIP ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vip {
    pub id: i32,
    pub cluster_id: i32,
    #[serde(default)]
    pub internal_cidr: Option<String>,
    #[serde(default)]
    pub external_cidr: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Deployment ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: i32,
    pub cluster_id: i32,
    #[serde(default)]
    pub successful: bool,
    #[serde(default)]
    pub requested_by_type: Option<String>,
    #[serde(default)]
    pub requested_by_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── ACL ─────────────────────────────────────────────────────────────

/// Value of an ACL argument: a single string, a list of strings, or any
/// other JSON the API hands back (kept verbatim so it survives a
/// read-modify-write of the parent ACL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AclArgumentValue {
    Single(String),
    Multiple(Vec<String>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AclArgument {
    pub name: String,
    pub value: AclArgumentValue,
}

pub type AclArguments = BTreeMap<String, AclArgument>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AclCondition {
    pub name: String,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub arguments: AclArguments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AclAction {
    pub name: String,
    #[serde(default)]
    pub arguments: AclArguments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acl {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub listener_id: Option<i32>,
    #[serde(default)]
    pub target_group_id: Option<i32>,
    #[serde(default)]
    pub conditions: Vec<AclCondition>,
    #[serde(default)]
    pub actions: Vec<AclAction>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAclRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listener_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_group_id: Option<i32>,
    pub conditions: Vec<AclCondition>,
    pub actions: Vec<AclAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchAclRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<AclCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<AclAction>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn acl_argument_values_keep_their_shape() {
        let raw = json!({
            "name": "header_matches",
            "arguments": {
                "header": { "name": "header", "value": "host" },
                "values": { "name": "values", "value": ["a.com", "b.com"] },
                "port": { "name": "port", "value": 443 }
            }
        });
        let action: AclAction = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(
            action.arguments["header"].value,
            AclArgumentValue::Single("host".into())
        );
        assert_eq!(
            action.arguments["values"].value,
            AclArgumentValue::Multiple(vec!["a.com".into(), "b.com".into()])
        );
        assert_eq!(
            action.arguments["port"].value,
            AclArgumentValue::Other(json!(443))
        );
        assert_eq!(serde_json::to_value(&action).unwrap(), raw);
    }

    #[test]
    fn patch_request_omits_unset_fields() {
        let patch = PatchTargetGroupRequest {
            sticky: Some(false),
            ..PatchTargetGroupRequest::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "sticky": false }));
    }

    #[test]
    fn patch_acl_keeps_empty_action_list() {
        let patch = PatchAclRequest {
            actions: Some(Vec::new()),
            ..PatchAclRequest::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "actions": [] }));
    }

    #[test]
    fn closed_set_values_use_api_spelling() {
        assert_eq!(
            serde_json::to_value(TargetGroupBalance::StaticRoundRobin).unwrap(),
            json!("static-rr")
        );
        assert_eq!(TargetGroupBalance::StaticRoundRobin.to_string(), "static-rr");
        assert_eq!("GET".parse::<MonitorMethod>().unwrap(), MonitorMethod::Get);
        assert_eq!(
            serde_json::to_value(MonitorHttpVersion::Http11).unwrap(),
            json!("1.1")
        );
    }
}
