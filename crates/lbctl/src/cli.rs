//! Clap derive structures for the `lbctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Closed-set values (balance, modes, monitor settings) are taken as
//! strings here and validated by the handlers, so the error names the
//! flag, the value and the allowed set.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lbctl -- manage load balancer clusters from the command line
#[derive(Debug, Parser)]
#[command(
    name = "lbctl",
    version,
    about = "Manage load balancer clusters from the command line",
    long_about = "A CLI for the load balancer management API.\n\n\
        Covers clusters, listeners, target groups, targets, ACLs, certificates,\n\
        access IPs, binds, VIPs and deployments, plus a Terraform/OpenTofu\n\
        wrapper that deploys clusters after a successful apply.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "LBCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "LBCTL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API key
    #[arg(long, env = "LBCTL_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LBCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "LBCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LBCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one ID per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage load balancer resources
    #[command(alias = "lb")]
    Loadbalancer(LoadBalancerArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct LoadBalancerArgs {
    #[command(subcommand)]
    pub command: LoadBalancerCommand,
}

#[derive(Debug, Subcommand)]
pub enum LoadBalancerCommand {
    /// Manage clusters
    #[command(alias = "clusters")]
    Cluster(ClusterArgs),

    /// Manage cluster configurations
    #[command(alias = "configurations")]
    Configuration(ConfigurationArgs),

    /// Manage listeners and their certificates, binds and access IPs
    #[command(alias = "listeners")]
    Listener(ListenerArgs),

    /// Manage target groups and their targets
    #[command(alias = "tg")]
    Targetgroup(TargetGroupArgs),

    /// Manage access IPs by ID
    Accessip(AccessIpArgs),

    /// Manage ACLs and their conditions and actions
    #[command(alias = "acls")]
    Acl(AclArgs),

    /// View VIPs
    #[command(alias = "vips")]
    Vip(VipArgs),

    /// View cluster deployments
    #[command(alias = "deployments")]
    Deployment(DeploymentArgs),

    /// Run terraform/tofu and deploy clusters after a successful apply
    #[command(disable_help_flag = true, disable_version_flag = true)]
    Terraform(TerraformArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Shared filtering, sorting and pagination arguments for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter: property[:operator]=value[,value...] (repeatable)
    /// Operators: eq, neq, lk, nlk, gt, lt, in, nin
    #[arg(long, short = 'f', value_name = "FILTER")]
    pub filter: Vec<String>,

    /// Sort: property[:asc|desc]
    #[arg(long)]
    pub sort: Option<String>,

    /// Fetch only this page (default: fetch every page)
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<u32>,
}

/// One or more resource IDs.
#[derive(Debug, Args)]
pub struct IdsArgs {
    /// Resource ID(s)
    #[arg(required = true, num_args = 1.., value_name = "ID")]
    pub ids: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLUSTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClusterArgs {
    #[command(subcommand)]
    pub command: ClusterCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClusterCommand {
    /// List clusters
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one or more clusters
    Show(IdsArgs),

    /// Create a cluster
    Create {
        /// Cluster name
        #[arg(long, required = true)]
        name: String,
    },

    /// Update one or more clusters
    Update {
        #[command(flatten)]
        ids: IdsArgs,

        /// New cluster name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete one or more clusters
    #[command(alias = "rm")]
    Delete(IdsArgs),

    /// Deploy the current configuration of one or more clusters
    Deploy(IdsArgs),

    /// Validate the configuration of one or more clusters
    Validate(IdsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIGURATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigurationArgs {
    #[command(subcommand)]
    pub command: ConfigurationCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigurationCommand {
    /// List configurations
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one or more configurations
    Show(IdsArgs),

    /// Create a configuration
    Create {
        /// Configuration name
        #[arg(long, required = true)]
        name: String,

        /// Cluster the configuration belongs to
        #[arg(long, required = true)]
        cluster_id: i32,
    },

    /// Update one or more configurations
    Update {
        #[command(flatten)]
        ids: IdsArgs,

        /// New configuration name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete one or more configurations
    #[command(alias = "rm")]
    Delete(IdsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LISTENERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ListenerArgs {
    #[command(subcommand)]
    pub command: ListenerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListenerCommand {
    /// List listeners
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one or more listeners
    Show(IdsArgs),

    /// Create a listener
    Create {
        /// Listener name
        #[arg(long, required = true)]
        name: String,

        /// Cluster the listener belongs to
        #[arg(long, required = true)]
        cluster_id: i32,

        /// Mode: http, https or tcp
        #[arg(long, required = true)]
        mode: String,

        #[command(flatten)]
        options: ListenerOptions,
    },

    /// Update one or more listeners
    Update {
        #[command(flatten)]
        ids: IdsArgs,

        /// New listener name
        #[arg(long)]
        name: Option<String>,

        /// Mode: http, https or tcp
        #[arg(long)]
        mode: Option<String>,

        #[command(flatten)]
        options: ListenerOptions,
    },

    /// Delete one or more listeners
    #[command(alias = "rm")]
    Delete(IdsArgs),

    /// Manage listener certificates
    #[command(alias = "cert")]
    Certificate(CertificateArgs),

    /// Manage listener binds
    Bind(BindArgs),

    /// List or create listener access IPs
    Accessip(ListenerAccessIpArgs),
}

/// Optional listener settings shared by create and update.
#[derive(Debug, Args)]
pub struct ListenerOptions {
    /// Default target group ID
    #[arg(long)]
    pub default_target_group_id: Option<i32>,

    /// Enable HSTS
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub hsts_enabled: Option<bool>,

    /// HSTS max-age in seconds
    #[arg(long)]
    pub hsts_maxage: Option<i32>,

    /// Close connections after each request
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub close: Option<bool>,

    /// Redirect HTTP to HTTPS
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub redirect_https: Option<bool>,

    /// Treat access IPs as an allow list
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub access_is_allow_list: Option<bool>,

    /// Allow TLS 1.0
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub allow_tlsv1: Option<bool>,

    /// Allow TLS 1.1
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub allow_tlsv11: Option<bool>,

    /// Disable TLS 1.2
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub disable_tlsv12: Option<bool>,

    /// Disable HTTP/2
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub disable_http2: Option<bool>,

    /// Serve HTTP/2 only
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub http2_only: Option<bool>,

    /// Custom cipher list
    #[arg(long)]
    pub custom_ciphers: Option<String>,
}

// --- Certificates ---

#[derive(Debug, Args)]
pub struct CertificateArgs {
    #[command(subcommand)]
    pub command: CertificateCommand,
}

#[derive(Debug, Subcommand)]
pub enum CertificateCommand {
    /// List certificates of a listener
    #[command(alias = "ls")]
    List {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more certificates
    Show {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        ids: IdsArgs,
    },

    /// Add a certificate to a listener
    Create {
        /// Listener ID
        listener_id: String,

        /// Certificate name
        #[arg(long, required = true)]
        name: String,

        /// PEM file containing the private key
        #[arg(long, required = true, value_name = "PATH")]
        key_file: std::path::PathBuf,

        /// PEM file containing the certificate
        #[arg(long, required = true, value_name = "PATH")]
        certificate_file: std::path::PathBuf,

        /// PEM file containing the CA bundle
        #[arg(long, value_name = "PATH")]
        ca_bundle_file: Option<std::path::PathBuf>,
    },

    /// Update one or more certificates
    Update {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        ids: IdsArgs,

        /// New certificate name
        #[arg(long)]
        name: Option<String>,

        /// PEM file containing the private key
        #[arg(long, value_name = "PATH")]
        key_file: Option<std::path::PathBuf>,

        /// PEM file containing the certificate
        #[arg(long, value_name = "PATH")]
        certificate_file: Option<std::path::PathBuf>,

        /// PEM file containing the CA bundle
        #[arg(long, value_name = "PATH")]
        ca_bundle_file: Option<std::path::PathBuf>,
    },

    /// Delete one or more certificates
    #[command(alias = "rm")]
    Delete {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        ids: IdsArgs,
    },
}

// --- Binds ---

#[derive(Debug, Args)]
pub struct BindArgs {
    #[command(subcommand)]
    pub command: BindCommand,
}

#[derive(Debug, Subcommand)]
pub enum BindCommand {
    /// List binds of a listener
    #[command(alias = "ls")]
    List {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more binds
    Show {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        ids: IdsArgs,
    },

    /// Bind a listener to a VIP and port
    Create {
        /// Listener ID
        listener_id: String,

        /// VIP ID
        #[arg(long, required = true)]
        vip_id: i32,

        /// Port
        #[arg(long, required = true)]
        port: i32,
    },

    /// Update one or more binds
    Update {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        ids: IdsArgs,

        /// VIP ID
        #[arg(long)]
        vip_id: Option<i32>,

        /// Port
        #[arg(long)]
        port: Option<i32>,
    },

    /// Delete one or more binds
    #[command(alias = "rm")]
    Delete {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        ids: IdsArgs,
    },
}

// --- Access IPs (listener scoped) ---

#[derive(Debug, Args)]
pub struct ListenerAccessIpArgs {
    #[command(subcommand)]
    pub command: ListenerAccessIpCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListenerAccessIpCommand {
    /// List access IPs of a listener
    #[command(alias = "ls")]
    List {
        /// Listener ID
        listener_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Add an access IP to a listener
    Create {
        /// Listener ID
        listener_id: String,

        /// IP address or CIDR
        #[arg(long, required = true)]
        ip: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACCESS IPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AccessIpArgs {
    #[command(subcommand)]
    pub command: AccessIpCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccessIpCommand {
    /// Show one or more access IPs
    Show(IdsArgs),

    /// Update one or more access IPs
    Update {
        #[command(flatten)]
        ids: IdsArgs,

        /// IP address or CIDR
        #[arg(long)]
        ip: Option<String>,
    },

    /// Delete one or more access IPs
    #[command(alias = "rm")]
    Delete(IdsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TARGET GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TargetGroupArgs {
    #[command(subcommand)]
    pub command: TargetGroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum TargetGroupCommand {
    /// List target groups
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one or more target groups
    Show(IdsArgs),

    /// Create a target group
    Create {
        /// Target group name
        #[arg(long, required = true)]
        name: String,

        /// Cluster the target group belongs to
        #[arg(long, required = true)]
        cluster_id: i32,

        /// Balance algorithm: roundrobin, static-rr, leastconn, source, uri,
        /// url_param, hdr, rdp-cookie
        #[arg(long, required = true)]
        balance: String,

        /// Mode: http or tcp
        #[arg(long, required = true)]
        mode: String,

        #[command(flatten)]
        options: TargetGroupOptions,
    },

    /// Update one or more target groups
    Update {
        #[command(flatten)]
        ids: IdsArgs,

        /// New target group name
        #[arg(long)]
        name: Option<String>,

        /// Balance algorithm
        #[arg(long)]
        balance: Option<String>,

        /// Mode: http or tcp
        #[arg(long)]
        mode: Option<String>,

        #[command(flatten)]
        options: TargetGroupOptions,
    },

    /// Delete one or more target groups
    #[command(alias = "rm")]
    Delete(IdsArgs),

    /// Manage targets of a target group
    Target(TargetArgs),
}

/// Optional target group settings shared by create and update.
#[derive(Debug, Args)]
pub struct TargetGroupOptions {
    /// Close connections after each request
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub close: Option<bool>,

    /// Enable sticky sessions
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub sticky: Option<bool>,

    /// Cookie options for sticky sessions
    #[arg(long)]
    pub cookie_opts: Option<String>,

    /// Source address for backend connections
    #[arg(long)]
    pub source: Option<String>,

    /// Connect timeout in milliseconds
    #[arg(long)]
    pub timeouts_connect: Option<i32>,

    /// Server timeout in milliseconds
    #[arg(long)]
    pub timeouts_server: Option<i32>,

    /// Custom HAProxy options
    #[arg(long)]
    pub custom_options: Option<String>,

    /// Health check URL
    #[arg(long)]
    pub monitor_url: Option<String>,

    /// Health check method: GET, HEAD, OPTIONS, POST, PUT, DELETE, PATCH,
    /// TRACE, CONNECT
    #[arg(long)]
    pub monitor_method: Option<String>,

    /// Health check Host header
    #[arg(long)]
    pub monitor_host: Option<String>,

    /// Health check HTTP version: 1.0 or 1.1
    #[arg(long)]
    pub monitor_http_version: Option<String>,

    /// Expected health check response
    #[arg(long)]
    pub monitor_expect: Option<String>,

    /// Use TCP health checks
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub monitor_tcp_monitoring: Option<bool>,

    /// Health check port
    #[arg(long)]
    pub check_port: Option<i32>,

    /// Send PROXY protocol v1 header
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub send_proxy: Option<bool>,

    /// Send PROXY protocol v2 header
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub send_proxy_v2: Option<bool>,

    /// Use SSL to backends
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub ssl: Option<bool>,

    /// Verify backend SSL certificates
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub ssl_verify: Option<bool>,

    /// Send SNI to backends
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub sni: Option<bool>,
}

// --- Targets ---

#[derive(Debug, Args)]
pub struct TargetArgs {
    #[command(subcommand)]
    pub command: TargetCommand,
}

#[derive(Debug, Subcommand)]
pub enum TargetCommand {
    /// List targets of a target group
    #[command(alias = "ls")]
    List {
        /// Target group ID
        target_group_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more targets
    Show {
        /// Target group ID
        target_group_id: String,

        #[command(flatten)]
        ids: IdsArgs,
    },

    /// Add a target to a target group
    Create {
        /// Target group ID
        target_group_id: String,

        /// Backend IP address
        #[arg(long, required = true)]
        ip: String,

        /// Backend port
        #[arg(long, required = true)]
        port: i32,

        /// Target name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        options: TargetOptions,
    },

    /// Update one or more targets
    Update {
        /// Target group ID
        target_group_id: String,

        #[command(flatten)]
        ids: IdsArgs,

        /// Target name
        #[arg(long)]
        name: Option<String>,

        /// Backend IP address
        #[arg(long)]
        ip: Option<String>,

        /// Backend port
        #[arg(long)]
        port: Option<i32>,

        #[command(flatten)]
        options: TargetOptions,
    },

    /// Delete one or more targets
    #[command(alias = "rm")]
    Delete {
        /// Target group ID
        target_group_id: String,

        #[command(flatten)]
        ids: IdsArgs,
    },
}

/// Optional target settings shared by create and update.
#[derive(Debug, Args)]
pub struct TargetOptions {
    /// Balancing weight
    #[arg(long)]
    pub weight: Option<i32>,

    /// Only use when all other targets are down
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub backup: Option<bool>,

    /// Health check interval in milliseconds
    #[arg(long)]
    pub check_interval: Option<i32>,

    /// Use SSL for health checks
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub check_ssl: Option<bool>,

    /// Successful checks before marking up
    #[arg(long)]
    pub check_rise: Option<i32>,

    /// Failed checks before marking down
    #[arg(long)]
    pub check_fall: Option<i32>,

    /// Disable HTTP/2
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub disable_http2: Option<bool>,

    /// Use HTTP/2 only
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub http2_only: Option<bool>,

    /// Receive traffic
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub active: Option<bool>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACLS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AclArgs {
    #[command(subcommand)]
    pub command: AclCommand,
}

#[derive(Debug, Subcommand)]
pub enum AclCommand {
    /// List ACLs of a listener or target group
    #[command(alias = "ls", group(ArgGroup::new("parent").required(true)))]
    List {
        /// Listener ID
        #[arg(long, group = "parent")]
        listener: Option<i32>,

        /// Target group ID
        #[arg(long, group = "parent")]
        target_group: Option<i32>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more ACLs
    Show(IdsArgs),

    /// Create an ACL, optionally with one condition and one action
    #[command(group(ArgGroup::new("parent").required(true)))]
    Create {
        /// ACL name
        #[arg(long, required = true)]
        name: String,

        /// Attach to this listener
        #[arg(long, group = "parent")]
        listener: Option<i32>,

        /// Attach to this target group
        #[arg(long, group = "parent")]
        target_group: Option<i32>,

        /// Name of an initial condition
        #[arg(long)]
        condition: Option<String>,

        /// Argument of the initial condition: key=value or key[]=value (repeatable)
        #[arg(long, requires = "condition", value_name = "KEY=VALUE")]
        condition_argument: Vec<String>,

        /// Invert the initial condition
        #[arg(long, requires = "condition")]
        condition_inverted: bool,

        /// Name of an initial action
        #[arg(long)]
        action: Option<String>,

        /// Argument of the initial action: key=value or key[]=value (repeatable)
        #[arg(long, requires = "action", value_name = "KEY=VALUE")]
        action_argument: Vec<String>,
    },

    /// Update one or more ACLs
    Update {
        #[command(flatten)]
        ids: IdsArgs,

        /// New ACL name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete one or more ACLs
    #[command(alias = "rm")]
    Delete(IdsArgs),

    /// Manage ACL conditions by index
    Condition(AclConditionArgs),

    /// Manage ACL actions by index
    Action(AclActionArgs),
}

// --- Conditions ---

#[derive(Debug, Args)]
pub struct AclConditionArgs {
    #[command(subcommand)]
    pub command: AclConditionCommand,
}

#[derive(Debug, Subcommand)]
pub enum AclConditionCommand {
    /// List the conditions of an ACL
    #[command(alias = "ls")]
    List {
        /// ACL ID
        acl_id: String,
    },

    /// Show conditions by index
    Show {
        /// ACL ID
        acl_id: String,

        /// Zero-based condition index(es)
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        indices: Vec<String>,
    },

    /// Append a condition
    Create {
        /// ACL ID
        acl_id: String,

        /// Condition name
        #[arg(long, required = true)]
        name: String,

        /// Argument: key=value, or key[]=value to build a list (repeatable)
        #[arg(long, value_name = "KEY=VALUE")]
        argument: Vec<String>,

        /// Invert the condition
        #[arg(long)]
        inverted: bool,
    },

    /// Update the condition at an index
    Update {
        /// ACL ID
        acl_id: String,

        /// Zero-based condition index
        #[arg(allow_hyphen_values = true)]
        index: String,

        /// New condition name
        #[arg(long)]
        name: Option<String>,

        /// Replacement arguments: key=value or key[]=value (repeatable)
        #[arg(long, value_name = "KEY=VALUE")]
        argument: Option<Vec<String>>,

        /// Invert the condition
        #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
        inverted: Option<bool>,
    },

    /// Delete the condition at an index
    #[command(alias = "rm")]
    Delete {
        /// ACL ID
        acl_id: String,

        /// Zero-based condition index
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
}

// --- Actions ---

#[derive(Debug, Args)]
pub struct AclActionArgs {
    #[command(subcommand)]
    pub command: AclActionCommand,
}

#[derive(Debug, Subcommand)]
pub enum AclActionCommand {
    /// List the actions of an ACL
    #[command(alias = "ls")]
    List {
        /// ACL ID
        acl_id: String,
    },

    /// Show actions by index
    Show {
        /// ACL ID
        acl_id: String,

        /// Zero-based action index(es)
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        indices: Vec<String>,
    },

    /// Append an action
    Create {
        /// ACL ID
        acl_id: String,

        /// Action name
        #[arg(long, required = true)]
        name: String,

        /// Argument: key=value, or key[]=value to build a list (repeatable)
        #[arg(long, value_name = "KEY=VALUE")]
        argument: Vec<String>,
    },

    /// Update the action at an index
    Update {
        /// ACL ID
        acl_id: String,

        /// Zero-based action index
        #[arg(allow_hyphen_values = true)]
        index: String,

        /// New action name
        #[arg(long)]
        name: Option<String>,

        /// Replacement arguments: key=value or key[]=value (repeatable)
        #[arg(long, value_name = "KEY=VALUE")]
        argument: Option<Vec<String>>,
    },

    /// Delete the action at an index
    #[command(alias = "rm")]
    Delete {
        /// ACL ID
        acl_id: String,

        /// Zero-based action index
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VIPS & DEPLOYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VipArgs {
    #[command(subcommand)]
    pub command: ReadOnlyCommand,
}

#[derive(Debug, Args)]
pub struct DeploymentArgs {
    #[command(subcommand)]
    pub command: ReadOnlyCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReadOnlyCommand {
    /// List resources
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one or more resources
    Show(IdsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TERRAFORM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Arguments forwarded verbatim to terraform (or tofu).
///
/// After a successful `apply`, every cluster listed in the
/// `loadbalancer_cluster_ids` output is deployed.
#[derive(Debug, Args)]
pub struct TerraformArgs {
    /// Arguments passed to terraform/tofu
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..,
        value_name = "ARGS"
    )]
    pub args: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: api_url, api_key, api_key_env, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
