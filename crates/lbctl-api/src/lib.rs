// lbctl-api: Async Rust client for the load balancer management API (v2)

pub mod client;
pub mod error;
pub mod query;
pub mod service;
pub mod transport;
pub mod types;

pub use client::LoadBalancerClient;
pub use error::Error;
pub use query::{Filter, FilterOperator, ListParams, Sort, SortDirection};
pub use service::{
    AccessIpService, AclService, BindService, CertificateService, ClusterService,
    ConfigurationService, DeploymentService, ListenerService, LoadBalancerService,
    TargetGroupService, TargetService, VipService,
};
pub use transport::TransportConfig;
