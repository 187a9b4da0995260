// Capability traits: one per resource, one method per API operation.
//
// Business logic in `lbctl-core` depends on these traits only, never on
// `LoadBalancerClient` directly, so it can be exercised with in-memory
// fakes. `LoadBalancerService` bundles them for callers that need all.

#![allow(async_fn_in_trait)]

use crate::Error;
use crate::client::LoadBalancerClient;
use crate::query::ListParams;
use crate::types::{
    AccessIp, Acl, Bind, Certificate, Cluster, Configuration, CreateAccessIpRequest,
    CreateAclRequest, CreateBindRequest, CreateCertificateRequest, CreateClusterRequest,
    CreateConfigurationRequest, CreateListenerRequest, CreateTargetGroupRequest,
    CreateTargetRequest, Deployment, Listener, PatchAccessIpRequest, PatchAclRequest,
    PatchBindRequest, PatchCertificateRequest, PatchClusterRequest, PatchConfigurationRequest,
    PatchListenerRequest, PatchTargetGroupRequest, PatchTargetRequest, Target, TargetGroup, Vip,
};

// ── Traits ──────────────────────────────────────────────────────────

pub trait ClusterService {
    async fn get_clusters(&self, params: &ListParams) -> Result<Vec<Cluster>, Error>;
    async fn get_cluster(&self, id: i32) -> Result<Cluster, Error>;
    async fn create_cluster(&self, req: &CreateClusterRequest) -> Result<i32, Error>;
    async fn patch_cluster(&self, id: i32, req: &PatchClusterRequest) -> Result<(), Error>;
    async fn delete_cluster(&self, id: i32) -> Result<(), Error>;
    async fn deploy_cluster(&self, id: i32) -> Result<(), Error>;
    async fn validate_cluster(&self, id: i32) -> Result<(), Error>;
}

pub trait ConfigurationService {
    async fn get_configurations(&self, params: &ListParams) -> Result<Vec<Configuration>, Error>;
    async fn get_configuration(&self, id: &str) -> Result<Configuration, Error>;
    async fn create_configuration(&self, req: &CreateConfigurationRequest) -> Result<String, Error>;
    async fn patch_configuration(
        &self,
        id: &str,
        req: &PatchConfigurationRequest,
    ) -> Result<(), Error>;
    async fn delete_configuration(&self, id: &str) -> Result<(), Error>;
}

pub trait ListenerService {
    async fn get_listeners(&self, params: &ListParams) -> Result<Vec<Listener>, Error>;
    async fn get_listener(&self, id: i32) -> Result<Listener, Error>;
    async fn create_listener(&self, req: &CreateListenerRequest) -> Result<i32, Error>;
    async fn patch_listener(&self, id: i32, req: &PatchListenerRequest) -> Result<(), Error>;
    async fn delete_listener(&self, id: i32) -> Result<(), Error>;
}

pub trait CertificateService {
    async fn get_listener_certificates(
        &self,
        listener_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Certificate>, Error>;
    async fn get_listener_certificate(
        &self,
        listener_id: i32,
        id: i32,
    ) -> Result<Certificate, Error>;
    async fn create_listener_certificate(
        &self,
        listener_id: i32,
        req: &CreateCertificateRequest,
    ) -> Result<i32, Error>;
    async fn patch_listener_certificate(
        &self,
        listener_id: i32,
        id: i32,
        req: &PatchCertificateRequest,
    ) -> Result<(), Error>;
    async fn delete_listener_certificate(&self, listener_id: i32, id: i32) -> Result<(), Error>;
}

pub trait AccessIpService {
    async fn get_listener_access_ips(
        &self,
        listener_id: i32,
        params: &ListParams,
    ) -> Result<Vec<AccessIp>, Error>;
    async fn create_listener_access_ip(
        &self,
        listener_id: i32,
        req: &CreateAccessIpRequest,
    ) -> Result<i32, Error>;
    async fn get_access_ip(&self, id: i32) -> Result<AccessIp, Error>;
    async fn patch_access_ip(&self, id: i32, req: &PatchAccessIpRequest) -> Result<(), Error>;
    async fn delete_access_ip(&self, id: i32) -> Result<(), Error>;
}

pub trait BindService {
    async fn get_listener_binds(
        &self,
        listener_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Bind>, Error>;
    async fn get_listener_bind(&self, listener_id: i32, id: i32) -> Result<Bind, Error>;
    async fn create_listener_bind(
        &self,
        listener_id: i32,
        req: &CreateBindRequest,
    ) -> Result<i32, Error>;
    async fn patch_listener_bind(
        &self,
        listener_id: i32,
        id: i32,
        req: &PatchBindRequest,
    ) -> Result<(), Error>;
    async fn delete_listener_bind(&self, listener_id: i32, id: i32) -> Result<(), Error>;
}

pub trait TargetGroupService {
    async fn get_target_groups(&self, params: &ListParams) -> Result<Vec<TargetGroup>, Error>;
    async fn get_target_group(&self, id: i32) -> Result<TargetGroup, Error>;
    async fn create_target_group(&self, req: &CreateTargetGroupRequest) -> Result<i32, Error>;
    async fn patch_target_group(
        &self,
        id: i32,
        req: &PatchTargetGroupRequest,
    ) -> Result<(), Error>;
    async fn delete_target_group(&self, id: i32) -> Result<(), Error>;
}

pub trait TargetService {
    async fn get_targets(
        &self,
        target_group_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Target>, Error>;
    async fn get_target(&self, target_group_id: i32, id: i32) -> Result<Target, Error>;
    async fn create_target(
        &self,
        target_group_id: i32,
        req: &CreateTargetRequest,
    ) -> Result<i32, Error>;
    async fn patch_target(
        &self,
        target_group_id: i32,
        id: i32,
        req: &PatchTargetRequest,
    ) -> Result<(), Error>;
    async fn delete_target(&self, target_group_id: i32, id: i32) -> Result<(), Error>;
}

pub trait AclService {
    async fn get_acls(&self, params: &ListParams) -> Result<Vec<Acl>, Error>;
    async fn get_acl(&self, id: i32) -> Result<Acl, Error>;
    async fn create_acl(&self, req: &CreateAclRequest) -> Result<i32, Error>;
    async fn patch_acl(&self, id: i32, req: &PatchAclRequest) -> Result<(), Error>;
    async fn delete_acl(&self, id: i32) -> Result<(), Error>;
}

pub trait VipService {
    async fn get_vips(&self, params: &ListParams) -> Result<Vec<Vip>, Error>;
    async fn get_vip(&self, id: i32) -> Result<Vip, Error>;
}

pub trait DeploymentService {
    async fn get_deployments(&self, params: &ListParams) -> Result<Vec<Deployment>, Error>;
    async fn get_deployment(&self, id: i32) -> Result<Deployment, Error>;
}

/// Every resource capability of the load balancer API.
pub trait LoadBalancerService:
    ClusterService
    + ConfigurationService
    + ListenerService
    + CertificateService
    + AccessIpService
    + BindService
    + TargetGroupService
    + TargetService
    + AclService
    + VipService
    + DeploymentService
{
}

impl<T> LoadBalancerService for T where
    T: ClusterService
        + ConfigurationService
        + ListenerService
        + CertificateService
        + AccessIpService
        + BindService
        + TargetGroupService
        + TargetService
        + AclService
        + VipService
        + DeploymentService
{
}

// ── HTTP implementation ─────────────────────────────────────────────

impl ClusterService for LoadBalancerClient {
    async fn get_clusters(&self, params: &ListParams) -> Result<Vec<Cluster>, Error> {
        self.list("v2/clusters", params).await
    }

    async fn get_cluster(&self, id: i32) -> Result<Cluster, Error> {
        self.show(&format!("v2/clusters/{id}")).await
    }

    async fn create_cluster(&self, req: &CreateClusterRequest) -> Result<i32, Error> {
        self.create("v2/clusters", req).await
    }

    async fn patch_cluster(&self, id: i32, req: &PatchClusterRequest) -> Result<(), Error> {
        self.update(&format!("v2/clusters/{id}"), req).await
    }

    async fn delete_cluster(&self, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/clusters/{id}")).await
    }

    async fn deploy_cluster(&self, id: i32) -> Result<(), Error> {
        self.action(&format!("v2/clusters/{id}/deploy")).await
    }

    async fn validate_cluster(&self, id: i32) -> Result<(), Error> {
        self.action(&format!("v2/clusters/{id}/validate")).await
    }
}

impl ConfigurationService for LoadBalancerClient {
    async fn get_configurations(&self, params: &ListParams) -> Result<Vec<Configuration>, Error> {
        self.list("v2/configurations", params).await
    }

    async fn get_configuration(&self, id: &str) -> Result<Configuration, Error> {
        self.show(&format!("v2/configurations/{id}")).await
    }

    async fn create_configuration(&self, req: &CreateConfigurationRequest) -> Result<String, Error> {
        self.create("v2/configurations", req).await
    }

    async fn patch_configuration(
        &self,
        id: &str,
        req: &PatchConfigurationRequest,
    ) -> Result<(), Error> {
        self.update(&format!("v2/configurations/{id}"), req).await
    }

    async fn delete_configuration(&self, id: &str) -> Result<(), Error> {
        self.remove(&format!("v2/configurations/{id}")).await
    }
}

impl ListenerService for LoadBalancerClient {
    async fn get_listeners(&self, params: &ListParams) -> Result<Vec<Listener>, Error> {
        self.list("v2/listeners", params).await
    }

    async fn get_listener(&self, id: i32) -> Result<Listener, Error> {
        self.show(&format!("v2/listeners/{id}")).await
    }

    async fn create_listener(&self, req: &CreateListenerRequest) -> Result<i32, Error> {
        self.create("v2/listeners", req).await
    }

    async fn patch_listener(&self, id: i32, req: &PatchListenerRequest) -> Result<(), Error> {
        self.update(&format!("v2/listeners/{id}"), req).await
    }

    async fn delete_listener(&self, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/listeners/{id}")).await
    }
}

impl CertificateService for LoadBalancerClient {
    async fn get_listener_certificates(
        &self,
        listener_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Certificate>, Error> {
        self.list(&format!("v2/listeners/{listener_id}/certs"), params)
            .await
    }

    async fn get_listener_certificate(
        &self,
        listener_id: i32,
        id: i32,
    ) -> Result<Certificate, Error> {
        self.show(&format!("v2/listeners/{listener_id}/certs/{id}"))
            .await
    }

    async fn create_listener_certificate(
        &self,
        listener_id: i32,
        req: &CreateCertificateRequest,
    ) -> Result<i32, Error> {
        self.create(&format!("v2/listeners/{listener_id}/certs"), req)
            .await
    }

    async fn patch_listener_certificate(
        &self,
        listener_id: i32,
        id: i32,
        req: &PatchCertificateRequest,
    ) -> Result<(), Error> {
        self.update(&format!("v2/listeners/{listener_id}/certs/{id}"), req)
            .await
    }

    async fn delete_listener_certificate(&self, listener_id: i32, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/listeners/{listener_id}/certs/{id}"))
            .await
    }
}

impl AccessIpService for LoadBalancerClient {
    async fn get_listener_access_ips(
        &self,
        listener_id: i32,
        params: &ListParams,
    ) -> Result<Vec<AccessIp>, Error> {
        self.list(&format!("v2/listeners/{listener_id}/access-ips"), params)
            .await
    }

    async fn create_listener_access_ip(
        &self,
        listener_id: i32,
        req: &CreateAccessIpRequest,
    ) -> Result<i32, Error> {
        self.create(&format!("v2/listeners/{listener_id}/access-ips"), req)
            .await
    }

    async fn get_access_ip(&self, id: i32) -> Result<AccessIp, Error> {
        self.show(&format!("v2/access-ips/{id}")).await
    }

    async fn patch_access_ip(&self, id: i32, req: &PatchAccessIpRequest) -> Result<(), Error> {
        self.update(&format!("v2/access-ips/{id}"), req).await
    }

    async fn delete_access_ip(&self, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/access-ips/{id}")).await
    }
}

impl BindService for LoadBalancerClient {
    async fn get_listener_binds(
        &self,
        listener_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Bind>, Error> {
        self.list(&format!("v2/listeners/{listener_id}/binds"), params)
            .await
    }

    async fn get_listener_bind(&self, listener_id: i32, id: i32) -> Result<Bind, Error> {
        self.show(&format!("v2/listeners/{listener_id}/binds/{id}"))
            .await
    }

    async fn create_listener_bind(
        &self,
        listener_id: i32,
        req: &CreateBindRequest,
    ) -> Result<i32, Error> {
        self.create(&format!("v2/listeners/{listener_id}/binds"), req)
            .await
    }

    async fn patch_listener_bind(
        &self,
        listener_id: i32,
        id: i32,
        req: &PatchBindRequest,
    ) -> Result<(), Error> {
        self.update(&format!("v2/listeners/{listener_id}/binds/{id}"), req)
            .await
    }

    async fn delete_listener_bind(&self, listener_id: i32, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/listeners/{listener_id}/binds/{id}"))
            .await
    }
}

impl TargetGroupService for LoadBalancerClient {
    async fn get_target_groups(&self, params: &ListParams) -> Result<Vec<TargetGroup>, Error> {
        self.list("v2/target-groups", params).await
    }

    async fn get_target_group(&self, id: i32) -> Result<TargetGroup, Error> {
        self.show(&format!("v2/target-groups/{id}")).await
    }

    async fn create_target_group(&self, req: &CreateTargetGroupRequest) -> Result<i32, Error> {
        self.create("v2/target-groups", req).await
    }

    async fn patch_target_group(
        &self,
        id: i32,
        req: &PatchTargetGroupRequest,
    ) -> Result<(), Error> {
        self.update(&format!("v2/target-groups/{id}"), req).await
    }

    async fn delete_target_group(&self, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/target-groups/{id}")).await
    }
}

impl TargetService for LoadBalancerClient {
    async fn get_targets(
        &self,
        target_group_id: i32,
        params: &ListParams,
    ) -> Result<Vec<Target>, Error> {
        self.list(&format!("v2/target-groups/{target_group_id}/targets"), params)
            .await
    }

    async fn get_target(&self, target_group_id: i32, id: i32) -> Result<Target, Error> {
        self.show(&format!("v2/target-groups/{target_group_id}/targets/{id}"))
            .await
    }

    async fn create_target(
        &self,
        target_group_id: i32,
        req: &CreateTargetRequest,
    ) -> Result<i32, Error> {
        self.create(&format!("v2/target-groups/{target_group_id}/targets"), req)
            .await
    }

    async fn patch_target(
        &self,
        target_group_id: i32,
        id: i32,
        req: &PatchTargetRequest,
    ) -> Result<(), Error> {
        self.update(
            &format!("v2/target-groups/{target_group_id}/targets/{id}"),
            req,
        )
        .await
    }

    async fn delete_target(&self, target_group_id: i32, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/target-groups/{target_group_id}/targets/{id}"))
            .await
    }
}

impl AclService for LoadBalancerClient {
    async fn get_acls(&self, params: &ListParams) -> Result<Vec<Acl>, Error> {
        self.list("v2/acls", params).await
    }

    async fn get_acl(&self, id: i32) -> Result<Acl, Error> {
        self.show(&format!("v2/acls/{id}")).await
    }

    async fn create_acl(&self, req: &CreateAclRequest) -> Result<i32, Error> {
        self.create("v2/acls", req).await
    }

    async fn patch_acl(&self, id: i32, req: &PatchAclRequest) -> Result<(), Error> {
        self.update(&format!("v2/acls/{id}"), req).await
    }

    async fn delete_acl(&self, id: i32) -> Result<(), Error> {
        self.remove(&format!("v2/acls/{id}")).await
    }
}

impl VipService for LoadBalancerClient {
    async fn get_vips(&self, params: &ListParams) -> Result<Vec<Vip>, Error> {
        self.list("v2/vips", params).await
    }

    async fn get_vip(&self, id: i32) -> Result<Vip, Error> {
        self.show(&format!("v2/vips/{id}")).await
    }
}

impl DeploymentService for LoadBalancerClient {
    async fn get_deployments(&self, params: &ListParams) -> Result<Vec<Deployment>, Error> {
        self.list("v2/deployments", params).await
    }

    async fn get_deployment(&self, id: i32) -> Result<Deployment, Error> {
        self.show(&format!("v2/deployments/{id}")).await
    }
}
