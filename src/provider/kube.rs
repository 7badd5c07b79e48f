//! Cluster adapter over the kube client.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{
    NFSVolumeSource, PersistentVolume, PersistentVolumeClaim, PersistentVolumeSpec,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use kube::api::{Api, PostParams};

use crate::provider::ClusterApi;
use crate::types::{NAME_LABEL, VOLUME_CAPACITY, VolumeSpec};

pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Infers in-cluster configuration. Failing to reach the cluster here
    /// is fatal to the whole process; nothing can proceed without knowing
    /// cluster state.
    pub async fn connect() -> Result<Self> {
        let client = Client::try_default()
            .await
            .context("connecting to the cluster api")?;
        Ok(Self { client })
    }
}

fn volume_object(spec: &VolumeSpec) -> PersistentVolume {
    let labels = BTreeMap::from([(NAME_LABEL.to_string(), spec.name.clone())]);
    PersistentVolume {
        metadata: ObjectMeta {
            name: Some(spec.name.clone()),
            namespace: Some(spec.namespace.clone()),
            labels: Some(labels),
            ..Default::default()
        },
        spec: Some(PersistentVolumeSpec {
            access_modes: Some(vec!["ReadWriteMany".to_string()]),
            capacity: Some(BTreeMap::from([(
                "storage".to_string(),
                Quantity(VOLUME_CAPACITY.to_string()),
            )])),
            nfs: Some(NFSVolumeSource {
                server: spec.server.clone(),
                path: spec.path.clone(),
                read_only: Some(false),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn volume_exists(&self, name: &str) -> Result<bool> {
        let api: Api<PersistentVolume> = Api::all(self.client.clone());
        Ok(api.get_opt(name).await?.is_some())
    }

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<()> {
        let api: Api<PersistentVolume> = Api::all(self.client.clone());
        api.create(&PostParams::default(), &volume_object(spec))
            .await
            .context("creating persistent volume")?;
        Ok(())
    }

    async fn claim_exists(&self, name: &str, namespace: &str) -> Result<bool> {
        let api: Api<PersistentVolumeClaim> =
            Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?.is_some())
    }
}
