//! Capability seams around the three external systems the pipeline talks
//! to. Every method call is a blocking network operation from the
//! pipeline's point of view; any error crossing one of these boundaries is
//! fatal to the run.

pub mod efs;
pub mod inventory;
pub mod kube;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{MountTarget, NetworkPlacement, RemoteFileSystem, VolumeSpec};

/// Cloud file-system service: file systems and their mount targets.
#[async_trait]
pub trait FileSystemApi: Send + Sync {
    async fn list_file_systems(&self) -> Result<Vec<RemoteFileSystem>>;

    /// The token is the idempotency key; the remote service guarantees at
    /// most one file system per token.
    async fn create_file_system(&self, token: &str) -> Result<RemoteFileSystem>;

    async fn tag_file_system(&self, id: &str, key: &str, value: &str) -> Result<()>;

    async fn list_mount_targets(&self, fs_id: &str) -> Result<Vec<MountTarget>>;

    async fn create_mount_target(
        &self,
        fs_id: &str,
        placement: &NetworkPlacement,
    ) -> Result<MountTarget>;
}

/// Compute metadata and inventory: who am I, and where am I placed.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn local_instance_id(&self) -> Result<String>;

    async fn describe_instance(&self, id: &str) -> Result<NetworkPlacement>;
}

/// Cluster-side storage objects. The existence reads are tri-state
/// (found / not found / error); callers collapse the error case to
/// "not found" on purpose.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn volume_exists(&self, name: &str) -> Result<bool>;

    async fn create_volume(&self, spec: &VolumeSpec) -> Result<()>;

    /// Read-only: the claim is created by consumers, never by us.
    async fn claim_exists(&self, name: &str, namespace: &str) -> Result<bool>;
}
