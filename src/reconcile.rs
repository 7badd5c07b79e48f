//! The reconciliation pipeline: precheck, find-or-create the file system,
//! find-or-create a mount target, register the volume. One pass per process
//! run; every step is idempotent, so a crash mid-pipeline only costs a
//! re-run.

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::Config;
use crate::provider::{ClusterApi, FileSystemApi, InventoryApi};
use crate::types::{NAME_TAG, NetworkPlacement, RemoteFileSystem, VolumeSpec};

pub struct Provisioner<'a, F, I, C> {
    cfg: &'a Config,
    file_systems: &'a F,
    inventory: &'a I,
    cluster: &'a C,
}

impl<'a, F, I, C> Provisioner<'a, F, I, C>
where
    F: FileSystemApi,
    I: InventoryApi,
    C: ClusterApi,
{
    pub fn new(cfg: &'a Config, file_systems: &'a F, inventory: &'a I, cluster: &'a C) -> Self {
        Self {
            cfg,
            file_systems,
            inventory,
            cluster,
        }
    }

    pub async fn run(&self) -> Result<()> {
        if self.is_bound().await {
            info!("volume {} is already bound, nothing to do", self.cfg.name);
            return Ok(());
        }
        let fs = self.ensure_file_system().await?;
        let address = self.ensure_mount_target(&fs.id).await?;
        self.ensure_volume(&address).await?;
        Ok(())
    }

    /// Both the volume and the consumer claim already exist. Read-only, and
    /// conservative: any read error counts as "not bound yet".
    async fn is_bound(&self) -> bool {
        match self.cluster.volume_exists(&self.cfg.name).await {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                warn!("volume lookup failed, treating as unbound: {e:#}");
                return false;
            }
        }
        match self
            .cluster
            .claim_exists(&self.cfg.name, &self.cfg.namespace)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!("claim lookup failed, treating as unbound: {e:#}");
                false
            }
        }
    }

    /// Find the file system by creation token, or create and tag it. The
    /// token match is exact; the first hit wins.
    async fn ensure_file_system(&self) -> Result<RemoteFileSystem> {
        let listed = self
            .file_systems
            .list_file_systems()
            .await
            .context("listing file systems")?;
        if let Some(existing) = listed
            .into_iter()
            .find(|fs| fs.creation_token == self.cfg.name)
        {
            info!("found file system {} for token {}", existing.id, self.cfg.name);
            return Ok(existing);
        }

        let created = self
            .file_systems
            .create_file_system(&self.cfg.name)
            .await
            .context("creating file system")?;
        self.file_systems
            .tag_file_system(&created.id, NAME_TAG, &self.cfg.name)
            .await
            .context("tagging file system")?;
        info!("created file system {} for token {}", created.id, self.cfg.name);
        Ok(created)
    }

    /// The first listed mount target is authoritative. Placement is only
    /// resolved when a target has to be created.
    async fn ensure_mount_target(&self, fs_id: &str) -> Result<String> {
        let targets = self
            .file_systems
            .list_mount_targets(fs_id)
            .await
            .context("listing mount targets")?;
        if let Some(first) = targets.first() {
            info!("found mount target at {}", first.ip_address);
            return Ok(first.ip_address.clone());
        }

        let placement = self.resolve_placement().await?;
        let target = self
            .file_systems
            .create_mount_target(fs_id, &placement)
            .await
            .context("creating mount target")?;
        info!(
            "created mount target at {} in {}",
            target.ip_address, placement.subnet_id
        );
        Ok(target.ip_address)
    }

    async fn resolve_placement(&self) -> Result<NetworkPlacement> {
        let instance_id = self
            .inventory
            .local_instance_id()
            .await
            .context("resolving local instance id")?;
        self.inventory
            .describe_instance(&instance_id)
            .await
            .with_context(|| format!("describing instance {instance_id}"))
    }

    /// Get-or-create the cluster volume. A read error is treated the same
    /// as not-found; the create call is the arbiter if the volume turns out
    /// to exist after all.
    async fn ensure_volume(&self, server: &str) -> Result<()> {
        match self.cluster.volume_exists(&self.cfg.name).await {
            Ok(true) => {
                info!("volume {} already exists", self.cfg.name);
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => warn!("volume lookup failed, treating as absent: {e:#}"),
        }

        let spec = VolumeSpec {
            name: self.cfg.name.clone(),
            namespace: self.cfg.namespace.clone(),
            server: server.to_string(),
            path: self.cfg.path.clone(),
        };
        self.cluster
            .create_volume(&spec)
            .await
            .context("creating volume")?;
        info!("created volume {} backed by {}", self.cfg.name, server);
        Ok(())
    }
}
