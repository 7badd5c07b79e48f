//! EFS adapter over aws-sdk-efs.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_efs::Client;
use aws_sdk_efs::types::Tag;

use crate::provider::FileSystemApi;
use crate::types::{MountTarget, NetworkPlacement, RemoteFileSystem};

pub struct EfsFileSystems {
    client: Client,
}

impl EfsFileSystems {
    pub fn new(conf: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(conf),
        }
    }
}

#[async_trait]
impl FileSystemApi for EfsFileSystems {
    async fn list_file_systems(&self) -> Result<Vec<RemoteFileSystem>> {
        let out = self.client.describe_file_systems().send().await?;
        Ok(out
            .file_systems()
            .iter()
            .map(|fs| RemoteFileSystem {
                id: fs.file_system_id().to_string(),
                creation_token: fs.creation_token().to_string(),
            })
            .collect())
    }

    async fn create_file_system(&self, token: &str) -> Result<RemoteFileSystem> {
        let out = self
            .client
            .create_file_system()
            .creation_token(token)
            .send()
            .await?;
        Ok(RemoteFileSystem {
            id: out.file_system_id().to_string(),
            creation_token: token.to_string(),
        })
    }

    async fn tag_file_system(&self, id: &str, key: &str, value: &str) -> Result<()> {
        let tag = Tag::builder().key(key).value(value).build()?;
        self.client
            .create_tags()
            .file_system_id(id)
            .tags(tag)
            .send()
            .await?;
        Ok(())
    }

    async fn list_mount_targets(&self, fs_id: &str) -> Result<Vec<MountTarget>> {
        let out = self
            .client
            .describe_mount_targets()
            .file_system_id(fs_id)
            .send()
            .await?;
        Ok(out
            .mount_targets()
            .iter()
            .filter_map(|mt| mt.ip_address())
            .map(|ip| MountTarget {
                ip_address: ip.to_string(),
            })
            .collect())
    }

    async fn create_mount_target(
        &self,
        fs_id: &str,
        placement: &NetworkPlacement,
    ) -> Result<MountTarget> {
        let out = self
            .client
            .create_mount_target()
            .file_system_id(fs_id)
            .subnet_id(&placement.subnet_id)
            .set_security_groups(Some(placement.security_group_ids.clone()))
            .send()
            .await?;
        let ip = out
            .ip_address()
            .context("created mount target reported no ip address")?;
        Ok(MountTarget {
            ip_address: ip.to_string(),
        })
    }
}
