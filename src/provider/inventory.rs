//! Instance identity and placement, from the metadata endpoint plus EC2.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use aws_sdk_ec2::Client;

use crate::provider::InventoryApi;
use crate::types::NetworkPlacement;

/// Well-known link-local metadata endpoint, reachable only from the
/// instance itself.
const INSTANCE_ID_URL: &str = "http://169.254.169.254/latest/meta-data/instance-id";

pub struct Ec2Inventory {
    client: Client,
}

impl Ec2Inventory {
    pub fn new(conf: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(conf),
        }
    }
}

#[async_trait]
impl InventoryApi for Ec2Inventory {
    async fn local_instance_id(&self) -> Result<String> {
        let res = reqwest::get(INSTANCE_ID_URL)
            .await
            .context("querying instance metadata endpoint")?;
        if res.status() != reqwest::StatusCode::OK {
            bail!("instance metadata endpoint returned {}", res.status());
        }
        res.text().await.context("reading instance id")
    }

    async fn describe_instance(&self, id: &str) -> Result<NetworkPlacement> {
        let out = self
            .client
            .describe_instances()
            .instance_ids(id)
            .send()
            .await?;
        let instance = out
            .reservations()
            .first()
            .and_then(|r| r.instances().first())
            .with_context(|| format!("instance {id} not found in inventory"))?;
        let subnet_id = instance
            .subnet_id()
            .with_context(|| format!("instance {id} has no subnet"))?
            .to_string();
        let security_group_ids = instance
            .security_groups()
            .iter()
            .filter_map(|g| g.group_id())
            .map(str::to_string)
            .collect();
        Ok(NetworkPlacement {
            subnet_id,
            security_group_ids,
        })
    }
}
