mod cli;
mod config;
mod provider;
mod reconcile;
mod types;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::provider::efs::EfsFileSystems;
use crate::provider::inventory::Ec2Inventory;
use crate::provider::kube::KubeCluster;
use crate::reconcile::Provisioner;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::from_cli(Cli::parse())?;

    let cluster = KubeCluster::connect().await?;
    let aws = aws_config::ConfigLoader::default()
        .region(aws_config::Region::new(cfg.region.clone()))
        .load()
        .await;
    let file_systems = EfsFileSystems::new(&aws);
    let inventory = Ec2Inventory::new(&aws);

    Provisioner::new(&cfg, &file_systems, &inventory, &cluster)
        .run()
        .await
}
