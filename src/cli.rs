use clap::Parser;

/// Flags mirror the environment fallbacks resolved in `Config::from_cli`.
#[derive(Parser)]
#[command(name = "rkefs", version, about = "Provision an EFS file system and bind it as an NFS volume")]
pub struct Cli {
    /// NFS export path consumers will mount
    #[arg(long)]
    pub path: Option<String>,

    /// AWS region hosting the file system
    #[arg(long)]
    pub region: Option<String>,

    /// Creation token for the file system, doubles as the volume name
    #[arg(long)]
    pub name: Option<String>,

    /// Namespace of the consumer claim
    #[arg(long = "ns")]
    pub namespace: Option<String>,
}
