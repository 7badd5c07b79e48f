use anyhow::{Result, bail};
use std::env;

use crate::cli::Cli;

/// Immutable run configuration, settled before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub path: String,
    pub region: String,
    pub namespace: String,
}

impl Config {
    /// Flags win over their environment fallbacks. The region and the
    /// creation token must be present and non-empty; everything downstream
    /// keys off them.
    pub fn from_cli(cli: Cli) -> Result<Config> {
        let cfg = Config {
            name: resolve(cli.name, "NFS_NAME"),
            path: resolve(cli.path, "NFS_PATH"),
            region: resolve(cli.region, "AWS_REGION"),
            namespace: resolve(cli.namespace, "NFS_NAMESPACE"),
        };
        if cfg.region.is_empty() {
            bail!("region is empty, set --region or AWS_REGION");
        }
        if cfg.name.is_empty() {
            bail!("name is empty, set --name or NFS_NAME");
        }
        Ok(cfg)
    }
}

fn resolve(flag: Option<String>, var: &str) -> String {
    flag.or_else(|| env::var(var).ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_cli() -> Cli {
        Cli {
            path: Some("/exports/data".into()),
            region: Some("us-east-1".into()),
            name: Some("shared-data".into()),
            namespace: Some("default".into()),
        }
    }

    #[test]
    fn accepts_complete_flags() {
        let cfg = Config::from_cli(full_cli()).unwrap();
        assert_eq!(cfg.name, "shared-data");
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.path, "/exports/data");
        assert_eq!(cfg.namespace, "default");
    }

    #[test]
    fn rejects_empty_region() {
        let cli = Cli {
            region: Some(String::new()),
            ..full_cli()
        };
        let err = Config::from_cli(cli).unwrap_err();
        assert!(err.to_string().contains("region is empty"));
    }

    #[test]
    fn rejects_empty_name() {
        let cli = Cli {
            name: Some(String::new()),
            ..full_cli()
        };
        let err = Config::from_cli(cli).unwrap_err();
        assert!(err.to_string().contains("name is empty"));
    }
}
