//! Plain data carried between the pipeline and its providers.

/// Tag key applied to a newly created file system for operator visibility.
pub const NAME_TAG: &str = "Name";

/// Label applied to the volume so consumers can select it.
pub const NAME_LABEL: &str = "nfs-name";

/// Nominal capacity advertised on the volume. EFS does not meter capacity,
/// so the value is a fixed constant rather than anything negotiated.
pub const VOLUME_CAPACITY: &str = "10240Mi";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileSystem {
    pub id: String,
    pub creation_token: String,
}

/// Network endpoint through which a file system is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountTarget {
    pub ip_address: String,
}

/// Subnet and security-group membership of the instance we run on.
/// Recomputed on every run that needs it, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPlacement {
    pub subnet_id: String,
    pub security_group_ids: Vec<String>,
}

/// Everything the cluster needs to register the volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSpec {
    pub name: String,
    pub namespace: String,
    pub server: String,
    pub path: String,
}
