//! Volumes, snapshots and volume metadata.

use serde::{Deserialize, Serialize};

use super::ProvisioningType;

/// A virtual volume. Snapshots are volumes with `copy_of` set.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Unique volume name.
    pub name: String,
    /// Numeric id, unique across the array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Virtual size in MiB.
    #[serde(rename = "sizeMiB", default)]
    pub size_mib: u64,
    /// CPG providing user space.
    #[serde(rename = "userCPG", skip_serializing_if = "Option::is_none")]
    pub user_cpg: Option<String>,
    /// CPG providing snapshot space.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Parent volume name when this volume is a snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_of: Option<String>,
    /// Provisioning type reported by the array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_type: Option<ProvisioningType>,
    /// Thin provisioned flag, where the array reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpvv: Option<bool>,
    /// Thin deduplicated flag, where the array reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdvv: Option<bool>,
    /// Data reduction (dedup plus compression) flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,
    /// Compression flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<bool>,
    /// Read-only flag, set on read-only snapshots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Expiration time in ISO 8601, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time8601: Option<String>,
    /// Creation time in ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time8601: Option<String>,
}

impl Volume {
    /// Returns `true` when this volume is a snapshot of `parent`.
    #[must_use]
    pub fn is_snapshot_of(&self, parent: &str) -> bool {
        self.copy_of.as_deref() == Some(parent)
    }
}

/// One metadata entry attached to a volume.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct KeyValue {
    /// Metadata key.
    pub key: String,
    /// Metadata value.
    pub value: String,
}
