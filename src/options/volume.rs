//! Options for volume and snapshot operations.

use serde::{Deserialize, Serialize};

use super::OperationOptions;
use crate::model::{ConversionOperation, TaskPriority};

/// Optional settings for `create_volume`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateVolumeOptions {
    /// Explicit numeric id; must be unique on the array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// CPG for snapshot space.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
    /// Thin provisioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpvv: Option<bool>,
    /// Thin deduplicated provisioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdvv: Option<bool>,
    /// Data reduction on primera-style arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,
    /// Compression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<bool>,
    /// Hours until the volume expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_hours: Option<u32>,
    /// Hours the volume is retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_hours: Option<u32>,
    /// Snapshot space allocation warning, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ss_spc_alloc_warning_pct: Option<u8>,
    /// Snapshot space allocation limit, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ss_spc_alloc_limit_pct: Option<u8>,
    /// User space allocation warning, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usr_spc_alloc_warning_pct: Option<u8>,
    /// User space allocation limit, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usr_spc_alloc_limit_pct: Option<u8>,
}

impl OperationOptions for CreateVolumeOptions {
    const OPERATION: &'static str = "create volume";
}

/// Optional settings for `create_snapshot`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SnapshotOptions {
    /// Explicit numeric id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Create the snapshot read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Hours until the snapshot expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_hours: Option<u32>,
    /// Hours the snapshot is retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_hours: Option<u32>,
}

impl OperationOptions for SnapshotOptions {
    const OPERATION: &'static str = "create snapshot";
}

/// Optional settings for `copy_volume`.
///
/// `online` selects the mode. Offline copies take no provisioning settings
/// and drop `dest_cpg`; online copies take no `save_snapshot` or `priority`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CopyOptions {
    /// Copy while the source stays online, creating the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    /// Thin provision the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpvv: Option<bool>,
    /// Thin dedup provision the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdvv: Option<bool>,
    /// Data reduction on primera-style arrays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,
    /// Compress the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<bool>,
    /// Snapshot CPG for the destination.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
    /// CPG for the destination of an online copy. Ignored for offline
    /// copies, whose destination already exists.
    #[serde(rename = "destCPG", skip_serializing_if = "Option::is_none")]
    pub dest_cpg: Option<String>,
    /// Keep the resync snapshot after an offline copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_snapshot: Option<bool>,
    /// Priority of an offline copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

impl CopyOptions {
    /// Returns `true` for online copies.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online == Some(true)
    }
}

impl OperationOptions for CopyOptions {
    const OPERATION: &'static str = "copy volume";
}

/// Optional settings for `tune_volume`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TuneOptions {
    /// Destination user CPG.
    #[serde(rename = "userCPG", skip_serializing_if = "Option::is_none")]
    pub user_cpg: Option<String>,
    /// Destination snapshot CPG.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
    /// Provisioning conversion to apply while moving.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_operation: Option<ConversionOperation>,
    /// Keep the original volume under this name.
    #[serde(rename = "keepVV", skip_serializing_if = "Option::is_none")]
    pub keep_vv: Option<String>,
    /// Compress the converted volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<bool>,
}

impl OperationOptions for TuneOptions {
    const OPERATION: &'static str = "tune volume";
}

/// Optional settings for `promote_virtual_copy`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PromoteOptions {
    /// Promote while the parent stays online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    /// Task priority; not combinable with `online`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Allow promoting onto a remote-copy member. The group must be stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_remote_copy_parent: Option<bool>,
}

impl OperationOptions for PromoteOptions {
    const OPERATION: &'static str = "promote virtual copy";
}

/// Partial update applied by `modify_volume`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VolumeChanges {
    /// Rename the volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// Replace the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Change the user CPG reference.
    #[serde(rename = "userCPG", skip_serializing_if = "Option::is_none")]
    pub user_cpg: Option<String>,
    /// Change the snapshot CPG reference.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
    /// Set expiration, in hours from now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_hours: Option<u32>,
    /// Set retention, in hours from now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_hours: Option<u32>,
}

impl OperationOptions for VolumeChanges {
    const OPERATION: &'static str = "modify volume";
}
