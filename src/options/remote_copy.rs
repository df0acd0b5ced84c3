//! Options for remote-copy group operations.

use serde::{Deserialize, Serialize};

use super::OperationOptions;
use crate::model::ReplicationMode;

/// Target descriptor used when creating a group.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetSpec {
    /// Name of the target array.
    pub target_name: String,
    /// Replication mode.
    pub mode: ReplicationMode,
    /// User CPG on the target array.
    #[serde(rename = "userCPG", skip_serializing_if = "Option::is_none")]
    pub user_cpg: Option<String>,
    /// Snapshot CPG on the target array.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
}

/// Optional settings for `create_remote_copy_group`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RemoteCopyGroupOptions {
    /// Domain for the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Local user CPG.
    #[serde(rename = "localUserCPG", skip_serializing_if = "Option::is_none")]
    pub local_user_cpg: Option<String>,
    /// Local snapshot CPG.
    #[serde(rename = "localSnapCPG", skip_serializing_if = "Option::is_none")]
    pub local_snap_cpg: Option<String>,
}

impl OperationOptions for RemoteCopyGroupOptions {
    const OPERATION: &'static str = "create remote copy group";
}

/// Per-target change applied by `modify_remote_copy_group`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetUpdate {
    /// Name of the target array.
    pub target_name: String,
    /// New sync period in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_period: Option<u64>,
    /// Remove the sync period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rm_sync_period: Option<bool>,
}

/// Partial update applied by `modify_remote_copy_group`. Target changes
/// propagate to the mirrored group on the target array.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RemoteCopyGroupChanges {
    /// Target changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetUpdate>>,
    /// New local user CPG.
    #[serde(rename = "localUserCPG", skip_serializing_if = "Option::is_none")]
    pub local_user_cpg: Option<String>,
    /// New local snapshot CPG.
    #[serde(rename = "localSnapCPG", skip_serializing_if = "Option::is_none")]
    pub local_snap_cpg: Option<String>,
}

impl OperationOptions for RemoteCopyGroupChanges {
    const OPERATION: &'static str = "modify remote copy group";
}

/// Secondary volume to pair with a local volume on one target.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VolumePair {
    /// Name of the target array.
    pub target_name: String,
    /// Volume name on the target array.
    pub sec_volume_name: String,
}

/// Optional settings for `add_volume_to_remote_copy_group`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddVolumeOptions {
    /// Let the target array create the secondary volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_auto_creation: Option<bool>,
    /// Skip the initial full sync.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_initial_sync: Option<bool>,
    /// Give the secondary volume a different WWN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub different_secondary_wwn: Option<bool>,
}

impl OperationOptions for AddVolumeOptions {
    const OPERATION: &'static str = "add volume to remote copy group";
}

/// How `remove_volume_from_remote_copy_group` removes a member.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RemoveVolumeOptions {
    /// Keep the resync snapshot.
    pub keep_snap: bool,
    /// Delete the secondary volume on the target array too.
    pub remove_from_target: bool,
    /// Use `DELETE` on the member resource instead of a group action.
    pub use_http_delete: bool,
}
