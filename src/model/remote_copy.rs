//! Remote-copy groups, their targets and member volumes.

use serde::{Deserialize, Serialize};

use super::{ReplicationMode, TargetState};

/// A replication unit pairing local volumes with volumes on target arrays.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCopyGroup {
    /// Group name, unique within its domain.
    pub name: String,
    /// Domain the group belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Local CPG for user space of secondary volumes.
    #[serde(rename = "localUserCPG", skip_serializing_if = "Option::is_none")]
    pub local_user_cpg: Option<String>,
    /// Local CPG for snapshot space.
    #[serde(rename = "localSnapCPG", skip_serializing_if = "Option::is_none")]
    pub local_snap_cpg: Option<String>,
    /// Whether the group currently runs in the reversed direction.
    #[serde(default)]
    pub role_reversed: bool,
    /// Replication targets.
    #[serde(default)]
    pub targets: Vec<RemoteCopyTarget>,
    /// Member volumes.
    #[serde(default)]
    pub volumes: Vec<RemoteCopyVolume>,
}

impl RemoteCopyGroup {
    /// Looks up a target by name.
    #[must_use]
    pub fn target(&self, target_name: &str) -> Option<&RemoteCopyTarget> {
        self.targets
            .iter()
            .find(|target| target.target_name == target_name)
    }

    /// Returns `true` when any target is replicating.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.targets
            .iter()
            .any(|target| target.state == Some(TargetState::Started))
    }
}

/// Per-target replication settings and state.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCopyTarget {
    /// Name of the target array.
    pub target_name: String,
    /// Replication mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ReplicationMode>,
    /// User CPG on the target array.
    #[serde(rename = "userCPG", skip_serializing_if = "Option::is_none")]
    pub user_cpg: Option<String>,
    /// Snapshot CPG on the target array.
    #[serde(rename = "snapCPG", skip_serializing_if = "Option::is_none")]
    pub snap_cpg: Option<String>,
    /// Sync period in seconds for periodic mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_period: Option<u64>,
    /// Replication state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TargetState>,
    /// Whether this target's direction is reversed after a failover.
    #[serde(default)]
    pub role_reversed: bool,
    /// Time of the last completed sync, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_last_sync_time: Option<String>,
}

/// A member volume and its counterparts on each target.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCopyVolume {
    /// Local volume name. Some firmware reports this as `name`.
    #[serde(alias = "name")]
    pub local_volume_name: String,
    /// Remote counterparts.
    #[serde(default)]
    pub remote_volumes: Vec<RemoteVolume>,
}

/// Remote counterpart of a member volume.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVolume {
    /// Target array holding the volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Volume name on the target array.
    pub remote_volume_name: String,
}

/// Name of the group the target array creates to mirror `local_name`.
///
/// ```
/// assert_eq!(vvctl::model::mirrored_group_name("rcg1", 12345), "rcg1.r12345");
/// ```
#[must_use]
pub fn mirrored_group_name(local_name: &str, source_system_id: u64) -> String {
    format!("{local_name}.r{source_system_id}")
}
