//! Options for volume set and QoS operations.

use serde::{Deserialize, Serialize};

use super::OperationOptions;
use crate::model::{FlashCachePolicy, SetAction};

/// Optional settings for `create_snapshot_of_volume_set`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VolumeSetSnapshotOptions {
    /// Free-form comment applied to every snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Create read-only snapshots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Hours until the snapshots expire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_hours: Option<u32>,
    /// Hours the snapshots are retained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_hours: Option<u32>,
}

impl OperationOptions for VolumeSetSnapshotOptions {
    const OPERATION: &'static str = "create volume set snapshot";
}

/// Limits and goals of a QoS rule. Modifying a rule replaces the supplied
/// fields.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QosRuleSpec {
    /// Minimum bandwidth goal in KB/s.
    #[serde(rename = "bwMinGoalKB", skip_serializing_if = "Option::is_none")]
    pub bw_min_goal_kb: Option<u64>,
    /// Maximum bandwidth limit in KB/s.
    #[serde(rename = "bwMaxLimitKB", skip_serializing_if = "Option::is_none")]
    pub bw_max_limit_kb: Option<u64>,
    /// Minimum IOPS goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_min_goal: Option<u64>,
    /// Maximum IOPS limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_max_limit: Option<u64>,
    /// Latency goal in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_goal: Option<u64>,
    /// Rule priority (1 low, 2 normal, 3 high).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Whether the rule is enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
}

impl OperationOptions for QosRuleSpec {
    const OPERATION: &'static str = "QoS rule";
}

/// Partial update applied by `modify_volume_set`.
///
/// `action` with `setmembers` adds or removes members; the remaining fields
/// apply independently of it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VolumeSetChanges {
    /// Whether `setmembers` are added or removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<SetAction>,
    /// Members to add or remove.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setmembers: Vec<String>,
    /// Rename the set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// Replace the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Flash cache policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_cache_policy: Option<FlashCachePolicy>,
}

impl VolumeSetChanges {
    /// Returns `true` when something besides membership changes.
    #[must_use]
    pub const fn has_attribute_changes(&self) -> bool {
        self.new_name.is_some() || self.comment.is_some() || self.flash_cache_policy.is_some()
    }
}

impl OperationOptions for VolumeSetChanges {
    const OPERATION: &'static str = "modify volume set";
}
