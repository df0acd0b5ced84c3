//! QoS rules keyed by volume set.

use serde::{Deserialize, Serialize};

use super::QosTargetType;

/// A QoS rule as reported by the array.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QosRule {
    /// Name of the targeted volume set.
    pub name: String,
    /// Kind of object the rule targets.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub target_type: Option<QosTargetType>,
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
