//! Volume sets.

use serde::{Deserialize, Serialize};

use super::FlashCachePolicy;

/// A named group of volumes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSet {
    /// Unique set name.
    pub name: String,
    /// Numeric id assigned by the array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    /// Domain the set belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Member volume names. Order carries no meaning.
    #[serde(default)]
    pub setmembers: Vec<String>,
    /// Flash cache policy, when flash cache is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_cache_policy: Option<FlashCachePolicy>,
}

impl VolumeSet {
    /// Returns `true` when `volume` is a member.
    #[must_use]
    pub fn contains(&self, volume: &str) -> bool {
        self.setmembers.iter().any(|member| member == volume)
    }
}
