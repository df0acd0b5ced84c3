//! Wire representations of array resources.
//!
//! Field names follow the management API's JSON. Fields the client does not
//! model are ignored on decode.

mod codes;
mod qos;
mod remote_copy;
mod system;
mod volume;
mod volume_set;

use serde::{Deserialize, Serialize};

pub use codes::{
    ConversionOperation, FlashCachePolicy, ProvisioningType, QosTargetType, RecoveryAction,
    ReplicationMode, SetAction, TargetState, TaskPriority, TuneOperation,
};
pub use qos::QosRule;
pub use remote_copy::{
    RemoteCopyGroup, RemoteCopyTarget, RemoteCopyVolume, RemoteVolume, mirrored_group_name,
};
pub use system::{StorageSystemInfo, TaskHandle};
pub use volume::{KeyValue, Volume};
pub use volume_set::VolumeSet;

/// Counted list returned by collection endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Collection<T> {
    /// Number of members reported by the array.
    #[serde(default)]
    pub total: u64,
    /// The members themselves.
    #[serde(default = "Vec::new")]
    pub members: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            total: 0,
            members: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Returns `true` when the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
