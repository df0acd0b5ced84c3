//! Types used by the teardown janitor.

use std::fmt;

/// Kind of resource a janitor tracks, in sweep order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ResourceKind {
    /// A remote-copy group; stopped before removal.
    RemoteCopyGroup,
    /// The QoS rule of a volume set.
    QosRule,
    /// A volume set.
    VolumeSet,
    /// A snapshot.
    Snapshot,
    /// A base volume.
    Volume,
}

impl ResourceKind {
    /// Every kind in the order a sweep deletes them.
    pub const SWEEP_ORDER: [Self; 5] = [
        Self::RemoteCopyGroup,
        Self::QosRule,
        Self::VolumeSet,
        Self::Snapshot,
        Self::Volume,
    ];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RemoteCopyGroup => "remote copy group",
            Self::QosRule => "QoS rule",
            Self::VolumeSet => "volume set",
            Self::Snapshot => "snapshot",
            Self::Volume => "volume",
        })
    }
}

/// A resource recorded for teardown.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct TrackedResource {
    pub(super) kind: ResourceKind,
    pub(super) name: String,
}

/// A resource the sweep could not delete.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweepFailure {
    /// Kind of the resource.
    pub kind: ResourceKind,
    /// Resource name; for QoS rules, the volume set name.
    pub name: String,
    /// Rendered error.
    pub message: String,
}
