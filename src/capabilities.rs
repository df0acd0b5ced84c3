//! Array capability flags that steer client-side validation.
//!
//! Capabilities are plain values owned by each client and passed by
//! reference into validation. Two clients never share them.

use serde::Serialize;
use tracing::info;

use crate::model::StorageSystemInfo;

/// First firmware generation with primera-style provisioning rules.
const PRIMERA_MAJOR: u32 = 4;
/// First firmware generation with merlin-style provisioning rules.
const MERLIN_MAJOR: u32 = 10;
/// First legacy firmware with compression support.
const COMPRESSION_MIN_VERSION: (u32, u32, u32) = (3, 3, 1);

/// Validation-relevant features of the connected array.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ArrayCapabilities {
    /// Primera-style provisioning rules apply.
    pub primera: bool,
    /// The array supports compressed volumes.
    pub compression: bool,
    /// Merlin-style provisioning rules apply.
    pub merlin: bool,
}

/// Capability values forced by configuration. `None` keeps the discovered
/// value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CapabilityOverrides {
    /// Override for [`ArrayCapabilities::primera`].
    pub primera: Option<bool>,
    /// Override for [`ArrayCapabilities::compression`].
    pub compression: Option<bool>,
    /// Override for [`ArrayCapabilities::merlin`].
    pub merlin: Option<bool>,
}

impl ArrayCapabilities {
    /// Capabilities of a legacy array without compression.
    pub const LEGACY: Self = Self {
        primera: false,
        compression: false,
        merlin: false,
    };

    /// Returns `true` when provisioning flags must be strictly typed and
    /// combined (primera or merlin generation).
    #[must_use]
    pub const fn strict_provisioning(&self) -> bool {
        self.primera || self.merlin
    }

    /// Derives capabilities from the reported firmware version. An absent or
    /// unparsable version yields [`Self::LEGACY`].
    #[must_use]
    pub fn from_system_info(info: &StorageSystemInfo) -> Self {
        let Some(version) = info.system_version.as_deref().and_then(parse_version) else {
            return Self::LEGACY;
        };
        let (major, _, _) = version;
        let primera = major >= PRIMERA_MAJOR;
        let capabilities = Self {
            primera,
            compression: primera || version >= COMPRESSION_MIN_VERSION,
            merlin: major >= MERLIN_MAJOR,
        };
        info!(
            system = info.name.as_str(),
            primera = capabilities.primera,
            compression = capabilities.compression,
            merlin = capabilities.merlin,
            "discovered array capabilities"
        );
        capabilities
    }

    /// Applies configuration overrides.
    #[must_use]
    pub fn with_overrides(self, overrides: CapabilityOverrides) -> Self {
        Self {
            primera: overrides.primera.unwrap_or(self.primera),
            compression: overrides.compression.unwrap_or(self.compression),
            merlin: overrides.merlin.unwrap_or(self.merlin),
        }
    }
}

fn parse_version(raw: &str) -> Option<(u32, u32, u32)> {
    let mut parts = raw.trim().split('.').map(str::parse::<u32>);
    let major = parts.next()?.ok()?;
    let minor = parts.next().and_then(Result::ok).unwrap_or(0);
    let patch = parts.next().and_then(Result::ok).unwrap_or(0);
    Some((major, minor, patch))
}
