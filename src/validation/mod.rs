//! Client-side checks run before any request is dispatched.
//!
//! Every failure here is a [`ArrayError::BadRequest`] (or `Conflict` where
//! the array would report one) with [`crate::error::FaultOrigin::Client`].
//! Checks that depend on the array generation take an
//! [`ArrayCapabilities`] by reference.

use crate::capabilities::ArrayCapabilities;
use crate::error::ArrayError;
use crate::model::{ConversionOperation, ProvisioningType, TuneOperation, Volume};
use crate::options::{CopyOptions, CreateVolumeOptions, PromoteOptions, TuneOptions};

/// Longest volume name the array accepts.
pub const MAX_NAME_LEN: usize = 31;
/// Volume sizes must stay below this many MiB.
pub const MAX_VOLUME_SIZE_MIB: u64 = 16_777_216;
/// Longest metadata key accepted.
pub const MAX_METADATA_KEY_LEN: usize = 255;
/// Largest single growth step, in GiB.
pub const MAX_GROWTH_GIB: u64 = 16_384;

const MAX_GROWTH_GIB_F64: f64 = 16_384.0;
const MIB_PER_GIB: u64 = 1024;
const FORBIDDEN_KEY_CHARS: [char; 5] = ['&', '/', '?', '#', '%'];

/// Checks a volume (or snapshot) name.
///
/// # Errors
///
/// Rejects empty names, names over [`MAX_NAME_LEN`] characters and names
/// outside `[A-Za-z0-9_.:-]`.
pub fn volume_name(name: &str) -> Result<(), ArrayError> {
    if name.is_empty() {
        return Err(ArrayError::bad_request("volume name must not be empty"));
    }
    let length = name.chars().count();
    if length > MAX_NAME_LEN {
        return Err(ArrayError::bad_request(format!(
            "volume name {name} is {length} characters; the limit is {MAX_NAME_LEN}"
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | ':' | '-')))
    {
        return Err(ArrayError::bad_request(format!(
            "volume name {name} contains invalid character {bad:?}"
        )));
    }
    Ok(())
}

/// Checks that a caller-supplied identity is present.
///
/// # Errors
///
/// Rejects empty or whitespace-only names.
pub fn resource_name(kind: &str, name: &str) -> Result<(), ArrayError> {
    if name.trim().is_empty() {
        return Err(ArrayError::bad_request(format!("{kind} name must not be empty")));
    }
    Ok(())
}

/// Checks a requested volume size.
///
/// # Errors
///
/// Rejects zero and anything at or above [`MAX_VOLUME_SIZE_MIB`].
pub fn volume_size(size_mib: u64) -> Result<(), ArrayError> {
    if size_mib == 0 || size_mib >= MAX_VOLUME_SIZE_MIB {
        return Err(ArrayError::bad_request(format!(
            "volume size {size_mib} MiB must be between 1 and {} MiB",
            MAX_VOLUME_SIZE_MIB - 1
        )));
    }
    Ok(())
}

/// Checks a metadata key.
///
/// # Errors
///
/// Rejects empty keys, keys over [`MAX_METADATA_KEY_LEN`] characters and
/// keys containing `& / ? # %` or control characters.
pub fn metadata_key(key: &str) -> Result<(), ArrayError> {
    if key.is_empty() {
        return Err(ArrayError::bad_request("metadata key must not be empty"));
    }
    let length = key.chars().count();
    if length > MAX_METADATA_KEY_LEN {
        return Err(ArrayError::bad_request(format!(
            "metadata key is {length} characters; the limit is {MAX_METADATA_KEY_LEN}"
        )));
    }
    if let Some(bad) = key
        .chars()
        .find(|ch| FORBIDDEN_KEY_CHARS.contains(ch) || ch.is_control())
    {
        return Err(ArrayError::bad_request(format!(
            "metadata key contains invalid character {bad:?}"
        )));
    }
    Ok(())
}

/// A positive, whole number of GiB to grow a volume by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GrowthGib(u64);

impl GrowthGib {
    /// Growth in GiB.
    #[must_use]
    pub const fn gib(self) -> u64 {
        self.0
    }

    /// Growth in MiB, as sent on the wire.
    #[must_use]
    pub const fn mib(self) -> u64 {
        self.0 * MIB_PER_GIB
    }
}

impl TryFrom<i64> for GrowthGib {
    type Error = ArrayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let Ok(positive) = u64::try_from(value) else {
            return Err(ArrayError::bad_request(format!(
                "cannot shrink a volume (growth {value} GiB)"
            )));
        };
        Self::try_from(positive)
    }
}

impl TryFrom<u64> for GrowthGib {
    type Error = ArrayError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ArrayError::bad_request("growth must be at least 1 GiB"));
        }
        if value > MAX_GROWTH_GIB {
            return Err(ArrayError::bad_request(format!(
                "growth {value} GiB exceeds {MAX_GROWTH_GIB} GiB"
            )));
        }
        Ok(Self(value))
    }
}

impl TryFrom<f64> for GrowthGib {
    type Error = ArrayError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract().abs() > 0.0 {
            return Err(ArrayError::bad_request(format!(
                "growth {value} GiB must be a whole number"
            )));
        }
        if value < 1.0 {
            return Err(ArrayError::bad_request(format!(
                "cannot shrink a volume (growth {value} GiB)"
            )));
        }
        if value > MAX_GROWTH_GIB_F64 {
            return Err(ArrayError::bad_request(format!(
                "growth {value} GiB exceeds {MAX_GROWTH_GIB} GiB"
            )));
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is a whole number between 1 and MAX_GROWTH_GIB"
        )]
        let whole = value as u64;
        Self::try_from(whole)
    }
}

impl TryFrom<i32> for GrowthGib {
    type Error = ArrayError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

/// Provisioning flags shared by volume creation and online copies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Provisioning {
    /// Thin provisioning.
    pub tpvv: Option<bool>,
    /// Thin dedup provisioning.
    pub tdvv: Option<bool>,
    /// Data reduction.
    pub reduce: Option<bool>,
    /// Compression.
    pub compression: Option<bool>,
}

impl Provisioning {
    /// Returns `true` when any thin mode was chosen.
    #[must_use]
    pub const fn has_choice(&self) -> bool {
        matches!(self.tpvv, Some(true))
            || matches!(self.tdvv, Some(true))
            || matches!(self.reduce, Some(true))
    }
}

/// Normalises provisioning flags for the connected array.
///
/// On primera-style arrays dedup and compression only exist together and
/// are sent as `reduce`; `false` values carry no meaning and are dropped.
/// Legacy arrays accept the flags as given, subject to the compression
/// capability.
///
/// # Errors
///
/// Returns a client-side `BadRequest` for combinations the array rejects.
pub fn provisioning(
    caps: &ArrayCapabilities,
    flags: Provisioning,
) -> Result<Provisioning, ArrayError> {
    let is_set = |flag: Option<bool>| flag == Some(true);
    if caps.strict_provisioning() {
        let dedup = is_set(flags.tdvv);
        let compress = is_set(flags.compression);
        if dedup != compress {
            return Err(ArrayError::bad_request(
                "tdvv and compression must be combined on this array",
            ));
        }
        let reduce = is_set(flags.reduce) || (dedup && compress);
        let tpvv = is_set(flags.tpvv);
        if tpvv && reduce {
            return Err(ArrayError::bad_request(
                "tpvv cannot be combined with data reduction",
            ));
        }
        return Ok(Provisioning {
            tpvv: tpvv.then_some(true),
            tdvv: None,
            reduce: reduce.then_some(true),
            compression: None,
        });
    }

    if flags.reduce.is_some() {
        return Err(ArrayError::bad_request(
            "reduce is only supported on primera-style arrays",
        ));
    }
    if is_set(flags.compression) && !caps.compression {
        return Err(ArrayError::bad_request(
            "array does not support compression",
        ));
    }
    if is_set(flags.tpvv) && is_set(flags.tdvv) {
        return Err(ArrayError::bad_request("tpvv and tdvv are exclusive"));
    }
    Ok(flags)
}

/// Validates and normalises `create_volume` options.
///
/// # Errors
///
/// Returns a client-side `BadRequest` for invalid provisioning.
pub fn create_volume(
    caps: &ArrayCapabilities,
    options: CreateVolumeOptions,
) -> Result<CreateVolumeOptions, ArrayError> {
    let normalised = provisioning(
        caps,
        Provisioning {
            tpvv: options.tpvv,
            tdvv: options.tdvv,
            reduce: options.reduce,
            compression: options.compression,
        },
    )?;
    Ok(CreateVolumeOptions {
        tpvv: normalised.tpvv,
        tdvv: normalised.tdvv,
        reduce: normalised.reduce,
        compression: normalised.compression,
        ..options
    })
}

/// Validates and normalises `copy_volume` options.
///
/// Offline copies reject provisioning settings and drop `destCPG`. Online
/// copies reject the offline-only settings and, on primera-style arrays,
/// need an explicit provisioning choice.
///
/// # Errors
///
/// Returns a client-side `BadRequest` naming the conflicting key.
pub fn copy_volume(
    caps: &ArrayCapabilities,
    options: CopyOptions,
) -> Result<CopyOptions, ArrayError> {
    if !options.is_online() {
        let offline_only = [
            ("tpvv", options.tpvv.is_some()),
            ("tdvv", options.tdvv.is_some()),
            ("reduce", options.reduce.is_some()),
            ("compression", options.compression.is_some()),
            ("snapCPG", options.snap_cpg.is_some()),
        ];
        if let Some((key, _)) = offline_only.iter().find(|(_, present)| *present) {
            return Err(ArrayError::bad_request(format!(
                "{key} is only valid for online copies"
            )));
        }
        return Ok(CopyOptions {
            dest_cpg: None,
            ..options
        });
    }

    if options.save_snapshot.is_some() {
        return Err(ArrayError::bad_request(
            "saveSnapshot is only valid for offline copies",
        ));
    }
    if options.priority.is_some() {
        return Err(ArrayError::bad_request(
            "priority is only valid for offline copies",
        ));
    }
    let normalised = provisioning(
        caps,
        Provisioning {
            tpvv: options.tpvv,
            tdvv: options.tdvv,
            reduce: options.reduce,
            compression: options.compression,
        },
    )?;
    if caps.strict_provisioning() && !normalised.has_choice() {
        return Err(ArrayError::bad_request(
            "online copies on this array need tpvv or tdvv with compression",
        ));
    }
    Ok(CopyOptions {
        tpvv: normalised.tpvv,
        tdvv: normalised.tdvv,
        reduce: normalised.reduce,
        compression: normalised.compression,
        ..options
    })
}

/// Picks the CPG an online copy creates its destination in.
///
/// `requested` is the `destCPG` carried in the copy options. It fills in an
/// empty `positional` CPG and must otherwise agree with it.
///
/// # Errors
///
/// Returns a client-side `BadRequest` when the two disagree or the chosen
/// name is invalid.
pub fn copy_destination_cpg<'a>(
    positional: &'a str,
    requested: Option<&'a str>,
) -> Result<&'a str, ArrayError> {
    let chosen = match requested {
        Some(cpg) if positional.trim().is_empty() => cpg,
        Some(cpg) if cpg != positional => {
            return Err(ArrayError::bad_request(format!(
                "destCPG {cpg} does not match destination CPG {positional}"
            )));
        }
        _ => positional,
    };
    resource_name("destination CPG", chosen)?;
    Ok(chosen)
}

/// Validates and normalises `tune_volume` options.
///
/// Only checks that hold whatever state the volume is in run here; see
/// [`tune_changes_type`] for the check against the volume itself.
///
/// # Errors
///
/// Returns a client-side `BadRequest` for missing CPGs, an oversized
/// `keepVV` and conversions the array generation does not support.
pub fn tune_volume(
    caps: &ArrayCapabilities,
    operation: TuneOperation,
    options: TuneOptions,
) -> Result<TuneOptions, ArrayError> {
    match operation {
        TuneOperation::UserCpg => require_cpg(options.user_cpg.as_deref(), "userCPG")?,
        TuneOperation::SnapCpg => {
            require_cpg(options.snap_cpg.as_deref(), "snapCPG")?;
            if options.conversion_operation.is_some() {
                return Err(ArrayError::bad_request(
                    "conversionOperation requires the userCPG tune operation",
                ));
            }
        }
    }

    if let Some(keep_vv) = options.keep_vv.as_deref() {
        if options.conversion_operation.is_none() {
            return Err(ArrayError::bad_request(
                "keepVV requires a conversionOperation",
            ));
        }
        volume_name(keep_vv)?;
    }

    let Some(conversion) = options.conversion_operation else {
        if options.compression == Some(true) {
            return Err(ArrayError::bad_request(
                "compression requires a conversionOperation",
            ));
        }
        return Ok(options);
    };

    let compress = options.compression == Some(true);
    let (wire_conversion, wire_compression) = if caps.strict_provisioning() {
        match conversion {
            ConversionOperation::Full => {
                return Err(ArrayError::bad_request(
                    "full provisioning is not supported on this array",
                ));
            }
            ConversionOperation::Dedup => {
                return Err(ArrayError::bad_request(
                    "dedup without compression is not supported on this array",
                ));
            }
            ConversionOperation::Thin if compress => {
                return Err(ArrayError::bad_request(
                    "thin volumes cannot be compressed on this array",
                ));
            }
            ConversionOperation::Thin => (ConversionOperation::Thin, None),
            ConversionOperation::DedupCompressed => (ConversionOperation::Dedup, Some(true)),
        }
    } else {
        if (compress || conversion == ConversionOperation::DedupCompressed) && !caps.compression {
            return Err(ArrayError::bad_request(
                "array does not support compression",
            ));
        }
        (conversion, options.compression)
    };

    Ok(TuneOptions {
        conversion_operation: Some(wire_conversion),
        compression: wire_compression,
        ..options
    })
}

/// Refuses a conversion that would leave `volume` with the provisioning
/// type it already has. `options` must already be normalised by
/// [`tune_volume`].
///
/// # Errors
///
/// Returns a client-side `BadRequest` for a same-type conversion.
pub fn tune_changes_type(options: &TuneOptions, volume: &Volume) -> Result<(), ArrayError> {
    let Some(conversion) = options.conversion_operation else {
        return Ok(());
    };
    let effective = if options.compression == Some(true) {
        ConversionOperation::DedupCompressed
    } else {
        conversion
    };
    if current_conversion(volume) == Some(effective) {
        return Err(ArrayError::bad_request(format!(
            "volume {} is already {effective:?}",
            volume.name
        )));
    }
    Ok(())
}

/// Rejects promote option combinations the array refuses.
///
/// # Errors
///
/// Returns a client-side `Conflict` when `online` and `priority` are
/// combined.
pub fn promote(options: &PromoteOptions) -> Result<(), ArrayError> {
    if options.online == Some(true) && options.priority.is_some() {
        return Err(ArrayError::conflict(
            "online promote cannot take a priority",
        ));
    }
    Ok(())
}

fn require_cpg(value: Option<&str>, key: &str) -> Result<(), ArrayError> {
    match value {
        Some(cpg) if !cpg.trim().is_empty() => Ok(()),
        _ => Err(ArrayError::bad_request(format!(
            "{key} is required for this tune operation"
        ))),
    }
}

fn current_conversion(volume: &Volume) -> Option<ConversionOperation> {
    let compressed = volume.compression == Some(true) || volume.reduce == Some(true);
    match volume.provisioning_type? {
        ProvisioningType::Full => Some(ConversionOperation::Full),
        ProvisioningType::Thin => Some(ConversionOperation::Thin),
        ProvisioningType::Dedup if compressed => Some(ConversionOperation::DedupCompressed),
        ProvisioningType::Dedup => Some(ConversionOperation::Dedup),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
