//! Typed option sets accepted by operations.
//!
//! Every field is optional so callers can express "absent", "explicitly
//! false" and "explicitly true". Each set rejects unknown keys, which keeps
//! the allow-list in one place: the struct definition.

mod remote_copy;
mod volume;
mod volume_set;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ArrayError;

pub use remote_copy::{
    AddVolumeOptions, RemoteCopyGroupChanges, RemoteCopyGroupOptions, RemoveVolumeOptions,
    TargetSpec, TargetUpdate, VolumePair,
};
pub use volume::{
    CopyOptions, CreateVolumeOptions, PromoteOptions, SnapshotOptions, TuneOptions, VolumeChanges,
};
pub use volume_set::{QosRuleSpec, VolumeSetChanges, VolumeSetSnapshotOptions};

/// Shared behaviour of option sets.
pub trait OperationOptions: DeserializeOwned + Serialize + Default {
    /// Operation name used in error messages.
    const OPERATION: &'static str;

    /// Parses a JSON object of options. `null` means "no options"; unknown
    /// keys and mistyped values are rejected.
    ///
    /// # Errors
    ///
    /// Returns a client-side [`ArrayError::BadRequest`] describing the first
    /// offending key.
    fn from_value(value: Value) -> Result<Self, ArrayError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|err| {
            ArrayError::bad_request(format!("invalid {} options: {err}", Self::OPERATION))
        })
    }

    /// Serialises the set fields into a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Decode`] if serialisation does not produce an
    /// object, which only happens for a broken `Serialize` impl.
    fn to_map(&self) -> Result<Map<String, Value>, ArrayError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ArrayError::Decode {
                context: Self::OPERATION.to_owned(),
                message: format!("options serialised to {other}"),
            }),
            Err(err) => Err(ArrayError::Decode {
                context: Self::OPERATION.to_owned(),
                message: err.to_string(),
            }),
        }
    }
}
