//! Storage system information and task handles.

use serde::{Deserialize, Serialize};

/// Identity and version of the array, from `GET /system`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorageSystemInfo {
    /// System id, used in mirrored remote-copy group names.
    pub id: u64,
    /// System name.
    pub name: String,
    /// Hardware model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Firmware version, for example `4.2.1.78`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_version: Option<String>,
}

/// Background task started by an operation.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TaskHandle {
    /// Array task id.
    #[serde(rename = "taskid")]
    pub task_id: u64,
}
