//! Error taxonomy shared by every array operation.
//!
//! Array responses are classified by HTTP status into a small set of kinds.
//! The array's numeric sub-code travels with the error so callers can tell
//! apart failures that share a status (for example sub-code 285, "flash cache
//! does not exist", from a plain missing volume set).

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;

/// Array sub-code reported when flash cache is not configured.
pub const FLASH_CACHE_NOT_FOUND: u32 = 285;

/// Where a [`Fault`] was raised.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaultOrigin {
    /// Rejected by client-side validation; no request was sent.
    Client,
    /// Returned by the array in an error response.
    Array,
}

/// Detail carried by the status-derived error variants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fault {
    /// Array sub-code, when the response body carried one.
    pub code: Option<u32>,
    /// Human readable description.
    pub description: String,
    /// Whether the fault came from validation or from the array.
    pub origin: FaultOrigin,
}

impl Fault {
    /// Builds a fault raised before any request was dispatched.
    #[must_use]
    pub fn client(description: impl Into<String>) -> Self {
        Self {
            code: None,
            description: description.into(),
            origin: FaultOrigin::Client,
        }
    }

    /// Builds a fault from an array error response.
    #[must_use]
    pub fn array(code: Option<u32>, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            origin: FaultOrigin::Array,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {code})", self.description),
            None => f.write_str(&self.description),
        }
    }
}

/// Coarse classification of an [`ArrayError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Malformed or invalid request.
    BadRequest,
    /// Duplicate identity or action invalid for the current state.
    Conflict,
    /// Target resource does not exist.
    NotFound,
    /// Disallowed by cross-resource state.
    Forbidden,
    /// Session missing or expired.
    Unauthorized,
    /// Array-side failure (5xx).
    Server,
    /// Any other non-success status.
    UnexpectedStatus,
    /// Call pattern rejected before dispatch with a dedicated error.
    ClientValidation,
    /// Request never produced a response.
    Transport,
    /// Response body could not be decoded.
    Decode,
    /// Client configuration is invalid.
    Config,
    /// Array CLI command failed.
    Command,
}

/// Errors raised by array operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ArrayError {
    /// Invalid parameters, detected locally or reported as HTTP 400.
    #[error("bad request: {0}")]
    BadRequest(Fault),
    /// HTTP 409 or a locally detected state conflict.
    #[error("conflict: {0}")]
    Conflict(Fault),
    /// HTTP 404.
    #[error("not found: {0}")]
    NotFound(Fault),
    /// HTTP 403.
    #[error("forbidden: {0}")]
    Forbidden(Fault),
    /// HTTP 401.
    #[error("unauthorized: {0}")]
    Unauthorized(Fault),
    /// HTTP 5xx.
    #[error("array error {status}: {fault}")]
    Server {
        /// Status code returned by the array.
        status: u16,
        /// Decoded error body.
        fault: Fault,
    },
    /// Any other non-success status.
    #[error("unexpected status {status}: {fault}")]
    UnexpectedStatus {
        /// Status code returned by the array.
        status: u16,
        /// Decoded error body.
        fault: Fault,
    },
    /// Raised by `set_qos_rule` when neither limit is supplied.
    #[error("no QoS limit specified for volume set {set_name}")]
    NoQosRule {
        /// Volume set the rule was meant for.
        set_name: String,
    },
    /// The request could not be delivered or the response not read.
    #[error("transport error: {message}")]
    Transport {
        /// Underlying error message.
        message: String,
    },
    /// A successful response carried an unexpected body.
    #[error("failed to decode {context} response: {message}")]
    Decode {
        /// Operation whose response failed to decode.
        context: String,
        /// Parser error message.
        message: String,
    },
    /// Client configuration problem.
    #[error("configuration error: {0}")]
    Config(String),
    /// A local process (usually `ssh`) could not be started.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// An array CLI command exited unsuccessfully without a classifiable
    /// message.
    #[error("{program} exited with status {status_text}: {stderr}")]
    CommandFailure {
        /// Command name used for the attempted operation.
        program: String,
        /// Exit status as reported by the OS.
        status: Option<i32>,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the process.
        stderr: String,
    },
}

#[derive(Deserialize)]
struct FaultBody {
    code: Option<u32>,
    desc: Option<String>,
}

impl ArrayError {
    /// Client-side `BadRequest` with the given description.
    #[must_use]
    pub fn bad_request(description: impl Into<String>) -> Self {
        Self::BadRequest(Fault::client(description))
    }

    /// Client-side `Conflict` with the given description.
    #[must_use]
    pub fn conflict(description: impl Into<String>) -> Self {
        Self::Conflict(Fault::client(description))
    }

    /// Classifies a non-success response.
    ///
    /// The body is expected to look like `{"code": 23, "desc": "..."}`; when
    /// it is absent or shaped differently the status reason is used instead.
    #[must_use]
    pub fn from_status(status: u16, body: Option<&Value>) -> Self {
        let parsed = body.and_then(|value| FaultBody::deserialize(value).ok());
        let (code, desc) = match parsed {
            Some(fault_body) => (fault_body.code, fault_body.desc),
            None => (None, None),
        };
        let description = desc.unwrap_or_else(|| default_reason(status).to_owned());
        let fault = Fault::array(code, description);
        match status {
            400 => Self::BadRequest(fault),
            401 => Self::Unauthorized(fault),
            403 => Self::Forbidden(fault),
            404 => Self::NotFound(fault),
            409 => Self::Conflict(fault),
            500..=599 => Self::Server { status, fault },
            _ => Self::UnexpectedStatus { status, fault },
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Server { .. } => ErrorKind::Server,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::NoQosRule { .. } => ErrorKind::ClientValidation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Config(_) => ErrorKind::Config,
            Self::Spawn { .. } | Self::CommandFailure { .. } => ErrorKind::Command,
        }
    }

    /// Returns the fault detail for status-derived variants.
    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::BadRequest(fault)
            | Self::Conflict(fault)
            | Self::NotFound(fault)
            | Self::Forbidden(fault)
            | Self::Unauthorized(fault)
            | Self::Server { fault, .. }
            | Self::UnexpectedStatus { fault, .. } => Some(fault),
            _ => None,
        }
    }

    /// Returns the array sub-code, if any.
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        self.fault().and_then(|fault| fault.code)
    }

    /// Returns `true` when the error was raised before any request was sent.
    #[must_use]
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::NoQosRule { .. })
            || self
                .fault()
                .is_some_and(|fault| fault.origin == FaultOrigin::Client)
    }

    /// Returns `true` for `NotFound`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` when a grow request was refused.
    ///
    /// Some arrays answer a shrink attempt with 409 rather than 400, so both
    /// count.
    #[must_use]
    pub const fn is_rejected_growth(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::Conflict(_))
    }
}

impl From<ConfigError> for ArrayError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}

const fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        409 => "conflict",
        500..=599 => "internal server error",
        _ => "unexpected response",
    }
}
