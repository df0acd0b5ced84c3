//! Client library for a storage array's HTTP management API.
//!
//! [`ArrayClient`] drives volumes, snapshots, volume sets, QoS rules,
//! remote-copy groups and volume metadata through a [`Transport`]. It
//! validates parameters against the array's [`ArrayCapabilities`] before
//! anything is sent and maps every failure onto [`ArrayError`]. Actions
//! without an API endpoint run over SSH through [`ArrayShell`].

pub mod capabilities;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod janitor;
pub mod model;
pub mod options;
pub mod shell;
pub mod test_support;
pub mod transport;
pub mod validation;

pub use capabilities::{ArrayCapabilities, CapabilityOverrides};
pub use client::ArrayClient;
pub use config::{ArrayConfig, ConfigError};
pub use error::{ArrayError, ErrorKind, FLASH_CACHE_NOT_FOUND, Fault, FaultOrigin};
pub use http::HttpTransport;
pub use janitor::{Janitor, JanitorError, ResourceKind, SweepSummary, unique_name};
pub use shell::{ArrayShell, CliChannel, CliReply, ScheduleChanges, ShellConfig, SshChannel};
pub use transport::{ApiRequest, ApiResponse, Method, Transport};
