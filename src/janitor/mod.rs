//! Best-effort teardown of array resources created during a workflow.
//!
//! Integration runs and scripted workflows create volumes, snapshots, sets,
//! QoS rules and remote-copy groups. The janitor records each one as it is
//! created and deletes them in dependency order, so a failed run does not
//! leave the array cluttered.

mod types;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::ArrayClient;
use crate::error::ArrayError;
use crate::transport::Transport;
use crate::validation::MAX_NAME_LEN;

pub use types::{ResourceKind, SweepFailure};
use types::TrackedResource;

/// Longest prefix kept by [`unique_name`], leaving room for a separator and
/// eight random characters.
const MAX_PREFIX_LEN: usize = MAX_NAME_LEN - 9;

/// Generates a scratch resource name of at most 31 characters.
///
/// ```
/// let name = vvctl::janitor::unique_name("vvctl-test");
/// assert!(name.starts_with("vvctl-test-"));
/// assert!(name.len() <= 31);
/// ```
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let head: String = prefix.chars().take(MAX_PREFIX_LEN).collect();
    let available = MAX_NAME_LEN.saturating_sub(head.chars().count() + 1);
    let tail: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(available)
        .collect();
    format!("{head}-{tail}")
}

/// Summary of janitor work.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SweepSummary {
    /// Resources deleted by this sweep.
    pub deleted: usize,
    /// Resources that were already gone.
    pub already_gone: usize,
    /// Resources that could not be deleted.
    pub failures: Vec<SweepFailure>,
}

impl SweepSummary {
    /// Returns `true` when nothing failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts leftover failures into an error.
    ///
    /// # Errors
    ///
    /// Returns [`JanitorError::NotClean`] when any resource remains.
    pub fn into_result(self) -> Result<Self, JanitorError> {
        if self.is_clean() {
            return Ok(self);
        }
        let message = self
            .failures
            .iter()
            .map(|failure| format!("{} {}: {}", failure.kind, failure.name, failure.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(JanitorError::NotClean { message })
    }
}

/// Errors returned by the janitor.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum JanitorError {
    /// Raised when resources remain after the sweep.
    #[error("resources remain after janitor sweep: {message}")]
    NotClean {
        /// Human-readable description of what remains.
        message: String,
    },
}

/// Records resources and deletes them through an [`ArrayClient`].
#[derive(Debug)]
pub struct Janitor<'client, T: Transport> {
    client: &'client ArrayClient<T>,
    tracked: Vec<TrackedResource>,
}

impl<'client, T: Transport> Janitor<'client, T> {
    /// Creates a janitor with nothing tracked.
    #[must_use]
    pub const fn new(client: &'client ArrayClient<T>) -> Self {
        Self {
            client,
            tracked: Vec::new(),
        }
    }

    /// Records a resource for deletion.
    pub fn track(&mut self, kind: ResourceKind, name: impl Into<String>) {
        self.tracked.push(TrackedResource {
            kind,
            name: name.into(),
        });
    }

    /// Records a base volume.
    pub fn track_volume(&mut self, name: impl Into<String>) {
        self.track(ResourceKind::Volume, name);
    }

    /// Records a snapshot.
    pub fn track_snapshot(&mut self, name: impl Into<String>) {
        self.track(ResourceKind::Snapshot, name);
    }

    /// Records a volume set.
    pub fn track_volume_set(&mut self, name: impl Into<String>) {
        self.track(ResourceKind::VolumeSet, name);
    }

    /// Records the QoS rule of volume set `set`.
    pub fn track_qos_rule(&mut self, set: impl Into<String>) {
        self.track(ResourceKind::QosRule, set);
    }

    /// Records a remote-copy group.
    pub fn track_remote_copy_group(&mut self, name: impl Into<String>) {
        self.track(ResourceKind::RemoteCopyGroup, name);
    }

    /// Number of resources still tracked.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tracked.len()
    }

    /// Deletes every tracked resource, kind by kind, most recent first within
    /// a kind. Missing resources count as already gone; other failures are
    /// collected without stopping the sweep.
    ///
    /// Resources that fail stay tracked, so a later sweep retries them.
    pub async fn sweep(&mut self) -> SweepSummary {
        let mut summary = SweepSummary::default();
        let mut remaining = std::mem::take(&mut self.tracked);
        let mut retained = Vec::new();

        for kind in ResourceKind::SWEEP_ORDER {
            let (batch, rest): (Vec<_>, Vec<_>) =
                remaining.into_iter().partition(|resource| resource.kind == kind);
            remaining = rest;
            for resource in batch.into_iter().rev() {
                if !self.sweep_one(&resource, &mut summary).await {
                    retained.push(resource);
                }
            }
        }
        retained.reverse();
        self.tracked = retained;

        info!(
            deleted = summary.deleted,
            already_gone = summary.already_gone,
            failed = summary.failures.len(),
            "janitor sweep finished"
        );
        summary
    }

    /// Returns `false` when the resource may still exist.
    async fn sweep_one(&self, resource: &TrackedResource, summary: &mut SweepSummary) -> bool {
        match self.delete(resource).await {
            Ok(()) => {
                debug!(kind = %resource.kind, name = %resource.name, "deleted");
                summary.deleted += 1;
                true
            }
            Err(err) if err.is_not_found() => {
                debug!(kind = %resource.kind, name = %resource.name, "already gone");
                summary.already_gone += 1;
                true
            }
            Err(err) => {
                warn!(kind = %resource.kind, name = %resource.name, error = %err, "teardown failed");
                summary.failures.push(SweepFailure {
                    kind: resource.kind,
                    name: resource.name.clone(),
                    message: err.to_string(),
                });
                false
            }
        }
    }

    async fn delete(&self, resource: &TrackedResource) -> Result<(), ArrayError> {
        let name = resource.name.as_str();
        match resource.kind {
            ResourceKind::RemoteCopyGroup => {
                if let Err(err) = self.client.stop_remote_copy(name).await {
                    if err.is_not_found() {
                        return Err(err);
                    }
                    debug!(group = name, error = %err, "stop before removal failed");
                }
                self.client.remove_remote_copy_group(name, false).await
            }
            ResourceKind::QosRule => self.client.delete_qos_rules(name).await,
            ResourceKind::VolumeSet => self.client.delete_volume_set(name).await,
            ResourceKind::Snapshot | ResourceKind::Volume => self.client.delete_volume(name).await,
        }
    }
}
