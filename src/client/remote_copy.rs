//! Remote-copy group operations.

use serde_json::{Value, json};
use tracing::info;

use super::{ArrayClient, resource_path};
use crate::error::ArrayError;
use crate::model::{Collection, RecoveryAction, RemoteCopyGroup};
use crate::options::{
    AddVolumeOptions, OperationOptions, RemoteCopyGroupChanges, RemoteCopyGroupOptions,
    RemoveVolumeOptions, TargetSpec, VolumePair,
};
use crate::transport::{ApiRequest, Transport};
use crate::validation;

const ADD_VOLUME: u8 = 1;
const REMOVE_VOLUME: u8 = 2;
const START: u8 = 3;
const STOP: u8 = 4;
const SYNCHRONIZE: u8 = 5;

fn group_path(name: &str) -> String {
    resource_path("remotecopygroups", name)
}

impl<T: Transport> ArrayClient<T> {
    /// Creates a remote-copy group replicating to `targets`.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` when `targets` is empty.
    pub async fn create_remote_copy_group(
        &self,
        name: &str,
        targets: &[TargetSpec],
        options: RemoteCopyGroupOptions,
    ) -> Result<(), ArrayError> {
        validation::resource_name("remote copy group", name)?;
        if targets.is_empty() {
            return Err(ArrayError::bad_request(
                "a remote copy group needs at least one target",
            ));
        }
        let mut body = options.to_map()?;
        body.insert(String::from("name"), json!(name));
        body.insert(String::from("targets"), json!(targets));
        self.execute(ApiRequest::post("/remotecopygroups", Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Fetches a remote-copy group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing group.
    pub async fn get_remote_copy_group(&self, name: &str) -> Result<RemoteCopyGroup, ArrayError> {
        self.fetch(ApiRequest::get(group_path(name)), "remote copy group")
            .await
    }

    /// Lists every remote-copy group.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure.
    pub async fn get_remote_copy_groups(
        &self,
    ) -> Result<Collection<RemoteCopyGroup>, ArrayError> {
        self.fetch(ApiRequest::get("/remotecopygroups"), "remote copy groups")
            .await
    }

    /// Deletes a remote-copy group. The group must be stopped.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing group.
    pub async fn remove_remote_copy_group(
        &self,
        name: &str,
        keep_snap: bool,
    ) -> Result<(), ArrayError> {
        let mut path = group_path(name);
        if keep_snap {
            path.push_str("?keepSnap=true");
        }
        self.execute(ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// Changes group CPGs or per-target settings.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for an empty change set.
    pub async fn modify_remote_copy_group(
        &self,
        name: &str,
        changes: RemoteCopyGroupChanges,
    ) -> Result<(), ArrayError> {
        if changes == RemoteCopyGroupChanges::default() {
            return Err(ArrayError::bad_request(
                "no remote copy group changes supplied",
            ));
        }
        let body = changes.to_map()?;
        self.execute(ApiRequest::put(group_path(name), Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Adds `volume` to a stopped group, pairing it with a secondary volume
    /// on each target.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` when `pairs` is empty.
    pub async fn add_volume_to_remote_copy_group(
        &self,
        name: &str,
        volume: &str,
        pairs: &[VolumePair],
        options: AddVolumeOptions,
    ) -> Result<(), ArrayError> {
        validation::volume_name(volume)?;
        if pairs.is_empty() {
            return Err(ArrayError::bad_request(
                "at least one target volume pair is required",
            ));
        }
        let mut body = options.to_map()?;
        body.insert(String::from("action"), json!(ADD_VOLUME));
        body.insert(String::from("volumeName"), json!(volume));
        body.insert(String::from("targets"), json!(pairs));
        self.execute(ApiRequest::put(group_path(name), Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Removes `volume` from a stopped group.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` when the member-resource `DELETE`
    /// form is asked to both keep the snapshot and remove the secondary
    /// volume.
    pub async fn remove_volume_from_remote_copy_group(
        &self,
        name: &str,
        volume: &str,
        options: RemoveVolumeOptions,
    ) -> Result<(), ArrayError> {
        if options.use_http_delete {
            let mut path = format!(
                "{}/volumes/{}",
                group_path(name),
                urlencoding::encode(volume)
            );
            match (options.keep_snap, options.remove_from_target) {
                (true, true) => {
                    return Err(ArrayError::bad_request(
                        "keepSnap and removeFromTarget cannot be combined",
                    ));
                }
                (true, false) => path.push_str("?keepSnap=true"),
                (false, true) => path.push_str("?removeSecondaryVolume=true"),
                (false, false) => {}
            }
            self.execute(ApiRequest::delete(path)).await?;
            return Ok(());
        }

        let mut body = serde_json::Map::new();
        body.insert(String::from("action"), json!(REMOVE_VOLUME));
        body.insert(String::from("volumeName"), json!(volume));
        if options.keep_snap {
            body.insert(String::from("keepSnap"), json!(true));
        }
        if options.remove_from_target {
            body.insert(String::from("removeSecondaryVolume"), json!(true));
        }
        self.execute(ApiRequest::put(group_path(name), Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Starts replication for every target of the group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing group.
    pub async fn start_remote_copy(&self, name: &str) -> Result<(), ArrayError> {
        self.group_action(name, START).await
    }

    /// Stops replication for every target of the group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing group.
    pub async fn stop_remote_copy(&self, name: &str) -> Result<(), ArrayError> {
        self.group_action(name, STOP).await
    }

    /// Requests an immediate resync of a started group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing group.
    pub async fn synchronize_remote_copy_group(&self, name: &str) -> Result<(), ArrayError> {
        self.group_action(name, SYNCHRONIZE).await
    }

    /// Runs a disaster-recovery action against the group.
    ///
    /// # Errors
    ///
    /// The array rejects actions that do not fit the group's current role
    /// as `BadRequest` or `Forbidden`.
    pub async fn recover_remote_copy_group_from_disaster(
        &self,
        name: &str,
        action: RecoveryAction,
    ) -> Result<(), ArrayError> {
        info!(group = name, ?action, "remote copy recovery");
        let body = json!({"action": action.code()});
        self.execute(ApiRequest::post(group_path(name), body))
            .await?;
        Ok(())
    }

    async fn group_action(&self, name: &str, action: u8) -> Result<(), ArrayError> {
        let body = json!({"action": action});
        self.execute(ApiRequest::put(group_path(name), body))
            .await?;
        Ok(())
    }
}
