//! Volume set operations.

use serde_json::{Value, json};
use tracing::debug;

use super::{ArrayClient, resource_path};
use crate::error::ArrayError;
use crate::model::{Collection, SetAction, VolumeSet};
use crate::options::{OperationOptions, VolumeSetChanges, VolumeSetSnapshotOptions};
use crate::transport::{ApiRequest, Transport};
use crate::validation;

impl<T: Transport> ArrayClient<T> {
    /// Creates a volume set, optionally with initial members.
    ///
    /// # Errors
    ///
    /// The array reports a duplicate name as `Conflict`.
    pub async fn create_volume_set(
        &self,
        name: &str,
        domain: Option<&str>,
        comment: Option<&str>,
        setmembers: &[String],
    ) -> Result<(), ArrayError> {
        validation::resource_name("volume set", name)?;
        let mut body = serde_json::Map::new();
        body.insert(String::from("name"), json!(name));
        if let Some(domain_name) = domain {
            body.insert(String::from("domain"), json!(domain_name));
        }
        if let Some(text) = comment {
            body.insert(String::from("comment"), json!(text));
        }
        if !setmembers.is_empty() {
            body.insert(String::from("setmembers"), json!(setmembers));
        }
        self.execute(ApiRequest::post("/volumesets", Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Fetches a volume set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing set.
    pub async fn get_volume_set(&self, name: &str) -> Result<VolumeSet, ArrayError> {
        self.fetch(
            ApiRequest::get(resource_path("volumesets", name)),
            "volume set",
        )
        .await
    }

    /// Lists every volume set.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure.
    pub async fn get_volume_sets(&self) -> Result<Collection<VolumeSet>, ArrayError> {
        self.fetch(ApiRequest::get("/volumesets"), "volume sets")
            .await
    }

    /// Deletes a volume set. Member volumes are left alone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing set.
    pub async fn delete_volume_set(&self, name: &str) -> Result<(), ArrayError> {
        self.execute(ApiRequest::delete(resource_path("volumesets", name)))
            .await?;
        Ok(())
    }

    /// Applies membership and attribute changes to a set.
    ///
    /// Membership changes behave as set operations: the current set is
    /// fetched and only members that actually change are sent. Adding a
    /// present member or removing an absent one is a no-op, and when nothing
    /// changes at all no update is issued.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing set and client-side `BadRequest` for
    /// members without an action or an invalid new name.
    pub async fn modify_volume_set(
        &self,
        name: &str,
        changes: VolumeSetChanges,
    ) -> Result<(), ArrayError> {
        if let Some(new_name) = changes.new_name.as_deref() {
            validation::resource_name("volume set", new_name)?;
        }
        let mut outgoing = changes;
        match outgoing.action {
            Some(action) => {
                let current = self.get_volume_set(name).await?;
                outgoing.setmembers = membership_delta(&current, action, &outgoing.setmembers);
                if outgoing.setmembers.is_empty() {
                    debug!(set = name, ?action, "membership already as requested");
                    outgoing.action = None;
                }
            }
            None if !outgoing.setmembers.is_empty() => {
                return Err(ArrayError::bad_request(
                    "set members supplied without an add or remove action",
                ));
            }
            None => {}
        }
        if outgoing.action.is_none() && !outgoing.has_attribute_changes() {
            return Ok(());
        }
        let body = outgoing.to_map()?;
        self.execute(ApiRequest::put(
            resource_path("volumesets", name),
            Value::Object(body),
        ))
        .await?;
        Ok(())
    }

    /// Adds one volume to a set.
    ///
    /// # Errors
    ///
    /// See [`ArrayClient::modify_volume_set`].
    pub async fn add_volume_to_volume_set(&self, set: &str, volume: &str) -> Result<(), ArrayError> {
        self.modify_volume_set(
            set,
            VolumeSetChanges {
                action: Some(SetAction::AddMembers),
                setmembers: vec![volume.to_owned()],
                ..VolumeSetChanges::default()
            },
        )
        .await
    }

    /// Removes one volume from a set.
    ///
    /// # Errors
    ///
    /// See [`ArrayClient::modify_volume_set`].
    pub async fn remove_volume_from_volume_set(
        &self,
        set: &str,
        volume: &str,
    ) -> Result<(), ArrayError> {
        self.modify_volume_set(
            set,
            VolumeSetChanges {
                action: Some(SetAction::RemoveMembers),
                setmembers: vec![volume.to_owned()],
                ..VolumeSetChanges::default()
            },
        )
        .await
    }

    /// Name of the first set containing `volume`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure of the listing.
    pub async fn find_volume_set(&self, volume: &str) -> Result<Option<String>, ArrayError> {
        let sets = self.get_volume_sets().await?;
        Ok(sets
            .members
            .into_iter()
            .find(|set| set.contains(volume))
            .map(|set| set.name))
    }

    /// Names of every set containing `volume`, in listing order.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure of the listing.
    pub async fn find_all_volume_sets(&self, volume: &str) -> Result<Vec<String>, ArrayError> {
        let sets = self.get_volume_sets().await?;
        Ok(sets
            .members
            .into_iter()
            .filter(|set| set.contains(volume))
            .map(|set| set.name)
            .collect())
    }

    /// Snapshots every member of `set`. `name` may contain array name
    /// patterns such as `@count@`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing set.
    pub async fn create_snapshot_of_volume_set(
        &self,
        name: &str,
        set: &str,
        options: VolumeSetSnapshotOptions,
    ) -> Result<(), ArrayError> {
        if name.is_empty() {
            return Err(ArrayError::bad_request("snapshot name must not be empty"));
        }
        let mut parameters = options.to_map()?;
        parameters.insert(String::from("name"), json!(name));
        let body = json!({"action": "createSnapshot", "parameters": parameters});
        self.execute(ApiRequest::post(resource_path("volumesets", set), body))
            .await?;
        Ok(())
    }
}

fn membership_delta(current: &VolumeSet, action: SetAction, requested: &[String]) -> Vec<String> {
    let mut delta: Vec<String> = Vec::new();
    for member in requested {
        let present = current.contains(member);
        let changes = match action {
            SetAction::AddMembers => !present,
            SetAction::RemoveMembers => present,
        };
        if changes && !delta.contains(member) {
            delta.push(member.clone());
        }
    }
    delta
}
