//! Volume and snapshot operations.

use serde_json::{Value, json};
use tracing::debug;

use super::{ArrayClient, resource_path};
use crate::error::ArrayError;
use crate::model::{Collection, TaskHandle, TuneOperation, Volume};
use crate::options::{
    CopyOptions, CreateVolumeOptions, OperationOptions, PromoteOptions, SnapshotOptions,
    TuneOptions, VolumeChanges,
};
use crate::transport::{ApiRequest, Transport};
use crate::validation::{self, GrowthGib};

const STOP_PHYSICAL_COPY: u8 = 1;
const GROW_VOLUME: u8 = 3;
const PROMOTE_VIRTUAL_COPY: u8 = 4;
const TUNE_VOLUME: u8 = 6;

impl<T: Transport> ArrayClient<T> {
    /// Creates a volume in `cpg`.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for an invalid name, size or
    /// provisioning combination; the array reports duplicate names or ids as
    /// `Conflict`.
    pub async fn create_volume(
        &self,
        name: &str,
        cpg: &str,
        size_mib: u64,
        options: CreateVolumeOptions,
    ) -> Result<(), ArrayError> {
        validation::volume_name(name)?;
        validation::resource_name("CPG", cpg)?;
        validation::volume_size(size_mib)?;
        let normalised = validation::create_volume(&self.capabilities, options)?;

        let mut body = normalised.to_map()?;
        body.insert(String::from("name"), json!(name));
        body.insert(String::from("cpg"), json!(cpg));
        body.insert(String::from("sizeMiB"), json!(size_mib));
        self.execute(ApiRequest::post("/volumes", Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Fetches a volume by exact name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such volume exists.
    pub async fn get_volume(&self, name: &str) -> Result<Volume, ArrayError> {
        self.fetch(ApiRequest::get(resource_path("volumes", name)), "volume")
            .await
    }

    /// Lists every volume, snapshots included.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure.
    pub async fn get_volumes(&self) -> Result<Collection<Volume>, ArrayError> {
        self.fetch(ApiRequest::get("/volumes"), "volumes").await
    }

    /// Lists volumes matching an array query such as `copyOf EQ vol1`.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure.
    pub async fn query_volumes(&self, query: &str) -> Result<Collection<Volume>, ArrayError> {
        let quoted = format!("\"{query}\"");
        let path = format!("/volumes?query={}", urlencoding::encode(&quoted));
        self.fetch(ApiRequest::get(path), "volumes").await
    }

    /// Deletes a volume or snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when absent; live snapshots or remote-copy
    /// membership surface as whatever the array reports.
    pub async fn delete_volume(&self, name: &str) -> Result<(), ArrayError> {
        self.execute(ApiRequest::delete(resource_path("volumes", name)))
            .await?;
        Ok(())
    }

    /// Applies a partial update, for example a rename.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for an invalid new name or an
    /// empty change set.
    pub async fn modify_volume(&self, name: &str, changes: VolumeChanges) -> Result<(), ArrayError> {
        if let Some(new_name) = changes.new_name.as_deref() {
            validation::volume_name(new_name)?;
        }
        if changes == VolumeChanges::default() {
            return Err(ArrayError::bad_request("no volume changes supplied"));
        }
        let body = changes.to_map()?;
        self.execute(ApiRequest::put(
            resource_path("volumes", name),
            Value::Object(body),
        ))
        .await?;
        Ok(())
    }

    /// Grows a volume by a whole number of GiB.
    ///
    /// `delta` accepts integers and whole-valued floats. Zero or negative
    /// growth is refused before dispatch; some arrays report a shrink as
    /// `Conflict` instead, see [`ArrayError::is_rejected_growth`].
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` or `Conflict` for refused growth.
    pub async fn grow_volume<D>(&self, name: &str, delta: D) -> Result<(), ArrayError>
    where
        D: TryInto<GrowthGib, Error = ArrayError>,
    {
        let growth = delta.try_into()?;
        let body = json!({"action": GROW_VOLUME, "sizeMiB": growth.mib()});
        self.execute(ApiRequest::put(resource_path("volumes", name), body))
            .await?;
        Ok(())
    }

    /// Creates a snapshot `name` of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the parent does not exist.
    pub async fn create_snapshot(
        &self,
        name: &str,
        parent: &str,
        options: SnapshotOptions,
    ) -> Result<(), ArrayError> {
        validation::volume_name(name)?;
        let mut parameters = options.to_map()?;
        parameters.insert(String::from("name"), json!(name));
        let body = json!({"action": "createSnapshot", "parameters": parameters});
        self.execute(ApiRequest::post(resource_path("volumes", parent), body))
            .await?;
        Ok(())
    }

    /// Starts a physical copy of `source` into `destination`.
    ///
    /// Online copies create the destination in `dest_cpg`, or in the
    /// `destCPG` of `options` when `dest_cpg` is empty. Offline copies write
    /// into an existing destination and never send a destination CPG.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` when the options do not fit the
    /// chosen mode.
    pub async fn copy_volume(
        &self,
        source: &str,
        destination: &str,
        dest_cpg: &str,
        options: CopyOptions,
    ) -> Result<Option<TaskHandle>, ArrayError> {
        validation::volume_name(destination)?;
        let mut normalised = validation::copy_volume(&self.capabilities, options)?;
        let online = normalised.is_online();
        let requested_cpg = normalised.dest_cpg.take();

        let mut parameters = normalised.to_map()?;
        parameters.insert(String::from("destVolume"), json!(destination));
        parameters.insert(String::from("online"), json!(online));
        if online {
            let cpg = validation::copy_destination_cpg(dest_cpg, requested_cpg.as_deref())?;
            parameters.insert(String::from("destCPG"), json!(cpg));
        } else {
            debug!(source, destination, "offline copy; destination CPG not sent");
        }
        let body = json!({"action": "createPhysicalCopy", "parameters": parameters});
        let response = self
            .execute(ApiRequest::post(resource_path("volumes", source), body))
            .await?;
        decode_task(response)
    }

    /// Stops an offline physical copy into `name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such volume exists.
    pub async fn stop_offline_physical_copy(&self, name: &str) -> Result<(), ArrayError> {
        let body = json!({"action": STOP_PHYSICAL_COPY});
        self.execute(ApiRequest::put(resource_path("volumes", name), body))
            .await?;
        Ok(())
    }

    /// Restores a snapshot's parent from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a client-side `Conflict` for `online` with `priority`. The
    /// array answers `Forbidden` when the parent is in a started remote-copy
    /// group, and also without `allow_remote_copy_parent`.
    pub async fn promote_virtual_copy(
        &self,
        snapshot: &str,
        options: PromoteOptions,
    ) -> Result<Option<TaskHandle>, ArrayError> {
        validation::promote(&options)?;
        let mut body = options.to_map()?;
        body.insert(String::from("action"), json!(PROMOTE_VIRTUAL_COPY));
        let response = self
            .execute(ApiRequest::put(
                resource_path("volumes", snapshot),
                Value::Object(body),
            ))
            .await?;
        decode_task(response)
    }

    /// Moves a volume to another CPG, optionally converting its
    /// provisioning.
    ///
    /// Options are validated before anything is sent. When a conversion is
    /// requested the volume is then fetched so that a conversion to its
    /// current type is refused.
    ///
    /// # Errors
    ///
    /// Returns client-side `BadRequest` for invalid options and `NotFound`
    /// for a missing volume.
    pub async fn tune_volume(
        &self,
        name: &str,
        operation: TuneOperation,
        options: TuneOptions,
    ) -> Result<Option<TaskHandle>, ArrayError> {
        let normalised = validation::tune_volume(&self.capabilities, operation, options)?;
        if normalised.conversion_operation.is_some() {
            let current = self.get_volume(name).await?;
            validation::tune_changes_type(&normalised, &current)?;
        }
        let mut body = normalised.to_map()?;
        body.insert(String::from("action"), json!(TUNE_VOLUME));
        body.insert(String::from("tuneOperation"), json!(operation.code()));
        let response = self
            .execute(ApiRequest::put(
                resource_path("volumes", name),
                Value::Object(body),
            ))
            .await?;
        decode_task(response)
    }

    /// Names of the snapshots of `name`, in the order the array lists them.
    /// A missing volume yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns array failures other than `NotFound`.
    pub async fn get_volume_snapshots(&self, name: &str) -> Result<Vec<String>, ArrayError> {
        let volumes = match self.query_volumes(&format!("copyOf EQ {name}")).await {
            Ok(collection) => collection,
            Err(err) if err.is_not_found() => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        Ok(volumes
            .members
            .into_iter()
            .filter(|volume| volume.is_snapshot_of(name))
            .map(|volume| volume.name)
            .collect())
    }
}

fn decode_task(body: Option<Value>) -> Result<Option<TaskHandle>, ArrayError> {
    match body {
        Some(Value::Object(map)) if map.contains_key("taskid") => {
            crate::transport::decode_body(Some(Value::Object(map)), "task").map(Some)
        }
        _ => Ok(None),
    }
}
