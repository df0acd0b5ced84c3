//! Volume metadata key/value store.

use serde_json::json;
use tracing::debug;

use super::{ArrayClient, resource_path};
use crate::error::ArrayError;
use crate::model::{Collection, KeyValue};
use crate::transport::{ApiRequest, Transport};
use crate::validation;

fn metadata_root(volume: &str) -> String {
    format!("{}/objectKeyValues", resource_path("volumes", volume))
}

fn metadata_path(volume: &str, key: &str) -> String {
    format!("{}/{}", metadata_root(volume), urlencoding::encode(key))
}

impl<T: Transport> ArrayClient<T> {
    /// Sets `key` to `value`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for an invalid key and `NotFound`
    /// for a missing volume.
    pub async fn set_volume_metadata(
        &self,
        volume: &str,
        key: &str,
        value: &str,
    ) -> Result<(), ArrayError> {
        validation::metadata_key(key)?;
        let body = json!({"key": key, "value": value});
        match self
            .execute(ApiRequest::post(metadata_root(volume), body.clone()))
            .await
        {
            Ok(_) => Ok(()),
            Err(ArrayError::Conflict(_)) => {
                debug!(volume, key, "metadata key exists; overwriting");
                self.execute(ApiRequest::put(metadata_path(volume, key), body))
                    .await?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Reads one metadata entry.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for an invalid key and `NotFound`
    /// for a missing volume or key.
    pub async fn get_volume_metadata(&self, volume: &str, key: &str) -> Result<KeyValue, ArrayError> {
        validation::metadata_key(key)?;
        self.fetch(ApiRequest::get(metadata_path(volume, key)), "metadata")
            .await
    }

    /// Reads every metadata entry of a volume. A volume without metadata
    /// yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing volume.
    pub async fn get_all_volume_metadata(
        &self,
        volume: &str,
    ) -> Result<Collection<KeyValue>, ArrayError> {
        let body = self.execute(ApiRequest::get(metadata_root(volume))).await?;
        if body.is_none() {
            return Ok(Collection::default());
        }
        crate::transport::decode_body(body, "metadata")
    }

    /// Removes one metadata entry.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for an invalid key and `NotFound`
    /// for a missing volume or key.
    pub async fn remove_volume_metadata(&self, volume: &str, key: &str) -> Result<(), ArrayError> {
        validation::metadata_key(key)?;
        self.execute(ApiRequest::delete(metadata_path(volume, key)))
            .await?;
        Ok(())
    }

    /// Returns `true` when `key` is set to exactly `value`. Every failure,
    /// including a missing volume, yields `false`.
    pub async fn find_volume_metadata(&self, volume: &str, key: &str, value: &str) -> bool {
        match self.get_volume_metadata(volume, key).await {
            Ok(entry) => entry.key == key && entry.value == value,
            Err(err) => {
                debug!(volume, key, error = %err, "metadata lookup failed");
                false
            }
        }
    }
}
