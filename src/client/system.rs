//! Storage system identity and capability discovery.

use super::ArrayClient;
use crate::capabilities::{ArrayCapabilities, CapabilityOverrides};
use crate::error::ArrayError;
use crate::model::{StorageSystemInfo, mirrored_group_name};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ArrayClient<T> {
    /// Reads the array's identity and firmware version.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure.
    pub async fn get_storage_system_info(&self) -> Result<StorageSystemInfo, ArrayError> {
        self.fetch(ApiRequest::get("/system"), "storage system").await
    }

    /// Derives capabilities from the firmware version, applies `overrides`
    /// and keeps the result for later validation.
    ///
    /// # Errors
    ///
    /// Returns the failure of the system query; capabilities are left
    /// unchanged in that case.
    pub async fn discover_capabilities(
        &mut self,
        overrides: CapabilityOverrides,
    ) -> Result<ArrayCapabilities, ArrayError> {
        let info = self.get_storage_system_info().await?;
        let capabilities = ArrayCapabilities::from_system_info(&info).with_overrides(overrides);
        self.set_capabilities(capabilities);
        Ok(capabilities)
    }

    /// Name the target array gives the mirror of local group `name`.
    ///
    /// # Errors
    ///
    /// Returns the failure of the system query.
    pub async fn mirrored_remote_copy_group_name(&self, name: &str) -> Result<String, ArrayError> {
        let info = self.get_storage_system_info().await?;
        Ok(mirrored_group_name(name, info.id))
    }
}
