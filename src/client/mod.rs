//! Operation contract layer.
//!
//! [`ArrayClient`] validates and normalises parameters, sends one request
//! (or a short fixed sequence) through its [`Transport`], and interprets
//! the response against the resource model. Operations are split across
//! submodules by resource family.

mod metadata;
mod qos;
mod remote_copy;
mod system;
mod volume;
mod volume_set;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::capabilities::ArrayCapabilities;
use crate::error::ArrayError;
use crate::transport::{ApiRequest, Transport, decode_body};

/// Client for one array.
///
/// Each client carries its own [`ArrayCapabilities`]; changing them on one
/// client never affects another.
#[derive(Debug)]
pub struct ArrayClient<T: Transport> {
    transport: T,
    capabilities: ArrayCapabilities,
}

impl<T: Transport> ArrayClient<T> {
    /// Creates a client that validates as for a legacy array.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self::with_capabilities(transport, ArrayCapabilities::LEGACY)
    }

    /// Creates a client with explicit capabilities.
    #[must_use]
    pub const fn with_capabilities(transport: T, capabilities: ArrayCapabilities) -> Self {
        Self {
            transport,
            capabilities,
        }
    }

    /// Capabilities used for validation.
    #[must_use]
    pub const fn capabilities(&self) -> &ArrayCapabilities {
        &self.capabilities
    }

    /// Replaces the capabilities used for validation.
    pub const fn set_capabilities(&mut self, capabilities: ArrayCapabilities) {
        self.capabilities = capabilities;
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport, for session management.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>, ArrayError> {
        debug!(method = %request.method, path = %request.path, "array operation");
        self.transport.send(request).await?.into_result()
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        context: &str,
    ) -> Result<R, ArrayError> {
        let body = self.execute(request).await?;
        decode_body(body, context)
    }
}

/// Builds `/<collection>/<name>` with the name percent-encoded.
fn resource_path(collection: &str, name: &str) -> String {
    format!("/{collection}/{}", urlencoding::encode(name))
}

#[cfg(test)]
mod tests;
