//! Unit tests for array operations, driven through a scripted transport.

mod remote_copy;

use rstest::fixture;

use super::ArrayClient;
use crate::capabilities::ArrayCapabilities;
use crate::test_support::ScriptedTransport;
use crate::transport::{ApiRequest, Method};

pub(super) struct Harness {
    pub client: ArrayClient<ScriptedTransport>,
    pub transport: ScriptedTransport,
}

impl Harness {
    pub fn with_capabilities(capabilities: ArrayCapabilities) -> Self {
        let transport = ScriptedTransport::new();
        Self {
            client: ArrayClient::with_capabilities(transport.clone(), capabilities),
            transport,
        }
    }

    pub fn only_request(&self) -> ApiRequest {
        let requests = self.transport.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("request list was empty"))
    }

    pub fn assert_nothing_sent(&self) {
        assert!(
            self.transport.requests().is_empty(),
            "validation failures must not reach the array"
        );
    }
}

#[fixture]
pub(super) fn legacy() -> Harness {
    Harness::with_capabilities(ArrayCapabilities::LEGACY)
}

#[fixture]
pub(super) fn primera() -> Harness {
    Harness::with_capabilities(ArrayCapabilities {
        primera: true,
        compression: true,
        merlin: false,
    })
}

pub(super) fn assert_request(request: &ApiRequest, method: Method, path: &str) {
    assert_eq!(request.method, method, "method of {request:?}");
    assert_eq!(request.path, path, "path of {request:?}");
}
