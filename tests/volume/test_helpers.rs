//! Shared fixtures and helpers for volume BDD scenarios.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::fixture;
use vvctl::test_support::ScriptedTransport;
use vvctl::{ArrayCapabilities, ArrayClient, ArrayError, ErrorKind};

/// What the last `When` step produced.
#[derive(Clone, Debug)]
pub enum VolumeOutcome {
    Done,
    Snapshots(Vec<String>),
    Failed(ArrayError),
}

#[derive(Clone, Debug)]
pub struct VolumeContext {
    pub transport: ScriptedTransport,
    pub capabilities: Rc<RefCell<ArrayCapabilities>>,
    pub outcome: Rc<RefCell<Option<VolumeOutcome>>>,
}

impl VolumeContext {
    pub fn client(&self) -> ArrayClient<ScriptedTransport> {
        ArrayClient::with_capabilities(self.transport.clone(), *self.capabilities.borrow())
    }

    pub fn record(&self, outcome: VolumeOutcome) {
        *self.outcome.borrow_mut() = Some(outcome);
    }

    pub fn record_result(&self, result: Result<(), ArrayError>) {
        self.record(result.map_or_else(VolumeOutcome::Failed, |()| VolumeOutcome::Done));
    }

    pub fn outcome(&self) -> Option<VolumeOutcome> {
        self.outcome.borrow().clone()
    }
}

#[fixture]
pub fn volume_context() -> VolumeContext {
    VolumeContext {
        transport: ScriptedTransport::new(),
        capabilities: Rc::new(RefCell::new(ArrayCapabilities::LEGACY)),
        outcome: Rc::new(RefCell::new(None)),
    }
}

/// Maps the wording used in feature files onto an [`ErrorKind`].
pub fn parse_kind(text: &str) -> Option<ErrorKind> {
    match text.trim() {
        "bad request" => Some(ErrorKind::BadRequest),
        "conflict" => Some(ErrorKind::Conflict),
        "not found" => Some(ErrorKind::NotFound),
        "forbidden" => Some(ErrorKind::Forbidden),
        _ => None,
    }
}
