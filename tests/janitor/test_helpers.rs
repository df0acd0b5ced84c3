//! Shared fixtures and helpers for janitor BDD scenarios.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::fixture;
use vvctl::test_support::ScriptedTransport;
use vvctl::{ResourceKind, SweepSummary};

#[derive(Clone, Debug)]
pub struct JanitorContext {
    pub transport: ScriptedTransport,
    pub tracked: Rc<RefCell<Vec<(ResourceKind, String)>>>,
    pub outcome: Rc<RefCell<Option<SweepSummary>>>,
}

impl JanitorContext {
    pub fn track(&self, kind: ResourceKind, name: &str) {
        self.tracked.borrow_mut().push((kind, name.to_owned()));
    }

    pub fn summary(&self) -> Option<SweepSummary> {
        self.outcome.borrow().clone()
    }
}

#[fixture]
pub fn janitor_context() -> JanitorContext {
    JanitorContext {
        transport: ScriptedTransport::new(),
        tracked: Rc::new(RefCell::new(Vec::new())),
        outcome: Rc::new(RefCell::new(None)),
    }
}
