//! BDD step definitions for janitor behaviour.

use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;
use vvctl::{ArrayClient, Janitor, ResourceKind};

use super::test_helpers::JanitorContext;
use crate::test_constants::{GROUP_NAME, SET_NAME};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("runtime setup failed: {0}")]
    Runtime(String),
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a janitor tracking volume \"{name}\"")]
fn tracking_volume(janitor_context: JanitorContext, name: String) -> JanitorContext {
    janitor_context.track(ResourceKind::Volume, name.trim());
    janitor_context
}

#[given("the janitor also tracks the test remote copy group")]
fn tracking_group(janitor_context: JanitorContext) -> JanitorContext {
    janitor_context.track(ResourceKind::RemoteCopyGroup, GROUP_NAME);
    janitor_context
}

#[given("the janitor also tracks the test volume set")]
fn tracking_set(janitor_context: JanitorContext) -> JanitorContext {
    janitor_context.track(ResourceKind::VolumeSet, SET_NAME);
    janitor_context
}

#[given("the array accepts {count} requests")]
fn array_accepts(janitor_context: JanitorContext, count: usize) -> JanitorContext {
    for _ in 0..count {
        janitor_context.transport.push_empty(200);
    }
    janitor_context
}

#[given("the array answers {status} with code {code} \"{description}\"")]
fn array_answers_fault(
    janitor_context: JanitorContext,
    status: u16,
    code: u32,
    description: String,
) -> JanitorContext {
    janitor_context
        .transport
        .push_fault(status, code, description.trim());
    janitor_context
}

#[when("the janitor sweeps")]
fn janitor_sweeps(janitor_context: JanitorContext) -> Result<(), StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Runtime(err.to_string()))?;
    let client = ArrayClient::new(janitor_context.transport.clone());
    let tracked = janitor_context.tracked.borrow().clone();
    let summary = runtime.block_on(async {
        let mut janitor = Janitor::new(&client);
        for (kind, name) in tracked {
            janitor.track(kind, name);
        }
        janitor.sweep().await
    });
    *janitor_context.outcome.borrow_mut() = Some(summary);
    Ok(())
}

#[then("the sweep is clean with {deleted} deleted")]
fn sweep_clean(janitor_context: &JanitorContext, deleted: usize) -> Result<(), StepError> {
    match janitor_context.summary() {
        Some(summary) if summary.is_clean() && summary.deleted == deleted => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected a clean sweep deleting {deleted}, got {other:?}"
        ))),
    }
}

#[then("{count} resource was already gone")]
fn already_gone(janitor_context: &JanitorContext, count: usize) -> Result<(), StepError> {
    match janitor_context.summary() {
        Some(summary) if summary.already_gone == count => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected {count} already gone, got {other:?}"
        ))),
    }
}

#[then("the requests were \"{expected}\"")]
fn requests_were(janitor_context: &JanitorContext, expected: String) -> Result<(), StepError> {
    let actual: Vec<String> = janitor_context
        .transport
        .requests()
        .iter()
        .map(|request| format!("{} {}", request.method, request.path))
        .collect();
    let wanted: Vec<String> = expected
        .split(',')
        .map(|entry| entry.trim().to_owned())
        .collect();
    if actual == wanted {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected requests {wanted:?}, got {actual:?}"
        )))
    }
}

#[then("the sweep is not clean")]
fn sweep_not_clean(janitor_context: &JanitorContext) -> Result<(), StepError> {
    let summary = janitor_context
        .summary()
        .ok_or_else(|| StepError::Assertion(String::from("sweep did not run")))?;
    match summary.into_result() {
        Err(err) if err.to_string().contains("resources remain") => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected a NotClean error, got {other:?}"
        ))),
    }
}

#[then("the failure names the volume set \"{name}\"")]
fn failure_names_set(janitor_context: &JanitorContext, name: String) -> Result<(), StepError> {
    let summary = janitor_context
        .summary()
        .ok_or_else(|| StepError::Assertion(String::from("sweep did not run")))?;
    let matches = summary
        .failures
        .iter()
        .any(|failure| failure.kind == ResourceKind::VolumeSet && failure.name == name.trim());
    if matches && summary.deleted == 1 {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected a volume set failure for {name}, got {summary:?}"
        )))
    }
}
