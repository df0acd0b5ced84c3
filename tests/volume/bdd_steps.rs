//! BDD step definitions for volume lifecycle operations.

use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;
use vvctl::ArrayCapabilities;
use vvctl::options::CreateVolumeOptions;

use super::test_helpers::{VolumeContext, VolumeOutcome, parse_kind};
use crate::test_constants::CPG_NAME;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("runtime setup failed: {0}")]
    Runtime(String),
    #[error("assertion failed: {0}")]
    Assertion(String),
}

fn runtime() -> Result<Runtime, StepError> {
    Runtime::new().map_err(|err| StepError::Runtime(err.to_string()))
}

#[given("a legacy array")]
fn legacy_array(volume_context: VolumeContext) -> VolumeContext {
    *volume_context.capabilities.borrow_mut() = ArrayCapabilities::LEGACY;
    volume_context
}

#[given("a primera array")]
fn primera_array(volume_context: VolumeContext) -> VolumeContext {
    *volume_context.capabilities.borrow_mut() = ArrayCapabilities {
        primera: true,
        ..ArrayCapabilities::LEGACY
    };
    volume_context
}

#[given("the array accepts the next request")]
fn array_accepts(volume_context: VolumeContext) -> VolumeContext {
    volume_context.transport.push_empty(200);
    volume_context
}

#[given("the array answers {status} with code {code} \"{description}\"")]
fn array_answers_fault(
    volume_context: VolumeContext,
    status: u16,
    code: u32,
    description: String,
) -> VolumeContext {
    volume_context
        .transport
        .push_fault(status, code, description.trim());
    volume_context
}

#[when("I grow volume \"{name}\" by {gib} GiB")]
fn grow_volume(volume_context: VolumeContext, name: String, gib: i64) -> Result<(), StepError> {
    let client = volume_context.client();
    let result = runtime()?.block_on(async { client.grow_volume(name.trim(), gib).await });
    volume_context.record_result(result);
    Ok(())
}

#[when("I create a thin deduplicated volume \"{name}\" in the test CPG")]
fn create_tdvv_volume(volume_context: VolumeContext, name: String) -> Result<(), StepError> {
    let client = volume_context.client();
    let options = CreateVolumeOptions {
        tdvv: Some(true),
        ..CreateVolumeOptions::default()
    };
    let result = runtime()?
        .block_on(async { client.create_volume(name.trim(), CPG_NAME, 1024, options).await });
    volume_context.record_result(result);
    Ok(())
}

#[when("I list the snapshots of \"{name}\"")]
fn list_snapshots(volume_context: VolumeContext, name: String) -> Result<(), StepError> {
    let client = volume_context.client();
    let result = runtime()?.block_on(async { client.get_volume_snapshots(name.trim()).await });
    volume_context.record(result.map_or_else(VolumeOutcome::Failed, VolumeOutcome::Snapshots));
    Ok(())
}

#[when("I set metadata \"{key}\" to \"{value}\" on volume \"{volume}\"")]
fn set_metadata(
    volume_context: VolumeContext,
    key: String,
    value: String,
    volume: String,
) -> Result<(), StepError> {
    let client = volume_context.client();
    let result = runtime()?.block_on(async {
        client
            .set_volume_metadata(volume.trim(), key.trim(), value.trim())
            .await
    });
    volume_context.record_result(result);
    Ok(())
}

#[then("the operation succeeds")]
fn operation_succeeds(volume_context: &VolumeContext) -> Result<(), StepError> {
    match volume_context.outcome() {
        Some(VolumeOutcome::Done) => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected success, got {other:?}"
        ))),
    }
}

#[then("the operation fails with \"{kind}\"")]
fn operation_fails(volume_context: &VolumeContext, kind: String) -> Result<(), StepError> {
    let expected = parse_kind(&kind)
        .ok_or_else(|| StepError::Assertion(format!("unknown error kind {kind}")))?;
    match volume_context.outcome() {
        Some(VolumeOutcome::Failed(err)) if err.kind() == expected => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected {expected:?} failure, got {other:?}"
        ))),
    }
}

#[then("no request reached the array")]
fn nothing_sent(volume_context: &VolumeContext) -> Result<(), StepError> {
    let requests = volume_context.transport.requests();
    if requests.is_empty() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected no requests, got {requests:?}"
        )))
    }
}

#[then("the array received a {method} to \"{path}\"")]
fn received_request(
    volume_context: &VolumeContext,
    method: String,
    path: String,
) -> Result<(), StepError> {
    let last = volume_context
        .transport
        .last_request()
        .ok_or_else(|| StepError::Assertion(String::from("no request was sent")))?;
    if last.method.as_str() == method.trim() && last.path == path.trim() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {method} {path}, got {} {}",
            last.method, last.path
        )))
    }
}

#[then("the last request body has \"{field}\" set to {value}")]
fn body_field(volume_context: &VolumeContext, field: String, value: u64) -> Result<(), StepError> {
    let body = volume_context
        .transport
        .last_request()
        .and_then(|request| request.body)
        .ok_or_else(|| StepError::Assertion(String::from("last request had no body")))?;
    let actual = body.get(field.trim()).and_then(serde_json::Value::as_u64);
    if actual == Some(value) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {field} = {value}, got {actual:?} in {body}"
        )))
    }
}

#[then("the snapshot list is empty")]
fn snapshot_list_empty(volume_context: &VolumeContext) -> Result<(), StepError> {
    match volume_context.outcome() {
        Some(VolumeOutcome::Snapshots(names)) if names.is_empty() => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected an empty snapshot list, got {other:?}"
        ))),
    }
}
