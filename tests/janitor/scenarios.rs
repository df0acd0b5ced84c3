//! BDD scenarios for the janitor sweep.

use rstest_bdd_macros::scenario;

use super::test_helpers::{JanitorContext, janitor_context};

#[scenario(
    path = "tests/features/janitor.feature",
    name = "Stop and remove a remote copy group before its volume"
)]
fn scenario_remote_copy_group_first(janitor_context: JanitorContext) {
    let _ = janitor_context;
}

#[scenario(
    path = "tests/features/janitor.feature",
    name = "Count missing resources as already gone"
)]
fn scenario_missing_resources(janitor_context: JanitorContext) {
    let _ = janitor_context;
}

#[scenario(
    path = "tests/features/janitor.feature",
    name = "Report resources that refuse deletion"
)]
fn scenario_fail_when_not_clean(janitor_context: JanitorContext) {
    let _ = janitor_context;
}
