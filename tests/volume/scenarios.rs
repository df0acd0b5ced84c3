//! BDD scenarios for volume lifecycle operations.

use rstest_bdd_macros::scenario;

use super::test_helpers::{VolumeContext, volume_context};

#[scenario(
    path = "tests/features/volume.feature",
    name = "Grow a volume by whole GiB"
)]
fn scenario_grow_volume(volume_context: VolumeContext) {
    let _ = volume_context;
}

#[scenario(
    path = "tests/features/volume.feature",
    name = "Refuse to shrink a volume"
)]
fn scenario_refuse_shrink(volume_context: VolumeContext) {
    let _ = volume_context;
}

#[scenario(
    path = "tests/features/volume.feature",
    name = "Reject thin deduplication on a primera array"
)]
fn scenario_reject_tdvv_on_primera(volume_context: VolumeContext) {
    let _ = volume_context;
}

#[scenario(
    path = "tests/features/volume.feature",
    name = "List snapshots of a volume that does not exist"
)]
fn scenario_snapshots_of_missing_volume(volume_context: VolumeContext) {
    let _ = volume_context;
}

#[scenario(
    path = "tests/features/volume.feature",
    name = "Metadata writes update an existing key"
)]
fn scenario_metadata_overwrite(volume_context: VolumeContext) {
    let _ = volume_context;
}
