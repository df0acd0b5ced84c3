//! Unit tests for client-side validation.

use rstest::{fixture, rstest};

use super::{
    GrowthGib, MAX_METADATA_KEY_LEN, MAX_NAME_LEN, Provisioning, copy_destination_cpg,
    copy_volume, create_volume, metadata_key, promote, provisioning, tune_changes_type,
    tune_volume, volume_name, volume_size,
};
use crate::capabilities::ArrayCapabilities;
use crate::error::{ArrayError, ErrorKind};
use crate::model::{ConversionOperation, ProvisioningType, TaskPriority, TuneOperation, Volume};
use crate::options::{CopyOptions, CreateVolumeOptions, PromoteOptions, TuneOptions};

#[fixture]
fn legacy() -> ArrayCapabilities {
    ArrayCapabilities::LEGACY
}

#[fixture]
fn primera() -> ArrayCapabilities {
    ArrayCapabilities {
        primera: true,
        compression: true,
        merlin: false,
    }
}

fn assert_bad_request<T: std::fmt::Debug>(result: Result<T, ArrayError>) {
    let err = result.expect_err("validation should fail");
    assert_eq!(err.kind(), ErrorKind::BadRequest, "got {err}");
    assert!(err.is_client_side(), "validation errors are client-side");
}

#[rstest]
#[case("UnitTestVolume1")]
#[case("vol.with-dash_and:colon")]
#[case("a")]
fn volume_name_accepts_valid_names(#[case] name: &str) {
    assert!(volume_name(name).is_ok());
}

#[rstest]
#[case("")]
#[case("a-volume-name-that-is-far-too-long")]
#[case("bad name")]
#[case("bad/name")]
fn volume_name_rejects_invalid_names(#[case] name: &str) {
    assert_bad_request(volume_name(name));
}

#[test]
fn volume_name_limit_is_inclusive() {
    let at_limit = "x".repeat(MAX_NAME_LEN);
    assert!(volume_name(&at_limit).is_ok());
    assert_bad_request(volume_name(&format!("{at_limit}x")));
}

#[rstest]
#[case(0)]
#[case(16_777_216)]
#[case(16_777_218)]
fn volume_size_rejects_out_of_range(#[case] size: u64) {
    assert_bad_request(volume_size(size));
}

#[test]
fn volume_size_accepts_largest_valid() {
    assert!(volume_size(16_777_215).is_ok());
}

#[rstest]
#[case("")]
#[case("&")]
#[case("a/b")]
#[case("line\nbreak")]
fn metadata_key_rejects_invalid_keys(#[case] key: &str) {
    assert_bad_request(metadata_key(key));
}

#[test]
fn metadata_key_enforces_length_cap() {
    assert!(metadata_key(&"k".repeat(MAX_METADATA_KEY_LEN)).is_ok());
    assert_bad_request(metadata_key(&"k".repeat(MAX_METADATA_KEY_LEN + 1)));
}

#[test]
fn growth_accepts_integer_and_whole_float() {
    assert_eq!(GrowthGib::try_from(1_i64).map(GrowthGib::mib).ok(), Some(1024));
    assert_eq!(GrowthGib::try_from(1.0_f64).map(GrowthGib::gib).ok(), Some(1));
}

#[rstest]
#[case(-1_i64)]
#[case(0_i64)]
fn growth_rejects_shrink(#[case] delta: i64) {
    let err = GrowthGib::try_from(delta).expect_err("shrink must fail");
    assert!(err.is_rejected_growth());
}

#[rstest]
#[case(1.5_f64)]
#[case(-1.0_f64)]
#[case(f64::NAN)]
fn growth_rejects_fractional_and_negative_floats(#[case] delta: f64) {
    assert_bad_request(GrowthGib::try_from(delta));
}

#[rstest]
fn primera_merges_dedup_and_compression_into_reduce(primera: ArrayCapabilities) {
    let options = create_volume(
        &primera,
        CreateVolumeOptions {
            tdvv: Some(true),
            compression: Some(true),
            ..CreateVolumeOptions::default()
        },
    )
    .expect("combination is valid");
    assert_eq!(options.reduce, Some(true));
    assert_eq!(options.tdvv, None);
    assert_eq!(options.compression, None);
}

#[rstest]
#[case(Some(true), None, None)]
#[case(None, Some(true), None)]
#[case(Some(true), Some(true), Some(true))]
fn primera_rejects_invalid_provisioning(
    primera: ArrayCapabilities,
    #[case] tdvv: Option<bool>,
    #[case] compression: Option<bool>,
    #[case] tpvv: Option<bool>,
) {
    assert_bad_request(provisioning(
        &primera,
        Provisioning {
            tpvv,
            tdvv,
            reduce: None,
            compression,
        },
    ));
}

#[rstest]
fn primera_drops_false_compression(primera: ArrayCapabilities) {
    let flags = provisioning(
        &primera,
        Provisioning {
            tpvv: Some(true),
            compression: Some(false),
            ..Provisioning::default()
        },
    )
    .expect("explicit false is harmless");
    assert_eq!(flags.compression, None);
    assert_eq!(flags.tpvv, Some(true));
}

#[rstest]
fn legacy_rejects_compression_without_capability(legacy: ArrayCapabilities) {
    assert_bad_request(provisioning(
        &legacy,
        Provisioning {
            compression: Some(true),
            ..Provisioning::default()
        },
    ));
}

#[rstest]
fn offline_copy_rejects_provisioning(legacy: ArrayCapabilities) {
    assert_bad_request(copy_volume(
        &legacy,
        CopyOptions {
            online: Some(false),
            tpvv: Some(true),
            ..CopyOptions::default()
        },
    ));
}

#[rstest]
fn offline_copy_strips_dest_cpg(legacy: ArrayCapabilities) {
    let options = copy_volume(
        &legacy,
        CopyOptions {
            online: Some(false),
            dest_cpg: Some(String::from("test")),
            ..CopyOptions::default()
        },
    )
    .expect("destCPG is ignored offline");
    assert_eq!(options.dest_cpg, None);
}

#[rstest]
#[case("CPG1", None, Ok("CPG1"))]
#[case("", Some("CPG2"), Ok("CPG2"))]
#[case("CPG1", Some("CPG1"), Ok("CPG1"))]
#[case("CPG1", Some("CPG2"), Err(()))]
#[case("", None, Err(()))]
fn destination_cpg_resolution(
    #[case] positional: &str,
    #[case] requested: Option<&str>,
    #[case] expected: Result<&str, ()>,
) {
    let chosen = copy_destination_cpg(positional, requested);
    match expected {
        Ok(cpg) => assert_eq!(chosen.expect("CPG resolves"), cpg),
        Err(()) => assert_bad_request(chosen),
    }
}

#[rstest]
fn online_copy_rejects_priority(legacy: ArrayCapabilities) {
    assert_bad_request(copy_volume(
        &legacy,
        CopyOptions {
            online: Some(true),
            priority: Some(TaskPriority::High),
            ..CopyOptions::default()
        },
    ));
}

#[rstest]
fn online_copy_on_primera_needs_provisioning(primera: ArrayCapabilities) {
    assert_bad_request(copy_volume(
        &primera,
        CopyOptions {
            online: Some(true),
            ..CopyOptions::default()
        },
    ));
    let options = copy_volume(
        &primera,
        CopyOptions {
            online: Some(true),
            tpvv: Some(true),
            ..CopyOptions::default()
        },
    )
    .expect("thin online copy is valid");
    assert_eq!(options.tpvv, Some(true));
}

fn tune_options(conversion: Option<ConversionOperation>) -> TuneOptions {
    TuneOptions {
        user_cpg: Some(String::from("CPG2")),
        conversion_operation: conversion,
        ..TuneOptions::default()
    }
}

#[rstest]
#[case(ConversionOperation::Full, None)]
#[case(ConversionOperation::Dedup, None)]
#[case(ConversionOperation::Thin, Some(true))]
fn primera_rejects_unsupported_conversions(
    primera: ArrayCapabilities,
    #[case] conversion: ConversionOperation,
    #[case] compression: Option<bool>,
) {
    let options = TuneOptions {
        compression,
        ..tune_options(Some(conversion))
    };
    assert_bad_request(tune_volume(&primera, TuneOperation::UserCpg, options));
}

#[rstest]
fn primera_sends_dedup_compressed_as_dedup_with_compression(primera: ArrayCapabilities) {
    let options = tune_volume(
        &primera,
        TuneOperation::UserCpg,
        tune_options(Some(ConversionOperation::DedupCompressed)),
    )
    .expect("dedup-compressed is supported");
    assert_eq!(options.conversion_operation, Some(ConversionOperation::Dedup));
    assert_eq!(options.compression, Some(true));
}

#[rstest]
fn tune_rejects_long_keep_vv(legacy: ArrayCapabilities) {
    let options = TuneOptions {
        keep_vv: Some("k".repeat(46)),
        ..tune_options(Some(ConversionOperation::Full))
    };
    assert_bad_request(tune_volume(&legacy, TuneOperation::UserCpg, options));
}

#[rstest]
fn tune_requires_destination_cpg(legacy: ArrayCapabilities) {
    assert_bad_request(tune_volume(
        &legacy,
        TuneOperation::UserCpg,
        TuneOptions::default(),
    ));
}

#[rstest]
fn tune_rejects_same_type_conversion(legacy: ArrayCapabilities) {
    let current = Volume {
        name: String::from("vol1"),
        provisioning_type: Some(ProvisioningType::Thin),
        ..Volume::default()
    };
    let to_thin = tune_volume(
        &legacy,
        TuneOperation::UserCpg,
        tune_options(Some(ConversionOperation::Thin)),
    )
    .expect("thin conversion is valid on its own");
    assert_bad_request(tune_changes_type(&to_thin, &current));

    let to_full = tune_volume(
        &legacy,
        TuneOperation::UserCpg,
        tune_options(Some(ConversionOperation::Full)),
    )
    .expect("full conversion is valid on its own");
    assert!(tune_changes_type(&to_full, &current).is_ok());
}

#[test]
fn promote_rejects_online_with_priority() {
    let err = promote(&PromoteOptions {
        online: Some(true),
        priority: Some(TaskPriority::Low),
        allow_remote_copy_parent: None,
    })
    .expect_err("combination conflicts");
    assert_eq!(err.kind(), ErrorKind::Conflict);
}
