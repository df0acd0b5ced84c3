//! Remote-copy group operations.

use rstest::rstest;
use serde_json::json;

use super::{Harness, assert_request, legacy};
use crate::error::ErrorKind;
use crate::model::{RecoveryAction, ReplicationMode, TargetState};
use crate::options::{
    AddVolumeOptions, RemoteCopyGroupChanges, RemoteCopyGroupOptions, RemoveVolumeOptions,
    TargetSpec, TargetUpdate, VolumePair,
};
use crate::transport::Method;

fn target() -> TargetSpec {
    TargetSpec {
        target_name: String::from("array-b"),
        mode: ReplicationMode::Periodic,
        user_cpg: Some(String::from("CPG1")),
        snap_cpg: Some(String::from("CPG1")),
    }
}

fn group_json(state: u8) -> serde_json::Value {
    json!({
        "name": "rcg1",
        "targets": [{
            "targetName": "array-b",
            "mode": 2,
            "state": state,
            "groupLastSyncTime": "2024-01-01T00:00:00Z"
        }],
        "volumes": [{
            "localVolumeName": "vol1",
            "remoteVolumes": [{"targetName": "array-b", "remoteVolumeName": "vol1-r"}]
        }]
    })
}

#[rstest]
#[tokio::test]
async fn create_group_posts_targets(legacy: Harness) {
    legacy.transport.push_empty(201);
    legacy
        .client
        .create_remote_copy_group(
            "rcg1",
            &[target()],
            RemoteCopyGroupOptions {
                local_user_cpg: Some(String::from("CPG1")),
                ..RemoteCopyGroupOptions::default()
            },
        )
        .await
        .expect("create succeeds");
    let request = legacy.only_request();
    assert_request(&request, Method::Post, "/remotecopygroups");
    assert_eq!(
        request.body,
        Some(json!({
            "name": "rcg1",
            "localUserCPG": "CPG1",
            "targets": [{
                "targetName": "array-b",
                "mode": 2,
                "userCPG": "CPG1",
                "snapCPG": "CPG1"
            }]
        }))
    );
}

#[rstest]
#[tokio::test]
async fn create_group_needs_a_target(legacy: Harness) {
    let err = legacy
        .client
        .create_remote_copy_group("rcg1", &[], RemoteCopyGroupOptions::default())
        .await
        .expect_err("targets are required");
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    legacy.assert_nothing_sent();
}

#[rstest]
#[tokio::test]
async fn start_then_stop_shows_state_transitions(legacy: Harness) {
    legacy.transport.push_empty(200);
    legacy.transport.push_json(200, group_json(3));
    legacy.transport.push_empty(200);
    legacy.transport.push_json(200, group_json(5));

    legacy.client.start_remote_copy("rcg1").await.expect("start succeeds");
    let started = legacy.client.get_remote_copy_group("rcg1").await.expect("group decodes");
    legacy.client.stop_remote_copy("rcg1").await.expect("stop succeeds");
    let stopped = legacy.client.get_remote_copy_group("rcg1").await.expect("group decodes");

    let state_of = |group: &crate::model::RemoteCopyGroup| {
        group.target("array-b").and_then(|target| target.state)
    };
    assert_eq!(state_of(&started), Some(TargetState::Started));
    assert_eq!(state_of(&stopped), Some(TargetState::Stopped));
    assert!(started.is_started());
    assert!(!stopped.is_started());

    let actions: Vec<_> = legacy
        .transport
        .requests()
        .into_iter()
        .filter_map(|request| request.body)
        .collect();
    assert_eq!(actions, vec![json!({"action": 3}), json!({"action": 4})]);
}

#[rstest]
#[tokio::test]
async fn synchronize_sends_action_five(legacy: Harness) {
    legacy.transport.push_empty(200);
    legacy
        .client
        .synchronize_remote_copy_group("rcg1")
        .await
        .expect("sync succeeds");
    assert_eq!(legacy.only_request().body, Some(json!({"action": 5})));
}

#[rstest]
#[tokio::test]
async fn remove_group_can_keep_snapshots(legacy: Harness) {
    legacy.transport.push_empty(200);
    legacy
        .client
        .remove_remote_copy_group("rcg1", true)
        .await
        .expect("remove succeeds");
    assert_request(
        &legacy.only_request(),
        Method::Delete,
        "/remotecopygroups/rcg1?keepSnap=true",
    );
}

#[rstest]
#[tokio::test]
async fn modify_group_sends_target_updates(legacy: Harness) {
    legacy.transport.push_empty(200);
    legacy
        .client
        .modify_remote_copy_group(
            "rcg1",
            RemoteCopyGroupChanges {
                targets: Some(vec![TargetUpdate {
                    target_name: String::from("array-b"),
                    sync_period: Some(300),
                    rm_sync_period: None,
                }]),
                ..RemoteCopyGroupChanges::default()
            },
        )
        .await
        .expect("modify succeeds");
    assert_eq!(
        legacy.only_request().body,
        Some(json!({"targets": [{"targetName": "array-b", "syncPeriod": 300}]}))
    );
}

#[rstest]
#[tokio::test]
async fn add_volume_pairs_with_secondary(legacy: Harness) {
    legacy.transport.push_empty(200);
    legacy
        .client
        .add_volume_to_remote_copy_group(
            "rcg1",
            "vol1",
            &[VolumePair {
                target_name: String::from("array-b"),
                sec_volume_name: String::from("vol1-r"),
            }],
            AddVolumeOptions {
                volume_auto_creation: Some(true),
                ..AddVolumeOptions::default()
            },
        )
        .await
        .expect("add succeeds");
    assert_eq!(
        legacy.only_request().body,
        Some(json!({
            "action": 1,
            "volumeName": "vol1",
            "volumeAutoCreation": true,
            "targets": [{"targetName": "array-b", "secVolumeName": "vol1-r"}]
        }))
    );
}

#[rstest]
#[case(RemoveVolumeOptions { keep_snap: true, ..RemoveVolumeOptions::default() }, "/remotecopygroups/rcg1/volumes/vol1?keepSnap=true")]
#[case(RemoveVolumeOptions { remove_from_target: true, ..RemoveVolumeOptions::default() }, "/remotecopygroups/rcg1/volumes/vol1?removeSecondaryVolume=true")]
#[case(RemoveVolumeOptions::default(), "/remotecopygroups/rcg1/volumes/vol1")]
#[tokio::test]
async fn http_delete_removal_encodes_flags_in_query(
    legacy: Harness,
    #[case] options: RemoveVolumeOptions,
    #[case] path: &str,
) {
    legacy.transport.push_empty(200);
    let with_delete = RemoveVolumeOptions {
        use_http_delete: true,
        ..options
    };
    legacy
        .client
        .remove_volume_from_remote_copy_group("rcg1", "vol1", with_delete)
        .await
        .expect("remove succeeds");
    assert_request(&legacy.only_request(), Method::Delete, path);
}

#[rstest]
#[tokio::test]
async fn http_delete_removal_rejects_both_flags(legacy: Harness) {
    let err = legacy
        .client
        .remove_volume_from_remote_copy_group(
            "rcg1",
            "vol1",
            RemoveVolumeOptions {
                keep_snap: true,
                remove_from_target: true,
                use_http_delete: true,
            },
        )
        .await
        .expect_err("flags conflict");
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    legacy.assert_nothing_sent();
}

#[rstest]
#[tokio::test]
async fn action_removal_sends_flags_in_body(legacy: Harness) {
    legacy.transport.push_empty(200);
    legacy
        .client
        .remove_volume_from_remote_copy_group(
            "rcg1",
            "vol1",
            RemoveVolumeOptions {
                keep_snap: true,
                remove_from_target: true,
                use_http_delete: false,
            },
        )
        .await
        .expect("remove succeeds");
    let request = legacy.only_request();
    assert_request(&request, Method::Put, "/remotecopygroups/rcg1");
    assert_eq!(
        request.body,
        Some(json!({
            "action": 2,
            "volumeName": "vol1",
            "keepSnap": true,
            "removeSecondaryVolume": true
        }))
    );
}

#[rstest]
#[case(RecoveryAction::Failover, 7)]
#[case(RecoveryAction::Recover, 8)]
#[case(RecoveryAction::Restore, 10)]
#[tokio::test]
async fn recovery_posts_action_code(
    legacy: Harness,
    #[case] action: RecoveryAction,
    #[case] code: u8,
) {
    legacy.transport.push_empty(200);
    legacy
        .client
        .recover_remote_copy_group_from_disaster("rcg1", action)
        .await
        .expect("recovery succeeds");
    let request = legacy.only_request();
    assert_request(&request, Method::Post, "/remotecopygroups/rcg1");
    assert_eq!(request.body, Some(json!({"action": code})));
}

#[rstest]
#[tokio::test]
async fn group_volumes_decode_remote_counterparts(legacy: Harness) {
    legacy.transport.push_json(200, group_json(5));
    let group = legacy.client.get_remote_copy_group("rcg1").await.expect("decodes");
    let volume = group.volumes.first().expect("one member");
    assert_eq!(volume.local_volume_name, "vol1");
    assert_eq!(
        volume.remote_volumes.first().map(|remote| remote.remote_volume_name.as_str()),
        Some("vol1-r")
    );
    assert!(!group.role_reversed);
}
