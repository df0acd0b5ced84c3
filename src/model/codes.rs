//! Numeric wire codes used by the management API.
//!
//! Codes the array reports back are decoded leniently: unknown values are
//! kept in an `Other` variant so a newer firmware does not break reads.
//! Codes the caller sends are strict and reject unknown values up front.

use crate::error::ArrayError;

macro_rules! reported_code {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
        #[serde(from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Code not known to this client.
            Other(u8),
        }

        impl $name {
            /// Numeric wire value.
            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Other(code) => code,
                }
            }
        }

        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }
    };
}

macro_rules! requested_code {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Numeric wire value.
            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = ArrayError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    other => Err(ArrayError::bad_request(format!(
                        "unsupported {} {other}",
                        $label
                    ))),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }
    };
}

reported_code!(
    /// How a volume's capacity is provisioned.
    ProvisioningType {
        /// Fully provisioned (FPVV).
        Full = 1,
        /// Thin provisioned (TPVV).
        Thin = 2,
        /// Snapshot of another volume.
        Snapshot = 3,
        /// Peer volume imported from another array.
        Peer = 4,
        /// The array could not determine the type.
        Unknown = 5,
        /// Thin deduplicated (TDVV).
        Dedup = 6,
        /// Deduplication store backing TDVVs of a CPG.
        DedupStore = 7,
    }
);

reported_code!(
    /// Replication mode of a remote-copy target.
    ReplicationMode {
        /// Synchronous replication.
        Sync = 1,
        /// Periodic replication on a sync period.
        Periodic = 2,
        /// Asynchronous streaming replication.
        Async = 4,
    }
);

reported_code!(
    /// Replication state of a remote-copy target.
    TargetState {
        /// Replication is starting.
        Starting = 2,
        /// Replication is running.
        Started = 3,
        /// Replication is stopping.
        Stopping = 4,
        /// Replication is stopped.
        Stopped = 5,
    }
);

reported_code!(
    /// Flash cache policy of a volume set.
    FlashCachePolicy {
        /// Flash cache enabled for the set.
        Enabled = 1,
        /// Flash cache disabled for the set.
        Disabled = 2,
    }
);

reported_code!(
    /// Kind of object a QoS rule targets.
    QosTargetType {
        /// A volume set.
        VolumeSet = 1,
        /// The whole system.
        System = 2,
    }
);

requested_code!(
    /// Which CPG a tune operation moves.
    TuneOperation ("tune operation") {
        /// Move user space to a new CPG.
        UserCpg = 1,
        /// Move snapshot space to a new CPG.
        SnapCpg = 2,
    }
);

requested_code!(
    /// Target provisioning of a tune conversion.
    ConversionOperation ("conversion operation") {
        /// Convert to thin provisioned.
        Thin = 1,
        /// Convert to fully provisioned.
        Full = 2,
        /// Convert to thin deduplicated.
        Dedup = 3,
        /// Convert to deduplicated and compressed.
        DedupCompressed = 4,
    }
);

requested_code!(
    /// Membership change requested by `modify_volume_set`.
    SetAction ("volume set action") {
        /// Add the listed members.
        AddMembers = 1,
        /// Remove the listed members.
        RemoveMembers = 2,
    }
);

requested_code!(
    /// Disaster-recovery action for a remote-copy group.
    RecoveryAction ("recovery action") {
        /// Reverse roles so the secondary becomes primary.
        Failover = 7,
        /// Resume replication from the secondary.
        Recover = 8,
        /// Return roles to their original direction.
        Restore = 10,
    }
);

requested_code!(
    /// Priority of a background copy or promote task.
    TaskPriority ("task priority") {
        /// High priority.
        High = 1,
        /// Medium priority.
        Medium = 2,
        /// Low priority.
        Low = 3,
    }
);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConversionOperation, ProvisioningType, TargetState, TuneOperation};
    use crate::error::ArrayError;

    #[rstest]
    #[case(3, TargetState::Started)]
    #[case(5, TargetState::Stopped)]
    #[case(9, TargetState::Other(9))]
    fn target_state_decodes_known_and_unknown_codes(#[case] code: u8, #[case] expected: TargetState) {
        let decoded: TargetState =
            serde_json::from_value(serde_json::json!(code)).expect("state decodes");
        assert_eq!(decoded, expected);
        assert_eq!(decoded.code(), code);
    }

    #[test]
    fn provisioning_type_serialises_as_number() {
        assert_eq!(
            serde_json::to_value(ProvisioningType::Dedup).expect("serialises"),
            serde_json::json!(6)
        );
    }

    #[rstest]
    #[case(4, ProvisioningType::Peer)]
    #[case(5, ProvisioningType::Unknown)]
    #[case(7, ProvisioningType::DedupStore)]
    #[case(8, ProvisioningType::Other(8))]
    fn provisioning_type_decodes_array_codes(
        #[case] code: u8,
        #[case] expected: ProvisioningType,
    ) {
        let decoded: ProvisioningType =
            serde_json::from_value(serde_json::json!(code)).expect("type decodes");
        assert_eq!(decoded, expected);
    }

    #[rstest]
    #[case(3)]
    #[case(0)]
    fn tune_operation_rejects_unknown_codes(#[case] code: u8) {
        let err = TuneOperation::try_from(code).expect_err("code should be rejected");
        assert!(
            matches!(err, ArrayError::BadRequest(_)) && err.is_client_side(),
            "got {err}"
        );
    }

    #[test]
    fn conversion_operation_rejects_five_through_serde() {
        let result: Result<ConversionOperation, _> =
            serde_json::from_value(serde_json::json!(5));
        assert!(result.is_err());
    }
}
