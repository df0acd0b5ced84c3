//! QoS rules attached to volume sets.

use serde_json::{Value, json};
use tracing::debug;

use super::ArrayClient;
use crate::error::ArrayError;
use crate::model::{Collection, QosRule, QosTargetType};
use crate::options::{OperationOptions, QosRuleSpec};
use crate::transport::{ApiRequest, Transport};

/// Conversion factor between the bandwidth callers give and the wire field.
const KB_PER_MB: u64 = 1024;

fn rule_path(set: &str) -> String {
    format!("/qos/{}", urlencoding::encode(&format!("vvset:{set}")))
}

impl<T: Transport> ArrayClient<T> {
    /// Creates the QoS rule of a volume set.
    ///
    /// # Errors
    ///
    /// The array reports an existing rule as `Conflict` and a missing set as
    /// `NotFound`.
    pub async fn create_qos_rules(&self, set: &str, rule: &QosRuleSpec) -> Result<(), ArrayError> {
        let mut body = rule.to_map()?;
        body.insert(String::from("name"), json!(set));
        body.insert(
            String::from("type"),
            json!(QosTargetType::VolumeSet.code()),
        );
        self.execute(ApiRequest::post("/qos", Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Replaces the supplied fields of a set's QoS rule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the set has no rule.
    pub async fn modify_qos_rules(&self, set: &str, rule: &QosRuleSpec) -> Result<(), ArrayError> {
        let body = rule.to_map()?;
        self.execute(ApiRequest::put(rule_path(set), Value::Object(body)))
            .await?;
        Ok(())
    }

    /// Reads the QoS rule of a set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the set has no rule.
    pub async fn query_qos_rule(&self, set: &str) -> Result<QosRule, ArrayError> {
        self.fetch(ApiRequest::get(rule_path(set)), "QoS rule").await
    }

    /// Lists every QoS rule on the array.
    ///
    /// # Errors
    ///
    /// Returns the array or decode failure.
    pub async fn query_qos_rules(&self) -> Result<Collection<QosRule>, ArrayError> {
        self.fetch(ApiRequest::get("/qos"), "QoS rules").await
    }

    /// Deletes the QoS rule of a set.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the set has no rule.
    pub async fn delete_qos_rules(&self, set: &str) -> Result<(), ArrayError> {
        self.execute(ApiRequest::delete(rule_path(set))).await?;
        Ok(())
    }

    /// Sets IOPS and bandwidth limits on a set, creating the rule when it
    /// does not exist yet.
    ///
    /// `max_bw_mb` is in MB/s and is sent to the array as `bwMaxLimitKB`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::NoQosRule`] without contacting the array when
    /// neither limit is supplied, and a client-side `BadRequest` when the
    /// bandwidth does not fit in KB/s.
    pub async fn set_qos_rule(
        &self,
        set: &str,
        max_io: Option<u64>,
        max_bw_mb: Option<u64>,
    ) -> Result<(), ArrayError> {
        if max_io.is_none() && max_bw_mb.is_none() {
            return Err(ArrayError::NoQosRule {
                set_name: set.to_owned(),
            });
        }
        let bw_max_limit_kb = max_bw_mb
            .map(|mb| {
                mb.checked_mul(KB_PER_MB).ok_or_else(|| {
                    ArrayError::bad_request(format!("bandwidth limit {mb} MB/s is too large"))
                })
            })
            .transpose()?;
        let rule = QosRuleSpec {
            io_max_limit: max_io,
            bw_max_limit_kb,
            ..QosRuleSpec::default()
        };
        match self.query_qos_rule(set).await {
            Ok(_) => self.modify_qos_rules(set, &rule).await,
            Err(err) if err.is_not_found() => {
                debug!(set, "no QoS rule yet; creating one");
                self.create_qos_rules(set, &rule).await
            }
            Err(err) => Err(err),
        }
    }
}
