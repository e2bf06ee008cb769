//! Snapshot collection
//!
//! Walks the accessor catalog against an authenticated client. Device-wide
//! accessors run once from the `shared` partition; the SLB view is repeated
//! for every other partition together with its running config.

use axapi_client::catalog;
use axapi_client::health;
use axapi_client::partition::SHARED_PARTITION;
use axapi_client::{AxapiClient, AxapiError, AxapiResponse, Transport, COMMAND_OUTPUT_KEY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Accessors repeated in every non-shared partition
pub const PARTITION_SCOPED: &[&str] = &[
    "slb_servers",
    "slb_service_groups",
    "slb_virtual_servers",
    "slb_server_oper",
    "slb_service_group_oper",
    "slb_virtual_server_oper",
    "health_stat",
];

/// Everything collected from one device
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub device: String,
    pub taken_at: DateTime<Utc>,
    pub partitions: Vec<String>,
    /// Parameterless accessors, from the shared partition
    pub device_state: BTreeMap<&'static str, Value>,
    /// Running config and SLB view per non-shared partition
    pub partition_state: BTreeMap<String, BTreeMap<&'static str, Value>>,
    /// `show health down-reason <N>` per code currently reported
    pub down_reasons: BTreeMap<String, Value>,
}

/// Collect a snapshot. The client must already be authenticated.
///
/// Transport and session failures abort the walk. Anything else is recorded
/// as `{"error": ...}` under the accessor and the walk continues.
pub async fn collect<T: Transport>(client: &AxapiClient<T>) -> Result<Snapshot, AxapiError> {
    let taken_at = Utc::now();
    let partitions = client.partitions().await?;
    info!("Found {} partitions", partitions.len());

    let mut device_state = BTreeMap::new();
    for accessor in catalog::parameterless() {
        debug!("Collecting {} ({})", accessor.name, accessor.show);
        let value = capture(accessor.name, client.invoke(accessor, None).await)?;
        device_state.insert(accessor.name, value);
    }

    let mut down_reasons = BTreeMap::new();
    for code in down_reason_codes(&device_state) {
        let detail = capture(
            "health_down_reason",
            client.call("health_down_reason", Some(code.as_str())).await,
        )?;
        down_reasons.insert(code, detail);
    }

    let mut partition_state = BTreeMap::new();
    for partition in partitions.iter().filter(|p| p.as_str() != SHARED_PARTITION) {
        info!("Collecting partition {}", partition);
        let mut state = BTreeMap::new();
        let running_config = client.partition_config(partition).await;
        let switched = running_config.is_ok();
        state.insert("running_config", capture("running_config", running_config)?);
        if !switched {
            // Still in the previous partition; its SLB view does not belong here.
            partition_state.insert(partition.clone(), state);
            continue;
        }
        for name in PARTITION_SCOPED {
            state.insert(*name, capture(name, client.call(name, None).await)?);
        }
        partition_state.insert(partition.clone(), state);
    }

    if !partition_state.is_empty() {
        capture("change_partition", client.change_partition(SHARED_PARTITION).await)?;
    }

    Ok(Snapshot {
        device: client.host().to_string(),
        taken_at,
        partitions,
        device_state,
        partition_state,
        down_reasons,
    })
}

/// Down-reason codes from the `health_stat` output already in `device_state`
fn down_reason_codes(device_state: &BTreeMap<&'static str, Value>) -> BTreeSet<String> {
    match device_state
        .get("health_stat")
        .and_then(|value| value.get(COMMAND_OUTPUT_KEY))
        .and_then(Value::as_str)
    {
        Some(text) => health::parse_down_reasons(text).into_iter().collect(),
        None => {
            warn!("No health stat output; skipping down-reason details");
            BTreeSet::new()
        }
    }
}

fn is_fatal(error: &AxapiError) -> bool {
    matches!(
        error,
        AxapiError::Connection(_) | AxapiError::Http(_) | AxapiError::NotAuthenticated
    )
}

fn capture(name: &str, result: Result<AxapiResponse, AxapiError>) -> Result<Value, AxapiError> {
    match result {
        Ok(response) => Ok(response.into_value()),
        Err(e) if is_fatal(&e) => Err(e),
        Err(e) => {
            warn!("{} failed: {}", name, e);
            Ok(serde_json::json!({ "error": e.to_string() }))
        }
    }
}
