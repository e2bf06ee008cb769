//! Partition listing

use crate::models::AxapiResponse;

/// Default partition. Always present, never listed by `GET partition`.
pub const SHARED_PARTITION: &str = "shared";

/// Turn a `GET partition` response into partition names, `shared` first.
///
/// Anything without an iterable `partition-list` means no partitions beyond
/// `shared` are configured. Entries without a `partition-name` are skipped.
pub fn partition_names(response: &AxapiResponse) -> Vec<String> {
    let mut partitions = vec![SHARED_PARTITION.to_string()];

    let listed = response
        .as_json()
        .and_then(|value| value.get("partition-list"))
        .and_then(|list| list.as_array());

    if let Some(listed) = listed {
        partitions.extend(
            listed
                .iter()
                .filter_map(|entry| entry.get("partition-name"))
                .filter_map(|name| name.as_str())
                .map(str::to_string),
        );
    }

    partitions
}
