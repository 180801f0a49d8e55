// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Completed,
}

impl RequestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError(format!(
                "request status must be pending or completed, got `{other}`"
            ))),
        }
    }
}

/// One row of the change-request history. Two field names keep the API's
/// spelling (`ScheduledModifiedCapacity`, `modifiedVirtualHeadhount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub request_id: String,
    pub date: String,
    pub store_id: u64,
    #[serde(default)]
    pub hours: Vec<String>,
    pub current_total_piece_count: i64,
    pub modified_capacity: i64,
    pub scheduled_head_count: i64,
    #[serde(rename = "ScheduledModifiedCapacity")]
    pub scheduled_modified_capacity: i64,
    pub virtual_head_count: i64,
    #[serde(rename = "modifiedVirtualHeadhount")]
    pub modified_virtual_head_count: i64,
    #[serde(default)]
    pub reason: Vec<String>,
    #[serde(default)]
    pub other: Option<String>,
    #[serde(default)]
    pub changed_by: String,
    pub changed_on: String,
    #[serde(default)]
    pub completed_on: Option<String>,
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_api_field_spelling() {
        let raw = serde_json::json!({
            "requestId": "r-1",
            "date": "2025-01-11",
            "storeId": 1,
            "hours": ["0100", "0000"],
            "currentTotalPieceCount": 11,
            "modifiedCapacity": 22,
            "scheduledHeadCount": 1,
            "ScheduledModifiedCapacity": 2,
            "virtualHeadCount": 4,
            "modifiedVirtualHeadhount": 1,
            "reason": ["Reason is nothing"],
            "other": null,
            "changedBy": "",
            "changedOn": "2025-01-01 05:00:10.06",
            "completedOn": null,
            "status": "pending"
        });
        let record: RequestRecord = serde_json::from_value(raw.clone()).expect("decode");
        assert_eq!(record.scheduled_modified_capacity, 2);
        assert_eq!(record.modified_virtual_head_count, 1);
        assert_eq!(record.status, RequestStatus::Pending);
        assert_eq!(serde_json::to_value(&record).expect("encode"), raw);
    }
}
