//! Wire types for schedule endpoints.

use serde::{Deserialize, Serialize};

/// Request body to register a daily check-in trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    pub name: String,
    pub hour: u8,
    pub minute: u8,
}

/// Response to a registered trigger.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResponse {
    pub job_id: String,
    pub contact: String,
    pub time: String,
}
