// Business hour module
// One operating window per weekday for the tenant

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::utils::date::{in_window, wire_time};

/// Tenant operating window for one weekday.
///
/// Weekdays use the 0 = Sunday through 6 = Saturday convention. A tenant
/// carries at most one row per weekday; a weekday with no active row is
/// closed. Windows never span midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHour {
    pub id: Option<i64>,
    pub weekday: u8,
    #[serde(with = "wire_time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire_time")]
    pub end_time: NaiveTime,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl BusinessHour {
    /// Create a validated business hour row.
    ///
    /// # Returns
    /// Returns `Result<BusinessHour, String>` with validation
    pub fn new(weekday: u8, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self, String> {
        if weekday > 6 {
            return Err(format!("Weekday must be 0-6, got {}", weekday));
        }

        if end_time <= start_time {
            return Err("Closing time must be after opening time".to_string());
        }

        Ok(Self {
            id: None,
            weekday,
            start_time,
            end_time,
            active: true,
        })
    }

    /// Whether `time` falls inside the half-open operating window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        in_window(time, self.start_time, self.end_time)
    }
}
