// Availability module
// Provider weekly availability windows

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::utils::date::{in_window, wire_time};

/// Recurring weekly window in which a provider accepts appointments.
///
/// A provider may carry several windows on the same weekday (split shifts).
/// Windows never span midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: Option<i64>,
    pub provider_id: i64,
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

impl Availability {
    /// Create a validated availability window.
    ///
    /// # Returns
    /// Returns `Result<Availability, String>` with validation
    pub fn new(
        provider_id: i64,
        weekday: u8,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, String> {
        if weekday > 6 {
            return Err(format!("Weekday must be 0-6, got {}", weekday));
        }

        if end_time <= start_time {
            return Err("Window end must be after window start".to_string());
        }

        Ok(Self {
            id: None,
            provider_id,
            weekday,
            start_time,
            end_time,
            active: true,
        })
    }

    /// Whether `time` falls inside the half-open window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        in_window(time, self.start_time, self.end_time)
    }
}
