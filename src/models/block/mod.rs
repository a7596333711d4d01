// Block module
// Ad-hoc provider unavailability with absolute bounds

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::date::{overlaps, wire_datetime};

/// One-off period during which a provider takes no appointments.
///
/// Blocks carry absolute timestamps and override any weekly availability
/// window they intersect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: Option<i64>,
    pub provider_id: i64,
    #[serde(with = "wire_datetime", rename = "date_start")]
    pub start_at: NaiveDateTime,
    #[serde(with = "wire_datetime", rename = "date_end")]
    pub end_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Block {
    /// Create a validated block.
    ///
    /// # Returns
    /// Returns `Result<Block, String>` with validation
    pub fn new(
        provider_id: i64,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
    ) -> Result<Self, String> {
        if end_at <= start_at {
            return Err("Block end must be after block start".to_string());
        }

        Ok(Self {
            id: None,
            provider_id,
            start_at,
            end_at,
            reason: None,
        })
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether the block intersects the half-open interval `[start, end)`.
    pub fn overlaps_interval(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        overlaps(self.start_at, self.end_at, start, end)
    }

    /// Whether `instant` falls inside the block.
    pub fn covers(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start_at && instant < self.end_at
    }
}
