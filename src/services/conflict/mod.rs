// Conflict detection service
// Overlap checks between a candidate interval and existing bookings

use chrono::NaiveDateTime;

use crate::models::{Appointment, Block};

/// Default status id the console assigns to cancelled appointments.
pub const DEFAULT_CANCELLED_STATUS_ID: i64 = 3;

/// Detects appointment and block collisions for one provider.
///
/// Cancelled appointments release their slot and never conflict; which
/// status id means cancelled comes from configuration. Blocks conflict
/// regardless of any status.
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector {
    cancelled_status_id: i64,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self {
            cancelled_status_id: DEFAULT_CANCELLED_STATUS_ID,
        }
    }
}

impl ConflictDetector {
    pub fn new(cancelled_status_id: i64) -> Self {
        Self {
            cancelled_status_id,
        }
    }

    fn is_cancelled(&self, appointment: &Appointment) -> bool {
        appointment.status_id == Some(self.cancelled_status_id)
    }

    /// Whether `[start, end)` collides with another appointment of the same
    /// provider. `exclude_id` skips the appointment being moved.
    pub fn has_conflict(
        &self,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        appointments: &[Appointment],
        exclude_id: Option<i64>,
    ) -> bool {
        appointments.iter().any(|appt| {
            appt.provider_id == provider_id
                && !(appt.id.is_some() && appt.id == exclude_id)
                && !self.is_cancelled(appt)
                && appt.overlaps_interval(start, end)
        })
    }

    /// The appointments that collide with `[start, end)`, for diagnostics.
    pub fn find_conflicts<'a>(
        &self,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        appointments: &'a [Appointment],
        exclude_id: Option<i64>,
    ) -> Vec<&'a Appointment> {
        appointments
            .iter()
            .filter(|appt| {
                appt.provider_id == provider_id
                    && !(appt.id.is_some() && appt.id == exclude_id)
                    && !self.is_cancelled(appt)
                    && appt.overlaps_interval(start, end)
            })
            .collect()
    }

    /// Whether `[start, end)` collides with a provider block. Status-blind.
    pub fn has_block_conflict(
        &self,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        blocks: &[Block],
    ) -> bool {
        blocks
            .iter()
            .any(|b| b.provider_id == provider_id && b.overlaps_interval(start, end))
    }
}
