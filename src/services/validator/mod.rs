// Mutation validation service
// Gate keeping for create, drag, and resize before anything hits the API

use chrono::NaiveDateTime;
use log::warn;

use crate::error::ScheduleError;
use crate::models::viewer::{PERM_APPOINTMENTS_CREATE, PERM_APPOINTMENTS_EDIT};
use crate::models::Viewer;
use crate::services::conflict::ConflictDetector;
use crate::services::snapshot::ScheduleSnapshot;

/// A new appointment as the console proposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub service_id: i64,
    pub provider_id: i64,
    pub client_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Validates mutations against a snapshot before they are persisted.
///
/// Checks run in a fixed order: permission, interval sanity, interval
/// bookability, then the booked-slot check. The first failure is terminal
/// and the caller must not issue the persistence call. Admins and
/// providers may deliberately overlap appointments; only clients are
/// stopped from double-booking.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationValidator {
    detector: ConflictDetector,
}

impl MutationValidator {
    pub fn new(detector: ConflictDetector) -> Self {
        Self { detector }
    }

    pub fn validate_create(
        &self,
        request: &CreateRequest,
        viewer: &Viewer,
        snapshot: &ScheduleSnapshot,
    ) -> Result<(), ScheduleError> {
        self.check(
            viewer,
            PERM_APPOINTMENTS_CREATE,
            snapshot,
            request.provider_id,
            request.start,
            request.end,
            None,
        )
    }

    /// Drag to a new start. The duration is preserved unless `new_end`
    /// overrides it.
    pub fn validate_reschedule(
        &self,
        appointment_id: i64,
        new_start: NaiveDateTime,
        new_end: Option<NaiveDateTime>,
        viewer: &Viewer,
        snapshot: &ScheduleSnapshot,
    ) -> Result<(), ScheduleError> {
        if !viewer.has_permission(PERM_APPOINTMENTS_EDIT) {
            warn!(
                "Viewer {} rejected: missing {}",
                viewer.id, PERM_APPOINTMENTS_EDIT
            );
            return Err(ScheduleError::PermissionDenied(
                PERM_APPOINTMENTS_EDIT.to_string(),
            ));
        }

        let Some(appointment) = snapshot.find_appointment(appointment_id) else {
            return Err(ScheduleError::InvalidInterval(format!(
                "appointment {} is not in the visible range",
                appointment_id
            )));
        };

        let end = new_end.unwrap_or(new_start + (appointment.end_at() - appointment.start));

        self.check(
            viewer,
            PERM_APPOINTMENTS_EDIT,
            snapshot,
            appointment.provider_id,
            new_start,
            end,
            Some(appointment_id),
        )
    }

    /// Stretch or shrink; both bounds are explicit and the result must
    /// keep a positive duration.
    pub fn validate_resize(
        &self,
        appointment_id: i64,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
        viewer: &Viewer,
        snapshot: &ScheduleSnapshot,
    ) -> Result<(), ScheduleError> {
        self.validate_reschedule(appointment_id, new_start, Some(new_end), viewer, snapshot)
    }

    fn check(
        &self,
        viewer: &Viewer,
        permission: &str,
        snapshot: &ScheduleSnapshot,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<(), ScheduleError> {
        if !viewer.has_permission(permission) {
            warn!("Viewer {} rejected: missing {}", viewer.id, permission);
            return Err(ScheduleError::PermissionDenied(permission.to_string()));
        }

        let verdict = snapshot.resolver().interval_verdict(provider_id, start, end)?;
        if let Some(err) = verdict.into_error() {
            warn!(
                "Mutation rejected for provider {} at {}: {}",
                provider_id, start, err
            );
            return Err(err);
        }

        if viewer.is_client()
            && self.detector.has_conflict(
                provider_id,
                start,
                end,
                &snapshot.appointments,
                exclude_id,
            )
        {
            warn!(
                "Client {} rejected: slot at {} already booked",
                viewer.id, start
            );
            return Err(ScheduleError::AppointmentConflict);
        }

        Ok(())
    }
}
