// Test fixtures - reusable schedule data
// Provides consistent snapshots across all test files

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use agenda_core::models::viewer::{PERM_APPOINTMENTS_CREATE, PERM_APPOINTMENTS_EDIT};
use agenda_core::models::{Appointment, Availability, Block, BusinessHour, Role, ServiceRef, Viewer};
use agenda_core::services::snapshot::ScheduleSnapshot;

/// Sample dates for testing. The working week starts Monday 2025-01-06.
pub mod dates {
    use super::*;

    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    pub fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    pub fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    /// Monday at the given wall-clock time.
    pub fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        at(monday(), h, m)
    }
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Tenant open Monday through Friday, 09:00 to 18:00.
pub fn weekday_business_hours() -> Vec<BusinessHour> {
    (1..=5)
        .map(|wd| BusinessHour::new(wd, time(9, 0), time(18, 0)).unwrap())
        .collect()
}

/// Provider 42 works Monday through Friday, 09:00 to 17:00.
pub fn provider_42_availability() -> Vec<Availability> {
    (1..=5)
        .map(|wd| Availability::new(42, wd, time(9, 0), time(17, 0)).unwrap())
        .collect()
}

/// Provider 42 is out for lunch errands Monday 12:00 to 13:00.
pub fn monday_lunch_block() -> Block {
    Block::new(42, dates::monday_at(12, 0), dates::monday_at(13, 0))
        .unwrap()
        .with_reason("Lunch")
}

/// A confirmed appointment for provider 42, client 30, Monday 10:00-11:00.
pub fn booked_appointment(id: i64) -> Appointment {
    let mut appointment =
        Appointment::new(1, 42, 30, dates::monday_at(10, 0), dates::monday_at(11, 0)).unwrap();
    appointment.id = Some(id);
    appointment.status_id = Some(1);
    appointment.service = Some(ServiceRef {
        id: Some(1),
        name: Some("Consultation".to_string()),
        duration_minutes: Some(60),
    });
    appointment
}

/// One fully populated week: hours, one provider window, one block, one
/// existing appointment.
pub fn standard_snapshot() -> ScheduleSnapshot {
    ScheduleSnapshot::new(
        vec![booked_appointment(7)],
        weekday_business_hours(),
        provider_42_availability(),
        vec![monday_lunch_block()],
    )
}

/// A client viewer holding both mutation permissions.
pub fn client_viewer() -> Viewer {
    Viewer::new(
        30,
        Role::Client,
        [
            PERM_APPOINTMENTS_CREATE.to_string(),
            PERM_APPOINTMENTS_EDIT.to_string(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::utils::date::weekday_index;

    #[test]
    fn test_monday_really_is_a_monday() {
        assert_eq!(weekday_index(dates::monday()), 1);
        assert_eq!(weekday_index(dates::sunday()), 0);
    }

    #[test]
    fn test_standard_snapshot_shape() {
        let snapshot = standard_snapshot();
        assert_eq!(snapshot.appointments.len(), 1);
        assert_eq!(snapshot.business_hours.len(), 5);
        assert_eq!(snapshot.availabilities.len(), 5);
        assert_eq!(snapshot.blocks.len(), 1);
    }
}
