// Calendar projection service
// Shapes a snapshot into renderable events for one viewer and range

pub mod palette;
pub mod unavailable;
pub mod view_bounds;

use chrono::NaiveDateTime;

use crate::models::{Appointment, Role, Viewer};
use crate::services::snapshot::ScheduleSnapshot;
use crate::utils::date::DateRange;

pub use palette::StatusPalette;
pub use unavailable::{unavailable_spans, UnavailableReason, UnavailableSpan};
pub use view_bounds::{hidden_days, scroll_time, slot_bounds};

use palette::{occupied_colors, own_appointment_colors, unavailable_colors, EventColors};

/// What a projected event represents, so renderers can treat each kind
/// differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A visible appointment with full detail.
    Appointment,
    /// Someone else's appointment, shown without detail.
    Occupied,
    /// A provider block.
    Block,
    /// A synthesized not-bookable background span.
    Unavailable,
}

/// One renderable calendar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub kind: EventKind,
    pub background_color: String,
    pub border_color: String,
    pub text_color: String,
    pub appointment_id: Option<i64>,
    pub editable: bool,
}

impl CalendarEvent {
    fn with_colors(
        id: String,
        title: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
        kind: EventKind,
        colors: EventColors,
    ) -> Self {
        Self {
            id,
            title,
            start,
            end,
            kind,
            background_color: colors.background,
            border_color: colors.border,
            text_color: colors.text,
            appointment_id: None,
            editable: false,
        }
    }
}

/// Projects snapshots into role-scoped event lists.
///
/// Pure over its inputs: the snapshot is never mutated and projecting the
/// same inputs twice yields identical output.
pub struct CalendarProjector {
    palette: StatusPalette,
}

impl Default for CalendarProjector {
    fn default() -> Self {
        Self {
            palette: StatusPalette::default(),
        }
    }
}

impl CalendarProjector {
    pub fn new(palette: StatusPalette) -> Self {
        Self { palette }
    }

    /// All events for one viewer: unavailable spans first, then blocks,
    /// then appointments, mirroring how the console layers them.
    pub fn project_events(
        &self,
        snapshot: &ScheduleSnapshot,
        viewer: &Viewer,
        range: DateRange,
        provider_filter: Option<i64>,
    ) -> Vec<CalendarEvent> {
        let mut events = Vec::new();

        if let Some(provider_id) = provider_filter {
            for span in unavailable_spans(
                &snapshot.business_hours,
                &snapshot.availabilities,
                provider_id,
                range,
            ) {
                events.push(self.unavailable_event(span));
            }
        }

        for block in snapshot
            .blocks
            .iter()
            .filter(|b| provider_filter.map_or(true, |id| b.provider_id == id))
        {
            let id = block
                .id
                .map(|id| format!("block-{}", id))
                .unwrap_or_else(|| "block-unsaved".to_string());
            let title = block.reason.clone().unwrap_or_else(|| "Blocked".to_string());
            events.push(CalendarEvent::with_colors(
                id,
                title,
                block.start_at,
                block.end_at,
                EventKind::Block,
                unavailable_colors(),
            ));
        }

        for appointment in &snapshot.appointments {
            if let Some(event) = self.appointment_event(appointment, viewer) {
                events.push(event);
            }
        }

        events
    }

    fn unavailable_event(&self, span: UnavailableSpan) -> CalendarEvent {
        let (title, prefix) = match span.reason {
            UnavailableReason::Tenant => ("Outside business hours", "unavailable-tenant"),
            UnavailableReason::Provider => ("Provider unavailable", "unavailable-provider"),
        };
        CalendarEvent::with_colors(
            format!("{}-{}", prefix, span.start.date()),
            title.to_string(),
            span.start,
            span.end,
            EventKind::Unavailable,
            unavailable_colors(),
        )
    }

    fn appointment_event(
        &self,
        appointment: &Appointment,
        viewer: &Viewer,
    ) -> Option<CalendarEvent> {
        let service = non_empty(appointment.service_name(), "Service");
        let client = non_empty(appointment.client_name(), "Client");
        let provider = non_empty(appointment.provider_name(), "Provider");
        let id_str = appointment
            .id
            .map(|id| id.to_string())
            .unwrap_or_default();

        match viewer.role {
            Role::Admin => Some(self.detail_event(
                appointment,
                id_str,
                format!("{} - {}", service, client),
                self.palette.status_colors(appointment.status_id),
            )),
            Role::Provider => {
                if appointment.provider_user_id() == Some(viewer.id) {
                    Some(self.detail_event(
                        appointment,
                        id_str,
                        format!("{} - {}", service, client),
                        self.palette.status_colors(appointment.status_id),
                    ))
                } else {
                    None
                }
            }
            Role::Client => {
                if appointment.belongs_to_client(viewer.id) {
                    Some(self.detail_event(
                        appointment,
                        id_str,
                        format!("{} - {}", service, provider),
                        own_appointment_colors(),
                    ))
                } else {
                    // Someone else's slot: show only that it is taken.
                    let mut event = CalendarEvent::with_colors(
                        format!("occupied-{}", id_str),
                        "Occupied".to_string(),
                        appointment.start,
                        appointment.end_at(),
                        EventKind::Occupied,
                        occupied_colors(),
                    );
                    event.appointment_id = appointment.id;
                    Some(event)
                }
            }
        }
    }

    fn detail_event(
        &self,
        appointment: &Appointment,
        id: String,
        title: String,
        colors: EventColors,
    ) -> CalendarEvent {
        let mut event = CalendarEvent::with_colors(
            id,
            title,
            appointment.start,
            appointment.end_at(),
            EventKind::Appointment,
            colors,
        );
        event.appointment_id = appointment.id;
        event.editable = true;
        event
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Availability, Block, BusinessHour, ClientRef, ProviderRef, ServiceRef, UserRef,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn monday_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        )
        .unwrap()
    }

    fn appointment(id: i64, provider_user: i64, client_user: i64) -> Appointment {
        let mut appt = Appointment::new(1, 2, 3, dt(6, 10, 0), dt(6, 11, 0)).unwrap();
        appt.id = Some(id);
        appt.status_id = Some(2);
        appt.service = Some(ServiceRef {
            id: Some(1),
            name: Some("Haircut".to_string()),
            duration_minutes: Some(60),
        });
        appt.client = Some(ClientRef {
            id: Some(client_user),
            name: Some("Ana".to_string()),
            email: None,
        });
        appt.provider = Some(ProviderRef {
            id: Some(2),
            user: Some(UserRef {
                id: Some(provider_user),
                name: Some("Bruno".to_string()),
            }),
        });
        appt
    }

    fn snapshot_with(appointments: Vec<Appointment>) -> ScheduleSnapshot {
        ScheduleSnapshot::new(
            appointments,
            vec![BusinessHour::new(1, time(9, 0), time(18, 0)).unwrap()],
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_admin_sees_every_appointment_with_status_color() {
        let projector = CalendarProjector::default();
        let snapshot = snapshot_with(vec![appointment(1, 20, 30), appointment(2, 21, 31)]);
        let events =
            projector.project_events(&snapshot, &Viewer::admin(99), monday_range(), None);

        let appts: Vec<&CalendarEvent> = events
            .iter()
            .filter(|e| e.kind == EventKind::Appointment)
            .collect();
        assert_eq!(appts.len(), 2);
        assert_eq!(appts[0].title, "Haircut - Ana");
        assert_eq!(appts[0].background_color, "#34a853");
        assert!(appts[0].editable);
    }

    #[test]
    fn test_provider_sees_only_own_appointments() {
        let projector = CalendarProjector::default();
        let snapshot = snapshot_with(vec![appointment(1, 20, 30), appointment(2, 21, 31)]);
        let viewer = Viewer::new(20, Role::Provider, []);
        let events = projector.project_events(&snapshot, &viewer, monday_range(), None);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].appointment_id, Some(1));
        assert_eq!(events[0].kind, EventKind::Appointment);
    }

    #[test]
    fn test_client_sees_own_full_and_others_opaque() {
        let projector = CalendarProjector::default();
        let snapshot = snapshot_with(vec![appointment(1, 20, 30), appointment(2, 21, 31)]);
        let viewer = Viewer::new(30, Role::Client, []);
        let events = projector.project_events(&snapshot, &viewer, monday_range(), None);

        assert_eq!(events.len(), 2);
        let own = &events[0];
        assert_eq!(own.kind, EventKind::Appointment);
        assert_eq!(own.title, "Haircut - Bruno");
        assert_eq!(own.background_color, "#1a73e8");

        let other = &events[1];
        assert_eq!(other.kind, EventKind::Occupied);
        assert_eq!(other.title, "Occupied");
        assert_eq!(other.id, "occupied-2");
        assert_eq!(other.background_color, "#d9d9d9");
        assert!(!other.editable);
        // No detail leaks through the title or colors.
        assert!(!other.title.contains("Ana"));
    }

    #[test]
    fn test_unavailable_spans_only_with_provider_filter() {
        let projector = CalendarProjector::default();
        let snapshot = snapshot_with(Vec::new());
        let viewer = Viewer::admin(99);

        let without = projector.project_events(&snapshot, &viewer, monday_range(), None);
        assert!(without.iter().all(|e| e.kind != EventKind::Unavailable));

        let with = projector.project_events(&snapshot, &viewer, monday_range(), Some(42));
        assert!(with.iter().any(|e| e.kind == EventKind::Unavailable));
    }

    #[test]
    fn test_unavailable_spans_respect_provider_windows() {
        let projector = CalendarProjector::default();
        let mut snapshot = snapshot_with(Vec::new());
        snapshot.availabilities =
            vec![Availability::new(42, 1, time(10, 0), time(16, 0)).unwrap()];
        let events =
            projector.project_events(&snapshot, &Viewer::admin(99), monday_range(), Some(42));

        let provider_spans: Vec<&CalendarEvent> = events
            .iter()
            .filter(|e| e.title == "Provider unavailable")
            .collect();
        assert_eq!(provider_spans.len(), 2);
        assert_eq!(provider_spans[0].start, dt(6, 9, 0));
        assert_eq!(provider_spans[0].end, dt(6, 10, 0));
    }

    #[test]
    fn test_blocks_project_with_reason_title() {
        let projector = CalendarProjector::default();
        let mut snapshot = snapshot_with(Vec::new());
        let mut block = Block::new(42, dt(6, 12, 0), dt(6, 13, 0))
            .unwrap()
            .with_reason("Training");
        block.id = Some(7);
        let mut bare = Block::new(43, dt(6, 14, 0), dt(6, 15, 0)).unwrap();
        bare.id = Some(8);
        snapshot.blocks = vec![block, bare];

        let events =
            projector.project_events(&snapshot, &Viewer::admin(99), monday_range(), None);
        let blocks: Vec<&CalendarEvent> = events
            .iter()
            .filter(|e| e.kind == EventKind::Block)
            .collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Training");
        assert_eq!(blocks[0].id, "block-7");
        assert_eq!(blocks[1].title, "Blocked");
    }

    #[test]
    fn test_provider_filter_narrows_blocks() {
        let projector = CalendarProjector::default();
        let mut snapshot = snapshot_with(Vec::new());
        snapshot.blocks = vec![
            Block::new(42, dt(6, 12, 0), dt(6, 13, 0)).unwrap(),
            Block::new(43, dt(6, 14, 0), dt(6, 15, 0)).unwrap(),
        ];
        let events =
            projector.project_events(&snapshot, &Viewer::admin(99), monday_range(), Some(42));
        let blocks: Vec<&CalendarEvent> = events
            .iter()
            .filter(|e| e.kind == EventKind::Block)
            .collect();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_ordering_is_unavailable_blocks_appointments() {
        let projector = CalendarProjector::default();
        let mut snapshot = snapshot_with(vec![appointment(1, 20, 30)]);
        snapshot.blocks = vec![Block::new(42, dt(6, 12, 0), dt(6, 13, 0)).unwrap()];
        let events =
            projector.project_events(&snapshot, &Viewer::admin(99), monday_range(), Some(42));

        let first_block = events.iter().position(|e| e.kind == EventKind::Block);
        let first_unavailable = events.iter().position(|e| e.kind == EventKind::Unavailable);
        let first_appt = events.iter().position(|e| e.kind == EventKind::Appointment);
        assert!(first_unavailable < first_block);
        assert!(first_block < first_appt);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let projector = CalendarProjector::default();
        let snapshot = snapshot_with(vec![appointment(1, 20, 30)]);
        let viewer = Viewer::admin(99);
        let first = projector.project_events(&snapshot, &viewer, monday_range(), Some(42));
        let second = projector.project_events(&snapshot, &viewer, monday_range(), Some(42));
        assert_eq!(first, second);
    }
}
