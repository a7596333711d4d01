// Appointment module
// Booked service occurrence with the display refs the backend embeds

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::utils::date::{overlaps, wire_datetime, wire_datetime_opt};

/// Embedded service reference carried on appointment payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// Embedded user reference (name plus account id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Embedded client reference carried on appointment payloads.
///
/// Unlike the provider, the client comes flattened with its account id and
/// display name at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Embedded provider reference carried on appointment payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Booked occurrence of a service with one provider and one client.
///
/// `end` may be absent on the wire; `end_at()` derives it from the service
/// duration in that case. Appointments never span multiple days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<i64>,
    pub service_id: i64,
    pub provider_id: i64,
    pub client_id: i64,
    #[serde(with = "wire_datetime", rename = "date_start")]
    pub start: NaiveDateTime,
    #[serde(with = "wire_datetime_opt", rename = "date_end", default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default, rename = "status_agenda_id")]
    pub status_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderRef>,
}

impl Appointment {
    /// Create an appointment with required fields
    ///
    /// # Returns
    /// Returns `Result<Appointment, String>` with validation
    pub fn new(
        service_id: i64,
        provider_id: i64,
        client_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("Appointment end must be after start".to_string());
        }

        Ok(Self {
            id: None,
            service_id,
            provider_id,
            client_id,
            start,
            end: Some(end),
            status_id: None,
            notes: None,
            service: None,
            client: None,
            provider: None,
        })
    }

    /// Create a builder for constructing appointments with optional fields
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::new()
    }

    /// Effective end instant.
    ///
    /// Falls back to start + service duration when the payload omits
    /// `date_end`, and to the bare start when no duration is known.
    pub fn end_at(&self) -> NaiveDateTime {
        if let Some(end) = self.end {
            return end;
        }
        let minutes = self
            .service
            .as_ref()
            .and_then(|s| s.duration_minutes)
            .unwrap_or(0);
        self.start + Duration::minutes(minutes)
    }

    /// Whether the appointment intersects the half-open interval `[start, end)`.
    pub fn overlaps_interval(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        overlaps(self.start, self.end_at(), start, end)
    }

    /// Display name of the booked service, empty when not embedded.
    pub fn service_name(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("")
    }

    /// Display name of the client, empty when not embedded.
    pub fn client_name(&self) -> &str {
        self.client
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("")
    }

    /// Display name of the provider, empty when not embedded.
    pub fn provider_name(&self) -> &str {
        self.provider
            .as_ref()
            .and_then(|p| p.user.as_ref())
            .and_then(|u| u.name.as_deref())
            .unwrap_or("")
    }

    /// Account id of the provider's user, when embedded.
    pub fn provider_user_id(&self) -> Option<i64> {
        self.provider.as_ref().and_then(|p| p.user.as_ref()).and_then(|u| u.id)
    }

    /// Whether the appointment belongs to the given client account.
    pub fn belongs_to_client(&self, viewer_id: i64) -> bool {
        match self.client.as_ref().and_then(|c| c.id) {
            Some(id) => id == viewer_id,
            None => self.client_id == viewer_id,
        }
    }
}

/// Builder for creating appointments with optional fields
pub struct AppointmentBuilder {
    service_id: Option<i64>,
    provider_id: Option<i64>,
    client_id: Option<i64>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    status_id: Option<i64>,
    notes: Option<String>,
    service: Option<ServiceRef>,
    client: Option<ClientRef>,
    provider: Option<ProviderRef>,
}

impl AppointmentBuilder {
    pub fn new() -> Self {
        Self {
            service_id: None,
            provider_id: None,
            client_id: None,
            start: None,
            end: None,
            status_id: None,
            notes: None,
            service: None,
            client: None,
            provider: None,
        }
    }

    pub fn service_id(mut self, id: i64) -> Self {
        self.service_id = Some(id);
        self
    }

    pub fn provider_id(mut self, id: i64) -> Self {
        self.provider_id = Some(id);
        self
    }

    pub fn client_id(mut self, id: i64) -> Self {
        self.client_id = Some(id);
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn status_id(mut self, status_id: i64) -> Self {
        self.status_id = Some(status_id);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn service(mut self, service: ServiceRef) -> Self {
        self.service = Some(service);
        self
    }

    pub fn client(mut self, client: ClientRef) -> Self {
        self.client = Some(client);
        self
    }

    pub fn provider(mut self, provider: ProviderRef) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the appointment, validating required fields
    pub fn build(self) -> Result<Appointment, String> {
        let service_id = self.service_id.ok_or("Appointment service is required")?;
        let provider_id = self.provider_id.ok_or("Appointment provider is required")?;
        let client_id = self.client_id.ok_or("Appointment client is required")?;
        let start = self.start.ok_or("Appointment start is required")?;

        if let Some(end) = self.end {
            if end <= start {
                return Err("Appointment end must be after start".to_string());
            }
        }

        Ok(Appointment {
            id: None,
            service_id,
            provider_id,
            client_id,
            start,
            end: self.end,
            status_id: self.status_id,
            notes: self.notes,
            service: self.service,
            client: self.client,
            provider: self.provider,
        })
    }
}

impl Default for AppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_new_valid_appointment() {
        let appt = Appointment::new(1, 2, 3, dt(10, 0), dt(11, 0)).unwrap();
        assert_eq!(appt.provider_id, 2);
        assert_eq!(appt.end_at(), dt(11, 0));
    }

    #[test]
    fn test_new_rejects_inverted() {
        assert!(Appointment::new(1, 2, 3, dt(11, 0), dt(10, 0)).is_err());
        assert!(Appointment::new(1, 2, 3, dt(10, 0), dt(10, 0)).is_err());
    }

    #[test]
    fn test_end_at_derives_from_service_duration() {
        let appt = Appointment::builder()
            .service_id(1)
            .provider_id(2)
            .client_id(3)
            .start(dt(10, 0))
            .service(ServiceRef {
                id: Some(1),
                name: Some("Cut".to_string()),
                duration_minutes: Some(45),
            })
            .build()
            .unwrap();
        assert_eq!(appt.end_at(), dt(10, 45));
    }

    #[test]
    fn test_end_at_without_duration_is_start() {
        let appt = Appointment::builder()
            .service_id(1)
            .provider_id(2)
            .client_id(3)
            .start(dt(10, 0))
            .build()
            .unwrap();
        assert_eq!(appt.end_at(), dt(10, 0));
    }

    #[test]
    fn test_builder_requires_core_fields() {
        let missing = Appointment::builder().start(dt(10, 0)).build();
        assert!(missing.is_err());
    }

    #[test]
    fn test_builder_rejects_inverted_end() {
        let result = Appointment::builder()
            .service_id(1)
            .provider_id(2)
            .client_id(3)
            .start(dt(10, 0))
            .end(dt(9, 0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_overlaps_interval_boundary() {
        let appt = Appointment::new(1, 2, 3, dt(10, 0), dt(11, 0)).unwrap();
        assert!(appt.overlaps_interval(dt(10, 30), dt(11, 30)));
        assert!(!appt.overlaps_interval(dt(11, 0), dt(12, 0)));
    }

    #[test]
    fn test_display_names_fall_back_to_empty() {
        let appt = Appointment::new(1, 2, 3, dt(10, 0), dt(11, 0)).unwrap();
        assert_eq!(appt.service_name(), "");
        assert_eq!(appt.client_name(), "");
        assert_eq!(appt.provider_name(), "");
        assert_eq!(appt.provider_user_id(), None);
    }

    #[test]
    fn test_display_names_from_embedded_refs() {
        let mut appt = Appointment::new(1, 2, 3, dt(10, 0), dt(11, 0)).unwrap();
        appt.service = Some(ServiceRef {
            id: Some(1),
            name: Some("Massage".to_string()),
            duration_minutes: Some(60),
        });
        appt.client = Some(ClientRef {
            id: Some(30),
            name: Some("Ana".to_string()),
            email: None,
        });
        appt.provider = Some(ProviderRef {
            id: Some(2),
            user: Some(UserRef {
                id: Some(20),
                name: Some("Bruno".to_string()),
            }),
        });
        assert_eq!(appt.service_name(), "Massage");
        assert_eq!(appt.client_name(), "Ana");
        assert_eq!(appt.provider_name(), "Bruno");
        assert_eq!(appt.provider_user_id(), Some(20));
        assert!(appt.belongs_to_client(30));
        assert!(!appt.belongs_to_client(3));
    }

    #[test]
    fn test_belongs_to_client_falls_back_to_client_id() {
        let appt = Appointment::new(1, 2, 3, dt(10, 0), dt(11, 0)).unwrap();
        assert!(appt.belongs_to_client(3));
        assert!(!appt.belongs_to_client(4));
    }

    #[test]
    fn test_wire_round_trip_with_optional_end() {
        let json = r#"{
            "id": 9,
            "service_id": 1,
            "provider_id": 2,
            "client_id": 3,
            "date_start": "2025-01-06 10:00:00",
            "status_agenda_id": 2,
            "service": {"id": 1, "name": "Cut", "duration_minutes": 30}
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id, Some(9));
        assert!(appt.end.is_none());
        assert_eq!(appt.end_at(), dt(10, 30));
    }
}
