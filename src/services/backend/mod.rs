// Backend REST client
// Blocking HTTP access to the scheduling API behind a trait seam

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::error::ScheduleError;
use crate::models::{Appointment, Availability, Block, BusinessHour};
use crate::services::snapshot::{ScheduleSnapshot, SnapshotKey};
use crate::utils::date::{end_of_day, format_wire_datetime, start_of_day};

/// Persistence and listing operations the engine needs from the API.
///
/// Local validation never goes through this trait; only snapshot refresh
/// and accepted mutations do.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleBackend {
    /// `GET agenda/appointments` for a range, with the bundled rows.
    fn fetch_snapshot(&self, key: &SnapshotKey) -> Result<ScheduleSnapshot, ScheduleError>;

    fn create_appointment(&self, appointment: &Appointment)
        -> Result<Appointment, ScheduleError>;

    fn update_appointment(&self, id: i64, appointment: &Appointment)
        -> Result<Appointment, ScheduleError>;

    fn list_availabilities(&self, provider_id: i64) -> Result<Vec<Availability>, ScheduleError>;

    /// Full weekly replace of a provider's availability windows.
    fn sync_availabilities(
        &self,
        provider_id: i64,
        rows: &[Availability],
    ) -> Result<Vec<Availability>, ScheduleError>;

    fn list_blocks(&self, provider_id: i64) -> Result<Vec<Block>, ScheduleError>;

    fn create_block(&self, block: &Block) -> Result<Block, ScheduleError>;

    fn list_business_hours(&self, tenant_id: i64) -> Result<Vec<BusinessHour>, ScheduleError>;

    /// Full weekly replace of the tenant's operating hours.
    fn sync_business_hours(
        &self,
        tenant_id: i64,
        rows: &[BusinessHour],
    ) -> Result<Vec<BusinessHour>, ScheduleError>;
}

/// `ScheduleBackend` over the REST API.
///
/// Requests are blocking with a fixed timeout and are never retried; a
/// failure surfaces as `BackendUnavailable` and the caller decides what
/// to do with the stale view.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build schedule API HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .with_context(|| format!("Network error calling GET {}", url))?;
        Self::decode(response, url)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .with_context(|| format!("Network error calling POST {}", url))?;
        Self::decode(response, url)
    }

    fn put_json(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .client
            .put(url)
            .json(body)
            .send()
            .with_context(|| format!("Network error calling PUT {}", url))?;
        Self::decode(response, url)
    }

    fn decode(response: reqwest::blocking::Response, url: &str) -> Result<Value> {
        let status = response.status();
        if !(status == StatusCode::OK || status == StatusCode::CREATED) {
            return Err(anyhow!("{} answered HTTP status {}", url, status));
        }
        response
            .json::<Value>()
            .with_context(|| format!("Invalid JSON from {}", url))
    }

    /// Pull an array out of a tolerant response envelope.
    ///
    /// Accepts a bare array, `{"<field>": [...]}`, and `{"data": [...]}`.
    /// Anything else means an empty list, never an error.
    fn extract_array<T: serde::de::DeserializeOwned>(value: &Value, field: &str) -> Vec<T> {
        let array = if value.is_array() {
            Some(value)
        } else if value.get(field).map_or(false, Value::is_array) {
            value.get(field)
        } else if value.get("data").map_or(false, Value::is_array) {
            value.get("data")
        } else {
            None
        };

        match array {
            Some(v) => serde_json::from_value(v.clone()).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Pull a single object out of `{"data": {...}}` or the bare body.
    fn extract_object<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
        let inner = match value.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => value,
        };
        serde_json::from_value(inner).context("Unexpected response shape")
    }
}

impl ScheduleBackend for HttpBackend {
    fn fetch_snapshot(&self, key: &SnapshotKey) -> Result<ScheduleSnapshot, ScheduleError> {
        let mut query = vec![
            (
                "date_start".to_string(),
                format_wire_datetime(start_of_day(key.date_start)),
            ),
            (
                "date_end".to_string(),
                format_wire_datetime(end_of_day(key.date_end)),
            ),
        ];
        if let Some(provider_id) = key.provider_id {
            query.push(("provider_id".to_string(), provider_id.to_string()));
        }

        let url = self.url("agenda/appointments");
        let value = self.get_json(&url, &query).map_err(ScheduleError::backend)?;

        Ok(ScheduleSnapshot {
            appointments: Self::extract_array(&value, "appointments"),
            business_hours: Self::extract_array(&value, "tenant_business_hours"),
            availabilities: Self::extract_array(&value, "availabilities"),
            blocks: Self::extract_array(&value, "blocks"),
        })
    }

    fn create_appointment(
        &self,
        appointment: &Appointment,
    ) -> Result<Appointment, ScheduleError> {
        let url = self.url("agenda/appointments");
        let body = serde_json::to_value(appointment).map_err(ScheduleError::backend)?;
        let value = self.post_json(&url, &body).map_err(ScheduleError::backend)?;
        HttpBackend::extract_object(value).map_err(ScheduleError::backend)
    }

    fn update_appointment(
        &self,
        id: i64,
        appointment: &Appointment,
    ) -> Result<Appointment, ScheduleError> {
        let url = self.url(&format!("agenda/appointments/{}", id));
        let body = serde_json::to_value(appointment).map_err(ScheduleError::backend)?;
        let value = self.put_json(&url, &body).map_err(ScheduleError::backend)?;
        HttpBackend::extract_object(value).map_err(ScheduleError::backend)
    }

    fn list_availabilities(&self, provider_id: i64) -> Result<Vec<Availability>, ScheduleError> {
        let url = self.url(&format!("agenda/providers/{}/availabilities", provider_id));
        let value = self.get_json(&url, &[]).map_err(ScheduleError::backend)?;
        Ok(Self::extract_array(&value, "availabilities"))
    }

    fn sync_availabilities(
        &self,
        provider_id: i64,
        rows: &[Availability],
    ) -> Result<Vec<Availability>, ScheduleError> {
        let url = self.url(&format!(
            "agenda/providers/{}/availabilities/sync",
            provider_id
        ));
        let body = serde_json::json!({ "business_hours": rows });
        let value = self.post_json(&url, &body).map_err(ScheduleError::backend)?;
        Ok(Self::extract_array(&value, "availabilities"))
    }

    fn list_blocks(&self, provider_id: i64) -> Result<Vec<Block>, ScheduleError> {
        let url = self.url(&format!("agenda/providers/{}/blocks", provider_id));
        let value = self.get_json(&url, &[]).map_err(ScheduleError::backend)?;
        Ok(Self::extract_array(&value, "blocks"))
    }

    fn create_block(&self, block: &Block) -> Result<Block, ScheduleError> {
        let url = self.url(&format!("agenda/providers/{}/blocks", block.provider_id));
        let body = serde_json::to_value(block).map_err(ScheduleError::backend)?;
        let value = self.post_json(&url, &body).map_err(ScheduleError::backend)?;
        HttpBackend::extract_object(value).map_err(ScheduleError::backend)
    }

    fn list_business_hours(&self, tenant_id: i64) -> Result<Vec<BusinessHour>, ScheduleError> {
        let url = self.url(&format!("tenants/{}/business-hours", tenant_id));
        let value = self.get_json(&url, &[]).map_err(ScheduleError::backend)?;
        Ok(Self::extract_array(&value, "business_hours"))
    }

    fn sync_business_hours(
        &self,
        tenant_id: i64,
        rows: &[BusinessHour],
    ) -> Result<Vec<BusinessHour>, ScheduleError> {
        let url = self.url(&format!("tenants/{}/business-hours/sync", tenant_id));
        let body = serde_json::json!({ "business_hours": rows });
        let value = self.post_json(&url, &body).map_err(ScheduleError::backend)?;
        Ok(Self::extract_array(&value, "business_hours"))
    }
}
