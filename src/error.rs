// Error taxonomy for scheduling decisions and backend access

use thiserror::Error;

/// Machine-checkable rejection reasons surfaced by the engine.
///
/// Validation variants carry enough detail for the console to explain a
/// refusal; `BackendUnavailable` wraps transport and decoding failures at
/// the HTTP boundary.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Requested time is outside the tenant's operating hours")]
    OutsideTenantHours,

    #[error("Requested time is outside the provider's availability")]
    OutsideProviderAvailability,

    #[error("Provider has blocked this period{}", reason_suffix(.reason))]
    BlockedByProvider { reason: Option<String> },

    #[error("Another appointment already occupies this slot")]
    AppointmentConflict,

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend unavailable: {source}")]
    BackendUnavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(r) => format!(": {}", r),
        None => String::new(),
    }
}

impl ScheduleError {
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        ScheduleError::BackendUnavailable {
            source: err.into().into(),
        }
    }
}
