// Schedule snapshot service
// Immutable range bundle plus the fetch bookkeeping around it

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{Appointment, Availability, Block, BusinessHour};
use crate::services::availability::AvailabilityResolver;
use crate::services::backend::ScheduleBackend;

/// Everything the engine needs to answer questions about one visible range.
///
/// Snapshots are immutable; the resolver, detector, projection, and
/// validator all read from one without changing it. A mutation invalidates
/// the cache and the next request fetches a fresh bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default, rename = "tenant_business_hours")]
    pub business_hours: Vec<BusinessHour>,
    #[serde(default)]
    pub availabilities: Vec<Availability>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl ScheduleSnapshot {
    pub fn new(
        appointments: Vec<Appointment>,
        business_hours: Vec<BusinessHour>,
        availabilities: Vec<Availability>,
        blocks: Vec<Block>,
    ) -> Self {
        Self {
            appointments,
            business_hours,
            availabilities,
            blocks,
        }
    }

    /// Resolver borrowing this snapshot's rows.
    pub fn resolver(&self) -> AvailabilityResolver<'_> {
        AvailabilityResolver::new(&self.business_hours, &self.availabilities, &self.blocks)
    }

    pub fn find_appointment(&self, id: i64) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == Some(id))
    }
}

/// Identity of one fetch: the visible range plus the provider filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub provider_id: Option<i64>,
}

impl SnapshotKey {
    pub fn new(date_start: NaiveDate, date_end: NaiveDate, provider_id: Option<i64>) -> Self {
        Self {
            date_start,
            date_end,
            provider_id,
        }
    }
}

/// What the caller should do after asking for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// No usable data for this key; the caller should fetch.
    Fetch,
    /// The cached snapshot already answers this key.
    AlreadyCurrent,
    /// A fetch for this key is already running.
    InFlight,
}

/// Dedup and staleness bookkeeping around snapshot fetches.
///
/// Repeating the same key does not trigger a second request, and a fetch
/// that completes after the view moved on is discarded rather than
/// overwriting newer data.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    target: Option<SnapshotKey>,
    in_flight: Option<SnapshotKey>,
    stored: Option<(SnapshotKey, ScheduleSnapshot)>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the cache at `key` and decide whether a fetch is needed.
    pub fn request(&mut self, key: SnapshotKey) -> FetchDecision {
        self.target = Some(key.clone());

        if let Some((stored_key, _)) = &self.stored {
            if *stored_key == key {
                debug!("Snapshot cache hit for {:?}", key);
                return FetchDecision::AlreadyCurrent;
            }
        }

        if self.in_flight.as_ref() == Some(&key) {
            debug!("Fetch already in flight for {:?}", key);
            return FetchDecision::InFlight;
        }

        self.in_flight = Some(key);
        FetchDecision::Fetch
    }

    /// Store a fetched snapshot, unless the view has moved to another key.
    ///
    /// Returns whether the snapshot was accepted.
    pub fn complete(&mut self, key: &SnapshotKey, snapshot: ScheduleSnapshot) -> bool {
        if self.in_flight.as_ref() == Some(key) {
            self.in_flight = None;
        }

        if self.target.as_ref() != Some(key) {
            info!(
                "Discarding stale snapshot for {:?}; current target is {:?}",
                key, self.target
            );
            return false;
        }

        self.stored = Some((key.clone(), snapshot));
        true
    }

    /// Clear the in-flight mark after a failed fetch so it can be retried.
    pub fn fail(&mut self, key: &SnapshotKey) {
        if self.in_flight.as_ref() == Some(key) {
            self.in_flight = None;
        }
    }

    /// Drop the stored snapshot so the next request refetches.
    ///
    /// Called after a successful mutation; the key stays targeted.
    pub fn invalidate(&mut self) {
        self.stored = None;
    }

    pub fn snapshot(&self) -> Option<&ScheduleSnapshot> {
        self.stored.as_ref().map(|(_, snap)| snap)
    }

    pub fn current_key(&self) -> Option<&SnapshotKey> {
        self.stored.as_ref().map(|(key, _)| key)
    }

    /// Fetch through the backend when the cache cannot answer `key`.
    ///
    /// Returns whether a network fetch actually ran.
    pub fn refresh(
        &mut self,
        backend: &dyn ScheduleBackend,
        key: &SnapshotKey,
    ) -> Result<bool, ScheduleError> {
        match self.request(key.clone()) {
            FetchDecision::AlreadyCurrent | FetchDecision::InFlight => Ok(false),
            FetchDecision::Fetch => match backend.fetch_snapshot(key) {
                Ok(snapshot) => {
                    self.complete(key, snapshot);
                    Ok(true)
                }
                Err(err) => {
                    self.fail(key);
                    Err(err)
                }
            },
        }
    }
}
