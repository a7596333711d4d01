// Availability resolution service
// Answers "can this provider take an appointment here" from a snapshot
// of tenant hours, weekly availability windows, and blocks.

use chrono::NaiveDateTime;

use crate::error::ScheduleError;
use crate::models::{Availability, Block, BusinessHour, Verdict};
use crate::utils::date::weekday_index;

/// Pure resolver over one immutable schedule snapshot.
///
/// Checks run in a fixed order: tenant operating hours first, then the
/// provider's weekly windows, then ad-hoc blocks. The first failing gate
/// decides the verdict.
pub struct AvailabilityResolver<'a> {
    business_hours: &'a [BusinessHour],
    availabilities: &'a [Availability],
    blocks: &'a [Block],
}

impl<'a> AvailabilityResolver<'a> {
    pub fn new(
        business_hours: &'a [BusinessHour],
        availabilities: &'a [Availability],
        blocks: &'a [Block],
    ) -> Self {
        Self {
            business_hours,
            availabilities,
            blocks,
        }
    }

    /// Active tenant window for a weekday, if the tenant opens that day.
    pub fn tenant_window(&self, weekday: u8) -> Option<&BusinessHour> {
        self.business_hours
            .iter()
            .find(|bh| bh.active && bh.weekday == weekday)
    }

    /// Whether the provider has any active weekly window at all.
    ///
    /// A provider with no rows anywhere is constrained only by tenant
    /// hours; a provider with rows is closed on weekdays without one.
    fn provider_has_windows(&self, provider_id: i64) -> bool {
        self.availabilities
            .iter()
            .any(|a| a.active && a.provider_id == provider_id)
    }

    fn provider_windows(
        &self,
        provider_id: i64,
        weekday: u8,
    ) -> impl Iterator<Item = &Availability> {
        self.availabilities
            .iter()
            .filter(move |a| a.active && a.provider_id == provider_id && a.weekday == weekday)
    }

    /// Resolve a single instant for a provider.
    pub fn verdict_at(&self, provider_id: i64, instant: NaiveDateTime) -> Verdict {
        let weekday = weekday_index(instant.date());
        let time = instant.time();

        let Some(window) = self.tenant_window(weekday) else {
            return Verdict::OutsideTenantHours;
        };
        if !window.contains(time) {
            return Verdict::OutsideTenantHours;
        }

        if self.provider_has_windows(provider_id) {
            let mut any_for_day = false;
            let mut inside = false;
            for avail in self.provider_windows(provider_id, weekday) {
                any_for_day = true;
                if avail.contains(time) {
                    inside = true;
                    break;
                }
            }
            if !any_for_day || !inside {
                return Verdict::OutsideProviderAvailability;
            }
        }

        for block in self.blocks {
            if block.provider_id == provider_id && block.covers(instant) {
                return Verdict::BlockedByProvider {
                    reason: block.reason.clone(),
                };
            }
        }

        Verdict::Bookable
    }

    /// Whether a single instant is bookable for a provider.
    pub fn is_bookable(&self, provider_id: i64, instant: NaiveDateTime) -> bool {
        self.verdict_at(provider_id, instant).is_bookable()
    }

    /// Resolve a whole half-open interval for a provider.
    ///
    /// The interval must sit inside one contiguous bookable window, so a
    /// tenant or availability boundary strictly inside `(start, end)`
    /// rejects it even when both endpoints are individually fine. An
    /// interval ending exactly at closing time is accepted.
    pub fn interval_verdict(
        &self,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Verdict, ScheduleError> {
        if end <= start {
            return Err(ScheduleError::InvalidInterval(
                "end must be after start".to_string(),
            ));
        }
        if start.date() != end.date() {
            return Err(ScheduleError::InvalidInterval(
                "interval must stay within one day".to_string(),
            ));
        }

        let weekday = weekday_index(start.date());
        let start_time = start.time();
        let end_time = end.time();

        let Some(window) = self.tenant_window(weekday) else {
            return Ok(Verdict::OutsideTenantHours);
        };
        if start_time < window.start_time || end_time > window.end_time {
            return Ok(Verdict::OutsideTenantHours);
        }

        if self.provider_has_windows(provider_id) {
            let contained = self
                .provider_windows(provider_id, weekday)
                .any(|a| a.start_time <= start_time && end_time <= a.end_time);
            if !contained {
                return Ok(Verdict::OutsideProviderAvailability);
            }
        }

        for block in self.blocks {
            if block.provider_id == provider_id && block.overlaps_interval(start, end) {
                return Ok(Verdict::BlockedByProvider {
                    reason: block.reason.clone(),
                });
            }
        }

        Ok(Verdict::Bookable)
    }

    /// Whether a whole interval is bookable. Invalid intervals are not.
    pub fn is_interval_bookable(
        &self,
        provider_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> bool {
        matches!(self.interval_verdict(provider_id, start, end), Ok(v) if v.is_bookable())
    }
}
