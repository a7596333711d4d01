// Synthesized unavailable spans for a selected provider

use chrono::NaiveDateTime;

use crate::models::{Availability, BusinessHour};
use crate::utils::date::{datetime, end_of_day, start_of_day, weekday_index, DateRange};

/// Why a span is not bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Outside the tenant's operating hours.
    Tenant,
    /// Inside tenant hours but outside the provider's windows.
    Provider,
}

/// One shaded background span on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub reason: UnavailableReason,
}

/// Shade everything a selected provider cannot take within the visible range.
///
/// Day by day: a closed tenant day is shaded whole; an open day gets spans
/// before and after tenant hours, plus spans inside tenant hours that the
/// provider's window does not cover. The provider window is clamped inside
/// tenant hours first. Only the first active window per weekday is
/// considered, matching how the settings screen edits one row per day.
pub fn unavailable_spans(
    business_hours: &[BusinessHour],
    availabilities: &[Availability],
    provider_id: i64,
    range: DateRange,
) -> Vec<UnavailableSpan> {
    let mut spans = Vec::new();

    for day in range.days() {
        let weekday = weekday_index(day);
        let day_start = start_of_day(day);
        let day_end = end_of_day(day);

        let Some(tenant) = business_hours
            .iter()
            .find(|bh| bh.active && bh.weekday == weekday)
        else {
            spans.push(UnavailableSpan {
                start: day_start,
                end: day_end,
                reason: UnavailableReason::Tenant,
            });
            continue;
        };

        let tenant_start = datetime(day, tenant.start_time);
        let tenant_end = datetime(day, tenant.end_time);

        let window = availabilities
            .iter()
            .find(|a| a.active && a.provider_id == provider_id && a.weekday == weekday);

        match window {
            Some(avail) => {
                let avail_start = datetime(day, avail.start_time).max(tenant_start);
                let avail_end = datetime(day, avail.end_time).min(tenant_end);

                if avail_start > tenant_start {
                    spans.push(UnavailableSpan {
                        start: tenant_start,
                        end: avail_start,
                        reason: UnavailableReason::Provider,
                    });
                }
                if avail_end < tenant_end {
                    spans.push(UnavailableSpan {
                        start: avail_end,
                        end: tenant_end,
                        reason: UnavailableReason::Provider,
                    });
                }
            }
            None => {
                spans.push(UnavailableSpan {
                    start: tenant_start,
                    end: tenant_end,
                    reason: UnavailableReason::Provider,
                });
            }
        }

        if tenant_start > day_start {
            spans.push(UnavailableSpan {
                start: day_start,
                end: tenant_start,
                reason: UnavailableReason::Tenant,
            });
        }
        if tenant_end < day_end {
            spans.push(UnavailableSpan {
                start: tenant_end,
                end: day_end,
                reason: UnavailableReason::Tenant,
            });
        }
    }

    spans
}
