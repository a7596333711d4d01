// View bounds derived from tenant operating hours

use chrono::NaiveTime;

use crate::models::BusinessHour;

fn fallback_time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

/// Weekdays the calendar should hide entirely (no active operating hours).
///
/// With no rows at all, nothing is hidden; the tenant simply has not
/// configured its hours yet.
pub fn hidden_days(business_hours: &[BusinessHour]) -> Vec<u8> {
    if business_hours.is_empty() {
        return Vec::new();
    }

    let active: Vec<u8> = business_hours
        .iter()
        .filter(|bh| bh.active)
        .map(|bh| bh.weekday)
        .collect();

    (0..=6).filter(|day| !active.contains(day)).collect()
}

/// Earliest opening and latest closing across active rows.
///
/// Falls back to the stock 06:00 - 22:00 grid when no active rows exist.
pub fn slot_bounds(business_hours: &[BusinessHour]) -> (NaiveTime, NaiveTime) {
    let mut active = business_hours.iter().filter(|bh| bh.active).peekable();
    if active.peek().is_none() {
        return (fallback_time(6, 0), fallback_time(22, 0));
    }

    let mut min = fallback_time(23, 59);
    let mut max = NaiveTime::MIN;
    for bh in active {
        if bh.start_time < min {
            min = bh.start_time;
        }
        if bh.end_time > max {
            max = bh.end_time;
        }
    }
    (min, max)
}

/// Where the day view should scroll to on open.
///
/// The first active row's opening time, or 08:00 when none is configured.
pub fn scroll_time(business_hours: &[BusinessHour]) -> NaiveTime {
    business_hours
        .iter()
        .find(|bh| bh.active)
        .map(|bh| bh.start_time)
        .unwrap_or_else(|| fallback_time(8, 0))
}
