// Date and interval utilities
// Half-open interval math, weekday indexing, and the wire formats the
// backend exchanges for datetimes and day-times.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Wire format for absolute instants, e.g. `2025-01-06 14:30:00`.
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire format for day-times, e.g. `09:00:00`.
pub const WIRE_TIME_FORMAT: &str = "%H:%M:%S";

/// Half-open interval overlap: `[a_start, a_end)` intersects `[b_start, b_end)`.
///
/// Touching boundaries do not overlap, so an appointment ending at 10:00
/// never collides with one starting at 10:00.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// Weekday index with 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// True when `time` falls inside the half-open window `[start, end)`.
pub fn in_window(time: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    time >= start && time < end
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_else(|| {
        NaiveDateTime::new(date, NaiveTime::MIN)
    })
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59).unwrap_or_else(|| {
        NaiveDateTime::new(date, NaiveTime::MIN)
    })
}

/// Parses a wire datetime, accepting both the space-separated form and the
/// ISO `T` separator some endpoints return.
pub fn parse_wire_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, WIRE_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("Invalid datetime '{}': {}", value, e))
}

pub fn format_wire_datetime(value: NaiveDateTime) -> String {
    value.format(WIRE_DATETIME_FORMAT).to_string()
}

/// Parses a wire day-time, accepting `HH:MM:SS` and the short `HH:MM` form.
pub fn parse_wire_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, WIRE_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| format!("Invalid time '{}': {}", value, e))
}

pub fn format_wire_time(value: NaiveTime) -> String {
    value.format(WIRE_TIME_FORMAT).to_string()
}

/// Serde adapter for the `YYYY-MM-DD HH:mm:ss` datetime wire format.
pub mod wire_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire_datetime(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional wire datetimes; absent and null both map to `None`.
pub mod wire_datetime_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_wire_datetime(*dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.is_empty() => super::parse_wire_datetime(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Serde adapter for the `HH:MM:SS` day-time wire format.
pub mod wire_time {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire_time(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Inclusive date range as shown on a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err(format!("Range end {} precedes start {}", end, start));
        }
        Ok(Self { start, end })
    }

    /// Iterates every date in the range, both endpoints included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        let mut current = Some(self.start);
        std::iter::from_fn(move || {
            let date = current?;
            if date > end {
                return None;
            }
            current = date.succ_opt();
            Some(date)
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Builds an instant from a date and a day-time.
pub fn datetime(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    NaiveDateTime::new(date, time)
}
