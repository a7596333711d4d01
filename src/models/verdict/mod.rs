// Verdict module
// Bookability outcome for a single instant or interval

use crate::error::ScheduleError;

/// Outcome of resolving one instant or interval against the schedule.
///
/// Ordering of the non-bookable variants mirrors the resolution steps:
/// tenant hours are checked before provider availability, which is checked
/// before blocks; appointment conflicts come last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Bookable,
    OutsideTenantHours,
    OutsideProviderAvailability,
    BlockedByProvider { reason: Option<String> },
    AppointmentConflict,
}

impl Verdict {
    pub fn is_bookable(&self) -> bool {
        matches!(self, Verdict::Bookable)
    }

    /// Convert a non-bookable verdict into its rejection error.
    pub fn into_error(self) -> Option<ScheduleError> {
        match self {
            Verdict::Bookable => None,
            Verdict::OutsideTenantHours => Some(ScheduleError::OutsideTenantHours),
            Verdict::OutsideProviderAvailability => {
                Some(ScheduleError::OutsideProviderAvailability)
            }
            Verdict::BlockedByProvider { reason } => {
                Some(ScheduleError::BlockedByProvider { reason })
            }
            Verdict::AppointmentConflict => Some(ScheduleError::AppointmentConflict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookable_maps_to_no_error() {
        assert!(Verdict::Bookable.is_bookable());
        assert!(Verdict::Bookable.into_error().is_none());
    }

    #[test]
    fn test_block_verdict_carries_reason() {
        let verdict = Verdict::BlockedByProvider {
            reason: Some("Holiday".to_string()),
        };
        assert!(!verdict.is_bookable());
        match verdict.into_error() {
            Some(ScheduleError::BlockedByProvider { reason }) => {
                assert_eq!(reason.as_deref(), Some("Holiday"));
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_each_rejection_maps_to_matching_error() {
        assert!(matches!(
            Verdict::OutsideTenantHours.into_error(),
            Some(ScheduleError::OutsideTenantHours)
        ));
        assert!(matches!(
            Verdict::OutsideProviderAvailability.into_error(),
            Some(ScheduleError::OutsideProviderAvailability)
        ));
        assert!(matches!(
            Verdict::AppointmentConflict.into_error(),
            Some(ScheduleError::AppointmentConflict)
        ));
    }
}
