//! Booking and booking-day state machines
//!
//! ```text
//! DRAFT -> PENDING -> PARTIAL | CONFIRMED
//!   \         \
//!    +---------+---> CANCELLED
//! ```
//!
//! Days go PENDING -> ACCEPTED | DECLINED, once, by a center's response.
//! The aggregate status only moves through explicit calls;
//! [`suggested_status`] reports what the day responses imply without
//! applying it.

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingDayStatus, BookingStatus},
};

impl BookingStatus {
    /// No further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::Partial | BookingStatus::Confirmed | BookingStatus::Cancelled
        )
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;

        match (self, next) {
            (Draft, Pending) => true,
            (Pending, Partial) | (Pending, Confirmed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl BookingDayStatus {
    /// The center has responded
    pub fn is_final(self) -> bool {
        !matches!(self, BookingDayStatus::Pending)
    }
}

/// Validate an explicit booking status change
pub fn check_booking_transition(from: BookingStatus, to: BookingStatus) -> AppResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Booking cannot move from {} to {}",
            from, to
        )))
    }
}

/// Validate a center's response to one booked day
pub fn check_day_response(
    booking: BookingStatus,
    day: BookingDayStatus,
    response: BookingDayStatus,
) -> AppResult<()> {
    if !response.is_final() {
        return Err(AppError::BadRequest(
            "Invalid status value: a response must be ACCEPTED or DECLINED".to_string(),
        ));
    }
    if booking == BookingStatus::Cancelled {
        return Err(AppError::Conflict(
            "Booking is cancelled, its days no longer take responses".to_string(),
        ));
    }
    if day.is_final() {
        return Err(AppError::Conflict(format!(
            "Booking day was already {}",
            day
        )));
    }
    Ok(())
}

/// Aggregate status implied by the day responses.
///
/// DRAFT and CANCELLED bookings keep their status. Otherwise: any day still
/// pending -> PENDING, all accepted -> CONFIRMED, some accepted -> PARTIAL,
/// none accepted -> CANCELLED.
pub fn suggested_status(current: BookingStatus, days: &[BookingDayStatus]) -> BookingStatus {
    if matches!(current, BookingStatus::Draft | BookingStatus::Cancelled) || days.is_empty() {
        return current;
    }

    let accepted = days.iter().filter(|s| **s == BookingDayStatus::Accepted).count();

    if days.iter().any(|s| *s == BookingDayStatus::Pending) {
        BookingStatus::Pending
    } else if accepted == days.len() {
        BookingStatus::Confirmed
    } else if accepted > 0 {
        BookingStatus::Partial
    } else {
        BookingStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingDayStatus::{Accepted, Declined};

    #[test]
    fn test_forward_transitions() {
        assert!(BookingStatus::Draft.can_transition_to(BookingStatus::Pending));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Partial));

        assert!(!BookingStatus::Draft.can_transition_to(BookingStatus::Confirmed));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Partial.can_transition_to(BookingStatus::Confirmed));
    }

    #[test]
    fn test_cancel_only_from_non_terminal() {
        assert!(BookingStatus::Draft.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Cancelled));

        assert!(matches!(
            check_booking_transition(BookingStatus::Cancelled, BookingStatus::Pending),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_day_response_rules() {
        assert!(check_day_response(BookingStatus::Pending, BookingDayStatus::Pending, Accepted).is_ok());
        assert!(check_day_response(BookingStatus::Draft, BookingDayStatus::Pending, Declined).is_ok());

        assert!(matches!(
            check_day_response(BookingStatus::Pending, BookingDayStatus::Pending, BookingDayStatus::Pending),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            check_day_response(BookingStatus::Pending, Accepted, Declined),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            check_day_response(BookingStatus::Cancelled, BookingDayStatus::Pending, Accepted),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_suggested_status() {
        use BookingDayStatus::Pending as DayPending;

        assert_eq!(suggested_status(BookingStatus::Pending, &[Accepted, DayPending]), BookingStatus::Pending);
        assert_eq!(suggested_status(BookingStatus::Pending, &[Accepted, Accepted]), BookingStatus::Confirmed);
        assert_eq!(suggested_status(BookingStatus::Pending, &[Accepted, Declined]), BookingStatus::Partial);
        assert_eq!(suggested_status(BookingStatus::Pending, &[Declined, Declined]), BookingStatus::Cancelled);

        // Not submitted yet, or already cancelled: unchanged
        assert_eq!(suggested_status(BookingStatus::Draft, &[Accepted]), BookingStatus::Draft);
        assert_eq!(suggested_status(BookingStatus::Cancelled, &[Accepted]), BookingStatus::Cancelled);
        assert_eq!(suggested_status(BookingStatus::Pending, &[]), BookingStatus::Pending);
    }
}
