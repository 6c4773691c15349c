//! Data models for Carematch

pub mod booking;
pub mod center;
pub mod guardian;

// Re-export commonly used types
pub use booking::{Booking, BookingDay, BookingDayStatus, BookingDetails, BookingStatus};
pub use center::{Center, ScheduleException};
pub use guardian::{Dependent, Guardian};
