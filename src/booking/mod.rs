//! Booking engine: date resolution, availability, assignment, lifecycle
//!
//! Everything here is pure and works on data fetched at the start of a
//! request; persistence lives in the repository layer.

pub mod availability;
pub mod calendar;
pub mod dependents;
pub mod lifecycle;
pub mod optimizer;

pub use availability::{AdvisoryCapacity, AvailabilityMatrix, CapacityPolicy, CenterSchedule, ExceptionRule};
pub use optimizer::{assign, Assignment, AssignmentStrategy};
