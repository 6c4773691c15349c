//! Repository layer for database operations

pub mod bookings;
pub mod centers;
pub mod guardians;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    booking::CenterSchedule,
    error::AppResult,
    models::{
        booking::{Booking, BookingDay, BookingDayStatus, BookingDetails, BookingFilter, BookingStatus, NewBookingDay},
        guardian::{Dependent, Guardian},
    },
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub guardians: guardians::GuardiansRepository,
    pub centers: centers::CentersRepository,
    pub bookings: bookings::BookingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            guardians: guardians::GuardiansRepository::new(pool.clone()),
            centers: centers::CentersRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Database round trip used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Storage operations the booking service depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_guardian(&self, id: Uuid) -> AppResult<Guardian>;

    async fn list_dependents(&self, guardian_id: Uuid) -> AppResult<Vec<Dependent>>;

    /// Candidate centers of a postal area with exceptions on `dates`
    async fn list_center_schedules(
        &self,
        zip_code: &str,
        dates: &[NaiveDate],
    ) -> AppResult<Vec<CenterSchedule>>;

    /// All-or-nothing insert of a booking and its days; returns the booking id
    async fn create_booking(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        days: &[NewBookingDay],
    ) -> AppResult<Uuid>;

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking>;

    async fn get_booking_details(&self, id: Uuid) -> AppResult<BookingDetails>;

    async fn list_bookings(&self, filter: &BookingFilter) -> AppResult<Vec<BookingDetails>>;

    async fn update_booking_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<Booking>>;

    async fn get_booking_day(&self, id: Uuid) -> AppResult<BookingDay>;

    async fn respond_to_booking_day(
        &self,
        id: Uuid,
        status: BookingDayStatus,
    ) -> AppResult<Option<BookingDay>>;
}

#[async_trait]
impl BookingStore for Repository {
    async fn get_guardian(&self, id: Uuid) -> AppResult<Guardian> {
        self.guardians.get_by_id(id).await
    }

    async fn list_dependents(&self, guardian_id: Uuid) -> AppResult<Vec<Dependent>> {
        self.guardians.list_dependents(guardian_id).await
    }

    async fn list_center_schedules(
        &self,
        zip_code: &str,
        dates: &[NaiveDate],
    ) -> AppResult<Vec<CenterSchedule>> {
        self.centers.list_schedules_in_area(zip_code, dates).await
    }

    async fn create_booking(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        days: &[NewBookingDay],
    ) -> AppResult<Uuid> {
        self.bookings.create_with_days(guardian_id, dependent_id, days).await
    }

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking> {
        self.bookings.get_by_id(id).await
    }

    async fn get_booking_details(&self, id: Uuid) -> AppResult<BookingDetails> {
        self.bookings.get_details(id).await
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> AppResult<Vec<BookingDetails>> {
        self.bookings.list(filter).await
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        self.bookings.update_status(id, from, to).await
    }

    async fn get_booking_day(&self, id: Uuid) -> AppResult<BookingDay> {
        self.bookings.get_day(id).await
    }

    async fn respond_to_booking_day(
        &self,
        id: Uuid,
        status: BookingDayStatus,
    ) -> AppResult<Option<BookingDay>> {
        self.bookings.respond_to_day(id, status).await
    }
}
