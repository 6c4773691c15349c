//! Business logic services

pub mod bookings;
pub mod centers;

use std::sync::Arc;

use crate::{
    booking::AdvisoryCapacity, config::BookingConfig, error::AppResult, repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
    pub centers: centers::CentersService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, booking_config: BookingConfig) -> Self {
        Self {
            bookings: bookings::BookingsService::new(
                Arc::new(repository.clone()),
                Arc::new(AdvisoryCapacity),
                booking_config,
            ),
            centers: centers::CentersService::new(repository.clone()),
            repository,
        }
    }

    /// Database reachability, for the readiness probe
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
