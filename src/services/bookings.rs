//! Booking service: intelligent assignment, manual bookings, lifecycle

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::{
    booking::{self, calendar, dependents, lifecycle, AvailabilityMatrix, CapacityPolicy, CenterSchedule},
    config::BookingConfig,
    error::{AppError, AppResult},
    models::booking::{
        BookingDay, BookingDayStatus, BookingDetails, BookingFilter, BookingStatus, CreateBooking,
        IntelligentBookingRequest, IntelligentBookingResponse, NewBookingDay,
    },
    repository::BookingStore,
};

#[derive(Clone)]
pub struct BookingsService {
    store: Arc<dyn BookingStore>,
    capacity: Arc<dyn CapacityPolicy>,
    config: BookingConfig,
}

impl BookingsService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        capacity: Arc<dyn CapacityPolicy>,
        config: BookingConfig,
    ) -> Self {
        Self {
            store,
            capacity,
            config,
        }
    }

    /// Resolve dates, dependent and centers, assign, then commit atomically
    pub async fn create_intelligent(
        &self,
        request: &IntelligentBookingRequest,
    ) -> AppResult<IntelligentBookingResponse> {
        self.create_intelligent_on(request, Local::now().date_naive()).await
    }

    /// Same as [`Self::create_intelligent`] with an explicit "today"
    pub async fn create_intelligent_on(
        &self,
        request: &IntelligentBookingRequest,
        today: NaiveDate,
    ) -> AppResult<IntelligentBookingResponse> {
        let dates = calendar::resolve_dates(
            request.request_date.as_deref(),
            request.request_dates.as_deref(),
            today,
        )?;
        self.check_date_count(dates.len())?;

        let guardian = self.store.get_guardian(request.guardian_id).await?;
        let children = self.store.list_dependents(guardian.id).await?;
        let dependent =
            dependents::choose_dependent(guardian.id, &children, request.dependent_name.as_deref())?;

        let centers = self
            .store
            .list_center_schedules(&guardian.zip_code, &dates)
            .await?;
        if centers.is_empty() {
            return Err(AppError::NoCentersInArea(guardian.zip_code.clone()));
        }

        let preferred = match request.center_name.as_deref() {
            Some(name) => Some(find_center_by_name(&centers, name, &guardian.zip_code)?.id),
            None => None,
        };

        let matrix = AvailabilityMatrix::build(&centers, &dates, self.capacity.as_ref());
        let assignment = booking::assign(&matrix, preferred);
        tracing::debug!(
            strategy = ?assignment.strategy,
            candidates = centers.len(),
            dates = dates.len(),
            assigned = assignment.days.len(),
            "Assignment computed"
        );

        if !assignment.is_complete() {
            tracing::warn!(
                guardian_id = %guardian.id,
                unavailable = assignment.unassignable.len(),
                "Booking request has dates no center can serve"
            );
            let mut ordered: Vec<&CenterSchedule> = centers.iter().collect();
            ordered.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            return Err(AppError::PartialUnavailability {
                unavailable_dates: assignment.unassignable.clone(),
                available_centers: ordered.iter().map(|c| c.summary(&dates)).collect(),
            });
        }

        let days: Vec<NewBookingDay> = assignment
            .days
            .iter()
            .map(|(date, center_id)| NewBookingDay {
                date: *date,
                center_id: Some(*center_id),
            })
            .collect();

        let booking_id = self
            .store
            .create_booking(guardian.id, dependent.id, &days)
            .await?;

        let summary = assignment.summary(&centers);
        tracing::info!(
            %booking_id,
            guardian_id = %guardian.id,
            dependent_id = %dependent.id,
            total_days = summary.total_days,
            centers_used = summary.centers_used,
            strategy = ?assignment.strategy,
            "Intelligent booking created"
        );

        let booking = self.store.get_booking_details(booking_id).await?;
        Ok(IntelligentBookingResponse {
            booking,
            assignment_summary: summary,
        })
    }

    /// Create a booking from explicitly chosen days
    pub async fn create_manual(&self, request: &CreateBooking) -> AppResult<BookingDetails> {
        if request.booking_days.is_empty() {
            return Err(AppError::BadRequest(
                "booking_days must contain at least one day".to_string(),
            ));
        }
        self.check_date_count(request.booking_days.len())?;

        let mut seen = BTreeSet::new();
        let mut days = Vec::with_capacity(request.booking_days.len());
        for day in &request.booking_days {
            let date = calendar::parse_date(&day.date)?;
            if !seen.insert(date) {
                return Err(AppError::BadRequest(format!(
                    "Date {} appears more than once",
                    day.date
                )));
            }
            days.push(NewBookingDay {
                date,
                center_id: day.center_id,
            });
        }
        days.sort_by_key(|d| d.date);

        let guardian = self.store.get_guardian(request.guardian_id).await?;
        let children = self.store.list_dependents(guardian.id).await?;
        if !children.iter().any(|d| d.id == request.dependent_id) {
            return Err(AppError::NotFound(format!(
                "Dependent {} not found for guardian {}",
                request.dependent_id, guardian.id
            )));
        }

        let booking_id = self
            .store
            .create_booking(guardian.id, request.dependent_id, &days)
            .await?;
        tracing::info!(%booking_id, days = days.len(), "Booking created");

        self.store.get_booking_details(booking_id).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<BookingDetails> {
        self.store.get_booking_details(id).await
    }

    pub async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<BookingDetails>> {
        self.store.list_bookings(filter).await
    }

    /// Explicit aggregate status change, validated against the lifecycle
    pub async fn update_status(&self, id: Uuid, status: &str) -> AppResult<BookingDetails> {
        let next: BookingStatus = status.parse()?;
        let booking = self.store.get_booking(id).await?;

        if booking.status != next {
            lifecycle::check_booking_transition(booking.status, next)?;
            self.store
                .update_booking_status(id, booking.status, next)
                .await?
                .ok_or_else(|| {
                    AppError::Conflict(format!("Booking {} was modified concurrently", id))
                })?;
            tracing::info!(booking_id = %id, from = %booking.status, to = %next, "Booking status changed");
        }

        self.store.get_booking_details(id).await
    }

    pub async fn cancel(&self, id: Uuid) -> AppResult<BookingDetails> {
        self.update_status(id, BookingStatus::Cancelled.as_str()).await
    }

    /// A center accepts or declines one booked day
    pub async fn respond_to_day(&self, id: Uuid, status: &str) -> AppResult<BookingDay> {
        let response: BookingDayStatus = status.parse()?;
        if !response.is_final() {
            return Err(AppError::BadRequest(format!(
                "Invalid status value: {}, expected ACCEPTED or DECLINED",
                status
            )));
        }

        let day = self.store.get_booking_day(id).await?;
        let booking = self.store.get_booking(day.booking_id).await?;
        lifecycle::check_day_response(booking.status, day.status, response)?;

        let updated = self
            .store
            .respond_to_booking_day(id, response)
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Booking day {} was already answered", id)))?;

        tracing::info!(booking_day_id = %id, booking_id = %day.booking_id, status = %response, "Center responded to booking day");
        Ok(updated)
    }

    fn check_date_count(&self, count: usize) -> AppResult<()> {
        if count > self.config.max_request_dates {
            return Err(AppError::BadRequest(format!(
                "A booking cannot span more than {} dates",
                self.config.max_request_dates
            )));
        }
        Ok(())
    }
}

/// First center, in (name, id) order, whose name contains `name` (case-insensitive)
fn find_center_by_name<'a>(
    centers: &'a [CenterSchedule],
    name: &str,
    zip_code: &str,
) -> AppResult<&'a CenterSchedule> {
    let needle = name.trim().to_lowercase();
    centers
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .min_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)))
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No center matching \"{}\" in zip code {}",
                name, zip_code
            ))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        booking::AdvisoryCapacity,
        models::{
            booking::{Booking, BookingDayDetails, BookingHeader},
            guardian::{Dependent, Guardian},
        },
        repository::MockBookingStore,
    };

    const ZIP: &str = "12345";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        date("2024-01-10")
    }

    fn guardian() -> Guardian {
        Guardian {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            zip_code: ZIP.to_string(),
            hashed_pass: String::new(),
            created_at: Utc.with_ymd_and_hms(2023, 12, 1, 8, 0, 0).unwrap(),
        }
    }

    fn dependent(guardian_id: Uuid, name: &str, day: u32) -> Dependent {
        Dependent {
            id: Uuid::new_v4(),
            guardian_id,
            name: name.to_string(),
            birth_date: None,
            created_at: Utc.with_ymd_and_hms(2023, 12, day, 8, 0, 0).unwrap(),
        }
    }

    fn center(name: &str, days: &[u8]) -> CenterSchedule {
        CenterSchedule::new(Uuid::new_v4(), name, 12).with_operating_days(days.iter().copied())
    }

    fn request(guardian_id: Uuid, dates: &[&str]) -> IntelligentBookingRequest {
        IntelligentBookingRequest {
            guardian_id,
            request_date: None,
            request_dates: Some(dates.iter().map(|d| d.to_string()).collect()),
            dependent_name: None,
            center_name: None,
        }
    }

    fn service(store: MockBookingStore) -> BookingsService {
        BookingsService::new(Arc::new(store), Arc::new(AdvisoryCapacity), BookingConfig::default())
    }

    /// Details echoing back whatever days were committed
    fn details(booking_id: Uuid, g: &Guardian, d: &Dependent, days: &[NewBookingDay]) -> BookingDetails {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        BookingDetails::new(
            BookingHeader {
                id: booking_id,
                guardian_id: g.id,
                dependent_id: d.id,
                status: BookingStatus::Draft,
                created_at: now,
                updated_at: now,
                guardian_name: g.name.clone(),
                guardian_email: g.email.clone(),
                dependent_name: d.name.clone(),
                dependent_birth_date: None,
            },
            days.iter()
                .map(|day| BookingDayDetails {
                    id: Uuid::new_v4(),
                    booking_id,
                    date: day.date,
                    center_id: day.center_id,
                    center_name: None,
                    status: BookingDayStatus::Pending,
                    center_responded_at: None,
                })
                .collect(),
        )
    }

    /// A store with one guardian, the given dependents and centers, that
    /// records committed days
    fn store_with(
        g: &Guardian,
        kids: Vec<Dependent>,
        centers: Vec<CenterSchedule>,
        committed: Arc<Mutex<Vec<NewBookingDay>>>,
    ) -> MockBookingStore {
        let mut store = MockBookingStore::new();

        let g1 = g.clone();
        store.expect_get_guardian().returning(move |_| Ok(g1.clone()));

        let kids_for_list = kids.clone();
        store
            .expect_list_dependents()
            .returning(move |_| Ok(kids_for_list.clone()));

        store
            .expect_list_center_schedules()
            .returning(move |_, _| Ok(centers.clone()));

        let booking_id = Uuid::new_v4();
        let sink = committed.clone();
        store
            .expect_create_booking()
            .returning(move |_, _, days| {
                sink.lock().unwrap().extend_from_slice(days);
                Ok(booking_id)
            });

        let g2 = g.clone();
        store.expect_get_booking_details().returning(move |id| {
            let days = committed.lock().unwrap().clone();
            let kid = kids.first().cloned().unwrap();
            Ok(details(id, &g2, &kid, &days))
        });

        store
    }

    fn assigned(committed: &Arc<Mutex<Vec<NewBookingDay>>>) -> BTreeMap<NaiveDate, Uuid> {
        committed
            .lock()
            .unwrap()
            .iter()
            .map(|d| (d.date, d.center_id.unwrap()))
            .collect()
    }

    #[tokio::test]
    async fn test_weekday_and_weekend_centers_split() {
        let g = guardian();
        let a = center("A", &[1, 2, 3, 4, 5]);
        let b = center("B", &[6, 7]);
        let committed = Arc::new(Mutex::new(Vec::new()));
        let store = store_with(&g, vec![dependent(g.id, "Liam", 1)], vec![b.clone(), a.clone()], committed.clone());

        // Thu, Fri, Sat
        let response = service(store)
            .create_intelligent_on(&request(g.id, &["2024-01-18", "2024-01-19", "2024-01-20"]), today())
            .await
            .unwrap();

        let days = assigned(&committed);
        assert_eq!(days[&date("2024-01-18")], a.id);
        assert_eq!(days[&date("2024-01-19")], a.id);
        assert_eq!(days[&date("2024-01-20")], b.id);
        assert_eq!(response.assignment_summary.centers_used, 2);
        assert_eq!(response.assignment_summary.total_days, 3);
        assert_eq!(response.assignment_summary.center_breakdown["A"], 2);
        assert_eq!(response.booking.booking_days.len(), 3);
        assert_eq!(response.booking.status, BookingStatus::Draft);
    }

    #[tokio::test]
    async fn test_everyday_center_takes_mon_wed_fri() {
        let g = guardian();
        let c = center("C", &[1, 2, 3, 4, 5, 6, 7]);
        let committed = Arc::new(Mutex::new(Vec::new()));
        let store = store_with(&g, vec![dependent(g.id, "Liam", 1)], vec![c.clone()], committed.clone());

        let response = service(store)
            .create_intelligent_on(&request(g.id, &["2024-01-15", "2024-01-17", "2024-01-19"]), today())
            .await
            .unwrap();

        assert_eq!(response.assignment_summary.centers_used, 1);
        assert!(assigned(&committed).values().all(|id| *id == c.id));
    }

    #[tokio::test]
    async fn test_preferred_center_by_name() {
        let g = guardian();
        let full = center("Full Week Center", &[1, 2, 3, 4, 5, 6, 7]);
        let tue_sat = center("Tuesday-Saturday Center", &[2, 3, 4, 5, 6]);
        let committed = Arc::new(Mutex::new(Vec::new()));
        let store = store_with(&g, vec![dependent(g.id, "Liam", 1)], vec![full, tue_sat.clone()], committed.clone());

        let mut req = request(g.id, &[]);
        req.request_dates = None;
        req.request_date = Some("2024-01-16".to_string());
        req.center_name = Some("tuesday-saturday".to_string());

        service(store).create_intelligent_on(&req, today()).await.unwrap();
        assert_eq!(assigned(&committed)[&date("2024-01-16")], tue_sat.id);
    }

    #[tokio::test]
    async fn test_unknown_center_name_is_not_found() {
        let g = guardian();
        let committed = Arc::new(Mutex::new(Vec::new()));
        let store = store_with(&g, vec![dependent(g.id, "Liam", 1)], vec![center("A", &[1])], committed.clone());

        let mut req = request(g.id, &["2024-01-15"]);
        req.center_name = Some("Sunshine".to_string());

        let result = service(store).create_intelligent_on(&req, today()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(committed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unassignable_date_persists_nothing() {
        let g = guardian();
        let weekend = center("Weekend Only Center", &[6, 7]);

        let mut store = MockBookingStore::new();
        let g1 = g.clone();
        store.expect_get_guardian().returning(move |_| Ok(g1.clone()));
        let kids = vec![dependent(g.id, "Liam", 1)];
        store.expect_list_dependents().returning(move |_| Ok(kids.clone()));
        store
            .expect_list_center_schedules()
            .returning(move |_, _| Ok(vec![weekend.clone()]));
        store.expect_create_booking().never();

        // Tuesday
        let result = service(store)
            .create_intelligent_on(&request(g.id, &["2024-01-16"]), today())
            .await;

        match result {
            Err(AppError::PartialUnavailability {
                unavailable_dates,
                available_centers,
            }) => {
                assert_eq!(unavailable_dates, vec![date("2024-01-16")]);
                assert_eq!(available_centers.len(), 1);
                assert_eq!(available_centers[0].name, "Weekend Only Center");
                assert_eq!(available_centers[0].operating_days, vec!["Saturday", "Sunday"]);
            }
            other => panic!("expected PartialUnavailability, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_dependent_name_never_falls_back() {
        let g = guardian();
        let mut store = MockBookingStore::new();
        let g1 = g.clone();
        store.expect_get_guardian().returning(move |_| Ok(g1.clone()));
        let kids = vec![dependent(g.id, "Liam", 1), dependent(g.id, "Noah", 2)];
        store.expect_list_dependents().returning(move |_| Ok(kids.clone()));
        store.expect_list_center_schedules().never();
        store.expect_create_booking().never();

        let mut req = request(g.id, &["2024-01-15"]);
        req.dependent_name = Some("Emma".to_string());

        let result = service(store).create_intelligent_on(&req, today()).await;
        assert!(matches!(result, Err(AppError::NoMatchingDependent(name)) if name == "Emma"));
    }

    #[tokio::test]
    async fn test_no_centers_in_area() {
        let g = guardian();
        let mut store = MockBookingStore::new();
        let g1 = g.clone();
        store.expect_get_guardian().returning(move |_| Ok(g1.clone()));
        let kids = vec![dependent(g.id, "Liam", 1)];
        store.expect_list_dependents().returning(move |_| Ok(kids.clone()));
        store.expect_list_center_schedules().returning(|_, _| Ok(Vec::new()));
        store.expect_create_booking().never();

        let result = service(store)
            .create_intelligent_on(&request(g.id, &["2024-01-15"]), today())
            .await;
        assert!(matches!(result, Err(AppError::NoCentersInArea(zip)) if zip == ZIP));
    }

    #[tokio::test]
    async fn test_invalid_date_fails_before_any_lookup() {
        let mut store = MockBookingStore::new();
        store.expect_get_guardian().never();

        let result = service(store)
            .create_intelligent_on(&request(Uuid::new_v4(), &["2024-01-15", "2024-1-32"]), today())
            .await;
        assert!(matches!(result, Err(AppError::InvalidDate(literal)) if literal == "2024-1-32"));
    }

    #[tokio::test]
    async fn test_transaction_failure_is_reported_not_retried() {
        let g = guardian();
        let mut store = MockBookingStore::new();
        let g1 = g.clone();
        store.expect_get_guardian().returning(move |_| Ok(g1.clone()));
        let kids = vec![dependent(g.id, "Liam", 1)];
        store.expect_list_dependents().returning(move |_| Ok(kids.clone()));
        let c = center("C", &[1, 2, 3, 4, 5, 6, 7]);
        store.expect_list_center_schedules().returning(move |_, _| Ok(vec![c.clone()]));
        store
            .expect_create_booking()
            .times(1)
            .returning(|_, _, _| Err(AppError::TransactionFailure(sqlx::Error::PoolTimedOut)));
        store.expect_get_booking_details().never();

        let result = service(store)
            .create_intelligent_on(&request(g.id, &["2024-01-15"]), today())
            .await;
        assert!(matches!(result, Err(AppError::TransactionFailure(_))));
    }

    #[tokio::test]
    async fn test_defaults_to_tomorrow() {
        let g = guardian();
        let committed = Arc::new(Mutex::new(Vec::new()));
        let store = store_with(
            &g,
            vec![dependent(g.id, "Liam", 1)],
            vec![center("C", &[1, 2, 3, 4, 5, 6, 7])],
            committed.clone(),
        );

        let mut req = request(g.id, &[]);
        req.request_dates = None;
        service(store).create_intelligent_on(&req, today()).await.unwrap();

        let days = assigned(&committed);
        assert_eq!(days.keys().copied().collect::<Vec<_>>(), vec![date("2024-01-11")]);
    }

    #[tokio::test]
    async fn test_too_many_dates_rejected() {
        let store = MockBookingStore::new();
        let svc = BookingsService::new(
            Arc::new(store),
            Arc::new(AdvisoryCapacity),
            BookingConfig { max_request_dates: 2 },
        );

        let result = svc
            .create_intelligent_on(
                &request(Uuid::new_v4(), &["2024-01-15", "2024-01-16", "2024-01-17"]),
                today(),
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_manual_booking_rejects_duplicate_dates() {
        let mut store = MockBookingStore::new();
        store.expect_create_booking().never();

        let req = CreateBooking {
            guardian_id: Uuid::new_v4(),
            dependent_id: Uuid::new_v4(),
            booking_days: vec![
                crate::models::booking::CreateBookingDay { date: "2024-01-15".into(), center_id: None },
                crate::models::booking::CreateBookingDay { date: "2024-01-15".into(), center_id: None },
            ],
        };
        assert!(matches!(service(store).create_manual(&req).await, Err(AppError::BadRequest(_))));
    }

    fn booking(status: BookingStatus) -> Booking {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            guardian_id: Uuid::new_v4(),
            dependent_id: Uuid::new_v4(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn day(booking_id: Uuid, status: BookingDayStatus) -> BookingDay {
        BookingDay {
            id: Uuid::new_v4(),
            booking_id,
            date: date("2024-01-15"),
            center_id: Some(Uuid::new_v4()),
            status,
            center_responded_at: None,
        }
    }

    #[tokio::test]
    async fn test_respond_rejects_pending_as_response() {
        let mut store = MockBookingStore::new();
        store.expect_get_booking_day().never();

        let result = service(store).respond_to_day(Uuid::new_v4(), "PENDING").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_respond_accepts_pending_day() {
        let b = booking(BookingStatus::Pending);
        let d = day(b.id, BookingDayStatus::Pending);
        let day_id = d.id;

        let mut store = MockBookingStore::new();
        let d1 = d.clone();
        store.expect_get_booking_day().returning(move |_| Ok(d1.clone()));
        store.expect_get_booking().returning(move |_| Ok(b.clone()));
        store
            .expect_respond_to_booking_day()
            .withf(move |id, status| *id == day_id && *status == BookingDayStatus::Accepted)
            .returning(move |_, status| {
                let mut updated = d.clone();
                updated.status = status;
                updated.center_responded_at = Some(Utc::now());
                Ok(Some(updated))
            });

        let updated = service(store).respond_to_day(day_id, "ACCEPTED").await.unwrap();
        assert_eq!(updated.status, BookingDayStatus::Accepted);
        assert!(updated.center_responded_at.is_some());
    }

    #[tokio::test]
    async fn test_respond_twice_conflicts() {
        let b = booking(BookingStatus::Pending);
        let d = day(b.id, BookingDayStatus::Declined);

        let mut store = MockBookingStore::new();
        store.expect_get_booking_day().returning(move |_| Ok(d.clone()));
        store.expect_get_booking().returning(move |_| Ok(b.clone()));
        store.expect_respond_to_booking_day().never();

        let result = service(store).respond_to_day(Uuid::new_v4(), "ACCEPTED").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_status_change_follows_lifecycle() {
        let b = booking(BookingStatus::Confirmed);

        let mut store = MockBookingStore::new();
        store.expect_get_booking().returning(move |_| Ok(b.clone()));
        store.expect_update_booking_status().never();

        let svc = service(store);
        assert!(matches!(svc.update_status(Uuid::new_v4(), "PENDING").await, Err(AppError::Conflict(_))));
        assert!(matches!(svc.update_status(Uuid::new_v4(), "ARCHIVED").await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_submit_draft_booking() {
        let b = booking(BookingStatus::Draft);
        let booking_id = b.id;
        let g = guardian();
        let kid = dependent(g.id, "Liam", 1);

        let mut store = MockBookingStore::new();
        let b1 = b.clone();
        store.expect_get_booking().returning(move |_| Ok(b1.clone()));
        store
            .expect_update_booking_status()
            .withf(|_, from, to| *from == BookingStatus::Draft && *to == BookingStatus::Pending)
            .times(1)
            .returning(move |_, _, to| {
                let mut updated = b.clone();
                updated.status = to;
                Ok(Some(updated))
            });
        store.expect_get_booking_details().returning(move |id| {
            let mut d = details(id, &g, &kid, &[]);
            d.status = BookingStatus::Pending;
            Ok(d)
        });

        let result = service(store).update_status(booking_id, "PENDING").await.unwrap();
        assert_eq!(result.status, BookingStatus::Pending);
    }
}
