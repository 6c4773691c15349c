//! Requested-date normalization and weekday conventions
//!
//! All weekday indices handled by the engine use the ISO convention:
//! 1 = Monday .. 7 = Sunday. Inputs written in the Sunday-zero convention
//! (0 = Sunday .. 6 = Saturday) go through [`normalize_weekday`].

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::{AppError, AppResult};

/// Wire format of every date literal
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse a `YYYY-MM-DD` literal into a calendar date
pub fn parse_date(literal: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(literal.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(literal.to_string()))
}

/// Resolve the dates of a booking request.
///
/// A non-empty `request_dates` list wins over `request_date`; with neither,
/// the request defaults to the day after `today`. One malformed literal
/// fails the whole request. The result is ascending and free of duplicates.
pub fn resolve_dates(
    request_date: Option<&str>,
    request_dates: Option<&[String]>,
    today: NaiveDate,
) -> AppResult<Vec<NaiveDate>> {
    let literals: Vec<&str> = match (request_dates, request_date) {
        (Some(list), _) if !list.is_empty() => list.iter().map(String::as_str).collect(),
        (_, Some(single)) => vec![single],
        _ => {
            let tomorrow = today
                .succ_opt()
                .ok_or_else(|| AppError::InvalidDate(today.format(DATE_FORMAT).to_string()))?;
            return Ok(vec![tomorrow]);
        }
    };

    let dates = literals
        .into_iter()
        .map(parse_date)
        .collect::<AppResult<BTreeSet<NaiveDate>>>()?;

    Ok(dates.into_iter().collect())
}

/// ISO weekday index of a date (1 = Monday .. 7 = Sunday)
pub fn iso_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Convert a Sunday-zero weekday (0 = Sunday .. 6 = Saturday) to ISO
pub fn iso_from_sunday_zero(weekday: u8) -> Option<u8> {
    match weekday {
        0 => Some(7),
        1..=6 => Some(weekday),
        _ => None,
    }
}

/// Accept a stored or submitted weekday in either convention.
///
/// 1..=7 are taken as ISO, 0 is Sunday in the Sunday-zero convention.
/// Anything else is rejected.
pub fn normalize_weekday(raw: i16) -> Option<u8> {
    match raw {
        0 => iso_from_sunday_zero(0),
        1..=7 => Some(raw as u8),
        _ => None,
    }
}

/// English name of an ISO weekday
pub fn weekday_name(iso: u8) -> &'static str {
    WEEKDAY_NAMES[(iso.clamp(1, 7) - 1) as usize]
}
