//! Elapsed-time calculation between a birth date and the current date.
//!
//! Chrono has no built-in year/month/day difference, so the borrowing
//! rules for days and months are implemented here by hand, on top of the
//! calendar helpers in [`crate::types`].

use chrono::{Datelike, NaiveDate};

use crate::consts::{DECEMBER, MONTHS_IN_YEAR};
use crate::types::{Age, days_in_month};

/// Why a calculation could not produce an [`Age`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    /// At least one of the day, month, and year fields was never entered.
    #[error("day, month, and year must all be provided")]
    MissingFields,

    /// The fields passed their per-field range checks but do not name a
    /// real calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: i32, day: i32 },
}

/// Day-of-month difference between `today` and the birth day-of-month.
/// When the current day is behind the birth day, a full month of days is
/// borrowed from the current month.
fn difference_in_days(today: NaiveDate, birth_day: i32) -> i32 {
    let current_day = today.day() as i32;
    let number_of_days = days_in_month(today.year(), today.month()) as i32;
    if current_day == birth_day {
        return 0;
    }
    if current_day > birth_day {
        return (current_day - birth_day).abs();
    }
    (current_day + number_of_days - birth_day).abs()
}

/// Month difference on a 12-month wheel, ignoring the day-of-month.
fn difference_in_months(today: NaiveDate, birth_month: i32) -> i32 {
    let current_month = today.month() as i32;
    if current_month == birth_month {
        return 0;
    }
    if current_month > birth_month {
        return (birth_month - current_month).abs();
    }
    MONTHS_IN_YEAR - (birth_month - current_month).abs()
}

/// Whole-year difference. `month_delta` is the value produced by
/// [`difference_in_months`]; it, not the birth month itself, decides
/// whether the current year is incomplete and one year is borrowed.
fn difference_in_years(today: NaiveDate, birth_year: i32, month_delta: i32) -> i32 {
    let year_diff = today.year() - birth_year;
    if today.year() == birth_year {
        return 0;
    }
    if today.month() as i32 == DECEMBER || today.month0() as i32 > month_delta {
        return year_diff;
    }
    year_diff - 1
}

/// Checks that the triple names a real proleptic-Gregorian date.
/// Overflowed combinations such as day 31 in a 30-day month are rejected
/// rather than normalized; non-positive months and days never validate.
pub fn validate_date(year: i32, month: i32, day: i32) -> bool {
    let (Ok(month), Ok(day)) = (u32::try_from(month), u32::try_from(day)) else {
        return false;
    };
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Computes the elapsed time between the supplied birth-date fields and
/// `today`.
///
/// # Errors
/// Returns [`AgeError::MissingFields`] if any field is still at its unset
/// value of 0, and [`AgeError::InvalidDate`] if the three fields do not
/// form a calendar date.
pub fn compute_age(day: i32, month: i32, year: i32, today: NaiveDate) -> Result<Age, AgeError> {
    if day == 0 || month == 0 || year == 0 {
        return Err(AgeError::MissingFields);
    }

    if !validate_date(year, month, day) {
        return Err(AgeError::InvalidDate { year, month, day });
    }

    let days = difference_in_days(today, day);
    let months = difference_in_months(today, month);
    let years = difference_in_years(today, year, months);

    Ok(Age {
        years,
        months,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_difference_in_days_same_day() {
        assert_eq!(difference_in_days(date(2024, 3, 15), 15), 0);
    }

    #[test]
    fn test_difference_in_days_current_ahead() {
        assert_eq!(difference_in_days(date(2024, 3, 20), 5), 15);
    }

    #[test]
    fn test_difference_in_days_borrows_current_month() {
        // September has 30 days: 7 + 30 - 23 = 14
        assert_eq!(difference_in_days(date(2023, 9, 7), 23), 14);
        // March has 31 days: 10 + 31 - 20 = 21
        assert_eq!(difference_in_days(date(2024, 3, 10), 20), 21);
    }

    #[test]
    fn test_difference_in_months_same_month() {
        assert_eq!(difference_in_months(date(2024, 9, 15), 9), 0);
    }

    #[test]
    fn test_difference_in_months_current_ahead() {
        assert_eq!(difference_in_months(date(2024, 9, 15), 4), 5);
    }

    #[test]
    fn test_difference_in_months_wraps_around_year() {
        assert_eq!(difference_in_months(date(2024, 3, 15), 9), 6);
        assert_eq!(difference_in_months(date(2024, 1, 15), 12), 1);
    }

    #[test]
    fn test_difference_in_years_same_year() {
        assert_eq!(difference_in_years(date(2024, 6, 1), 2024, 3), 0);
    }

    #[test]
    fn test_difference_in_years_in_december() {
        assert_eq!(difference_in_years(date(2024, 12, 5), 2020, 0), 4);
    }

    #[test]
    fn test_difference_in_years_month_past_delta() {
        // month0 of June is 5, greater than the delta of 4
        assert_eq!(difference_in_years(date(2024, 6, 15), 2000, 4), 24);
    }

    #[test]
    fn test_difference_in_years_borrows_year() {
        // month0 of May is 4, not greater than the delta of 4
        assert_eq!(difference_in_years(date(2024, 5, 15), 2000, 4), 23);
    }

    #[test]
    fn test_validate_date_accepts_real_dates() {
        assert!(validate_date(2024, 2, 29));
        assert!(validate_date(2023, 12, 31));
        assert!(validate_date(2000, 1, 1));
    }

    #[test]
    fn test_validate_date_rejects_overflowed_dates() {
        assert!(!validate_date(2023, 2, 30));
        assert!(!validate_date(2023, 2, 29));
        assert!(!validate_date(2023, 4, 31));
    }

    #[test]
    fn test_validate_date_rejects_out_of_range_components() {
        assert!(!validate_date(2023, 13, 1));
        assert!(!validate_date(2023, 0, 1));
        assert!(!validate_date(2023, 1, 0));
        assert!(!validate_date(2023, -2, 10));
        assert!(!validate_date(2023, 2, -10));
    }

    #[test]
    fn test_validate_date_round_trip() {
        // Every in-range (month, day) pair validates; one past the month
        // length does not.
        for month in 1..=12u32 {
            let max_day = days_in_month(2023, month);
            for day in 1..=max_day {
                assert!(
                    validate_date(2023, month as i32, day as i32),
                    "2023-{month:02}-{day:02} should be valid"
                );
            }
            assert!(
                !validate_date(2023, month as i32, max_day as i32 + 1),
                "2023-{month:02}-{} should be invalid",
                max_day + 1
            );
        }
    }

    #[test]
    fn test_compute_age_requires_all_fields() {
        let today = date(2024, 3, 15);
        assert_eq!(
            compute_age(0, 3, 2000, today),
            Err(AgeError::MissingFields)
        );
        assert_eq!(
            compute_age(15, 0, 2000, today),
            Err(AgeError::MissingFields)
        );
        assert_eq!(compute_age(15, 3, 0, today), Err(AgeError::MissingFields));
    }

    #[test]
    fn test_compute_age_rejects_impossible_date() {
        let result = compute_age(30, 2, 2023, date(2024, 3, 15));
        assert_eq!(
            result,
            Err(AgeError::InvalidDate {
                year: 2023,
                month: 2,
                day: 30
            })
        );
    }

    #[test]
    fn test_compute_age_rejects_negative_day() {
        let result = compute_age(-5, 3, 2000, date(2024, 3, 15));
        assert!(matches!(result, Err(AgeError::InvalidDate { .. })));
    }

    #[test]
    fn test_compute_age_exact_birthday() {
        let age = compute_age(15, 3, 2000, date(2024, 3, 15)).unwrap();
        assert_eq!(age, Age::new(24, 0, 0));
    }

    #[test]
    fn test_compute_age_with_day_borrow() {
        // days: 10 + 31 - 20 = 21, month and year unchanged by the borrow
        let age = compute_age(20, 3, 2000, date(2024, 3, 10)).unwrap();
        assert_eq!(age, Age::new(24, 0, 21));
    }

    #[test]
    fn test_compute_age_with_month_wrap() {
        // months: 12 - (9 - 3) = 6, days: 15 + 31 - 20 = 26
        let age = compute_age(20, 9, 2000, date(2024, 3, 15)).unwrap();
        assert_eq!(age, Age::new(23, 6, 26));
    }

    #[test]
    fn test_year_borrow_follows_month_delta() {
        // The year borrow compares the current month against the month
        // delta (here 4), not against the birth month, so January counts
        // as not yet reached in May.
        let age = compute_age(15, 1, 2000, date(2024, 5, 15)).unwrap();
        assert_eq!(age, Age::new(23, 4, 0));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AgeError::MissingFields.to_string(),
            "day, month, and year must all be provided"
        );
        assert_eq!(
            AgeError::InvalidDate {
                year: 2023,
                month: 2,
                day: 30
            }
            .to_string(),
            "2023-02-30 is not a calendar date"
        );
    }
}
