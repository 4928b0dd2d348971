mod age;
mod consts;
mod prelude;
mod types;

pub use age::{AgeError, compute_age, validate_date};
pub use consts::*;
pub use types::{Age, days_in_month, is_leap_year};

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

/// The state behind an age-calculator form: three numeric input fields,
/// their validity flags, and the last successfully computed [`Age`].
///
/// Every operation consumes the current snapshot and returns the next one;
/// the widget that owns the state swaps snapshots on each input event. The
/// flags are optimistic: they start out `true` and only flip when a
/// violation is observed, and a later in-range value flips them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeCalculator {
    day: i32,
    month: i32,
    year: i32,
    age: Age,
    is_valid_day: bool,
    is_valid_month: bool,
    is_valid_year: bool,
    is_valid_date: bool,
    is_empty: bool,
}

impl Default for AgeCalculator {
    fn default() -> Self {
        Self {
            day: 0,
            month: 0,
            year: 0,
            age: Age::default(),
            is_valid_day: true,
            is_valid_month: true,
            is_valid_year: true,
            is_valid_date: true,
            is_empty: false,
        }
    }
}

impl AgeCalculator {
    /// Creates the initial snapshot: all fields unset, all flags optimistic.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `day` unless it exceeds [`MAX_DAY`]. A rejected value flips
    /// `is_valid_day` and keeps the previous day; there is no lower bound
    /// at this stage.
    #[must_use]
    pub fn set_day(mut self, day: i32) -> Self {
        if day > MAX_DAY {
            self.is_valid_day = false;
            return self;
        }
        self.day = day;
        self.is_valid_day = true;
        self.is_empty = false;
        self
    }

    /// Stores `month` unless it exceeds [`MAX_MONTH`]. A rejected value
    /// flips `is_valid_month` and keeps the previous month.
    #[must_use]
    pub fn set_month(mut self, month: i32) -> Self {
        if month > MAX_MONTH {
            self.is_valid_month = false;
            return self;
        }
        self.month = month;
        self.is_valid_month = true;
        self.is_empty = false;
        self
    }

    /// Stores `year` unless it lies beyond `current_year`. A rejected
    /// value flips `is_valid_year` and keeps the previous year.
    #[must_use]
    pub fn set_year_as_of(mut self, year: i32, current_year: i32) -> Self {
        if year > current_year {
            self.is_valid_year = false;
            return self;
        }
        self.year = year;
        self.is_valid_year = true;
        self.is_empty = false;
        self
    }

    /// [`Self::set_year_as_of`] against the local clock.
    #[must_use]
    pub fn set_year(self, year: i32) -> Self {
        let current_year = Local::now().year();
        self.set_year_as_of(year, current_year)
    }

    /// Runs the cross-field validation and difference calculation against
    /// `today`.
    ///
    /// A field still at 0 raises `is_empty` and leaves everything else
    /// alone. Fields that do not form a real calendar date clear
    /// `is_valid_date` and keep the previous `age`. Otherwise the new
    /// [`Age`] is stored and `is_valid_date` is set back to `true`.
    #[must_use]
    pub fn calculate_age_as_of(mut self, today: NaiveDate) -> Self {
        match age::compute_age(self.day, self.month, self.year, today) {
            Ok(age) => {
                self.age = age;
                self.is_valid_date = true;
            }
            Err(AgeError::MissingFields) => self.is_empty = true,
            Err(AgeError::InvalidDate { .. }) => self.is_valid_date = false,
        }
        self
    }

    /// [`Self::calculate_age_as_of`] against the local clock.
    #[must_use]
    pub fn calculate_age(self) -> Self {
        self.calculate_age_as_of(Local::now().date_naive())
    }

    /// Returns the stored day field (0 when unset)
    #[inline]
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// Returns the stored month field (0 when unset)
    #[inline]
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// Returns the stored year field (0 when unset)
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the last successfully computed age
    #[inline]
    pub const fn age(&self) -> Age {
        self.age
    }

    /// Whether the last day input passed its range check
    #[inline]
    pub const fn is_valid_day(&self) -> bool {
        self.is_valid_day
    }

    /// Whether the last month input passed its range check
    #[inline]
    pub const fn is_valid_month(&self) -> bool {
        self.is_valid_month
    }

    /// Whether the last year input passed its range check
    #[inline]
    pub const fn is_valid_year(&self) -> bool {
        self.is_valid_year
    }

    /// Whether the last calculation found the fields to form a real
    /// calendar date
    #[inline]
    pub const fn is_valid_date(&self) -> bool {
        self.is_valid_date
    }

    /// Whether the last calculation was attempted with unset fields
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.is_empty
    }
}
