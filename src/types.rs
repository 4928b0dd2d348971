use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Elapsed time between two dates, split into calendar units.
/// This is what the widget renders after a successful calculation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display,
)]
#[display(fmt = "{years} years, {months} months, {days} days")]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Age {
    /// Creates an age from its three components
    pub const fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= MAX_MONTH as u32);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
