/// Largest day-of-month accepted by the day field's coarse range check
pub const MAX_DAY: i32 = 31;

/// Largest month accepted by the month field's coarse range check (December)
pub const MAX_MONTH: i32 = 12;

/// Month number for February
pub const FEBRUARY: u32 = 2;
/// Month number for December
pub const DECEMBER: i32 = 12;

/// Length of the month wheel used when a month difference wraps past January
pub const MONTHS_IN_YEAR: i32 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;
