//! Calendar helpers for month-stepping.
//!
//! The engine only ever moves forward one calendar month at a time, so these
//! helpers do direct year/month arithmetic instead of going through jiff's
//! `Span` machinery.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in the given month without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Advance a date by exactly one calendar month.
///
/// December rolls over into January of the following year. The day of month
/// is kept where possible and clamped to the length of the target month, so
/// `2024-01-31` becomes `2024-02-29`. Simulation dates are normally the first
/// of the month, where clamping never applies.
#[inline]
pub fn next_month(d: Date) -> Date {
    let (year, month) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    let day = d.day().min(days_in_month(year, month));
    jiff::civil::date(year, month, day)
}

/// First day of the month containing `d`.
#[inline]
pub fn first_of_month(d: Date) -> Date {
    jiff::civil::date(d.year(), d.month(), 1)
}

/// Whole calendar months from `from` to `to`, ignoring the day of month.
///
/// Negative when `to` is earlier than `from`.
#[inline]
pub fn months_between(from: Date, to: Date) -> i32 {
    (i32::from(to.year()) - i32::from(from.year())) * 12
        + (i32::from(to.month()) - i32::from(from.month()))
}
