//! Proleptic Gregorian calendar arithmetic.
//!
//! Day counts are measured from January 1st of [`REFERENCE_YEAR`], a year far
//! enough in the past that every supported year lies after it. Because
//! `REFERENCE_YEAR ≡ 1 (mod 400)`, each 400, 100 and 4 year block counted
//! from it ends on its leap year, so a year's position decomposes into whole
//! blocks with fixed day counts and no per-year iteration.

#[cfg(test)]
#[path = "./calendar_tests.rs"]
mod tests;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

const REFERENCE_YEAR: i64 = 1 - 400 * 1_000_000;

const DAYS_PER_400_YEARS: u64 = 365 * 400 + 97;
const DAYS_PER_100_YEARS: u64 = 365 * 100 + 24;
const DAYS_PER_4_YEARS: u64 = 365 * 4 + 1;

/// Days between the reference year and 1970-01-01.
const UNIX_EPOCH_DAYS: u64 = days_before_year(1970);

/// `DAYS_BEFORE[m]` counts the days of a common year before month `m + 1`
/// begins. The final entry is the length of the whole year.
pub(crate) const DAYS_BEFORE: [u16; 13] = [
    0,
    31,
    31 + 28,
    31 + 28 + 31,
    31 + 28 + 31 + 30,
    31 + 28 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,
];

pub(crate) const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Length of `month` (1-12). February is resolved with `leap`.
#[inline]
pub(crate) const fn days_in_month(month: u8, leap: bool) -> u8 {
    if month == 2 && leap {
        29
    } else {
        (DAYS_BEFORE[month as usize] - DAYS_BEFORE[month as usize - 1]) as u8
    }
}

/// Number of days from January 1st of the reference year to January 1st of
/// `year`.
const fn days_before_year(year: i64) -> u64 {
    let mut years = (year - REFERENCE_YEAR) as u64;

    let n = years / 400;
    years -= n * 400;
    let mut days = n * DAYS_PER_400_YEARS;

    let n = years / 100;
    years -= n * 100;
    days += n * DAYS_PER_100_YEARS;

    let n = years / 4;
    years -= n * 4;
    days += n * DAYS_PER_4_YEARS;

    days + years * 365
}

/// Signed number of days from 1970-01-01 to January 1st of `year`.
pub(crate) const fn days_since_unix_epoch(year: i64) -> i64 {
    days_before_year(year) as i64 - UNIX_EPOCH_DAYS as i64
}

/// Day of year (0-based) for the first day of `month`.
#[inline]
pub(crate) const fn days_before_month(month: u8, leap: bool) -> u16 {
    let days = DAYS_BEFORE[month as usize - 1];
    if leap && month > 2 { days + 1 } else { days }
}

/// Inverse of the day counting above: maps days since 1970-01-01 to a
/// `(year, month, day)` civil date.
pub(crate) const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let mut d = (days + UNIX_EPOCH_DAYS as i64) as u64;

    let n400 = d / DAYS_PER_400_YEARS;
    d -= n400 * DAYS_PER_400_YEARS;

    // The last century of a 400 year block is one day longer, so the final
    // day would otherwise land in a fifth century.
    let mut n100 = d / DAYS_PER_100_YEARS;
    if n100 == 4 {
        n100 = 3;
    }
    d -= n100 * DAYS_PER_100_YEARS;

    let n4 = d / DAYS_PER_4_YEARS;
    d -= n4 * DAYS_PER_4_YEARS;

    let mut n1 = d / 365;
    if n1 == 4 {
        n1 = 3;
    }
    d -= n1 * 365;

    let year = REFERENCE_YEAR + (n400 * 400 + n100 * 100 + n4 * 4 + n1) as i64;
    let leap = is_leap_year(year);
    let day_of_year = d as u16;

    let mut month = 12u8;
    while day_of_year < days_before_month(month, leap) {
        month -= 1;
    }
    let day = day_of_year - days_before_month(month, leap) + 1;
    (year, month, day as u8)
}
