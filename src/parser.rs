//! Byte-level decoder for RFC 3339 style timestamps.
//!
//! The accepted profile is
//!
//! ```text
//! DATE     := YYYY "-" MM "-" DD
//! TIME     := ("T" | " ") HH ":" MM ":" SS [FRACTION] [ZONE]
//! FRACTION := ("." | ",") 1*9DIGIT
//! ZONE     := "Z" | "z" | SIGN HH [[":"] MM]
//! INPUT    := DATE | DATE TIME
//! ```
//!
//! Date and time fields sit at fixed byte offsets, so they are read directly
//! from their positions rather than by scanning. Only the fraction has a
//! variable width; the offset form is then picked by the number of bytes
//! left over.

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use crate::calendar::{self, SECONDS_PER_DAY};
use crate::year_table::STANDARD;
use crate::{Error, Timestamp, YearTable, Zoned};

/// Widest fraction accepted, one digit per nanosecond decade.
const MAX_FRACTION_DIGITS: usize = 9;

/// Fraction widths tried by the fast path, most common first.
const FRACTION_WIDTHS: [usize; MAX_FRACTION_DIGITS] = [3, 6, 9, 1, 2, 4, 5, 7, 8];

/// `SCALE[n]` turns an `n` digit fraction into nanoseconds.
const SCALE: [u32; MAX_FRACTION_DIGITS + 1] = [
    1_000_000_000,
    100_000_000,
    10_000_000,
    1_000_000,
    100_000,
    10_000,
    1_000,
    100,
    10,
    1,
];

const MAX_OFFSET_HOUR: u32 = 14;
const MAX_NEGATIVE_OFFSET_HOUR: u32 = 12;

const DATE_LEN: usize = 10;
const DATE_TIME_LEN: usize = 19;

/// Month, day and time of day, as written in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fields {
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

/// A configured timestamp decoder.
///
/// `Parser` is a small `Copy` handle: a reference to the [`YearTable`] used
/// for calendar lookups and the base offset applied to inputs that carry no
/// zone of their own. It holds no other state, so one parser can be shared
/// freely between threads.
///
/// # Examples
///
/// ```
/// use parsetime::Parser;
///
/// // Inputs without an explicit zone are read as UTC+09:00.
/// let tokyo = Parser::new().base_offset(9 * 3600);
///
/// let local = tokyo.parse("2023-02-28 15:00:36")?;
/// let explicit = tokyo.parse("2023-02-28T06:00:36Z")?;
/// assert_eq!(local, explicit);
/// # Ok::<(), parsetime::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Parser<'t> {
    years: &'t YearTable,
    base_offset: i32,
}

impl Parser<'static> {
    /// A parser using the standard [`YearTable`] and treating zoneless
    /// inputs as UTC.
    pub const fn new() -> Self {
        Parser {
            years: &STANDARD,
            base_offset: 0,
        }
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Parser::new()
    }
}

impl<'t> Parser<'t> {
    /// A parser that resolves years through `years` instead of the standard
    /// table.
    pub const fn with_year_table(years: &'t YearTable) -> Self {
        Parser {
            years,
            base_offset: 0,
        }
    }

    /// Sets the offset, in seconds east of UTC, assumed for inputs without
    /// an explicit zone.
    ///
    /// This is typically the standard offset of a named zone, resolved once
    /// by the caller and reused across many parses.
    pub const fn base_offset(self, seconds: i32) -> Self {
        Parser {
            years: self.years,
            base_offset: seconds,
        }
    }

    /// Decodes `input` into an absolute instant.
    #[inline]
    pub fn parse(&self, input: &str) -> Result<Timestamp, Error> {
        self.parse_bytes(input.as_bytes())
    }

    /// Decodes raw bytes into an absolute instant.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<Timestamp, Error> {
        match self.decode(input) {
            Some(timestamp) => Ok(timestamp),
            None => {
                tracing::trace!(input = %String::from_utf8_lossy(input), "rejected timestamp");
                Err(Error::INVALID)
            }
        }
    }

    /// Like [`parse`](Self::parse), tagging the result with `zone`.
    ///
    /// `base_offset` replaces this parser's own base offset for the call and
    /// is recorded on the result for display.
    #[inline]
    pub fn parse_in_zone<Z>(
        &self,
        input: &str,
        zone: Z,
        base_offset: i32,
    ) -> Result<Zoned<Z>, Error> {
        self.parse_bytes_in_zone(input.as_bytes(), zone, base_offset)
    }

    /// Like [`parse_bytes`](Self::parse_bytes), tagging the result with
    /// `zone`.
    pub fn parse_bytes_in_zone<Z>(
        &self,
        input: &[u8],
        zone: Z,
        base_offset: i32,
    ) -> Result<Zoned<Z>, Error> {
        let timestamp = self.base_offset(base_offset).parse_bytes(input)?;
        Ok(Zoned::new(timestamp, zone, base_offset))
    }

    fn decode(&self, input: &[u8]) -> Option<Timestamp> {
        let (fields, leap, year_days, end) = self.scan_fields(input)?;

        let (nanos, end) = match input.get(end) {
            Some(b'.' | b',') => scan_fraction(input, end + 1)?,
            _ => (0, end),
        };

        let offset = match input.get(end..) {
            Some([]) | None => self.base_offset,
            Some(zone) => scan_offset(zone)?,
        };

        to_timestamp(&fields, leap, year_days, nanos, offset)
    }

    /// Reads the date and, when present, the time of day. Returns the
    /// fields, the year's leap flag and day offset, and the index just past
    /// the last field read.
    #[inline(always)]
    fn scan_fields(&self, input: &[u8]) -> Option<(Fields, bool, i64, usize)> {
        if input.len() < DATE_LEN || input[4] != b'-' || input[7] != b'-' {
            return None;
        }
        let year = digits(input, 0, 4)? as u16;
        let (year_days, leap) = self.years.lookup(year);
        let month = field(input, 5, 1, 12)? as u8;
        let day = field(input, 8, 1, calendar::days_in_month(month, leap) as u32)? as u8;

        let mut fields = Fields {
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        };

        if input.len() == DATE_LEN {
            return Some((fields, leap, year_days, DATE_LEN));
        }

        if input.len() < DATE_TIME_LEN
            || !matches!(input[10], b'T' | b' ')
            || input[13] != b':'
            || input[16] != b':'
        {
            return None;
        }
        fields.hour = field(input, 11, 0, 23)? as u8;
        fields.minute = field(input, 14, 0, 59)? as u8;
        fields.second = field(input, 17, 0, 59)? as u8;

        Some((fields, leap, year_days, DATE_TIME_LEN))
    }
}

/// Decodes `width` ASCII digits starting at `at`, validating each byte as it
/// is accumulated.
#[inline(always)]
fn digits(input: &[u8], at: usize, width: usize) -> Option<u32> {
    let bytes = input.get(at..at + width)?;
    let mut value = 0u32;
    for &byte in bytes {
        let digit = byte.wrapping_sub(b'0');
        if digit > 9 {
            return None;
        }
        value = value * 10 + digit as u32;
    }
    Some(value)
}

/// Decodes a two digit field and checks it lies in `min..=max`.
#[inline(always)]
fn field(input: &[u8], at: usize, min: u32, max: u32) -> Option<u32> {
    let value = digits(input, at, 2)?;
    if value < min || value > max {
        return None;
    }
    Some(value)
}

#[inline(always)]
fn is_zone_start(byte: Option<&u8>) -> bool {
    matches!(byte, Some(b'+' | b'-' | b'Z' | b'z'))
}

/// Decodes the fraction digits starting at `start`, just past the separator.
/// Returns nanoseconds and the index of the first byte after the digits.
fn scan_fraction(input: &[u8], start: usize) -> Option<(u32, usize)> {
    for width in FRACTION_WIDTHS {
        if is_zone_start(input.get(start + width)) {
            let value = digits(input, start, width)?;
            return Some((value * SCALE[width], start + width));
        }
    }

    // No zone marker at any expected width: either the input ends with the
    // fraction or it is malformed. Scan the digits that are there.
    if !input.get(start).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let mut value = 0u32;
    let mut end = start;
    while let Some(&byte) = input.get(end) {
        if !byte.is_ascii_digit() {
            break;
        }
        if end - start == MAX_FRACTION_DIGITS {
            return None;
        }
        value = value * 10 + (byte - b'0') as u32;
        end += 1;
    }
    Some((value * SCALE[end - start], end))
}

/// Decodes a trailing UTC offset into signed seconds east of UTC.
fn scan_offset(zone: &[u8]) -> Option<i32> {
    let (sign, hour, minute) = match zone {
        [b'Z' | b'z'] => return Some(0),
        [sign, _, _] => (*sign, digits(zone, 1, 2)?, 0),
        [sign, _, _, _, _] => (*sign, digits(zone, 1, 2)?, digits(zone, 3, 2)?),
        [sign, _, _, b':', _, _] => (*sign, digits(zone, 1, 2)?, digits(zone, 4, 2)?),
        _ => return None,
    };
    if hour > MAX_OFFSET_HOUR || minute > 59 {
        return None;
    }
    let seconds = (hour * 3600 + minute * 60) as i32;
    match sign {
        b'+' => Some(seconds),
        // Western offsets stop at -12:00 even though eastern ones reach
        // +14:00.
        b'-' if hour <= MAX_NEGATIVE_OFFSET_HOUR => Some(-seconds),
        _ => None,
    }
}

#[inline(always)]
fn to_timestamp(
    fields: &Fields,
    leap: bool,
    year_days: i64,
    nanos: u32,
    offset: i32,
) -> Option<Timestamp> {
    let days = year_days
        + calendar::days_before_month(fields.month, leap) as i64
        + fields.day as i64
        - 1;
    let seconds = days * SECONDS_PER_DAY
        + fields.hour as i64 * 3600
        + fields.minute as i64 * 60
        + fields.second as i64
        - offset as i64;
    // Only a far-fetched caller base offset can push the instant out of
    // range; parsed offsets never do.
    Timestamp::new(seconds, nanos)
}
