use std::mem::MaybeUninit;
use std::time::{Duration, SystemTime};

use crate::Error;
use crate::calendar::{self, SECONDS_PER_DAY};

#[cfg(test)]
#[path = "./timestamp_tests.rs"]
mod tests;

/// Size of the buffer [`Timestamp::format`] and friends write into.
pub const MAX_FORMAT_LEN: usize = 48;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Largest offset magnitude that formats as `±HH:MM`, 99:59.
const MAX_FORMAT_OFFSET: i32 = 99 * 3600 + 59 * 60;

/// An absolute instant: whole seconds since 1970-01-01T00:00:00Z plus a
/// nanosecond remainder.
///
/// The remainder is always in `0..1_000_000_000` and counts forward from
/// `seconds`, so instants before the epoch have negative seconds and a
/// non-negative remainder.
///
/// The supported range spans January 1st of year -9999 through the end of
/// year 10000, wide enough to hold every 4-digit year shifted by any offset
/// the parser accepts.
///
/// # Examples
///
/// ```
/// use std::mem::MaybeUninit;
/// use parsetime::Timestamp;
///
/// let ts: Timestamp = "2006-01-02T15:04:05.999999999+08:00".parse()?;
/// assert_eq!(ts.as_second(), 1_136_185_445);
/// assert_eq!(ts.subsec_nanosecond(), 999_999_999);
///
/// let mut buf = MaybeUninit::uninit();
/// assert_eq!(ts.format(&mut buf), "2006-01-02T07:04:05.999999999Z");
/// # Ok::<(), parsetime::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    /// -9999-01-01T00:00:00Z.
    pub const MIN: Timestamp = Timestamp {
        seconds: calendar::days_since_unix_epoch(-9999) * SECONDS_PER_DAY,
        nanos: 0,
    };

    /// 10000-12-31T23:59:59.999999999Z.
    pub const MAX: Timestamp = Timestamp {
        seconds: calendar::days_since_unix_epoch(10001) * SECONDS_PER_DAY - 1,
        nanos: NANOS_PER_SECOND - 1,
    };

    /// Creates a timestamp from seconds since the Unix epoch and a
    /// nanosecond remainder.
    ///
    /// Returns `None` if `nanos` is one second or more, or if the instant
    /// falls outside [`Timestamp::MIN`]..=[`Timestamp::MAX`].
    pub const fn new(seconds: i64, nanos: u32) -> Option<Timestamp> {
        if nanos >= NANOS_PER_SECOND || seconds < Self::MIN.seconds || seconds > Self::MAX.seconds
        {
            return None;
        }
        Some(Timestamp { seconds, nanos })
    }

    /// Whole seconds since the Unix epoch.
    #[inline]
    pub const fn as_second(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds past [`as_second`](Self::as_second), in
    /// `0..1_000_000_000`.
    #[inline]
    pub const fn subsec_nanosecond(&self) -> u32 {
        self.nanos
    }

    /// Milliseconds since the Unix epoch, rounded toward negative infinity.
    pub const fn as_millisecond(&self) -> i64 {
        self.seconds * 1000 + (self.nanos / 1_000_000) as i64
    }

    /// Nanoseconds since the Unix epoch.
    pub const fn as_nanosecond(&self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }

    /// Writes this instant as an RFC 3339 UTC timestamp ending in `Z`.
    ///
    /// Fractional seconds are printed with trailing zeros removed and
    /// omitted entirely when zero. Years outside `0000..=9999` use the
    /// signed extended form (`-0001`, `+10000`).
    pub fn format<'a>(&self, buf: &'a mut MaybeUninit<[u8; MAX_FORMAT_LEN]>) -> &'a str {
        self.format_with_offset(0, buf)
    }

    /// Writes this instant as the civil time at `offset_seconds` east of UTC,
    /// followed by the offset as `±HH:MM` (or `Z` when the offset is zero).
    ///
    /// Offset seconds below a whole minute are dropped from the suffix but
    /// still applied to the civil time. Offsets beyond ±99:59 are clamped.
    pub fn format_with_offset<'a>(
        &self,
        offset_seconds: i32,
        buf: &'a mut MaybeUninit<[u8; MAX_FORMAT_LEN]>,
    ) -> &'a str {
        let offset = offset_seconds.clamp(-MAX_FORMAT_OFFSET, MAX_FORMAT_OFFSET);
        let local = self.seconds + offset as i64;
        let (year, month, day) = calendar::civil_from_days(local.div_euclid(SECONDS_PER_DAY));
        let second_of_day = local.rem_euclid(SECONDS_PER_DAY) as u32;

        let ptr = buf.as_mut_ptr() as *mut u8;
        let mut pos: usize = 0;

        // SAFETY: the longest output, an extended year with a full fraction
        // and an offset, is well under MAX_FORMAT_LEN bytes, and every byte
        // written is ASCII.
        unsafe {
            write_year(ptr, &mut pos, year);
            write_byte(ptr, &mut pos, b'-');
            write_2(ptr, &mut pos, month);
            write_byte(ptr, &mut pos, b'-');
            write_2(ptr, &mut pos, day);
            write_byte(ptr, &mut pos, b'T');
            write_2(ptr, &mut pos, (second_of_day / 3600) as u8);
            write_byte(ptr, &mut pos, b':');
            write_2(ptr, &mut pos, (second_of_day / 60 % 60) as u8);
            write_byte(ptr, &mut pos, b':');
            write_2(ptr, &mut pos, (second_of_day % 60) as u8);

            if self.nanos != 0 {
                write_byte(ptr, &mut pos, b'.');
                write_frac(ptr, &mut pos, self.nanos);
            }

            if offset / 60 == 0 {
                write_byte(ptr, &mut pos, b'Z');
            } else {
                let (sign, abs) = if offset < 0 {
                    (b'-', offset.unsigned_abs())
                } else {
                    (b'+', offset as u32)
                };
                write_byte(ptr, &mut pos, sign);
                write_2(ptr, &mut pos, (abs / 3600) as u8);
                write_byte(ptr, &mut pos, b':');
                write_2(ptr, &mut pos, (abs / 60 % 60) as u8);
            }

            std::str::from_utf8_unchecked(std::slice::from_raw_parts(ptr, pos))
        }
    }
}

#[inline(always)]
unsafe fn write_byte(ptr: *mut u8, pos: &mut usize, b: u8) {
    unsafe {
        *ptr.add(*pos) = b;
    }
    *pos += 1;
}

#[inline(always)]
unsafe fn write_2(ptr: *mut u8, pos: &mut usize, val: u8) {
    unsafe {
        *ptr.add(*pos) = b'0' + val / 10;
        *ptr.add(*pos + 1) = b'0' + val % 10;
    }
    *pos += 2;
}

#[inline(always)]
unsafe fn write_4(ptr: *mut u8, pos: &mut usize, val: u16) {
    unsafe {
        *ptr.add(*pos) = b'0' + (val / 1000) as u8;
        *ptr.add(*pos + 1) = b'0' + ((val / 100) % 10) as u8;
        *ptr.add(*pos + 2) = b'0' + ((val / 10) % 10) as u8;
        *ptr.add(*pos + 3) = b'0' + (val % 10) as u8;
    }
    *pos += 4;
}

unsafe fn write_year(ptr: *mut u8, pos: &mut usize, year: i64) {
    unsafe {
        if (0..=9999).contains(&year) {
            write_4(ptr, pos, year as u16);
            return;
        }
        write_byte(ptr, pos, if year < 0 { b'-' } else { b'+' });
        let abs = year.unsigned_abs();
        if abs >= 10_000 {
            write_byte(ptr, pos, b'0' + (abs / 10_000 % 10) as u8);
        }
        write_4(ptr, pos, (abs % 10_000) as u16);
    }
}

/// Writes all nine digits of `nanos` but only advances past the significant
/// ones.
#[inline(always)]
unsafe fn write_frac(ptr: *mut u8, pos: &mut usize, nanos: u32) {
    let mut digits = 9usize;
    let mut trimmed = nanos;
    while trimmed % 10 == 0 {
        trimmed /= 10;
        digits -= 1;
    }
    let mut val = nanos;
    let mut i: usize = 8;
    loop {
        unsafe {
            *ptr.add(*pos + i) = b'0' + (val % 10) as u8;
        }
        val /= 10;
        if i == 0 {
            break;
        }
        i -= 1;
    }
    *pos += digits;
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = MaybeUninit::uninit();
        f.write_str(self.format(&mut buf))
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::str::FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl TryFrom<SystemTime> for Timestamp {
    type Error = Error;

    fn try_from(time: SystemTime) -> Result<Self, Self::Error> {
        let (seconds, nanos) = match time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => {
                let seconds = i64::try_from(after.as_secs()).map_err(|_| Error::INVALID)?;
                (seconds, after.subsec_nanos())
            }
            Err(err) => {
                let before = err.duration();
                let seconds = i64::try_from(before.as_secs()).map_err(|_| Error::INVALID)?;
                match before.subsec_nanos() {
                    0 => (-seconds, 0),
                    nanos => (-seconds - 1, NANOS_PER_SECOND - nanos),
                }
            }
        };
        Timestamp::new(seconds, nanos).ok_or(Error::INVALID)
    }
}

impl TryFrom<Timestamp> for SystemTime {
    type Error = Error;

    fn try_from(ts: Timestamp) -> Result<Self, Self::Error> {
        let whole = Duration::from_secs(ts.seconds.unsigned_abs());
        let base = if ts.seconds < 0 {
            SystemTime::UNIX_EPOCH.checked_sub(whole)
        } else {
            SystemTime::UNIX_EPOCH.checked_add(whole)
        };
        base.and_then(|time| time.checked_add(Duration::from_nanos(ts.nanos as u64)))
            .ok_or(Error::INVALID)
    }
}

/// A [`Timestamp`] tagged with the zone it was parsed for.
///
/// Returned by [`parse_in_zone`](crate::parse_in_zone). The zone value is
/// opaque to this crate: it is whatever handle the caller resolved its base
/// offset from (a zone name, a database entry, ...). The offset is the base
/// offset that was supplied alongside it and is used when displaying the
/// civil time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Zoned<Z> {
    timestamp: Timestamp,
    offset_seconds: i32,
    zone: Z,
}

impl<Z> Zoned<Z> {
    /// Tags `timestamp` with `zone`, displayed at `offset_seconds` east of
    /// UTC.
    pub const fn new(timestamp: Timestamp, zone: Z, offset_seconds: i32) -> Zoned<Z> {
        Zoned {
            timestamp,
            offset_seconds,
            zone,
        }
    }

    /// The absolute instant, independent of the zone.
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The zone value supplied by the caller.
    #[inline]
    pub fn zone(&self) -> &Z {
        &self.zone
    }

    /// The zone's offset from UTC in seconds, as supplied by the caller.
    #[inline]
    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    pub fn into_parts(self) -> (Timestamp, Z) {
        (self.timestamp, self.zone)
    }

    /// Writes the civil time in this zone followed by its offset.
    pub fn format<'a>(&self, buf: &'a mut MaybeUninit<[u8; MAX_FORMAT_LEN]>) -> &'a str {
        self.timestamp.format_with_offset(self.offset_seconds, buf)
    }
}

impl<Z: std::fmt::Display> std::fmt::Display for Zoned<Z> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = MaybeUninit::uninit();
        f.write_str(self.format(&mut buf))?;
        write!(f, "[{}]", self.zone)
    }
}
