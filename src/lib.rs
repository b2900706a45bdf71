//! A fast decoder for RFC 3339 timestamps that goes straight from bytes to
//! an absolute instant.
//!
//! Almost every timestamp in logs, databases and wire formats shares a
//! handful of fixed shapes: a fixed-width date, a fixed-width time, an
//! optional fraction and an optional UTC offset. This crate decodes exactly
//! those shapes, without allocating and without a general layout engine, into
//! a [`Timestamp`] (seconds since the Unix epoch plus nanoseconds).
//!
//! Accepted inputs:
//!
//! ```text
//! 2006-01-02
//! 2006-01-02T15:04:05
//! 2006-01-02 15:04:05
//! 2006-01-02T15:04:05.999999999     (1 to 9 digits, '.' or ',')
//! 2006-01-02T15:04:05Z              ('Z' or 'z')
//! 2006-01-02T15:04:05+08:00         (also +0800 and +08)
//! ```
//!
//! Inputs without an offset are read as UTC, or at a caller supplied base
//! offset. Any deviation from these shapes, or any field out of range, is
//! reported as the single opaque [`Error`].
//!
//! # Examples
//!
//! ```
//! let a = parsetime::parse("2006-01-02T15:04:05+08:00")?;
//! let b = parsetime::parse("2006-01-02 07:04:05")?;
//! assert_eq!(a, b);
//! assert_eq!(a.as_second(), 1_136_185_445);
//!
//! // Resolve a zone's offset once, then reuse it for zoneless inputs.
//! let zoned = parsetime::parse_in_zone("2006-01-02", "Asia/Shanghai", 8 * 3600)?;
//! assert_eq!(zoned.timestamp().as_second(), 1_136_131_200);
//! assert_eq!(zoned.to_string(), "2006-01-02T00:00:00+08:00[Asia/Shanghai]");
//! # Ok::<(), parsetime::Error>(())
//! ```

mod calendar;
mod error;
mod parser;
mod timestamp;
mod year_table;

pub use error::Error;
pub use parser::Parser;
pub use timestamp::{MAX_FORMAT_LEN, Timestamp, Zoned};
pub use year_table::{YEAR_TABLE_LEN, YearTable};

#[cfg(feature = "serde")]
pub mod impl_serde;

/// Parses `text`, reading inputs without an offset as UTC.
///
/// # Examples
///
/// ```
/// let ts = parsetime::parse("2023-02-28T15:00:36.123456789Z")?;
/// assert_eq!(ts.as_second(), 1_677_596_436);
/// assert_eq!(ts.subsec_nanosecond(), 123_456_789);
///
/// assert!(parsetime::parse("2023-02-29").is_err());
/// # Ok::<(), parsetime::Error>(())
/// ```
#[inline]
pub fn parse(text: &str) -> Result<Timestamp, Error> {
    Parser::new().parse(text)
}

/// Parses raw bytes, reading inputs without an offset as UTC.
#[inline]
pub fn parse_bytes(bytes: &[u8]) -> Result<Timestamp, Error> {
    Parser::new().parse_bytes(bytes)
}

/// Parses `text`, reading inputs without an offset at `base_offset` seconds
/// east of UTC, and tags the result with `zone`.
///
/// `zone` is never interpreted. It is carried on the returned [`Zoned`] so
/// the caller can display the instant in the zone it resolved `base_offset`
/// from.
#[inline]
pub fn parse_in_zone<Z>(text: &str, zone: Z, base_offset: i32) -> Result<Zoned<Z>, Error> {
    Parser::new().parse_in_zone(text, zone, base_offset)
}

/// Byte-slice counterpart of [`parse_in_zone`].
#[inline]
pub fn parse_bytes_in_zone<Z>(bytes: &[u8], zone: Z, base_offset: i32) -> Result<Zoned<Z>, Error> {
    Parser::new().parse_bytes_in_zone(bytes, zone, base_offset)
}
