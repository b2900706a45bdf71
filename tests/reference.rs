//! Cross-checks the decoder against chrono on randomly generated inputs.

use chrono::{DateTime, NaiveDate};
use parsetime::{Parser, Timestamp};

fn chrono_instant(
    (year, month, day): (i32, u32, u32),
    (hour, minute, second): (u32, u32, u32),
    nanos: u32,
    offset: i64,
) -> Option<(i64, u32)> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_nano_opt(hour, minute, second, nanos)?;
    let utc = naive.and_utc();
    Some((utc.timestamp() - offset, utc.timestamp_subsec_nanos()))
}

fn split(ts: Timestamp) -> (i64, u32) {
    (ts.as_second(), ts.subsec_nanosecond())
}

#[test]
fn calendar_validity_matches_chrono() {
    let mut rng = oorandom::Rand32::new(7);
    let iterations = if cfg!(miri) { 50 } else { 20000 };
    for _ in 0..iterations {
        let year = rng.rand_range(0..10000) as i32;
        let month = rng.rand_range(1..13);
        let day = rng.rand_range(1..32);
        let text = format!("{year:04}-{month:02}-{day:02}");

        let expected = chrono_instant((year, month, day), (0, 0, 0), 0, 0);
        let actual = parsetime::parse(&text).ok().map(split);
        assert_eq!(actual, expected, "for {text:?}");
    }
}

#[test]
fn rfc3339_matches_chrono() {
    let mut rng = oorandom::Rand32::new(11);
    let iterations = if cfg!(miri) { 50 } else { 20000 };
    for _ in 0..iterations {
        let year = rng.rand_range(0..10000);
        let month = rng.rand_range(1..13);
        let day = rng.rand_range(1..29);
        let hour = rng.rand_range(0..24);
        let minute = rng.rand_range(0..60);
        let second = rng.rand_range(0..60);

        let mut text =
            format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}");
        let digits = rng.rand_range(0..10);
        if digits > 0 {
            let frac = rng.rand_range(0..10u32.pow(digits));
            text += &format!(".{frac:0>width$}", width = digits as usize);
        }
        if rng.rand_u32().is_multiple_of(4) {
            text.push('Z');
        } else {
            let sign = if rng.rand_u32().is_multiple_of(2) { '+' } else { '-' };
            let max = if sign == '+' { 15 } else { 13 };
            let oh = rng.rand_range(0..max);
            let om = rng.rand_range(0..60);
            text += &format!("{sign}{oh:02}:{om:02}");
        }

        let expected = DateTime::parse_from_rfc3339(&text)
            .map(|dt| (dt.timestamp(), dt.timestamp_subsec_nanos()))
            .unwrap();
        let actual = parsetime::parse(&text).map(split);
        assert_eq!(actual, Ok(expected), "for {text:?}");
    }
}

#[test]
fn compact_offsets_match_chrono() {
    let mut rng = oorandom::Rand32::new(13);
    let iterations = if cfg!(miri) { 50 } else { 10000 };
    for _ in 0..iterations {
        let year = rng.rand_range(0..10000) as i32;
        let month = rng.rand_range(1..13);
        let day = rng.rand_range(1..29);
        let hour = rng.rand_range(0..24);
        let minute = rng.rand_range(0..60);
        let second = rng.rand_range(0..60);
        let oh = rng.rand_range(0..13) as i64;
        let compact = rng.rand_u32().is_multiple_of(2);
        let om = if compact { rng.rand_range(0..60) as i64 } else { 0 };
        let negative = rng.rand_u32().is_multiple_of(2);

        let sign = if negative { '-' } else { '+' };
        let sep = if rng.rand_u32().is_multiple_of(2) { 'T' } else { ' ' };
        let mut text = format!(
            "{year:04}-{month:02}-{day:02}{sep}{hour:02}:{minute:02}:{second:02}{sign}{oh:02}"
        );
        if compact {
            text += &format!("{om:02}");
        }

        let magnitude = oh * 3600 + om * 60;
        let offset = if negative { -magnitude } else { magnitude };
        let expected = chrono_instant(
            (year, month, day),
            (hour, minute, second),
            0,
            offset,
        );
        let actual = parsetime::parse(&text).ok().map(split);
        assert_eq!(actual, expected, "for {text:?}");
    }
}

#[test]
fn base_offset_matches_chrono() {
    let mut rng = oorandom::Rand32::new(17);
    let iterations = if cfg!(miri) { 50 } else { 10000 };
    for _ in 0..iterations {
        let year = rng.rand_range(0..10000) as i32;
        let month = rng.rand_range(1..13);
        let day = rng.rand_range(1..29);
        let hour = rng.rand_range(0..24);
        let minute = rng.rand_range(0..60);
        let second = rng.rand_range(0..60);
        let offset = rng.rand_range(0..(26 * 3600)) as i32 - 12 * 3600;

        let text = format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02},5");
        let expected = chrono_instant(
            (year, month, day),
            (hour, minute, second),
            500_000_000,
            offset as i64,
        );
        let actual = Parser::new()
            .base_offset(offset)
            .parse(&text)
            .ok()
            .map(split);
        assert_eq!(actual, expected, "for {text:?}");
    }
}
