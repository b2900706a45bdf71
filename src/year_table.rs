use crate::calendar;

/// Number of consecutive years a [`YearTable`] covers.
pub const YEAR_TABLE_LEN: usize = 100;

#[derive(Clone, Copy)]
struct YearEntry {
    days: i32,
    leap: bool,
}

/// Precomputed day offsets for a window of consecutive years.
///
/// Nearly every timestamp seen in practice falls within a few decades of the
/// present, so a [`Parser`](crate::Parser) looks the year up here and only
/// falls back to the full cycle decomposition outside the window.
///
/// Construction is a `const fn`: the default table returned by
/// [`YearTable::standard`] lives in a `static` and is computed at compile
/// time. A table is never mutated once built, so a single instance can be
/// shared by reference across any number of threads.
///
/// # Examples
///
/// ```
/// use parsetime::{Parser, YearTable};
///
/// static MODERN: YearTable = YearTable::new(2000);
///
/// let parser = Parser::with_year_table(&MODERN);
/// let ts = parser.parse("2024-02-29T12:00:00Z")?;
/// assert_eq!(ts.as_second(), 1_709_208_000);
/// # Ok::<(), parsetime::Error>(())
/// ```
#[derive(Clone)]
pub struct YearTable {
    first_year: u16,
    entries: [YearEntry; YEAR_TABLE_LEN],
}

pub(crate) static STANDARD: YearTable = YearTable::new(1970);

impl YearTable {
    /// Builds a table covering `first_year` through
    /// `first_year + YEAR_TABLE_LEN - 1`.
    pub const fn new(first_year: u16) -> YearTable {
        let mut entries = [YearEntry {
            days: 0,
            leap: false,
        }; YEAR_TABLE_LEN];
        let mut i = 0;
        while i < YEAR_TABLE_LEN {
            let year = first_year as i64 + i as i64;
            entries[i] = YearEntry {
                days: calendar::days_since_unix_epoch(year) as i32,
                leap: calendar::is_leap_year(year),
            };
            i += 1;
        }
        YearTable {
            first_year,
            entries,
        }
    }

    /// The shared table starting at the Unix epoch year, 1970.
    #[inline]
    pub fn standard() -> &'static YearTable {
        &STANDARD
    }

    /// First year covered by the table.
    pub fn first_year(&self) -> u16 {
        self.first_year
    }

    /// Number of years covered by the table.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        YEAR_TABLE_LEN
    }

    /// Returns `true` if `year` is answered from the table.
    pub fn contains(&self, year: u16) -> bool {
        self.entry(year).is_some()
    }

    /// Days from 1970-01-01 to January 1st of `year`.
    pub fn days_since_epoch(&self, year: u16) -> i64 {
        self.lookup(year).0
    }

    /// Whether `year` has a February 29th.
    pub fn is_leap_year(&self, year: u16) -> bool {
        self.lookup(year).1
    }

    #[inline(always)]
    fn entry(&self, year: u16) -> Option<&YearEntry> {
        self.entries
            .get((year as usize).wrapping_sub(self.first_year as usize))
    }

    #[inline(always)]
    pub(crate) fn lookup(&self, year: u16) -> (i64, bool) {
        match self.entry(year) {
            Some(entry) => (entry.days as i64, entry.leap),
            None => {
                let year = year as i64;
                (
                    calendar::days_since_unix_epoch(year),
                    calendar::is_leap_year(year),
                )
            }
        }
    }
}

impl Default for YearTable {
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl std::fmt::Debug for YearTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YearTable")
            .field("first_year", &self.first_year)
            .field("len", &YEAR_TABLE_LEN)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_window() {
        let table = YearTable::standard();
        assert_eq!(table.first_year(), 1970);
        assert_eq!(table.len(), 100);
        assert!(table.contains(1970));
        assert!(table.contains(2069));
        assert!(!table.contains(1969));
        assert!(!table.contains(2070));
        assert!(!table.contains(0));
    }

    #[test]
    fn cached_and_computed_agree() {
        let table = YearTable::standard();
        for year in 0..=9999u16 {
            let y = year as i64;
            assert_eq!(
                table.lookup(year),
                (
                    calendar::days_since_unix_epoch(y),
                    calendar::is_leap_year(y)
                ),
                "year {year}"
            );
        }
    }

    #[test]
    fn custom_window() {
        static TABLE: YearTable = YearTable::new(1900);
        assert!(TABLE.contains(1900));
        assert!(TABLE.contains(1999));
        assert!(!TABLE.contains(2000));
        assert_eq!(TABLE.days_since_epoch(1900), -25567);
        assert!(!TABLE.is_leap_year(1900));
        assert_eq!(TABLE.days_since_epoch(2000), 10957);
        assert!(TABLE.is_leap_year(2000));
    }

    #[test]
    fn window_near_u16_max_does_not_wrap() {
        let table = YearTable::new(65500);
        assert!(table.contains(65535));
        assert!(!table.contains(10));
        assert_eq!(table.days_since_epoch(10), calendar::days_since_unix_epoch(10));
        assert!(!table.is_leap_year(9));
    }
}
