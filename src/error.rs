use std::fmt::{self, Debug, Display};

/// Error returned when input is not a timestamp in the accepted profile.
///
/// Every failure (a misplaced delimiter, a non-digit inside a numeric field,
/// a field out of range, an over-long fraction, an unknown offset form)
/// maps to this one value. Callers can only branch on success or failure.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    _private: (),
}

impl Error {
    pub(crate) const INVALID: Error = Error { _private: () };
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid timestamp")
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
