#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] and [`serde::Deserialize`] for [`Timestamp`].
//!
//! Timestamps serialize as RFC 3339 UTC strings and deserialize from any
//! string or byte string the parser accepts.

use std::fmt;
use std::mem::MaybeUninit;

use crate::Timestamp;

impl serde::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut buf = MaybeUninit::uninit();
        serializer.serialize_str(self.format(&mut buf))
    }
}

struct TimestampVisitor;

impl<'de> serde::de::Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp")
    }

    fn visit_str<E>(self, v: &str) -> Result<Timestamp, E>
    where
        E: serde::de::Error,
    {
        crate::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Timestamp, E>
    where
        E: serde::de::Error,
    {
        crate::parse_bytes(v).map_err(E::custom)
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(TimestampVisitor)
    }
}
