//! Stable fingerprint of a filter set, embedded in every issued cursor.
#![expect(clippy::cast_possible_truncation)]

use crate::{filter::FilterMap, value::Value};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use xxhash_rust::xxh3::Xxh3;

/// Fingerprint format version byte, fed first into every digest.
pub const FILTER_HASH_VERSION: u8 = 1;

/// Stable XXH3 seed used by filter fingerprints across releases.
pub const FILTER_HASH_SEED: u64 = 0;

///
/// FilterFingerprint
///
/// Fixed-width 64-bit digest of a canonicalized filter set. Rendered and
/// serialized as 16 lowercase hex characters.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FilterFingerprint(u64);

impl FilterFingerprint {
    #[must_use]
    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for FilterFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for FilterFingerprint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 16 {
            return Err(format!("filter fingerprint must be 16 hex chars, found {}", s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid filter fingerprint: '{s}' is not hex"));
        }

        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|err| format!("invalid filter fingerprint: {err}"))
    }
}

impl Serialize for FilterFingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for FilterFingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Hash a filter set into its fingerprint.
///
/// Keys are fed in canonical order, every value is prefixed with its stable
/// variant tag, and strings/collections are length-prefixed, so `Null`,
/// `Int(0)`, `Uint(0)`, `Text("0")` and `Bool(false)` never collide by
/// construction.
#[must_use]
pub fn hash_filters(filters: &FilterMap) -> FilterFingerprint {
    let mut h = Xxh3::with_seed(FILTER_HASH_SEED);
    feed_u8(&mut h, FILTER_HASH_VERSION);
    feed_u32(&mut h, filters.len() as u32);

    for (key, value) in filters.iter() {
        feed_u8(&mut h, 0xFD);
        feed_str(&mut h, key);
        feed_u8(&mut h, 0xFE);
        write_to_hasher(value, &mut h);
    }

    FilterFingerprint(h.digest())
}

fn feed_u8(h: &mut Xxh3, x: u8) {
    h.update(&[x]);
}
fn feed_u32(h: &mut Xxh3, x: u32) {
    h.update(&x.to_be_bytes());
}
fn feed_i32(h: &mut Xxh3, x: i32) {
    h.update(&x.to_be_bytes());
}
fn feed_i64(h: &mut Xxh3, x: i64) {
    h.update(&x.to_be_bytes());
}
fn feed_u64(h: &mut Xxh3, x: u64) {
    h.update(&x.to_be_bytes());
}
fn feed_str(h: &mut Xxh3, s: &str) {
    feed_u32(h, s.len() as u32);
    h.update(s.as_bytes());
}

fn write_to_hasher(value: &Value, h: &mut Xxh3) {
    feed_u8(h, value.tag().to_u8());

    match value {
        Value::Null => {}
        Value::Bool(b) => feed_u8(h, u8::from(*b)),
        Value::Int(i) => feed_i64(h, *i),
        Value::Uint(u) => feed_u64(h, *u),
        Value::Float(f) => h.update(&f.to_be_bytes()),
        Value::Text(s) => feed_str(h, s),
        Value::Date(d) => feed_i32(h, chrono::Datelike::num_days_from_ce(d)),
        Value::Timestamp(t) => {
            feed_i64(h, t.timestamp());
            feed_u32(h, t.timestamp_subsec_nanos());
        }
        Value::List(xs) => {
            feed_u32(h, xs.len() as u32);
            for x in xs {
                feed_u8(h, 0xFF);
                write_to_hasher(x, h);
            }
        }
        Value::Map(entries) => {
            // BTreeMap iteration is already canonical key order
            feed_u32(h, entries.len() as u32);
            for (key, value) in entries {
                feed_u8(h, 0xFD);
                feed_str(h, key);
                feed_u8(h, 0xFE);
                write_to_hasher(value, h);
            }
        }
    }
}

///
/// TESTS
///
