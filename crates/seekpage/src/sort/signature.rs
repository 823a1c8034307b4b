#![expect(clippy::cast_possible_truncation)]

use crate::sort::{NullOrdering, SortDirection, SortSpec};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};

const SORT_SIGNATURE_VERSION: u8 = 1;

///
/// SortSignature
///
/// Stable, deterministic digest of a total sort order and its NULL policy.
/// Embedded in cursors so a cursor issued under one ordering is refused
/// under another.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SortSignature([u8; 32]);

impl SortSignature {
    pub(crate) fn compute(spec: &SortSpec, nulls: NullOrdering) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([SORT_SIGNATURE_VERSION]);
        hasher.update((spec.len() as u32).to_be_bytes());

        for criterion in spec.iter() {
            hasher.update((criterion.field.len() as u32).to_be_bytes());
            hasher.update(criterion.field.as_bytes());
            hasher.update([direction_tag(criterion.direction)]);
        }
        hasher.update([nulls_tag(nulls)]);

        Self(hasher.finalize().into())
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

const fn direction_tag(direction: SortDirection) -> u8 {
    match direction {
        SortDirection::Asc => 0x01,
        SortDirection::Desc => 0x02,
    }
}

const fn nulls_tag(nulls: NullOrdering) -> u8 {
    match nulls {
        NullOrdering::NullsHigh => 0x01,
        NullOrdering::NullsLow => 0x02,
    }
}

impl fmt::Display for SortSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl FromStr for SortSignature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(format!("sort signature must be 64 hex chars, found {}", s.len()));
        }
        if let Some(pos) = s.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex at position {}", pos + 1));
        }

        let mut out = [0u8; 32];
        for (idx, slot) in out.iter_mut().enumerate() {
            let pair = s
                .get(idx * 2..idx * 2 + 2)
                .ok_or_else(|| format!("invalid hex at position {}", idx * 2 + 1))?;
            *slot = u8::from_str_radix(pair, 16)
                .map_err(|_| format!("invalid hex at position {}", idx * 2 + 1))?;
        }

        Ok(Self(out))
    }
}

impl Serialize for SortSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for SortSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::SortSignature;
    use crate::sort::{NullOrdering, SortCriterion, SortSpec};

    fn spec() -> SortSpec {
        SortSpec::new(vec![SortCriterion::desc("amount"), SortCriterion::asc("id")])
    }

    #[test]
    fn signature_is_deterministic() {
        assert_eq!(
            spec().signature(NullOrdering::NullsHigh),
            spec().signature(NullOrdering::NullsHigh)
        );
    }

    #[test]
    fn signature_tracks_direction_field_and_null_policy() {
        let base = spec().signature(NullOrdering::NullsHigh);

        let flipped = SortSpec::new(vec![SortCriterion::asc("amount"), SortCriterion::asc("id")]);
        assert_ne!(base, flipped.signature(NullOrdering::NullsHigh));

        let renamed = SortSpec::new(vec![SortCriterion::desc("total"), SortCriterion::asc("id")]);
        assert_ne!(base, renamed.signature(NullOrdering::NullsHigh));

        assert_ne!(base, spec().signature(NullOrdering::NullsLow));
    }

    #[test]
    fn field_boundaries_are_length_prefixed() {
        let joined = SortSpec::new(vec![SortCriterion::asc("ab"), SortCriterion::asc("c")]);
        let split = SortSpec::new(vec![SortCriterion::asc("a"), SortCriterion::asc("bc")]);

        assert_ne!(
            joined.signature(NullOrdering::NullsHigh),
            split.signature(NullOrdering::NullsHigh)
        );
    }

    #[test]
    fn hex_round_trip() {
        let signature = spec().signature(NullOrdering::NullsHigh);
        let parsed: SortSignature = signature.as_hex().parse().expect("hex should parse");

        assert_eq!(parsed, signature);
        assert!("zz".repeat(32).parse::<SortSignature>().is_err());
    }

    #[test]
    fn hex_parse_rejects_sign_prefixed_pairs() {
        let hex = spec().signature(NullOrdering::NullsHigh).as_hex();
        let signed = format!("+{}", &hex[1..]);
        assert!(signed.parse::<SortSignature>().is_err());

        let inner = format!("{}+f{}", &hex[..10], &hex[12..]);
        assert_eq!(inner.len(), 64);
        assert!(inner.parse::<SortSignature>().is_err());
    }
}
