use crate::{
    cursor::{CursorDirection, CursorPayload, SeekValue},
    error::CursorError,
    filter::FilterFingerprint,
    sort::SortSignature,
};
use serde::{Deserialize, Serialize};

/// Cursor wire version written by this build.
pub const CURSOR_VERSION: u8 = 1;

///
/// CursorVersion
///
/// Wire-level cursor version owned by the token boundary, so version parsing
/// and compatibility stay in one place.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(in crate::cursor) enum CursorVersion {
    V1,
}

impl CursorVersion {
    const V1_TAG: u8 = 1;

    pub(in crate::cursor) const fn decode(raw: u8) -> Option<Self> {
        match raw {
            Self::V1_TAG => Some(Self::V1),
            _ => None,
        }
    }

    pub(in crate::cursor) const fn encode(self) -> u8 {
        match self {
            Self::V1 => Self::V1_TAG,
        }
    }
}

///
/// VersionProbe
///
/// Reads only the version tag so an unknown version is reported as such
/// rather than as a shape error.
///

#[derive(Deserialize)]
pub(in crate::cursor) struct VersionProbe {
    #[serde(rename = "v")]
    pub(in crate::cursor) version: u8,
}

///
/// CursorPayloadWire
///
/// JSON shape of a cursor. Field order is fixed by declaration order, which
/// keeps encoding deterministic.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(in crate::cursor) struct CursorPayloadWire {
    #[serde(rename = "v")]
    pub(in crate::cursor) version: u8,
    #[serde(rename = "k")]
    pub(in crate::cursor) kind: String,
    #[serde(rename = "d")]
    pub(in crate::cursor) direction: CursorDirection,
    #[serde(rename = "s")]
    pub(in crate::cursor) seek: SeekValue,
    #[serde(rename = "o")]
    pub(in crate::cursor) sort: SortSignature,
    #[serde(rename = "h")]
    pub(in crate::cursor) filters: FilterFingerprint,
}

impl CursorPayloadWire {
    pub(in crate::cursor) fn from_payload(payload: &CursorPayload, version: CursorVersion) -> Self {
        Self {
            version: version.encode(),
            kind: payload.kind.clone(),
            direction: payload.direction,
            seek: payload.seek.clone(),
            sort: payload.sort,
            filters: payload.filters,
        }
    }

    pub(in crate::cursor) fn into_payload(self) -> Result<CursorPayload, CursorError> {
        let version = CursorVersion::decode(self.version)
            .ok_or(CursorError::UnsupportedVersion { version: self.version })?;

        match version {
            CursorVersion::V1 => Ok(CursorPayload {
                version: self.version,
                kind: self.kind,
                direction: self.direction,
                seek: self.seek,
                sort: self.sort,
                filters: self.filters,
            }),
        }
    }
}
