use crate::value::Value;

///
/// ValueTag
///
/// Stable canonical value-variant tag used by hashing surfaces.
///
/// IMPORTANT:
/// Tag values feed filter fingerprints embedded in issued cursors and must
/// not be renumbered.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Int = 3,
    Uint = 4,
    Float = 5,
    Text = 6,
    Date = 7,
    Timestamp = 8,
    List = 9,
    Map = 10,
}

impl ValueTag {
    /// Stable hash byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Uint => "Uint",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Date => "Date",
            Self::Timestamp => "Timestamp",
            Self::List => "List",
            Self::Map => "Map",
        }
    }
}

/// Stable canonical variant tag used by fingerprint encodings.
#[must_use]
pub const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Int(_) => ValueTag::Int,
        Value::Uint(_) => ValueTag::Uint,
        Value::Float(_) => ValueTag::Float,
        Value::Text(_) => ValueTag::Text,
        Value::Date(_) => ValueTag::Date,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::List(_) => ValueTag::List,
        Value::Map(_) => ValueTag::Map,
    }
}
