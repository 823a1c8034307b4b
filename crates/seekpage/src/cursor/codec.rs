use crate::{
    cursor::{
        CursorPayload,
        wire::{CursorPayloadWire, CursorVersion, VersionProbe},
    },
    error::CursorError,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Maximum accepted cursor token length, checked before any decoding work.
pub const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

/// Encode a cursor payload into an opaque base64url token.
///
/// Encoding is deterministic: equal payloads produce identical tokens.
pub fn encode_cursor(payload: &CursorPayload) -> Result<String, CursorError> {
    let wire = CursorPayloadWire::from_payload(payload, CursorVersion::V1);
    let json = serde_json::to_vec(&wire).map_err(|err| CursorError::Encode(err.to_string()))?;

    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode an opaque cursor token.
///
/// Surrounding whitespace is ignored. Padded base64 is rejected.
pub fn decode_cursor(token: &str) -> Result<CursorPayload, CursorError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|err| CursorError::Base64(err.to_string()))?;

    let probe: VersionProbe =
        serde_json::from_slice(&bytes).map_err(|err| CursorError::Payload(err.to_string()))?;
    if CursorVersion::decode(probe.version).is_none() {
        return Err(CursorError::UnsupportedVersion {
            version: probe.version,
        });
    }

    let wire: CursorPayloadWire =
        serde_json::from_slice(&bytes).map_err(|err| CursorError::Payload(err.to_string()))?;

    wire.into_payload()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{MAX_CURSOR_TOKEN_LEN, decode_cursor, encode_cursor};
    use crate::{
        cursor::{CursorDirection, CursorPayload, SeekValue},
        error::CursorError,
        filter::FilterMap,
        sort::{NullOrdering, SortCriterion, SortSpec},
        value::Value,
    };
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    fn spec() -> SortSpec {
        SortSpec::new(vec![SortCriterion::desc("amount"), SortCriterion::asc("id")])
    }

    fn payload(seek: SeekValue) -> CursorPayload {
        CursorPayload::new(
            "payments",
            CursorDirection::Forward,
            seek,
            spec().signature(NullOrdering::NullsHigh),
            FilterMap::new().with("status", "open").fingerprint(),
        )
    }

    fn sample() -> CursorPayload {
        payload(SeekValue::new(vec![
            ("amount".to_string(), Value::Int(100)),
            ("id".to_string(), Value::from("b")),
        ]))
    }

    fn raw_token(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    #[test]
    fn encode_decode_round_trip_preserves_payload() {
        let original = sample();
        let token = encode_cursor(&original).expect("cursor should encode");
        let decoded = decode_cursor(&token).expect("cursor should decode");

        assert_eq!(decoded, original);
        assert_eq!(decoded.version(), 1);
    }

    #[test]
    fn encoding_is_deterministic_and_url_safe() {
        let first = encode_cursor(&sample()).expect("cursor should encode");
        let second = encode_cursor(&sample()).expect("cursor should encode");

        assert_eq!(first, second);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token should be unpadded base64url: {first}"
        );
    }

    #[test]
    fn decode_trims_surrounding_whitespace() {
        let token = encode_cursor(&sample()).expect("cursor should encode");
        let decoded = decode_cursor(&format!("  {token}\n")).expect("trimmed cursor should decode");

        assert_eq!(decoded, sample());
    }

    #[test]
    fn decode_rejects_empty_and_whitespace_tokens() {
        assert_eq!(decode_cursor("").expect_err("empty"), CursorError::Empty);
        assert_eq!(decode_cursor("   ").expect_err("blank"), CursorError::Empty);
    }

    #[test]
    fn decode_rejects_oversized_token_before_decoding() {
        let token = "A".repeat(MAX_CURSOR_TOKEN_LEN + 1);

        assert_eq!(
            decode_cursor(&token).expect_err("oversized token"),
            CursorError::TooLong {
                len: MAX_CURSOR_TOKEN_LEN + 1,
                max: MAX_CURSOR_TOKEN_LEN,
            }
        );
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        let err = decode_cursor("not*base64!").expect_err("invalid alphabet");
        assert!(matches!(err, CursorError::Base64(_)), "got {err:?}");

        let token = encode_cursor(&sample()).expect("cursor should encode");
        let err = decode_cursor(&format!("{token}==")).expect_err("padding is rejected");
        assert!(matches!(err, CursorError::Base64(_)), "got {err:?}");
    }

    #[test]
    fn decode_rejects_non_json_and_wrong_shape() {
        let err = decode_cursor(&raw_token("hello")).expect_err("not json");
        assert!(matches!(err, CursorError::Payload(_)), "got {err:?}");

        let err = decode_cursor(&raw_token(r#"{"v":1,"k":"payments"}"#)).expect_err("missing fields");
        assert!(matches!(err, CursorError::Payload(_)), "got {err:?}");
    }

    #[test]
    fn decode_rejects_unknown_fields() {
        let token = encode_cursor(&sample()).expect("cursor should encode");
        let bytes = URL_SAFE_NO_PAD.decode(token).expect("token should be base64");
        let mut json: serde_json::Value = serde_json::from_slice(&bytes).expect("token is json");
        json["x"] = serde_json::json!(1);

        let err = decode_cursor(&raw_token(&json.to_string())).expect_err("unknown field");
        assert!(matches!(err, CursorError::Payload(_)), "got {err:?}");
    }

    #[test]
    fn decode_reports_unsupported_version_before_shape() {
        let err = decode_cursor(&raw_token(r#"{"v":9,"anything":true}"#))
            .expect_err("future version");

        assert_eq!(err, CursorError::UnsupportedVersion { version: 9 });
    }

    #[test]
    fn decode_rejects_bad_signature_and_fingerprint_encodings() {
        let token = encode_cursor(&sample()).expect("cursor should encode");
        let bytes = URL_SAFE_NO_PAD.decode(token).expect("token should be base64");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("token is json");

        let mut bad_sig = json.clone();
        bad_sig["o"] = serde_json::json!("abc");
        let err = decode_cursor(&raw_token(&bad_sig.to_string())).expect_err("short signature");
        assert!(matches!(err, CursorError::Payload(_)), "got {err:?}");

        let mut bad_hash = json;
        bad_hash["h"] = serde_json::json!(42);
        let err = decode_cursor(&raw_token(&bad_hash.to_string())).expect_err("numeric hash");
        assert!(matches!(err, CursorError::Payload(_)), "got {err:?}");
    }

    #[test]
    fn null_seek_values_survive_round_trip() {
        let original = payload(SeekValue::new(vec![
            ("amount".to_string(), Value::Null),
            ("id".to_string(), Value::from("x")),
        ]));
        let token = encode_cursor(&original).expect("cursor should encode");

        assert_eq!(decode_cursor(&token).expect("cursor should decode"), original);
    }

    fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            any::<u64>().prop_map(Value::Uint),
            any::<f64>().prop_filter_map("finite floats only", Value::float),
            "[a-zA-Z0-9 ]{0,16}".prop_map(Value::Text),
            (1i32..=3_652_059).prop_filter_map("valid date", |days| {
                NaiveDate::from_num_days_from_ce_opt(days).map(Value::Date)
            }),
            (-62_000_000_000i64..253_000_000_000, 0u32..1_000_000_000).prop_filter_map(
                "valid timestamp",
                |(secs, nanos)| Utc.timestamp_opt(secs, nanos).single().map(Value::Timestamp),
            ),
        ]
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        arb_scalar().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Map),
            ]
        })
    }

    #[test]
    fn float_seek_values_survive_round_trip_exactly() {
        for raw in [
            1.071_566_039_146_582_6e-75,
            0.1 + 0.2,
            f64::MIN_POSITIVE,
            5e-324,
            f64::MAX,
            -123_456.789,
        ] {
            let value = Value::float(raw).expect("finite");
            let original = payload(SeekValue::new(vec![
                ("amount".to_string(), value),
                ("id".to_string(), Value::from("x")),
            ]));
            let token = encode_cursor(&original).expect("cursor should encode");
            let decoded = decode_cursor(&token).expect("cursor should decode");

            match decoded.seek().get("amount") {
                Some(Value::Float(decoded)) => {
                    assert_eq!(decoded.get().to_bits(), raw.to_bits(), "float {raw:e} drifted");
                }
                other => panic!("expected a float seek value, got {other:?}"),
            }
            assert_eq!(decoded, original);
        }
    }

    proptest! {
        #[test]
        fn decode_of_encode_is_identity(
            amount in arb_value(),
            id in "[a-z0-9]{1,12}",
            backward in any::<bool>(),
        ) {
            let direction = if backward {
                CursorDirection::Backward
            } else {
                CursorDirection::Forward
            };
            let original = CursorPayload::new(
                "payments",
                direction,
                SeekValue::new(vec![
                    ("amount".to_string(), amount),
                    ("id".to_string(), Value::Text(id)),
                ]),
                spec().signature(NullOrdering::NullsLow),
                FilterMap::new().fingerprint(),
            );

            let token = encode_cursor(&original).expect("cursor should encode");
            prop_assert_eq!(decode_cursor(&token).expect("cursor should decode"), original);
        }

        #[test]
        fn arbitrary_input_never_panics(input in ".{0,256}") {
            let _ = decode_cursor(&input);
        }
    }
}
