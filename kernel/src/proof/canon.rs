//! Canonical JSON bytes for search artifacts.
//!
//! Every digest over a search report is computed from these bytes, so two
//! runs that produce the same logical report always hash identically.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace between tokens.
//! 3. Strings are escaped per RFC 8259 §7; other characters are emitted as UTF-8.
//! 4. Numbers must be integers (`i64` or `u64`). Floats are rejected.

use std::fmt::Write as _;

use thiserror::Error;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number in `value` is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut out = String::new();
    emit(&mut out, value)?;
    Ok(out.into_bytes())
}

fn emit(out: &mut String, value: &serde_json::Value) -> Result<(), CanonError> {
    use serde_json::Value;

    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let _ = write!(out, "{i}");
            } else if let Some(u) = n.as_u64() {
                let _ = write!(out, "{u}");
            } else {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
        }
        Value::String(s) => emit_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit_string(out, key);
                out.push(':');
                emit(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn emit_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_at_every_level() {
        let v = json!({"plan": {"cost": 2, "steps": ["a", "c"]}, "expanded": 3});
        let bytes = canonical_json_bytes(&v).unwrap();
        assert_eq!(
            bytes,
            br#"{"expanded":3,"plan":{"cost":2,"steps":["a","c"]}}"#.to_vec()
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a: serde_json::Value = serde_json::from_str(r#"{"x":1,"a":2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{ "a" : 2, "x" : 1 }"#).unwrap();
        assert_eq!(
            canonical_json_bytes(&a).unwrap(),
            canonical_json_bytes(&b).unwrap()
        );
    }

    #[test]
    fn floats_are_rejected() {
        let err = canonical_json_bytes(&json!({"f": 0.5})).unwrap_err();
        assert!(matches!(err, CanonError::NonIntegerNumber { .. }));
    }

    #[test]
    fn negative_and_large_integers_are_accepted() {
        let v = json!([-7, u64::MAX]);
        let bytes = canonical_json_bytes(&v).unwrap();
        assert_eq!(bytes, format!("[-7,{}]", u64::MAX).into_bytes());
    }

    #[test]
    fn control_characters_are_escaped() {
        let bytes = canonical_json_bytes(&json!("a\u{1}b\n")).unwrap();
        assert_eq!(bytes, br#""a\u0001b\n""#.to_vec());
    }
}
