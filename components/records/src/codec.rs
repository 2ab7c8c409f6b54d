/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Shared codec helpers: millisecond-epoch integers (local) <-> ISO-8601
//! strings (remote), and JSON-as-string (local) <-> JSON-as-value (remote).
//! Individual table codecs are thin, mechanical uses of these two
//! conversions; nothing here knows about any specific table.

use crate::error::{CodecError, Result};
use chrono::{DateTime, TimeZone, Utc};

pub fn ms_to_iso8601(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn iso8601_to_ms(s: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
        .map_err(|e| CodecError::InvalidTimestamp(format!("{s}: {e}")))
}

/// Parse a locally-stored compact JSON string into the wire's JSON value.
/// `field` is only used to label a decode error.
pub fn json_string_to_value(field: &'static str, s: &str) -> Result<serde_json::Value> {
    serde_json::from_str(s).map_err(|source| CodecError::InvalidJson { field, source })
}

/// Serialize a wire JSON value back down to the compact string the local
/// store keeps. Local storage is the encode target here, so this can't fail:
/// any `serde_json::Value` serializes.
pub fn json_value_to_string(v: &serde_json::Value) -> String {
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_iso8601() {
        let ms = 1_700_000_000_123;
        let iso = ms_to_iso8601(ms);
        assert_eq!(iso8601_to_ms(&iso).unwrap(), ms);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(iso8601_to_ms("not-a-date").is_err());
    }

    #[test]
    fn roundtrips_json_blob() {
        let s = r#"{"lat":1.0,"lng":2.0}"#;
        let v = json_string_to_value("route", s).unwrap();
        assert_eq!(json_value_to_string(&v), s);
    }
}
