/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A small newtype around the record ids shared between the local store and
//! the remote store. Kept separate from `String` so a `RecordId` can't
//! accidentally be passed where some other piece of text is expected.

use std::{fmt, ops};

#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct RecordId(String);

impl RecordId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    #[cfg(feature = "random")]
    pub fn random() -> Self {
        RecordId(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ops::Deref for RecordId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_owned())
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(feature = "serde_support")]
mod serde_support {
    use super::RecordId;
    use serde::{de, ser};
    use std::fmt;

    impl ser::Serialize for RecordId {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: ser::Serializer,
        {
            serializer.serialize_str(&self.0)
        }
    }

    impl<'de> de::Deserialize<'de> for RecordId {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: de::Deserializer<'de>,
        {
            struct V;
            impl de::Visitor<'_> for V {
                type Value = RecordId;
                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a string")
                }
                fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                    Ok(RecordId::from(v))
                }
                fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
                    Ok(RecordId::from(v))
                }
            }
            deserializer.deserialize_str(V)
        }
    }
}

#[cfg(feature = "rusqlite_support")]
mod rusqlite_support {
    use super::RecordId;
    use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

    impl ToSql for RecordId {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(ToSqlOutput::from(self.0.as_str()))
        }
    }

    impl FromSql for RecordId {
        fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
            match value {
                ValueRef::Text(t) => std::str::from_utf8(t)
                    .map(RecordId::from)
                    .map_err(|e| FromSqlError::Other(Box::new(e))),
                _ => Err(FromSqlError::InvalidType),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_string() {
        let id = RecordId::from("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
        let s: String = id.into();
        assert_eq!(s, "abc123");
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_ids_differ() {
        assert_ne!(RecordId::random(), RecordId::random());
    }

    #[cfg(feature = "serde_support")]
    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::from("xyz");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"xyz\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
