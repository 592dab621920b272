//! Course selection.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Course selection by hole count.
///
/// On the wire this is the string token `"9"` or `"18"`. Some backend
/// revisions send it as a bare number instead, so deserialization accepts
/// both; serialization always emits the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseType {
    Nine,
    Eighteen,
}

impl CourseType {
    /// Number of holes played.
    pub fn holes(self) -> u8 {
        match self {
            CourseType::Nine => 9,
            CourseType::Eighteen => 18,
        }
    }

    /// Canonical wire token.
    pub fn as_token(self) -> &'static str {
        match self {
            CourseType::Nine => "9",
            CourseType::Eighteen => "18",
        }
    }

    /// Parse a hole count.
    pub fn from_holes(holes: u64) -> Option<Self> {
        match holes {
            9 => Some(CourseType::Nine),
            18 => Some(CourseType::Eighteen),
            _ => None,
        }
    }

    /// Parse a wire token, tolerating surrounding whitespace.
    pub fn from_token(token: &str) -> Option<Self> {
        token.trim().parse::<u64>().ok().and_then(Self::from_holes)
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} holes", self.holes())
    }
}

impl Serialize for CourseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for CourseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenVisitor;

        impl Visitor<'_> for TokenVisitor {
            type Value = CourseType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"9\", \"18\", or a hole count")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<CourseType, E> {
                CourseType::from_token(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<CourseType, E> {
                CourseType::from_holes(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<CourseType, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(CourseType::from_holes)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(TokenVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_and_number_forms() {
        let from_str: CourseType = serde_json::from_str("\"18\"").unwrap();
        let from_num: CourseType = serde_json::from_str("18").unwrap();
        assert_eq!(from_str, CourseType::Eighteen);
        assert_eq!(from_num, CourseType::Eighteen);
    }

    #[test]
    fn test_serializes_as_string_token() {
        let json = serde_json::to_string(&CourseType::Nine).unwrap();
        assert_eq!(json, "\"9\"");
    }

    #[test]
    fn test_rejects_unknown_hole_count() {
        assert!(serde_json::from_str::<CourseType>("\"27\"").is_err());
        assert!(serde_json::from_str::<CourseType>("true").is_err());
    }
}
