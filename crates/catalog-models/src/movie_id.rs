use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical catalog identifier
///
/// Backends disagree on whether ids are numbers or strings (json-server
/// hands out numbers for seeded rows and strings for inserted ones). Every
/// id is normalized to its trimmed textual form, so `3`, `"3"` and `" 3 "`
/// compare and hash equal. Integer-looking ids are written back as JSON
/// numbers so numeric backends see the type they issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("movie id cannot be empty")]
pub struct InvalidMovieId;

impl MovieId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidMovieId> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidMovieId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when the id is a plain non-negative integer
    /// (no sign, no leading zeros).
    pub fn as_number(&self) -> Option<u64> {
        let s = self.0.as_str();
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if s.len() > 1 && s.starts_with('0') {
            return None;
        }
        s.parse().ok()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MovieId {
    type Err = InvalidMovieId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u64> for MovieId {
    fn from(n: u64) -> Self {
        Self::from_number(n)
    }
}

impl Serialize for MovieId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

struct MovieIdVisitor;

impl<'de> Visitor<'de> for MovieIdVisitor {
    type Value = MovieId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a movie id as a number or a non-empty string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MovieId, E> {
        Ok(MovieId::from_number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MovieId, E> {
        Ok(MovieId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MovieId, E> {
        if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
            Ok(MovieId::from_number(v as u64))
        } else {
            Ok(MovieId(v.to_string()))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MovieId, E> {
        MovieId::new(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MovieIdVisitor)
    }
}
