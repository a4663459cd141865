use crate::movie_id::MovieId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// User-marked subset of the catalog, tracked independently of the catalog itself.
///
/// Keeps insertion order so the favorites document round-trips in the order the
/// user built it. Duplicates are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<MovieId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Returns `true` if the id was newly added.
    pub fn insert(&mut self, id: MovieId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, id: &MovieId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|fav| fav != id);
        self.ids.len() != before
    }

    /// Flip membership; returns the new membership.
    pub fn toggle(&mut self, id: &MovieId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    /// Copy of the set with `id` toggled, leaving `self` untouched.
    pub fn toggled(&self, id: &MovieId) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieId> {
        self.ids.iter()
    }

    pub fn ids(&self) -> &[MovieId] {
        &self.ids
    }

    /// Decode a favorites document in any of the shapes backends have used.
    pub fn decode(value: Value) -> Result<(Self, FavoritesShape), FavoritesDecodeError> {
        match value {
            Value::Null => Ok((Self::new(), FavoritesShape::default())),
            Value::Array(items) => {
                if !items.is_empty() && items.iter().all(Value::is_object) {
                    let ids = items
                        .into_iter()
                        .map(|mut entry| {
                            let id = entry
                                .get_mut("id")
                                .map(Value::take)
                                .ok_or(FavoritesDecodeError::MissingEntryId)?;
                            serde_json::from_value::<MovieId>(id).map_err(FavoritesDecodeError::InvalidId)
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok((Self::from_iter(ids), FavoritesShape::ObjectArray))
                } else {
                    let ids: Vec<MovieId> = serde_json::from_value(Value::Array(items))
                        .map_err(FavoritesDecodeError::InvalidId)?;
                    Ok((Self::from_iter(ids), FavoritesShape::Array))
                }
            }
            Value::Object(mut map) => {
                let ids = match map.remove("ids") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(ids) => serde_json::from_value::<Vec<MovieId>>(ids)
                        .map_err(FavoritesDecodeError::InvalidId)?,
                };
                Ok((Self::from_iter(ids), FavoritesShape::Object))
            }
            other => Err(FavoritesDecodeError::UnexpectedShape(type_name(&other))),
        }
    }

    /// Encode in the given wire shape.
    pub fn encode(&self, shape: FavoritesShape) -> Value {
        match shape {
            FavoritesShape::Array => json!(self.ids),
            FavoritesShape::ObjectArray => {
                Value::Array(self.ids.iter().map(|id| json!({ "id": id })).collect())
            }
            FavoritesShape::Object => json!({ "ids": self.ids }),
        }
    }
}

impl FromIterator<MovieId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = MovieId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Serialize for FavoriteSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FavoriteSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FavoriteSet::decode(value)
            .map(|(set, _)| set)
            .map_err(serde::de::Error::custom)
    }
}

/// Wire shape of the favorites document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FavoritesShape {
    /// `[1, "2", 3]`
    Array,
    /// `[{"id": 1}, {"id": "2"}]`
    ObjectArray,
    /// `{"ids": [1, "2"]}`
    #[default]
    Object,
}

#[derive(Debug, thiserror::Error)]
pub enum FavoritesDecodeError {
    #[error("favorites entry has no id field")]
    MissingEntryId,
    #[error("invalid favorite id: {0}")]
    InvalidId(serde_json::Error),
    #[error("unexpected favorites document: {0}")]
    UnexpectedShape(&'static str),
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
