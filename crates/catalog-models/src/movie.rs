use crate::movie_id::MovieId;
use crate::runtime::Runtime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MovieKind {
    #[default]
    Movie,
    Series,
}

impl MovieKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieKind::Movie => "movie",
            MovieKind::Series => "series",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" => Some(MovieKind::Movie),
            "series" | "show" | "tv" => Some(MovieKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MovieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry as stored by a backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: u32,
    #[serde(default)]
    pub genre: Vec<String>,
    /// 0-10
    pub rating: f64,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: MovieKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Runtime>,
}

/// A catalog entry without an identifier, as submitted by the movie form
/// and sent as the body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub year: u32,
    #[serde(default)]
    pub genre: Vec<String>,
    pub rating: f64,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: MovieKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Runtime>,
}

impl MovieDraft {
    pub fn with_id(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            year: self.year,
            genre: self.genre,
            rating: self.rating,
            poster: self.poster,
            synopsis: self.synopsis,
            cast: self.cast,
            kind: self.kind,
            duration: self.duration,
        }
    }
}

impl Movie {
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            year: self.year,
            genre: self.genre.clone(),
            rating: self.rating,
            poster: self.poster.clone(),
            synopsis: self.synopsis.clone(),
            cast: self.cast.clone(),
            kind: self.kind,
            duration: self.duration.clone(),
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }
}
