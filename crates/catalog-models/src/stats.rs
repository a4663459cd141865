use crate::favorites::FavoriteSet;
use crate::movie::Movie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dashboard aggregates, recomputed on demand from the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogStats {
    pub total_movies: usize,
    pub total_favorites: usize,
    pub movies_by_genre: BTreeMap<String, usize>,
    pub average_rating: f64,
}

impl CatalogStats {
    /// Favorites pointing at ids no longer in the collection are not counted.
    pub fn compute(movies: &[Movie], favorites: &FavoriteSet) -> Self {
        let mut movies_by_genre = BTreeMap::new();
        let mut total_rating = 0.0;

        for movie in movies {
            for genre in &movie.genre {
                *movies_by_genre.entry(genre.clone()).or_insert(0) += 1;
            }
            total_rating += movie.rating;
        }

        let total_favorites = movies.iter().filter(|m| favorites.contains(&m.id)).count();

        let average_rating = if movies.is_empty() {
            0.0
        } else {
            total_rating / movies.len() as f64
        };

        Self {
            total_movies: movies.len(),
            total_favorites,
            movies_by_genre,
            average_rating,
        }
    }

    /// Histogram entries by count descending, ties by genre name.
    pub fn genre_entries(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .movies_by_genre
            .iter()
            .map(|(genre, count)| (genre.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}
