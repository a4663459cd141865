use catalog_models::{Movie, SortKey};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Genre choices offered by the movie form
pub const GENRE_OPTIONS: [&str; 10] = [
    "Action",
    "Comedy",
    "Drama",
    "Sci-Fi",
    "Horror",
    "Animation",
    "Crime",
    "Adventure",
    "Fantasy",
    "Thriller",
];

/// List view state: search text, genre filter and sort order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub sort: SortKey,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Parse `search=...&genre=...&sort=...` as carried by list links.
    /// Unknown parameters are ignored.
    pub fn from_query_string(query: &str) -> Result<Self, String> {
        Self::default().with_query_string(query)
    }

    /// Overlay the parameters present in `query`; absent ones keep their current value.
    pub fn with_query_string(mut self, query: &str) -> Result<Self, String> {
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;
            match key {
                "search" => self.search = Some(value).filter(|v| !v.trim().is_empty()),
                "genre" => self.genre = Some(value).filter(|v| !v.trim().is_empty()),
                "sort" => self.sort = value.parse()?,
                _ => {}
            }
        }
        Ok(self)
    }

    /// Filter then sort. Sorting is stable, so equal keys keep collection order.
    pub fn apply(&self, movies: &[Movie]) -> Vec<Movie> {
        let search = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let genre = self.genre.as_deref().filter(|g| !g.is_empty());

        let mut result: Vec<Movie> = movies
            .iter()
            .filter(|m| match &search {
                Some(term) => {
                    m.title.to_lowercase().contains(term)
                        || m.genre.iter().any(|g| g.to_lowercase().contains(term))
                }
                None => true,
            })
            .filter(|m| genre.map_or(true, |g| m.has_genre(g)))
            .cloned()
            .collect();

        result.sort_by(|a, b| compare(self.sort, a, b));
        result
    }
}

fn compare(sort: SortKey, a: &Movie, b: &Movie) -> Ordering {
    match sort {
        SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
        SortKey::RatingAsc => a.rating.total_cmp(&b.rating),
        SortKey::YearDesc => b.year.cmp(&a.year),
        SortKey::YearAsc => a.year.cmp(&b.year),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

fn decode_component(raw: &str) -> Result<String, String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| format!("Invalid query parameter {:?}: {}", raw, e))
}

/// Distinct genre tags present in the collection, sorted
pub fn known_genres(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .flat_map(|m| m.genre.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::{MovieId, MovieKind};

    fn movie(id: u64, title: &str, year: u32, rating: f64, genres: &[&str]) -> Movie {
        Movie {
            id: MovieId::from_number(id),
            title: title.to_string(),
            year,
            genre: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            poster: String::new(),
            synopsis: String::new(),
            cast: Vec::new(),
            kind: MovieKind::Movie,
            duration: None,
        }
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "Inception", 2010, 8.8, &["Action", "Sci-Fi"]),
            movie(2, "Amélie", 2001, 8.3, &["Comedy"]),
            movie(3, "Alien", 1979, 8.5, &["Horror", "Sci-Fi"]),
            movie(4, "Heat", 1995, 8.3, &["Crime", "Action"]),
        ]
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_by_rating_desc_stably() {
        let result = ListQuery::new().apply(&catalog());
        assert_eq!(titles(&result), vec!["Inception", "Alien", "Amélie", "Heat"]);
    }

    #[test]
    fn test_search_matches_title_or_genre() {
        let result = ListQuery::new().search("  SCI ").apply(&catalog());
        assert_eq!(titles(&result), vec!["Inception", "Alien"]);

        let result = ListQuery::new().search("heat").apply(&catalog());
        assert_eq!(titles(&result), vec!["Heat"]);

        let result = ListQuery::new().search("nothing like this").apply(&catalog());
        assert!(result.is_empty());
    }

    #[test]
    fn test_genre_filter_is_exact() {
        let result = ListQuery::new().genre("Action").sort(SortKey::YearAsc).apply(&catalog());
        assert_eq!(titles(&result), vec!["Heat", "Inception"]);

        let result = ListQuery::new().genre("action").apply(&catalog());
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let movies = catalog();
        assert_eq!(
            titles(&ListQuery::new().sort(SortKey::YearDesc).apply(&movies)),
            vec!["Inception", "Amélie", "Heat", "Alien"]
        );
        assert_eq!(
            titles(&ListQuery::new().sort(SortKey::RatingAsc).apply(&movies)),
            vec!["Amélie", "Heat", "Alien", "Inception"]
        );
        assert_eq!(
            titles(&ListQuery::new().sort(SortKey::Title).apply(&movies)),
            vec!["Alien", "Amélie", "Heat", "Inception"]
        );
    }

    #[test]
    fn test_from_query_string() {
        let query = ListQuery::from_query_string("?search=star+wars&genre=Sci-Fi&sort=year_desc&page=2").unwrap();
        assert_eq!(query.search.as_deref(), Some("star wars"));
        assert_eq!(query.genre.as_deref(), Some("Sci-Fi"));
        assert_eq!(query.sort, SortKey::YearDesc);

        let query = ListQuery::from_query_string("search=&sort=rating-asc").unwrap();
        assert_eq!(query.search, None);
        assert_eq!(query.sort, SortKey::RatingAsc);

        let query = ListQuery::from_query_string("search=caf%C3%A9").unwrap();
        assert_eq!(query.search.as_deref(), Some("café"));

        assert!(ListQuery::from_query_string("sort=best").is_err());
    }

    #[test]
    fn test_query_string_overlays_existing_state() {
        let base = ListQuery::new().sort(SortKey::Title).genre("Drama");
        let query = base.with_query_string("search=heat").unwrap();
        assert_eq!(query.search.as_deref(), Some("heat"));
        assert_eq!(query.genre.as_deref(), Some("Drama"));
        assert_eq!(query.sort, SortKey::Title);
    }

    #[test]
    fn test_known_genres() {
        assert_eq!(
            known_genres(&catalog()),
            vec!["Action", "Comedy", "Crime", "Horror", "Sci-Fi"]
        );
    }
}
