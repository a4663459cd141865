use catalog_models::{DurationStyle, Movie, Runtime};
use std::fmt;
use std::str::FromStr;

/// Which fields a free-text search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    /// Title, genres, cast and synopsis
    #[default]
    All,
    Title,
    Genre,
    Cast,
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SearchField::All),
            "title" => Ok(SearchField::Title),
            "genre" => Ok(SearchField::Genre),
            "cast" => Ok(SearchField::Cast),
            other => Err(format!("Invalid search field: {}. Use all, title, genre or cast", other)),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchField::All => "all",
            SearchField::Title => "title",
            SearchField::Genre => "genre",
            SearchField::Cast => "cast",
        })
    }
}

/// Case-insensitive substring search. A blank term keeps everything.
pub fn filter_movies(movies: &[Movie], term: &str, field: SearchField) -> Vec<Movie> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return movies.to_vec();
    }

    let contains = |s: &str| s.to_lowercase().contains(&term);
    let any = |values: &[String]| values.iter().any(|v| contains(v));

    movies
        .iter()
        .filter(|m| match field {
            SearchField::Title => contains(&m.title),
            SearchField::Genre => any(&m.genre),
            SearchField::Cast => any(&m.cast),
            SearchField::All => {
                contains(&m.title) || any(&m.genre) || any(&m.cast) || contains(&m.synopsis)
            }
        })
        .cloned()
        .collect()
}

/// `135` minutes → `2h 15m` (short) or `2 hours 15 minutes` (long).
/// Labels such as `3 Seasons` pass through; missing or zero is `N/A`.
pub fn format_duration(runtime: Option<&Runtime>, style: DurationStyle) -> String {
    let minutes_total = match runtime {
        None | Some(Runtime::Minutes(0)) => return "N/A".to_string(),
        Some(Runtime::Label(label)) if label.trim().is_empty() => return "N/A".to_string(),
        Some(Runtime::Label(label)) => return label.clone(),
        Some(Runtime::Minutes(m)) => *m,
    };

    let hours = minutes_total / 60;
    let minutes = minutes_total % 60;

    match style {
        DurationStyle::Short => match (hours, minutes) {
            (0, m) => format!("{}m", m),
            (h, 0) => format!("{}h", h),
            (h, m) => format!("{}h {}m", h, m),
        },
        DurationStyle::Long => {
            let hour_word = if hours > 1 { "hours" } else { "hour" };
            match (hours, minutes) {
                (0, m) => format!("{} minutes", m),
                (h, 0) => format!("{} {}", h, hour_word),
                (h, m) => format!("{} {} {} minutes", h, hour_word, m),
            }
        }
    }
}

const FULL_STAR: char = '★';
const HALF_STAR: char = '⯨';
const EMPTY_STAR: char = '☆';

/// Render a 0-10 rating as `max_stars` stars, with a half star when the
/// remainder is at least one half.
pub fn rating_stars(rating: f64, max_stars: u8) -> String {
    let max = usize::from(max_stars);
    if rating.is_nan() || rating < 0.0 {
        return EMPTY_STAR.to_string().repeat(max);
    }

    let normalized = rating.min(10.0) * f64::from(max_stars) / 10.0;
    let full = normalized.floor() as usize;
    let half = normalized.fract() >= 0.5;
    let empty = max - full - usize::from(half);

    let mut stars = String::with_capacity(max * FULL_STAR.len_utf8());
    stars.extend(std::iter::repeat(FULL_STAR).take(full));
    if half {
        stars.push(HALF_STAR);
    }
    stars.extend(std::iter::repeat(EMPTY_STAR).take(empty));
    stars
}
