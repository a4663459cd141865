use catalog_models::{Movie, MovieDraft, MovieKind, Runtime};
use chrono::Datelike;
use std::fmt;
use thiserror::Error;

pub const MIN_YEAR: i32 = 1900;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating is required")]
    Required,

    #[error("Rating must be a number")]
    NotANumber,

    #[error("Rating must be between 0 and 10")]
    OutOfRange,

    #[error("Rating can have at most one decimal place")]
    TooManyDecimals,
}

/// Parse a 0-10 rating with at most one decimal place
pub fn validate_rating(input: &str) -> Result<f64, RatingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RatingError::Required);
    }

    let rating: f64 = trimmed.parse().map_err(|_| RatingError::NotANumber)?;
    if !rating.is_finite() {
        return Err(RatingError::NotANumber);
    }
    if !(0.0..=10.0).contains(&rating) {
        return Err(RatingError::OutOfRange);
    }

    // Count on the normalized form so `8.50` is accepted like `8.5`
    let decimals = rating
        .to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    if decimals > 1 {
        return Err(RatingError::TooManyDecimals);
    }

    Ok(rating)
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Movie form contents as typed, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
    pub genres: Vec<String>,
    pub rating: String,
    pub poster: String,
    pub synopsis: String,
    /// Comma separated
    pub cast: String,
    pub kind: String,
    pub duration: String,
}

impl MovieForm {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year.to_string(),
            genres: movie.genre.clone(),
            rating: movie.rating.to_string(),
            poster: movie.poster.clone(),
            synopsis: movie.synopsis.clone(),
            cast: movie.cast.join(", "),
            kind: movie.kind.as_str().to_string(),
            duration: movie
                .duration
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }

    /// Check every field and build a draft, or return all problems at once.
    pub fn validate(&self, current_year: i32) -> Result<MovieDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }

        let year = match self.year.trim() {
            "" => {
                errors.push(FieldError::new("year", "Year is required"));
                None
            }
            raw => match raw.parse::<i32>() {
                Ok(y) if (MIN_YEAR..=current_year).contains(&y) => Some(y as u32),
                Ok(_) => {
                    errors.push(FieldError::new(
                        "year",
                        format!("Year must be between {} and {}", MIN_YEAR, current_year),
                    ));
                    None
                }
                Err(_) => {
                    errors.push(FieldError::new("year", "Year must be a whole number"));
                    None
                }
            },
        };

        let genre: Vec<String> = self
            .genres
            .iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        if genre.is_empty() {
            errors.push(FieldError::new("genre", "Select at least one genre"));
        }

        let rating = validate_rating(&self.rating)
            .map_err(|e| errors.push(FieldError::new("rating", e.to_string())))
            .ok();

        let poster = self.poster.trim();
        if poster.is_empty() {
            errors.push(FieldError::new("poster", "Poster URL is required"));
        } else if !is_http_url(poster) {
            errors.push(FieldError::new("poster", "Poster must be an http(s) URL"));
        }

        let synopsis = self.synopsis.trim();
        if synopsis.is_empty() {
            errors.push(FieldError::new("synopsis", "Synopsis is required"));
        }

        let cast: Vec<String> = self
            .cast
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if cast.is_empty() {
            errors.push(FieldError::new("cast", "Cast is required"));
        }

        let kind = match self.kind.trim() {
            "" => Some(MovieKind::default()),
            raw => MovieKind::parse(raw).or_else(|| {
                errors.push(FieldError::new("type", "Type must be movie or series"));
                None
            }),
        };

        let duration = Runtime::parse(&self.duration);
        if duration.is_none() {
            errors.push(FieldError::new("duration", "Duration is required"));
        }

        match (year, rating, kind) {
            (Some(year), Some(rating), Some(kind)) if errors.is_empty() => Ok(MovieDraft {
                title: title.to_string(),
                year,
                genre,
                rating,
                poster: poster.to_string(),
                synopsis: synopsis.to_string(),
                cast,
                kind,
                duration,
            }),
            _ => Err(errors),
        }
    }
}

/// Lowercase `http://` or `https://` followed by at least one character
fn is_http_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::MovieId;

    fn filled() -> MovieForm {
        MovieForm {
            title: " Arrival ".to_string(),
            year: "2016".to_string(),
            genres: vec!["Sci-Fi".to_string(), "Drama".to_string()],
            rating: "7.9".to_string(),
            poster: "https://example.com/arrival.jpg".to_string(),
            synopsis: "Linguist meets heptapods.".to_string(),
            cast: "Amy Adams, Jeremy Renner,, ".to_string(),
            kind: "movie".to_string(),
            duration: "116".to_string(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_validate_rating() {
        assert_eq!(validate_rating("8.5"), Ok(8.5));
        assert_eq!(validate_rating(" 10 "), Ok(10.0));
        assert_eq!(validate_rating("0"), Ok(0.0));
        assert_eq!(validate_rating("7.50"), Ok(7.5));
        assert_eq!(validate_rating(""), Err(RatingError::Required));
        assert_eq!(validate_rating("great"), Err(RatingError::NotANumber));
        assert_eq!(validate_rating("NaN"), Err(RatingError::NotANumber));
        assert_eq!(validate_rating("10.5"), Err(RatingError::OutOfRange));
        assert_eq!(validate_rating("-1"), Err(RatingError::OutOfRange));
        assert_eq!(validate_rating("8.75"), Err(RatingError::TooManyDecimals));
    }

    #[test]
    fn test_valid_form_builds_draft() {
        let draft = filled().validate(2024).unwrap();
        assert_eq!(draft.title, "Arrival");
        assert_eq!(draft.year, 2016);
        assert_eq!(draft.cast, vec!["Amy Adams", "Jeremy Renner"]);
        assert_eq!(draft.kind, MovieKind::Movie);
        assert_eq!(draft.duration, Some(Runtime::Minutes(116)));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let form = MovieForm {
            kind: "movie".to_string(),
            ..MovieForm::default()
        };
        let errors = form.validate(2024).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["title", "year", "genre", "rating", "poster", "synopsis", "cast", "duration"]
        );
    }

    #[test]
    fn test_year_bounds() {
        let mut form = filled();
        form.year = "1899".to_string();
        assert_eq!(fields(&form.validate(2024).unwrap_err()), vec!["year"]);

        form.year = "2025".to_string();
        assert_eq!(fields(&form.validate(2024).unwrap_err()), vec!["year"]);

        form.year = "1900".to_string();
        assert!(form.validate(2024).is_ok());

        form.year = "twenty".to_string();
        assert_eq!(fields(&form.validate(2024).unwrap_err()), vec!["year"]);
    }

    #[test]
    fn test_poster_and_kind() {
        let mut form = filled();
        form.poster = "ftp://example.com/a.jpg".to_string();
        form.kind = "documentary".to_string();
        assert_eq!(fields(&form.validate(2024).unwrap_err()), vec!["poster", "type"]);

        form.poster = "http://".to_string();
        form.kind = "TV".to_string();
        assert_eq!(fields(&form.validate(2024).unwrap_err()), vec!["poster"]);

        form.poster = "HTTPS://example.com/a.jpg".to_string();
        assert_eq!(fields(&form.validate(2024).unwrap_err()), vec!["poster"]);

        form.poster = "http://example.com/a.jpg".to_string();
        assert!(form.validate(2024).is_ok());
    }

    #[test]
    fn test_series_duration_label() {
        let mut form = filled();
        form.kind = "series".to_string();
        form.duration = "3 Seasons".to_string();
        let draft = form.validate(2024).unwrap();
        assert_eq!(draft.kind, MovieKind::Series);
        assert_eq!(draft.duration, Some(Runtime::Label("3 Seasons".to_string())));
    }

    #[test]
    fn test_from_movie_round_trips() {
        let draft = filled().validate(2024).unwrap();
        let movie = draft.clone().with_id(MovieId::from_number(9));
        let form = MovieForm::from_movie(&movie);
        assert_eq!(form.cast, "Amy Adams, Jeremy Renner");
        assert_eq!(form.rating, "7.9");
        assert_eq!(form.validate(2024).unwrap(), draft);
    }
}
