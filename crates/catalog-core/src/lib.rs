pub mod error;
pub mod present;
pub mod query;
pub mod store;
pub mod validate;

pub use error::StoreError;
pub use present::{filter_movies, format_duration, rating_stars, SearchField};
pub use query::{known_genres, ListQuery, GENRE_OPTIONS};
pub use store::CatalogStore;
pub use validate::{current_year, validate_rating, FieldError, MovieForm, RatingError};
