pub mod favorites;
pub mod movie;
pub mod movie_id;
pub mod runtime;
pub mod stats;
pub mod view;

pub use favorites::{FavoriteSet, FavoritesDecodeError, FavoritesShape};
pub use movie::{Movie, MovieDraft, MovieKind};
pub use movie_id::{InvalidMovieId, MovieId};
pub use runtime::Runtime;
pub use stats::CatalogStats;
pub use view::{DurationStyle, SortKey};
