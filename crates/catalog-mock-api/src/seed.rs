use catalog_models::{Movie, MovieId, MovieKind, Runtime};

#[allow(clippy::too_many_arguments)]
fn entry(
    id: u64,
    title: &str,
    year: u32,
    genre: &[&str],
    rating: f64,
    synopsis: &str,
    cast: &[&str],
    kind: MovieKind,
    duration: Runtime,
) -> Movie {
    Movie {
        id: MovieId::from_number(id),
        title: title.to_string(),
        year,
        genre: genre.iter().map(|g| g.to_string()).collect(),
        rating,
        poster: format!("https://picsum.photos/seed/movie{}/300/450", id),
        synopsis: synopsis.to_string(),
        cast: cast.iter().map(|c| c.to_string()).collect(),
        kind,
        duration: Some(duration),
    }
}

/// Starter catalog written into a fresh mock db
pub fn seed_movies() -> Vec<Movie> {
    vec![
        entry(
            1,
            "Inception",
            2010,
            &["Action", "Sci-Fi"],
            8.8,
            "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea.",
            &["Leonardo DiCaprio", "Joseph Gordon-Levitt", "Elliot Page"],
            MovieKind::Movie,
            Runtime::Minutes(148),
        ),
        entry(
            2,
            "Breaking Bad",
            2008,
            &["Crime", "Drama"],
            9.5,
            "A chemistry teacher diagnosed with cancer turns to manufacturing methamphetamine.",
            &["Bryan Cranston", "Aaron Paul"],
            MovieKind::Series,
            Runtime::Label("5 Seasons".to_string()),
        ),
        entry(
            3,
            "Spirited Away",
            2001,
            &["Animation", "Adventure", "Fantasy"],
            8.6,
            "A girl wanders into a world ruled by gods, witches and spirits, where humans are changed into beasts.",
            &["Rumi Hiiragi", "Miyu Irino"],
            MovieKind::Movie,
            Runtime::Minutes(125),
        ),
        entry(
            4,
            "The Grand Budapest Hotel",
            2014,
            &["Comedy", "Drama"],
            8.1,
            "A concierge and his lobby boy become embroiled in the theft of a priceless painting.",
            &["Ralph Fiennes", "Tony Revolori"],
            MovieKind::Movie,
            Runtime::Minutes(99),
        ),
        entry(
            5,
            "Stranger Things",
            2016,
            &["Drama", "Horror", "Sci-Fi"],
            8.7,
            "When a boy vanishes, a small town uncovers a mystery involving secret experiments.",
            &["Millie Bobby Brown", "Finn Wolfhard", "Winona Ryder"],
            MovieKind::Series,
            Runtime::Label("4 Seasons".to_string()),
        ),
    ]
}
