use super::Session;
use crate::output::{new_table, Output};
use catalog_config::DisplayConfig;
use catalog_core::{filter_movies, format_duration, known_genres, rating_stars, ListQuery, SearchField};
use catalog_models::{CatalogStats, FavoriteSet, Movie, MovieId, SortKey};
use color_eyre::Result;
use comfy_table::{Cell, CellAlignment, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

const HISTOGRAM_WIDTH: usize = 30;

fn movie_table(movies: &[Movie], favorites: &FavoriteSet, display: &DisplayConfig) -> Table {
    let mut table = new_table(["ID", "Title", "Year", "Type", "Genres", "Rating", "Duration", "♥"]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(&movie.id),
            Cell::new(&movie.title).fg(Color::Cyan),
            Cell::new(movie.year),
            Cell::new(movie.kind),
            Cell::new(movie.genre.join(", ")),
            Cell::new(format!("{} {:.1}", rating_stars(movie.rating, display.max_stars), movie.rating))
                .fg(Color::Yellow),
            Cell::new(format_duration(movie.duration.as_ref(), display.duration_style)),
            Cell::new(if favorites.contains(&movie.id) { "♥" } else { "" }).fg(Color::Red),
        ]);
    }
    table
}

fn movies_json(movies: &[Movie], favorites: &FavoriteSet) -> serde_json::Value {
    let entries: Vec<_> = movies
        .iter()
        .map(|m| json!({ "movie": m, "favorite": favorites.contains(&m.id) }))
        .collect();
    json!({ "count": movies.len(), "movies": entries })
}

/// Start from the configured sort, overlay `--query`, then the explicit flags
pub fn list_query(
    default_sort: SortKey,
    query_string: Option<&str>,
    search: Option<String>,
    genre: Option<String>,
    sort: Option<SortKey>,
) -> Result<ListQuery> {
    let mut query = ListQuery::new().sort(default_sort);
    if let Some(raw) = query_string {
        query = query
            .with_query_string(raw)
            .map_err(|e| color_eyre::eyre::eyre!("--query: {}", e))?;
    }
    if let Some(sort) = sort {
        query = query.sort(sort);
    }
    if let Some(genre) = genre {
        query = query.genre(genre);
    }
    if let Some(term) = search {
        query = query.search(term);
    }
    Ok(query)
}

pub fn run_list(
    session: &Session,
    mut query: ListQuery,
    field: Option<SearchField>,
    output: &Output,
) -> Result<()> {
    let all = session.store.movies();
    let movies = match (field, query.search.take()) {
        // An explicit field switches to the field-aware search
        (Some(field), Some(term)) => query.apply(&filter_movies(&all, &term, field)),
        (_, term) => {
            query.search = term;
            query.apply(&all)
        }
    };

    let favorites = session.store.favorites();
    if movies.is_empty() {
        output.info("No movies match");
    } else {
        output.table(&movie_table(&movies, &favorites, &session.config.display));
    }
    output.json(&movies_json(&movies, &favorites));
    Ok(())
}

pub async fn run_show(session: &Session, id: &MovieId, output: &Output) -> Result<()> {
    let movie = session
        .store
        .get_movie(id)
        .await
        .ok_or_else(|| color_eyre::eyre::eyre!("Movie {} not found", id))?;

    let display = &session.config.display;
    let favorite = session.store.is_favorite(&movie.id);
    let stars = rating_stars(movie.rating, display.max_stars);
    let duration = format_duration(movie.duration.as_ref(), display.duration_style);

    if output.is_human() && !output.is_quiet() {
        let heart = if favorite { " ♥".red().to_string() } else { String::new() };
        println!("\n{} ({}){}", movie.title.bright_cyan().bold(), movie.year, heart);

        let mut table = new_table(["Field", "Value"]);
        table.add_row(vec![Cell::new("ID"), Cell::new(&movie.id)]);
        table.add_row(vec![Cell::new("Type"), Cell::new(movie.kind)]);
        table.add_row(vec![Cell::new("Genres"), Cell::new(movie.genre.join(", "))]);
        table.add_row(vec![
            Cell::new("Rating"),
            Cell::new(format!("{} {:.1}/10", stars, movie.rating)).fg(Color::Yellow),
        ]);
        table.add_row(vec![Cell::new("Duration"), Cell::new(&duration)]);
        table.add_row(vec![Cell::new("Cast"), Cell::new(movie.cast.join(", "))]);
        table.add_row(vec![Cell::new("Poster"), Cell::new(&movie.poster)]);
        output.table(&table);

        if !movie.synopsis.is_empty() {
            println!("\n{}", movie.synopsis);
        }
    }

    output.json(&json!({
        "movie": movie,
        "favorite": favorite,
        "stars": stars,
        "duration_display": duration,
    }));
    Ok(())
}

pub fn run_favorites(session: &Session, output: &Output) -> Result<()> {
    let movies = session.store.favorite_movies();
    let favorites = session.store.favorites();

    if movies.is_empty() {
        output.info("No favorites yet. Use `moviedeck favorite <id>` to add one.");
    } else {
        output.table(&movie_table(&movies, &favorites, &session.config.display));
    }
    output.json(&movies_json(&movies, &favorites));
    Ok(())
}

/// One `█` bar per genre, scaled so the largest count spans `width`
fn histogram_bars(entries: &[(&str, usize)], width: usize) -> Vec<String> {
    let max = entries.iter().map(|(_, n)| *n).max().unwrap_or(0);
    entries
        .iter()
        .map(|(_, count)| {
            let len = if max == 0 { 0 } else { (count * width).div_ceil(max) };
            "█".repeat(len)
        })
        .collect()
}

fn stats_json(stats: &CatalogStats) -> serde_json::Value {
    let genres: Vec<_> = stats
        .genre_entries()
        .into_iter()
        .map(|(genre, count)| json!({ "genre": genre, "count": count }))
        .collect();
    json!({
        "total_movies": stats.total_movies,
        "total_favorites": stats.total_favorites,
        "average_rating": stats.average_rating,
        "genres": genres,
    })
}

pub fn run_stats(session: &Session, output: &Output) -> Result<()> {
    let stats = session.store.stats();

    if output.is_human() && !output.is_quiet() {
        let mut totals = new_table(["Movies", "Favorites", "Average rating"]);
        totals.add_row(vec![
            Cell::new(stats.total_movies).set_alignment(CellAlignment::Right),
            Cell::new(stats.total_favorites).set_alignment(CellAlignment::Right),
            Cell::new(format!(
                "{} {:.1}",
                rating_stars(stats.average_rating, session.config.display.max_stars),
                stats.average_rating
            ))
            .fg(Color::Yellow),
        ]);
        output.table(&totals);

        let entries = stats.genre_entries();
        if !entries.is_empty() {
            let mut genres = new_table(["Genre", "Count", ""]);
            for ((genre, count), bar) in entries.iter().zip(histogram_bars(&entries, HISTOGRAM_WIDTH)) {
                genres.add_row(vec![
                    Cell::new(genre),
                    Cell::new(count).set_alignment(CellAlignment::Right),
                    Cell::new(bar).fg(Color::Green),
                ]);
            }
            output.table(&genres);
        }
    }

    output.json(&stats_json(&stats));
    Ok(())
}

pub fn run_genres(session: &Session, output: &Output) -> Result<()> {
    let movies = session.store.movies();
    let genres = known_genres(&movies);

    if genres.is_empty() {
        output.info("No genres in the catalog yet");
    } else if output.is_human() && !output.is_quiet() {
        for genre in &genres {
            let count = movies.iter().filter(|m| m.has_genre(genre)).count();
            println!("{} {}", genre.bright_white(), format!("({})", count).dimmed());
        }
    }
    output.json(&json!({ "genres": genres }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_scales_to_largest() {
        let entries = [("Drama", 4), ("Comedy", 2), ("Horror", 1)];
        let bars = histogram_bars(&entries, 8);
        assert_eq!(bars[0].chars().count(), 8);
        assert_eq!(bars[1].chars().count(), 4);
        assert_eq!(bars[2].chars().count(), 2);
    }

    #[test]
    fn test_histogram_of_nothing() {
        assert!(histogram_bars(&[], 10).is_empty());
        assert_eq!(histogram_bars(&[("Drama", 0)], 10), vec![String::new()]);
    }

    #[test]
    fn test_list_query_flags_override_query_string() {
        let query = list_query(
            SortKey::RatingDesc,
            Some("search=alien&genre=Horror&sort=year-asc"),
            None,
            Some("Sci-Fi".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(query.search.as_deref(), Some("alien"));
        assert_eq!(query.genre.as_deref(), Some("Sci-Fi"));
        assert_eq!(query.sort, SortKey::YearAsc);

        let query = list_query(SortKey::Title, None, Some("heat".to_string()), None, None).unwrap();
        assert_eq!(query.sort, SortKey::Title);
        assert_eq!(query.search.as_deref(), Some("heat"));

        assert!(list_query(SortKey::Title, Some("sort=best"), None, None, None).is_err());
    }

    #[test]
    fn test_stats_json_orders_genres_by_count() {
        let stats = CatalogStats {
            total_movies: 3,
            total_favorites: 0,
            movies_by_genre: [("Comedy".to_string(), 1), ("Drama".to_string(), 2)].into(),
            average_rating: 7.0,
        };

        let value = stats_json(&stats);
        assert_eq!(value["genres"][0]["genre"], "Drama");
        assert_eq!(value["genres"][1]["count"], 1);
        assert_eq!(value["total_movies"], 3);
    }
}
