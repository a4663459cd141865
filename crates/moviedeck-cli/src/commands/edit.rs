use super::prompts;
use super::Session;
use crate::output::Output;
use catalog_core::{current_year, known_genres, MovieForm, GENRE_OPTIONS};
use catalog_models::{Movie, MovieId};
use clap::Args;
use color_eyre::Result;
use serde_json::json;

/// Movie fields for `add` and `edit`
#[derive(Args, Debug, Default, Clone)]
pub struct MovieArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    /// Genre tag, repeatable or comma separated
    #[arg(long = "genre", value_delimiter = ',')]
    pub genres: Vec<String>,

    /// 0-10, at most one decimal
    #[arg(long)]
    pub rating: Option<String>,

    /// Poster image URL
    #[arg(long)]
    pub poster: Option<String>,

    #[arg(long)]
    pub synopsis: Option<String>,

    /// Comma separated names
    #[arg(long)]
    pub cast: Option<String>,

    /// movie or series
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Minutes (e.g. 135) or a label (e.g. "3 Seasons")
    #[arg(long)]
    pub duration: Option<String>,
}

impl MovieArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.genres.is_empty()
            && self.rating.is_none()
            && self.poster.is_none()
            && self.synopsis.is_none()
            && self.cast.is_none()
            && self.kind.is_none()
            && self.duration.is_none()
    }

    /// Overwrite the form fields that were given on the command line
    pub fn apply_to(self, form: &mut MovieForm) {
        let set = |slot: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *slot = value;
            }
        };
        set(&mut form.title, self.title);
        set(&mut form.year, self.year);
        set(&mut form.rating, self.rating);
        set(&mut form.poster, self.poster);
        set(&mut form.synopsis, self.synopsis);
        set(&mut form.cast, self.cast);
        set(&mut form.kind, self.kind);
        set(&mut form.duration, self.duration);
        if !self.genres.is_empty() {
            form.genres = self.genres;
        }
    }
}

/// Prompt for form fields. With `all` every field is asked with its current
/// value as the default; otherwise only empty fields are asked.
fn prompt_form(form: &mut MovieForm, all: bool, genre_choices: Vec<String>) -> Result<()> {
    let ask = |value: &str| all || value.trim().is_empty();
    let default = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());

    if ask(&form.title) {
        form.title = prompts::prompt_string("Title", default(&form.title).as_deref())?;
    }
    if ask(&form.year) {
        form.year = prompts::prompt_string("Year", default(&form.year).as_deref())?;
    }
    if all || form.genres.is_empty() {
        let mut options = genre_choices;
        for genre in &form.genres {
            if !options.contains(genre) {
                options.push(genre.clone());
            }
        }
        form.genres = prompts::prompt_multi("Genres (space to toggle)", &options, &form.genres)?;
    }
    if ask(&form.rating) {
        form.rating = prompts::prompt_rating(default(&form.rating).as_deref())?;
    }
    if ask(&form.poster) {
        form.poster = prompts::prompt_string("Poster URL", default(&form.poster).as_deref())?;
    }
    if ask(&form.synopsis) {
        form.synopsis = prompts::prompt_string("Synopsis", default(&form.synopsis).as_deref())?;
    }
    if ask(&form.cast) {
        form.cast = prompts::prompt_string("Cast (comma separated)", default(&form.cast).as_deref())?;
    }
    if ask(&form.kind) {
        form.kind = prompts::prompt_choice("Type", &["movie", "series"], default(&form.kind).as_deref())?;
    }
    if ask(&form.duration) {
        form.duration = prompts::prompt_string(
            "Duration (minutes or label)",
            default(&form.duration).as_deref(),
        )?;
    }
    Ok(())
}

/// Genre options for the form: the fixed list plus any tags already in use
fn genre_choices(movies: &[Movie]) -> Vec<String> {
    let mut choices: Vec<String> = GENRE_OPTIONS.iter().map(|g| g.to_string()).collect();
    for genre in known_genres(movies) {
        if !choices.contains(&genre) {
            choices.push(genre);
        }
    }
    choices
}

fn report_invalid(form: &MovieForm, output: &Output) -> Result<catalog_models::MovieDraft> {
    form.validate(current_year()).map_err(|errors| {
        for error in &errors {
            output.error(error.to_string());
        }
        color_eyre::eyre::eyre!("Movie form has {} invalid field(s)", errors.len())
    })
}

fn movie_json(action: &str, movie: &Movie) -> serde_json::Value {
    json!({ "type": action, "movie": movie })
}

pub async fn run_add(session: &Session, args: MovieArgs, output: &Output) -> Result<()> {
    let mut form = MovieForm::default();
    args.apply_to(&mut form);
    if output.is_interactive() {
        prompt_form(&mut form, false, genre_choices(&session.store.movies()))?;
    }

    let draft = report_invalid(&form, output)?;
    let movie = session
        .store
        .add_movie(draft)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    output.success(format!("Added {} (id {})", movie.title, movie.id));
    output.json(&movie_json("added", &movie));
    Ok(())
}

pub async fn run_edit(session: &Session, id: &MovieId, args: MovieArgs, output: &Output) -> Result<()> {
    let existing = session
        .store
        .get_movie(id)
        .await
        .ok_or_else(|| color_eyre::eyre::eyre!("Movie {} not found", id))?;

    let mut form = MovieForm::from_movie(&existing);
    let prompt_everything = args.is_empty();
    args.apply_to(&mut form);
    if prompt_everything && output.is_interactive() {
        prompt_form(&mut form, true, genre_choices(&session.store.movies()))?;
    }

    let draft = report_invalid(&form, output)?;
    if draft == existing.to_draft() {
        output.info("Nothing changed");
        return Ok(());
    }

    let movie = session
        .store
        .update_movie(id, draft)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    output.success(format!("Updated {} (id {})", movie.title, movie.id));
    output.json(&movie_json("updated", &movie));
    Ok(())
}

pub async fn run_delete(session: &Session, id: &MovieId, yes: bool, output: &Output) -> Result<()> {
    let movie = session
        .store
        .get_movie(id)
        .await
        .ok_or_else(|| color_eyre::eyre::eyre!("Movie {} not found", id))?;

    if !yes {
        if !output.is_interactive() {
            return Err(color_eyre::eyre::eyre!(
                "Refusing to delete {} without confirmation; pass --yes",
                movie.title
            ));
        }
        let prompt = format!("Delete \"{}\" ({})?", movie.title, movie.year);
        if !prompts::prompt_yes_no(&prompt, false)? {
            output.info("Cancelled");
            return Ok(());
        }
    }

    session
        .store
        .delete_movie(id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    output.success(format!("Deleted {}", movie.title));
    output.json(&json!({ "type": "deleted", "id": id }));
    Ok(())
}

pub async fn run_favorite(session: &Session, id: &MovieId, output: &Output) -> Result<()> {
    let movie = session
        .store
        .find_movie(id)
        .ok_or_else(|| color_eyre::eyre::eyre!("Movie {} not found", id))?;

    let favorite = session
        .store
        .toggle_favorite(id)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    if favorite {
        output.success(format!("Added {} to favorites", movie.title));
    } else {
        output.success(format!("Removed {} from favorites", movie.title));
    }
    output.json(&json!({ "type": "favorite", "id": id, "favorite": favorite }));
    Ok(())
}
