use catalog_core::SearchField;
use catalog_models::{MovieId, SortKey};
use clap::{ArgAction, Parser, Subcommand};
use commands::{catalog, config, edit, serve, MovieArgs, Session};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviedeck")]
#[command(about = "MovieDeck - browse, curate and favorite your movie catalog")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    #[command(long_about = "List movies and series. --search matches titles and genres unless --field narrows it; --genre filters on an exact genre tag.")]
    List {
        /// Case-insensitive search text
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries tagged with this genre
        #[arg(short, long)]
        genre: Option<String>,

        /// rating-desc, rating-asc, year-desc, year-asc or title
        #[arg(long)]
        sort: Option<SortKey>,

        /// Which fields --search looks at: all, title, genre or cast
        #[arg(long)]
        field: Option<SearchField>,

        /// List link state such as "search=alien&genre=Sci-Fi&sort=year-desc";
        /// explicit flags take precedence
        #[arg(long)]
        query: Option<String>,
    },
    /// Show a single entry
    Show { id: MovieId },
    /// Add an entry; missing fields are prompted for
    Add {
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Edit an entry; without flags every field is prompted with its current value
    Edit {
        id: MovieId,

        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Delete an entry (and drop it from favorites)
    Delete {
        id: MovieId,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Toggle an entry's favorite flag
    Favorite { id: MovieId },
    /// List favorite entries
    Favorites,
    /// Catalog statistics
    Stats,
    /// Genre tags in use
    Genres,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Run the mock REST API over a JSON db file
    #[command(long_about = "Serve GET/POST/PUT/DELETE /movies[/:id] and GET/PUT /favorites from a JSON db file. The file is created with sample entries when it does not exist.")]
    Serve {
        /// Address to listen on (defaults to server.bind)
        #[arg(long)]
        bind: Option<String>,

        /// JSON db file (defaults to server.db_file, then the data directory)
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the config, data and log locations
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = &output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.as_deref();
    let open_session = move || Session::open(config_path, output);

    match cli.command {
        Commands::List { search, genre, sort, field, query } => {
            let session = open_session().await?;
            let default_sort = session.config.display.default_sort;
            let query = catalog::list_query(default_sort, query.as_deref(), search, genre, sort)?;
            catalog::run_list(&session, query, field, output)
        }
        Commands::Show { id } => catalog::run_show(&open_session().await?, &id, output).await,
        Commands::Add { movie } => edit::run_add(&open_session().await?, movie, output).await,
        Commands::Edit { id, movie } => edit::run_edit(&open_session().await?, &id, movie, output).await,
        Commands::Delete { id, yes } => edit::run_delete(&open_session().await?, &id, yes, output).await,
        Commands::Favorite { id } => edit::run_favorite(&open_session().await?, &id, output).await,
        Commands::Favorites => catalog::run_favorites(&open_session().await?, output),
        Commands::Stats => catalog::run_stats(&open_session().await?, output),
        Commands::Genres => catalog::run_genres(&open_session().await?, output),
        Commands::Config { cmd } => config::run_config(cmd, config_path, output),
        Commands::Serve { bind, db } => serve::run_serve(bind, db, config_path, output).await,
    }
}
