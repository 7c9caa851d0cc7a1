use clap::{Parser, Subcommand};
use douban_scrape::analysis::assess_rating;
use douban_scrape::config::{self, RunStamp, ScrapeConfig};
use douban_scrape::report::format_similar;
use douban_scrape::MovieService;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Douban movie metadata scraper", long_about = None)]
struct Cli {
    /// Site root
    #[arg(long, global = true, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// IMDb root for similar-title lookups
    #[arg(long, global = true, default_value = config::DEFAULT_IMDB_URL)]
    imdb_url: String,

    /// Directory for saved movie files
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Attempts per page before giving up
    #[arg(long, global = true, default_value_t = config::DEFAULT_MAX_ATTEMPTS)]
    retries: u32,

    /// Seconds between attempts
    #[arg(long, global = true, default_value_t = config::DEFAULT_RETRY_DELAY_SECS)]
    retry_delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search titles by keyword
    Search {
        keyword: String,
        #[arg(short, long, default_value_t = config::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Show the detail page of a title
    Detail { id: String },
    /// Print the analysis payload as JSON
    Analyze { id: String },
    /// Show recent comments
    Comments {
        id: String,
        #[arg(short, long, default_value_t = config::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Show related titles
    Recommend {
        id: String,
        #[arg(short, long, default_value_t = config::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Look up similar titles on IMDb
    Similar {
        title: String,
        #[arg(short, long, default_value_t = config::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Save detail, comments and recommendations to a JSON file
    Save { id: String },
    /// Grade a score without fetching anything
    Rate { score: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ScrapeConfig {
        base_url: cli.base_url,
        imdb_base_url: cli.imdb_url,
        timeout: Duration::from_secs(cli.timeout),
        max_attempts: cli.retries,
        retry_delay: Duration::from_secs(cli.retry_delay),
        data_dir: cli.data_dir,
        run_stamp: RunStamp::now(),
        ..ScrapeConfig::default()
    };

    let service = MovieService::new(config)?;
    let output = run(cli.command, &service).await?;
    println!("{}", output);

    Ok(())
}

async fn run(command: Command, service: &MovieService) -> Result<String, serde_json::Error> {
    let output = match command {
        Command::Search { keyword, limit } => service.search_movies(&keyword, limit).await,
        Command::Detail { id } => service.movie_detail(&id).await,
        Command::Analyze { id } => serde_json::to_string_pretty(&service.analyze_movie(&id).await)?,
        Command::Comments { id, limit } => service.movie_comments(&id, limit).await,
        Command::Recommend { id, limit } => service.movie_recommendations(&id, limit).await,
        Command::Similar { title, limit } => format_similar(&service.similar_movies(&title, limit).await),
        Command::Save { id } => service.save_movie_info(&id).await,
        Command::Rate { score } => serde_json::to_string_pretty(&assess_rating(&score))?,
    };
    Ok(output)
}
