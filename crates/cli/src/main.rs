use anyhow::{Context, Result, ensure};
use catalog::{Catalog, Genre, GenrePolicy, Song, SongId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{RecommendationResult, RecommendationSource};
use rand::seq::IndexedRandom;
use server::{InMemoryPreferenceStore, RecommendationService, ServiceConfig, ServiceError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// User id for likes given on the command line
const SESSION_USER: &str = "cli";

/// Distinct users simulated by the benchmark
const BENCH_USERS: usize = 32;

/// MuseRecs - Song Recommendation Engine
#[derive(Parser)]
#[command(name = "muse-recs")]
#[command(about = "Song recommendations from likes and genre affinity", long_about = None)]
struct Cli {
    /// Path to the song catalog file
    #[arg(short, long, default_value = "data/songs.dat")]
    catalog: PathBuf,

    /// Fail on lines with an unknown genre instead of skipping them
    #[arg(long)]
    strict_genres: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get song recommendations for a set of liked songs
    Recommend {
        /// Liked song ids, comma separated
        #[arg(long, value_delimiter = ',')]
        likes: Vec<SongId>,

        /// Seed for genre sampling (reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Show which list each recommendation came from
        #[arg(long)]
        explain: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List songs not yet liked, optionally of one genre
    Browse {
        /// Genre to show (e.g. Rock, Hip_Hop, K_Pop)
        #[arg(long, value_parser = parse_genre)]
        genre: Option<Genre>,

        /// Liked song ids to hide, comma separated
        #[arg(long, value_delimiter = ',')]
        likes: Vec<SongId>,
    },

    /// Search for songs by title
    Search {
        /// Song title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show song counts per genre and the genre affinity table
    Genres,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

fn parse_genre(value: &str) -> std::result::Result<Genre, String> {
    value.parse::<Genre>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let policy = if cli.strict_genres {
        GenrePolicy::Reject
    } else {
        GenrePolicy::Skip
    };

    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.catalog, policy)
            .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?,
    );
    // Status lines go to stderr so stdout carries only command output
    eprintln!(
        "{} Loaded {} songs in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            likes,
            seed,
            explain,
            json,
        } => handle_recommend(catalog, &likes, seed, explain, json)?,
        Commands::Browse { genre, likes } => handle_browse(catalog, &likes, genre)?,
        Commands::Search { title } => handle_search(catalog, &title),
        Commands::Genres => handle_genres(catalog),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(catalog, requests, concurrent).await?,
    }

    Ok(())
}

/// Build a service and record the given likes for the session user
///
/// Unknown song ids are reported on stderr and skipped.
fn session_with_likes(
    catalog: Arc<Catalog>,
    likes: &[SongId],
    config: ServiceConfig,
) -> Result<RecommendationService> {
    let service = RecommendationService::in_memory(catalog, config);
    for song_id in likes.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        match service.like(SESSION_USER, song_id) {
            Ok(_) => {}
            Err(ServiceError::UnknownSong(id)) => {
                eprintln!("{} Skipping unknown song id '{}'", "!".yellow(), id);
            }
            Err(e) => return Err(e).context("Failed to record like"),
        }
    }
    Ok(service)
}

/// Pretty JSON for a recommendation result
fn render_json(result: &RecommendationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize recommendations")
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: Arc<Catalog>,
    likes: &[SongId],
    seed: Option<u64>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let config = ServiceConfig {
        seed,
        ..ServiceConfig::default()
    };
    let service = session_with_likes(catalog, likes, config)?;

    let liked = service.liked_songs(SESSION_USER)?;
    let result = service.recommendations(SESSION_USER)?;

    if json {
        println!("{}", render_json(&result)?);
        return Ok(());
    }

    if !liked.is_empty() {
        println!("{}", "Liked songs:".bold().blue());
        for song in &liked {
            println!("  {} {}", "•".green(), format_song(song));
        }
        println!();
    }

    print_recommendations(&result, explain);
    Ok(())
}

/// Handle the 'browse' command
fn handle_browse(catalog: Arc<Catalog>, likes: &[SongId], genre: Option<Genre>) -> Result<()> {
    let service = session_with_likes(catalog, likes, ServiceConfig::default())?;
    let songs = service.browse(SESSION_USER, genre)?;

    let header = match genre {
        Some(genre) => format!("{} songs ({}):", genre, songs.len()),
        None => format!("All songs ({}):", songs.len()),
    };
    println!("{}", header.bold().blue());
    for song in &songs {
        println!("  {}", format_song(song));
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: Arc<Catalog>, title: &str) {
    let service = RecommendationService::in_memory(catalog, ServiceConfig::default());
    let matches = service.search(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  No songs found");
        return;
    }
    // Display top 20 results
    for song in matches.iter().take(20) {
        println!("  {}", format_song(song));
    }
}

/// Handle the 'genres' command
fn handle_genres(catalog: Arc<Catalog>) {
    let service = RecommendationService::in_memory(catalog, ServiceConfig::default());
    let affinity = service.engine().affinity();

    println!("{}", "Genres:".bold().blue());
    for (genre, count) in service.catalog().genre_counts() {
        let related = affinity
            .related(genre)
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        // First song wins on equal views, matching the engine's ranking
        let top = service
            .catalog()
            .songs_by_genre(genre)
            .fold(None::<&Song>, |best, song| match best {
                Some(b) if b.views >= song.views => Some(b),
                _ => Some(song),
            })
            .map_or_else(|| "-".to_string(), |song| song.title.clone());
        println!(
            "  {:<12} {:>4} songs   related: {:<24} top: {}",
            genre.to_string().green(),
            count,
            related,
            top
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(catalog: Arc<Catalog>, requests: usize, concurrent: usize) -> Result<()> {
    ensure!(requests > 0, "--requests must be at least 1");
    ensure!(concurrent > 0, "--concurrent must be at least 1");
    ensure!(!catalog.is_empty(), "Cannot benchmark an empty catalog");

    let store = Arc::new(InMemoryPreferenceStore::new());
    let service = RecommendationService::new(catalog.clone(), store.clone(), ServiceConfig::default());

    // Each request likes one random song as a random user, then asks for
    // recommendations, so histories grow over the run
    let workload: Vec<(String, SongId)> = {
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|i| {
                catalog
                    .songs()
                    .choose(&mut rng)
                    .map(|song| (format!("bench-{}", i % BENCH_USERS), song.id.clone()))
            })
            .collect()
    };

    let semaphore = Arc::new(Semaphore::new(concurrent));
    let run_start = Instant::now();

    let mut handles = Vec::with_capacity(workload.len());
    for (user_id, song_id) in workload {
        let service = service.clone();
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Benchmark semaphore closed")?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            service.like(&user_id, &song_id)?;
            let result = service.recommendations(&user_id)?;
            debug!("{} got {} recommendations", user_id, result.combined.len());
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(handles.len());
    for handle in handles {
        let elapsed = handle.await.context("Benchmark task panicked")??;
        timings.push(elapsed);
    }
    let wall_time = run_start.elapsed();

    let total_latency: Duration = timings.iter().sum();
    let avg_latency = total_latency / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| {
        let index = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[index]
    };
    let throughput = timings.len() as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!(
        "Requests: {} ({} concurrent, {} users)",
        timings.len(),
        concurrent,
        store.user_count()
    );
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    if timings.len() < requests {
        warn!("Only {} of {} requests ran", timings.len(), requests);
    }
    Ok(())
}

fn format_song(song: &Song) -> String {
    format!(
        "{} - {} [{}] ({} views)",
        song.id.dimmed(),
        song.title,
        song.genre,
        song.views
    )
}

/// Format and print the combined list, tagging each entry's source on request
fn print_recommendations(result: &RecommendationResult, explain: bool) {
    println!("{}", "Song Recommendations:".bold().blue());
    if result.combined.is_empty() {
        println!("  Nothing to recommend");
        return;
    }

    for (rank, (song, source)) in result.explain().into_iter().enumerate() {
        let rank = (rank + 1).to_string();
        if explain {
            let tag = match source {
                RecommendationSource::Main => "main".green(),
                RecommendationSource::Discovery => "discovery".magenta(),
                RecommendationSource::Popular => "popular".cyan(),
            };
            println!("{:>3}. {} <{}>", rank.green(), format_song(song), tag);
        } else {
            println!("{:>3}. {}", rank.green(), format_song(song));
        }
    }

    if explain && !result.has_main {
        println!(
            "\n{} No main picks: like a few songs to get recommendations from your genres",
            "i".cyan()
        );
    }
}
