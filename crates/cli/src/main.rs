mod config;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use config::Config;
use corpus::{Recipe, RecipeCorpus};
use engine::{ProfileService, Recommendation, RecommendationOrchestrator};
use rand::SeedableRng;
use rand::rngs::StdRng;
use recommender::{PickOrigin, WeatherReading};
use sources::{
    CorpusSource, CsvCorpusSource, FixedWeatherSource, OpenWeatherSource, WeatherReport,
    WeatherSource,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use storage::{
    AccountError, AccountService, JsonFileStore, KeyValueStore, SavedRecipe, StoreAccountService,
    SupabaseAccountService,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const NO_RECIPES: &str = "No recipes found";

/// WeatherDish - recipes for the weather outside
#[derive(Parser)]
#[command(name = "weather-dish")]
#[command(about = "Recipe recommendations matched to the current weather", long_about = None)]
struct Cli {
    /// Recipe CSV file (overrides WEATHER_DISH_CORPUS_PATH)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Local store file (overrides WEATHER_DISH_STORE_PATH)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Manual weather and seeding
#[derive(Args, Debug, Clone)]
struct WeatherArgs {
    /// Temperature in °C instead of a live lookup
    #[arg(long, requires = "condition", allow_negative_numbers = true)]
    temp: Option<i32>,

    /// Condition label such as Clear or Rain
    #[arg(long, requires = "temp")]
    condition: Option<String>,

    /// Seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct Credentials {
    #[arg(long)]
    username: String,

    #[arg(long)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend recipes for the current weather
    Recommend {
        #[command(flatten)]
        weather: WeatherArgs,

        /// Number of further recipes to show after the first
        #[arg(long, default_value = "0")]
        more: usize,
    },

    /// Browse recommendations interactively
    Browse {
        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Show a recipe in full
    Show {
        #[arg(long)]
        id: String,
    },

    /// Search recipes by title
    Search {
        /// Case-insensitive substring of the title
        #[arg(long)]
        title: String,
    },

    /// Save a recipe
    Save {
        #[arg(long)]
        id: String,
    },

    /// List saved recipes, or open one with --id (requires login)
    Saved {
        /// Open this saved recipe from the stored copy
        #[arg(long)]
        id: Option<String>,
    },

    /// Create an account
    Register {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Log in
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; warnings only unless asked
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::from_env()?;
    let corpus_path = cli.corpus.unwrap_or_else(|| config.corpus_path.clone());
    let store_path = cli.store.unwrap_or_else(|| config.store_path.clone());
    debug!(corpus = %corpus_path.display(), store = %store_path.display(), "Resolved paths");
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(store_path));
    let profiles = ProfileService::new(account_service(&config, store.clone()), store);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { weather, more } => {
            handle_recommend(&config, &corpus_path, &weather, more).await?
        }
        Commands::Browse { weather } => {
            handle_browse(&config, &corpus_path, &weather, &profiles).await?
        }
        Commands::Show { id } => handle_show(&corpus_path, &id).await?,
        Commands::Search { title } => handle_search(&corpus_path, &title).await?,
        Commands::Save { id } => handle_save(&corpus_path, &id, &profiles).await?,
        Commands::Saved { id } => handle_saved(&profiles, id.as_deref()).await?,
        Commands::Register { credentials } => {
            profiles
                .register(&credentials.username, &credentials.password)
                .await?;
            println!(
                "{} Registered {}. Log in to see your saved recipes.",
                "✓".green(),
                credentials.username.bold()
            );
        }
        Commands::Login { credentials } => {
            let session = profiles
                .login(&credentials.username, &credentials.password)
                .await?;
            println!("{} Logged in as {}", "✓".green(), session.username.bold());
        }
        Commands::Logout => match profiles.logout().await? {
            Some(session) => println!("{} Logged out {}", "✓".green(), session.username),
            None => println!("Not logged in"),
        },
        Commands::Whoami => match profiles.current_user().await? {
            Some(session) => println!(
                "Logged in as {} (since {})",
                session.username.bold(),
                session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("Not logged in"),
        },
    }

    Ok(())
}

/// Supabase when configured, otherwise accounts in the local store
fn account_service(config: &Config, store: Arc<dyn KeyValueStore>) -> Arc<dyn AccountService> {
    match config.supabase() {
        Some((url, anon_key)) => Arc::new(SupabaseAccountService::new(url, anon_key)),
        None => Arc::new(StoreAccountService::new(store)),
    }
}

/// Manual reading when `--temp`/`--condition` are given, otherwise OpenWeather
fn weather_source(config: &Config, args: &WeatherArgs) -> Arc<dyn WeatherSource> {
    match (args.temp, args.condition.as_deref()) {
        (Some(temp), Some(condition)) => Arc::new(FixedWeatherSource::from_reading(
            WeatherReading::new(temp, condition),
        )),
        _ => Arc::new(
            OpenWeatherSource::new(config.coordinates(), config.openweather_api_key.clone())
                .with_api_url(config.openweather_url.clone()),
        ),
    }
}

async fn load_corpus(corpus_path: &Path) -> Result<RecipeCorpus> {
    CsvCorpusSource::new(corpus_path)
        .load()
        .await
        .with_context(|| format!("Failed to load recipes from {}", corpus_path.display()))
}

async fn load_orchestrator(
    config: &Config,
    corpus_path: &Path,
    args: &WeatherArgs,
) -> Result<RecommendationOrchestrator> {
    println!("Loading recipes from {}...", corpus_path.display());
    let start = Instant::now();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let orchestrator = RecommendationOrchestrator::load(
        &CsvCorpusSource::new(corpus_path),
        weather_source(config, args),
        rng,
    )
    .await?;

    println!(
        "{} Loaded {} recipes in {:?}",
        "✓".green(),
        orchestrator.corpus().len(),
        start.elapsed()
    );
    Ok(orchestrator)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    config: &Config,
    corpus_path: &Path,
    args: &WeatherArgs,
    more: usize,
) -> Result<()> {
    let mut orchestrator = load_orchestrator(config, corpus_path, args).await?;

    let first = orchestrator.start().await;
    if let Some(report) = orchestrator.report() {
        print_weather(report);
    }
    let Some(first) = first else {
        println!("{}", NO_RECIPES.yellow());
        return Ok(());
    };

    println!("{}", "Recommended for today:".bold().blue());
    print_recommendation(1, &first);
    for rank in 2..=more + 1 {
        match orchestrator.find_more() {
            Some(recommendation) => print_recommendation(rank, &recommendation),
            None => {
                println!("{}", NO_RECIPES.yellow());
                break;
            }
        }
    }
    Ok(())
}

/// Handle the 'browse' command
async fn handle_browse(
    config: &Config,
    corpus_path: &Path,
    args: &WeatherArgs,
    profiles: &ProfileService,
) -> Result<()> {
    let mut orchestrator = load_orchestrator(config, corpus_path, args).await?;

    let first = orchestrator.start().await;
    if let Some(report) = orchestrator.report() {
        print_weather(report);
    }
    let Some(first) = first else {
        println!("{}", NO_RECIPES.yellow());
        return Ok(());
    };

    let mut shown = 1;
    print_recommendation(shown, &first);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "[m]ore  [v]iew  [s]ave  [q]uit >".dimmed());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "m" | "more" => match orchestrator.find_more() {
                Some(recommendation) => {
                    shown += 1;
                    print_recommendation(shown, &recommendation);
                }
                None => println!("{}", NO_RECIPES.yellow()),
            },
            "v" | "view" => {
                if let Some(recipe) = orchestrator.current() {
                    print_recipe(recipe);
                }
            }
            "s" | "save" => {
                if let Some(recipe) = orchestrator.current() {
                    print_save_result(recipe, profiles.save_recipe(recipe).await?);
                }
            }
            "q" | "quit" => break,
            "" => {}
            other => println!("Unknown command '{}'", other),
        }
    }
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(corpus_path: &Path, id: &str) -> Result<()> {
    let corpus = load_corpus(corpus_path).await?;
    let recipe = corpus
        .get(id)
        .ok_or_else(|| anyhow!("Recipe {} not found", id))?;
    print_recipe(recipe);
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(corpus_path: &Path, title: &str) -> Result<()> {
    let corpus = load_corpus(corpus_path).await?;
    let matches = corpus.search_title(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("{}", NO_RECIPES.yellow());
        return Ok(());
    }
    for recipe in matches.iter().take(20) {
        println!("{}: {}", recipe.id.green(), recipe.title);
    }
    if matches.len() > 20 {
        println!("... and {} more", matches.len() - 20);
    }
    Ok(())
}

/// Handle the 'save' command
async fn handle_save(corpus_path: &Path, id: &str, profiles: &ProfileService) -> Result<()> {
    let corpus = load_corpus(corpus_path).await?;
    let recipe = corpus
        .get(id)
        .ok_or_else(|| anyhow!("Recipe {} not found", id))?;
    print_save_result(recipe, profiles.save_recipe(recipe).await?);
    Ok(())
}

/// Handle the 'saved' command
async fn handle_saved(profiles: &ProfileService, id: Option<&str>) -> Result<()> {
    let result = match id {
        Some(id) => profiles.saved_recipe(id).await.map(|saved| match saved {
            Some(recipe) => print_recipe_details(
                &recipe.title,
                recipe.image_name.as_deref(),
                &recipe.ingredients,
                &recipe.instructions,
            ),
            None => println!("Recipe {} is not saved", id),
        }),
        None => profiles.saved_recipes().await.map(|saved| print_saved_list(&saved)),
    };

    match result {
        Ok(()) => Ok(()),
        Err(AccountError::LoginRequired) => {
            println!("{}", AccountError::LoginRequired.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_saved_list(saved: &[SavedRecipe]) {
    println!("{}", "Saved recipes:".bold().blue());
    if saved.is_empty() {
        println!("Nothing saved yet");
    }
    for recipe in saved {
        println!(
            "{}: {} (saved {})",
            recipe.id.green(),
            recipe.title,
            recipe.saved_at.format("%Y-%m-%d")
        );
    }
}

fn print_weather(report: &WeatherReport) {
    let summary = if report.degraded {
        report.summary.yellow()
    } else {
        report.summary.normal()
    };
    println!("{} {}: {}", "•".cyan(), report.place.bold(), summary);
}

fn print_recommendation(rank: usize, recommendation: &Recommendation) {
    let reason = match (recommendation.origin, recommendation.keyword) {
        (PickOrigin::Pool, Some(keyword)) => format!("matches '{}'", keyword),
        (PickOrigin::Pool, None) => "from all recipes".to_string(),
        (PickOrigin::Fallback, _) => "something different".to_string(),
    };
    println!(
        "{}. {} [{}] {}",
        rank.to_string().green(),
        recommendation.recipe.title.bold(),
        recommendation.recipe.id,
        reason.dimmed()
    );
}

fn print_recipe(recipe: &Recipe) {
    print_recipe_details(
        &recipe.title,
        recipe.image_name.as_deref(),
        &recipe.ingredients,
        &recipe.instructions,
    );
}

/// Full recipe view, shared by corpus recipes and saved copies
fn print_recipe_details(
    title: &str,
    image_name: Option<&str>,
    ingredients: &[String],
    instructions: &[String],
) {
    println!("{}", title.bold().blue());
    if let Some(image) = image_name {
        println!("Image: {}", image);
    }

    println!("{}", "Ingredients:".bold());
    for ingredient in ingredients {
        println!("{}{}", "• ".green(), ingredient);
    }

    println!("{}", "Instructions:".bold());
    for (step, instruction) in instructions.iter().enumerate() {
        println!("{}. {}", (step + 1).to_string().cyan(), instruction);
    }
}

fn print_save_result(recipe: &Recipe, added: bool) {
    if added {
        println!("{} Saved {}", "✓".green(), recipe.title.bold());
    } else {
        println!("{} is already saved", recipe.title);
    }
}
