use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

use fantasy_hoops::api::{get_cache_path, ApiClient, ApiError, CacheConfig, ResponseCache};
use fantasy_hoops::config::Config;
use fantasy_hoops::dashboard::{reduce, Action, DashboardState};
use fantasy_hoops::players::{ModelType, PlayerStatRecord};
use fantasy_hoops::scoring::{ScoringWeights, StatCategory, WeightPreset};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank players by fantasy score (default if no subcommand)
    List(ListArgs),
    /// Interactive dashboard
    Dashboard {
        /// Prediction model to start with
        #[arg(short, long, value_parser = parse_model)]
        model: Option<ModelType>,
    },
    /// Show or change scoring weights
    Weights {
        #[command(subcommand)]
        action: Option<WeightsCommand>,
    },
    /// List prediction models and whether the server has them
    Models,
    /// Position breakdown, per-position averages and the top players
    Summary {
        #[arg(short, long, value_parser = parse_model)]
        model: Option<ModelType>,

        /// Number of top players to show
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
    },
    /// Season-by-season history for one player
    History {
        /// Player id as shown in TSV output
        person_id: i64,
    },
    /// Compare models' average predictions per category
    Compare {
        /// Categories to compare (repeatable, defaults to the six core categories)
        #[arg(short, long = "stat", value_parser = parse_category)]
        stats: Vec<StatCategory>,
    },
    /// Write a config file interactively
    Init {
        /// Accept every default without prompting
        #[arg(long)]
        defaults: bool,
    },
    /// Delete cached API responses
    ClearCache,
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Prediction model (defaults to the configured model)
    #[arg(short, long, value_parser = parse_model)]
    model: Option<ModelType>,

    /// Only players at this position ("All" for every position)
    #[arg(long)]
    position: Option<String>,

    /// Only players on this team abbreviation
    #[arg(long)]
    team: Option<String>,

    /// Case-insensitive match on name or team
    #[arg(short, long)]
    search: Option<String>,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    page_size: Option<usize>,

    /// Rank on the recent-form blend instead of model predictions
    #[arg(long)]
    projections: bool,

    /// Tab-separated output for scripting
    #[arg(long)]
    tsv: bool,
}

#[derive(Subcommand, Debug)]
enum WeightsCommand {
    /// Print the active weights (default)
    Show,
    /// Set one category's weight
    Set {
        /// Category key, label or abbreviation (e.g. points, REB, 3PM, "3-Pointers Made")
        category: String,
        /// New weight; negative values penalize the stat
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Delete saved weights and fall back to the default preset
    Reset,
    /// Replace the saved weights with a named preset
    Preset {
        /// standard, equal or legacy
        name: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fantasy-hoops")]
#[command(about = "Fantasy basketball rankings from model projections", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fantasy-hoops/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Skip the response cache, including the offline fallback
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_model(s: &str) -> Result<ModelType, String> {
    ModelType::parse(s).map_err(|e| e.to_string())
}

fn parse_category(s: &str) -> Result<StatCategory, String> {
    StatCategory::parse(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    fantasy_hoops::logging::init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::List(ListArgs::default()));
    let start_time = Instant::now();

    // Commands that run before any config exists
    match &command {
        Commands::Init { defaults } => {
            let path = cli.config.clone().map(PathBuf::from);
            if let Err(e) = fantasy_hoops::config::init::run_init_wizard(path, *defaults) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::ClearCache => {
            match fantasy_hoops::api::clear_cache() {
                Ok(()) => println!("Cleared {}", get_cache_path().display()),
                Err(e) => {
                    eprintln!("Failed to clear cache: {:#}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            }
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    // Saved weights live beside whichever config file is in use
    let weights_path = fantasy_hoops::settings::weights_path_for(config_path.as_deref());
    let config = match fantasy_hoops::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    debug!(api = %config.api_base_url, model = %config.default_model, "loaded config");

    let weights = fantasy_hoops::settings::load_weights(&weights_path, &config.default_preset.weights());
    let use_colors = fantasy_hoops::output::should_use_colors();

    if let Commands::Weights { action } = command {
        run_weights_command(action.unwrap_or(WeightsCommand::Show), &weights_path, weights, &config, use_colors);
        std::process::exit(EXIT_SUCCESS);
    }

    let client = match create_client(&config, cli.no_cache) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create API client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    match command {
        Commands::List(args) => {
            let model = args.model.unwrap_or(config.default_model);
            let records = fetch_or_exit(&client, model).await;

            let mut state = DashboardState::new(weights, model, args.page_size.unwrap_or(config.page_size));
            let mut actions = vec![Action::DataLoaded { model, records }];
            if let Some(position) = args.position {
                actions.push(Action::SetPosition(position));
            }
            if let Some(team) = args.team {
                actions.push(Action::SetTeam(team));
            }
            if let Some(search) = args.search {
                actions.push(Action::SetSearch(search));
            }
            if args.projections {
                actions.push(Action::ToggleViewMode);
            }
            // Page last: filter changes reset it
            actions.push(Action::SetPage(args.page));
            for action in actions {
                state = reduce(state, action);
            }

            let view = state.view();
            if args.tsv {
                print!("{}", fantasy_hoops::output::format_tsv(&view.page.items));
            } else if cli.verbose {
                // Verbose mode: per-player breakdown of the score
                for row in &view.page.items {
                    println!("{}. {} ({}, {})", row.rank, row.record.display_name, row.record.team, row.record.position);
                    let breakdown = fantasy_hoops::scoring::score_breakdown(&row.record, &state.weights);
                    println!("{}", fantasy_hoops::output::format_breakdown(&breakdown));
                    println!();
                }
                println!("{}", fantasy_hoops::output::format_page_footer(&view.page));
            } else {
                println!("{}", fantasy_hoops::output::format_projection_table(&view.page.items, use_colors));
                println!();
                println!("{}", fantasy_hoops::output::format_page_footer(&view.page));
            }
            debug!(
                total = view.total_count,
                filtered = view.filtered_count,
                elapsed = ?start_time.elapsed(),
                "listed players"
            );
        }
        Commands::Dashboard { model } => {
            let mut state = DashboardState::from_config(&config, weights);
            if let Some(model) = model {
                state.model = model;
            }
            let app = fantasy_hoops::tui::App::new(state, weights_path, config.default_preset);
            if let Err(e) = fantasy_hoops::tui::run_tui(app, client).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Models => match client.available_models().await {
            Ok(available) => {
                println!(
                    "{}",
                    fantasy_hoops::output::format_models(&available, config.default_model, use_colors)
                );
            }
            Err(e) => exit_for_api_error(&e),
        },
        Commands::Summary { model, top } => {
            let model = model.unwrap_or(config.default_model);
            let records = fetch_or_exit(&client, model).await;
            let ranked = fantasy_hoops::scoring::rank_by_fantasy_score(&records, &weights);

            let breakdown = fantasy_hoops::players::position_breakdown(&records);
            let averages = fantasy_hoops::players::average_stats_by_position(&records);
            println!("{} ({} players)", model.display_name(), records.len());
            println!();
            println!("{}", fantasy_hoops::output::format_position_summary(&breakdown, &averages));
            println!();
            println!("Category leaders");
            for category in StatCategory::CORE {
                let names: Vec<String> = fantasy_hoops::players::top_by_category(&records, category, 3)
                    .iter()
                    .map(|r| format!("{} {}", r.display_name, fantasy_hoops::output::format_stat(r.stat(category))))
                    .collect();
                println!("  {:<10} {}", category.label(), names.join(", "));
            }
            println!();
            println!("Top {}", top);
            let leaders = fantasy_hoops::players::top_projections(&ranked, top);
            println!("{}", fantasy_hoops::output::format_projection_table(&leaders, use_colors));
        }
        Commands::History { person_id } => match client.player_history(person_id).await {
            Ok(history) => println!("{}", fantasy_hoops::output::format_history(&history)),
            Err(e) => exit_for_api_error(&e),
        },
        Commands::Compare { stats } => {
            let categories = if stats.is_empty() {
                StatCategory::CORE.to_vec()
            } else {
                stats
            };
            match fantasy_hoops::fetch::fetch_model_comparison(&client, &categories).await {
                Ok(results) => println!("{}", fantasy_hoops::output::format_model_comparison(&results)),
                Err(e) => exit_for_api_error(&e),
            }
        }
        Commands::Weights { .. } | Commands::Init { .. } | Commands::ClearCache => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

fn create_client(config: &Config, no_cache: bool) -> anyhow::Result<ApiClient> {
    let cache_config = CacheConfig {
        enabled: !no_cache,
        ttl: config.cache_ttl().unwrap_or(CacheConfig::default().ttl),
    };
    let cache = ResponseCache::new(get_cache_path(), cache_config);
    ApiClient::new(&config.api_base_url, config.request_timeout(), cache)
}

async fn fetch_or_exit(client: &ApiClient, model: ModelType) -> Vec<PlayerStatRecord> {
    match fantasy_hoops::fetch::fetch_player_records(client, model).await {
        Ok(records) => records,
        Err(e) => exit_for_api_error(&e),
    }
}

fn exit_for_api_error(e: &ApiError) -> ! {
    eprintln!("{}", e);
    match e {
        ApiError::Network { .. } | ApiError::Status { .. } => {
            eprintln!("Is the stats server running? Set api_base_url in the config file to point elsewhere.");
            std::process::exit(EXIT_NETWORK);
        }
        ApiError::Decode { .. } => std::process::exit(EXIT_FAILURE),
    }
}

fn run_weights_command(
    action: WeightsCommand,
    weights_path: &std::path::Path,
    weights: ScoringWeights,
    config: &Config,
    use_colors: bool,
) {
    match action {
        WeightsCommand::Show => {
            println!("{}", fantasy_hoops::output::format_weights(&weights, use_colors));
            println!();
            if weights_path.exists() {
                println!("Saved in {}", weights_path.display());
            } else {
                println!("Using the {} preset (nothing saved)", config.default_preset.name());
            }
            println!();
            println!("Presets:");
            for preset in WeightPreset::ALL {
                println!("  {:<10} {}", preset.name(), preset.description());
            }
        }
        WeightsCommand::Set { category, value } => {
            let category = match StatCategory::parse(&category) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let value = match fantasy_hoops::scoring::parse_weight(&value) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let updated = weights.with(category, value);
            save_or_exit(weights_path, &updated);
            println!("{} weight set to {}", category.label(), value);
        }
        WeightsCommand::Reset => {
            if let Err(e) = fantasy_hoops::settings::reset_weights(weights_path) {
                eprintln!("Failed to reset weights: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
            println!("Weights reset to the {} preset", config.default_preset.name());
        }
        WeightsCommand::Preset { name } => {
            let preset = match WeightPreset::parse(&name) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            save_or_exit(weights_path, &preset.weights());
            println!("Applied preset: {}", preset.name());
        }
    }
}

fn save_or_exit(path: &std::path::Path, weights: &ScoringWeights) {
    if let Err(e) = fantasy_hoops::settings::save_weights(path, weights) {
        eprintln!("Failed to save weights: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}
