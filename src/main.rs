use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use contest_rank::config::SelectionConfig;
use contest_rank::contest::{CategoryId, Genre, StepId};
use contest_rank::ranking::{build_leaderboard, RankingCalculator};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank every participant of the selection (default if no subcommand)
    Leaderboard,
    /// Show the score of a single ascent
    Ascent {
        /// Ascent id
        id: u64,
    },
    /// Show the aggregated score of a participant
    Participant {
        /// Participant id
        id: u64,
    },
    /// Write the leaderboard as a JSON snapshot
    Export {
        /// Destination file
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "contest-rank")]
#[command(about = "Climbing contest ranking CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/contest-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Contest dataset (JSON), overrides `dataset` from the config
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Step to rank
    #[arg(long, global = true)]
    step: Option<StepId>,

    /// Category to rank
    #[arg(long, global = true)]
    category: Option<CategoryId>,

    /// Genre to rank (male or female), ignored for unisex categories
    #[arg(long, global = true)]
    genre: Option<Genre>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Leaderboard);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match contest_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = contest_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let Some(dataset_path) = cli.data.or_else(|| config.dataset.clone()) else {
        eprintln!("No contest dataset configured.");
        eprintln!("Pass --data <file.json> or add it to ~/.config/contest-rank/config.yaml:");
        eprintln!("  dataset: /path/to/contest.json");
        std::process::exit(EXIT_CONFIG);
    };

    // Load and check the dataset
    let data = match contest_rank::contest::load_contest(&dataset_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Dataset error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if let Err(errors) = contest_rank::contest::validate_contest(&data) {
        eprintln!("Dataset errors in {}:", dataset_path.display());
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_DATA);
    }

    let selection = contest_rank::config::effective_selection(
        &config,
        SelectionConfig {
            step: cli.step,
            category: cli.category,
            genre: cli.genre,
        },
    );
    let selection =
        match data.resolve_selection(selection.step, selection.category, selection.genre) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Selection error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };

    let calculator =
        RankingCalculator::new(&data, selection.step, selection.category, selection.genre);
    let use_colors = contest_rank::output::should_use_colors(
        config.output.as_ref().and_then(|o| o.colors),
    );

    match command {
        Commands::Leaderboard => {
            let participants = data.participants_in(selection.category, selection.genre);
            let standings = build_leaderboard(&calculator, participants);

            match cli.format {
                OutputFormat::Table => {
                    println!(
                        "{}",
                        contest_rank::output::format_selection(&calculator, use_colors)
                    );
                    println!();
                    println!(
                        "{}",
                        contest_rank::output::format_leaderboard(&standings, use_colors)
                    );
                }
                OutputFormat::Tsv => {
                    println!("{}", contest_rank::output::format_tsv(&standings));
                }
                OutputFormat::Json => print_json(&standings),
            }

            tracing::debug!(
                "ranked {} participants in {:?}",
                standings.len(),
                start_time.elapsed()
            );
        }
        Commands::Ascent { id } => {
            let score = calculator.scores(id);
            if !score.is_ranked() && calculator.ascents().iter().all(|a| a.id != id) {
                tracing::warn!("ascent {} is not in the selected ranking scope", id);
            }

            match cli.format {
                OutputFormat::Json => print_json(&score),
                _ => println!(
                    "{}",
                    contest_rank::output::format_ascent_score(id, &score, use_colors)
                ),
            }
        }
        Commands::Participant { id } => {
            let Some(participant) = data.participant(id) else {
                eprintln!("Unknown participant {}", id);
                std::process::exit(EXIT_CONFIG);
            };
            let score = calculator.participant_scores(id);

            match cli.format {
                OutputFormat::Json => print_json(&score),
                _ => println!(
                    "{}",
                    contest_rank::output::format_participant_score(participant, &score, use_colors)
                ),
            }
        }
        Commands::Export { output } => {
            let participants = data.participants_in(selection.category, selection.genre);
            let standings = build_leaderboard(&calculator, participants);
            let snapshot = contest_rank::output::RankingSnapshot::new(&calculator, &standings);

            if let Err(e) = contest_rank::output::save_snapshot(&output, &snapshot) {
                eprintln!("Export error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }

            println!(
                "Exported {} standings to {}",
                standings.len(),
                output.display()
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
