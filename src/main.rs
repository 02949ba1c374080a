use anyhow::Context;
use clap::{Parser, Subcommand};
use player_insight_engine::group::{FrequencyTable, GroupStats};
use player_insight_engine::stats::Statistics;
use player_insight_engine::{Dataset, InsightEngine, PlotTheme};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "cleaned_csv/ACTIVE_PLAYERS_CLEANED.csv";
const DEFAULT_OUTPUT_DIR: &str = "visualizations";

#[derive(Parser)]
#[command(name = "player-insight-engine")]
#[command(author = "Hummer Team")]
#[command(version = "0.1.0")]
#[command(about = "Descriptive charts for active basketball players", long_about = None)]
struct Cli {
    /// Log debug details (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all charts to PNG files (default)
    Render {
        /// Path to the cleaned player table (CSV or JSON)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Directory the charts are written to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Pixels per inch of figure size
        #[arg(long, default_value_t = 300)]
        dpi: u32,
    },

    /// Print the aggregates behind each chart without rendering
    Summary {
        /// Path to the cleaned player table (CSV or JSON)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Render {
        input: PathBuf::from(DEFAULT_INPUT),
        output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        dpi: PlotTheme::default().dpi,
    });

    match command {
        Commands::Render {
            input,
            output_dir,
            dpi,
        } => {
            let engine = load_engine(&input)?;
            let theme = PlotTheme::default().with_dpi(dpi);
            let written = engine.render_all(&output_dir, &theme)?;
            info!(
                charts = written.len(),
                dir = %output_dir.display(),
                "rendering complete"
            );
        }

        Commands::Summary { input, json } => {
            let engine = load_engine(&input)?;
            let report = engine.report();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Players: {}", report.players);
                print_stats("Height (inches)", report.height.as_ref());
                print_stats("Weight (lbs)", report.weight.as_ref());
                print_counts("Players by position", &report.positions);
                print_counts("Players per team", &report.teams);
                if let Some(mean) = report.mean_players_per_team {
                    println!("Average: {:.1} players per team", mean);
                }
                print_groups("Average height by position", &report.height_by_position);
                print_groups("Average weight by position", &report.weight_by_position);
            }
        }
    }

    Ok(())
}

fn load_engine(input: &Path) -> anyhow::Result<InsightEngine> {
    let dataset = Dataset::from_path(input)?;
    info!(
        "Loaded dataset '{}' with {} records",
        dataset.name,
        dataset.len()
    );
    InsightEngine::from_dataset(&dataset)
        .with_context(|| format!("cannot analyze {}", input.display()))
}

fn print_stats(title: &str, stats: Option<&Statistics>) {
    println!("\n=== {} ===", title);
    match stats {
        Some(stats) => {
            println!("Count:  {}", stats.count);
            println!("Mean:   {:.2}", stats.mean);
            println!("Median: {:.2}", stats.median);
            println!("Std:    {:.2}", stats.std);
            println!("Min:    {:.2}", stats.min);
            println!("Max:    {:.2}", stats.max);
        }
        None => println!("No values"),
    }
}

fn print_counts(title: &str, table: &FrequencyTable) {
    println!("\n=== {} ===", title);
    for entry in &table.entries {
        println!("{:<28} {}", entry.group, entry.count);
    }
}

fn print_groups(title: &str, groups: &[GroupStats]) {
    println!("\n=== {} ===", title);
    for group in groups {
        println!(
            "{:<8} n={:<4} mean={:.2} std={:.2}",
            group.group, group.count, group.mean, group.std
        );
    }
}
