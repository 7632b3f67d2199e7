//! Discourse CLI - securitization intensity scoring for tweet corpora.

mod ui;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use discourse::pipeline::{OutputPlan, SUMMARY_FILE};
use discourse::report::{export_high_intensity, Period};
use discourse::{AnalysisConfig, AnalysisRun, EventReport};

/// Discourse CLI - Score tweets for securitization framing.
#[derive(Parser)]
#[command(name = "discourse")]
#[command(about = "Securitization discourse analysis for tweet corpora")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis config file (TOML)
    #[arg(long, global = true, env = "DISCOURSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a corpus and write the augmented table, summary and charts
    Analyze {
        /// Input corpus (.csv, .xlsx, .json or .jsonl)
        #[arg(long, env = "DISCOURSE_INPUT")]
        input: PathBuf,

        /// Augmented table path (default: <input>_analyzed.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Directory for summary.json and charts (default: next to the table)
        #[arg(long, env = "DISCOURSE_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Grouping period (year, quarter or month), overrides the config file
        #[arg(long, value_parser = parse_period)]
        period: Option<Period>,

        /// Skip SVG chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Summarize tweets posted inside a date window
    Event {
        /// Input corpus (.csv, .xlsx, .json or .jsonl)
        #[arg(long, env = "DISCOURSE_INPUT")]
        input: PathBuf,

        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the window, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Event name used in the report
        #[arg(long)]
        name: String,

        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Export high-intensity tweets for qualitative reading
    Export {
        /// Input corpus (.csv, .xlsx, .json or .jsonl)
        #[arg(long, env = "DISCOURSE_INPUT")]
        input: PathBuf,

        /// Output path (.csv, or .xlsx for a workbook)
        #[arg(long)]
        output: PathBuf,

        /// Minimum security intensity, overrides the config file
        #[arg(long)]
        threshold: Option<u32>,
    },

    /// Print the active lexicon
    Lexicon,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("discourse=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("discourse=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = AnalysisConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load analysis config")?;

    match cli.command {
        Commands::Analyze {
            input,
            output,
            output_dir,
            period,
            no_charts,
        } => {
            if let Some(period) = period {
                config.period = period;
            }
            tracing::info!(
                input = %input.display(),
                period = %config.period,
                charts = !no_charts,
                "Starting analysis"
            );
            run_analyze(&config, &input, output, output_dir, !no_charts)
        }
        Commands::Event {
            input,
            start,
            end,
            name,
            json,
        } => {
            anyhow::ensure!(start <= end, "Event start {start} is after end {end}");
            tracing::info!(input = %input.display(), %start, %end, name = %name, "Analyzing event");
            run_event(&config, &input, &name, start, end, json.as_deref())
        }
        Commands::Export {
            input,
            output,
            threshold,
        } => {
            let threshold = threshold.unwrap_or(config.high_intensity_threshold);
            run_export(&config, &input, &output, threshold)
        }
        Commands::Lexicon => {
            let lexicon = config.lexicon().context("Failed to load lexicon")?;
            ui::print_lexicon(&lexicon);
            Ok(())
        }
    }
}

fn parse_period(s: &str) -> std::result::Result<Period, String> {
    s.parse().map_err(|e: discourse::DiscourseError| e.to_string())
}

fn load_run(config: &AnalysisConfig, input: &Path) -> Result<AnalysisRun> {
    ui::print_step(&format!("Loading data from {}...", input.display()));
    let run = AnalysisRun::load(config, input)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;
    println!("Loaded {} tweets", run.table().len());
    let truncated = &run.table().truncated;
    if !truncated.is_empty() {
        ui::print_warning(&format!(
            "{} rows had more cells than the header; extra cells were dropped (first: row {})",
            truncated.len(),
            truncated[0]
        ));
    }
    Ok(run)
}

fn run_analyze(
    config: &AnalysisConfig,
    input: &Path,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    charts: bool,
) -> Result<()> {
    let run = load_run(config, input)?;

    let mut plan = OutputPlan::for_input(input);
    if let Some(table) = output {
        plan.artifacts_dir = table
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        plan.table = table;
    }
    if let Some(dir) = output_dir {
        plan.artifacts_dir = dir;
    }
    plan.charts = charts;

    let summary = run
        .write(config, &plan)
        .context("Failed to write analysis results")?;

    ui::print_corpus_summary(&summary.corpus);
    ui::print_grouped(
        &format!("{} BREAKDOWN", summary.grouped.period.to_string().to_uppercase()),
        &summary.grouped,
    );
    if summary.grouped.period != Period::Quarter {
        ui::print_grouped("QUARTERLY BREAKDOWN", &summary.quarterly);
    }

    println!();
    ui::print_success(&format!("Results saved to {}", plan.table.display()));
    ui::print_success(&format!(
        "Summary saved to {}",
        plan.artifacts_dir.join(SUMMARY_FILE).display()
    ));
    if plan.charts {
        ui::print_success(&format!("Charts saved in {}", plan.artifacts_dir.display()));
    }

    Ok(())
}

fn run_event(
    config: &AnalysisConfig,
    input: &Path,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    json: Option<&Path>,
) -> Result<()> {
    let run = load_run(config, input)?;
    let report = EventReport::build(
        run.scored(),
        run.categorizer().lexicon(),
        name,
        start,
        end,
    );
    ui::print_event(&report);

    if let Some(path) = json {
        discourse::report::save_json(path, &report)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!();
        ui::print_success(&format!("Report saved to {}", path.display()));
    }

    Ok(())
}

fn run_export(config: &AnalysisConfig, input: &Path, output: &Path, threshold: u32) -> Result<()> {
    let run = load_run(config, input)?;
    let exported = export_high_intensity(output, run.scored(), threshold)
        .with_context(|| format!("Failed to export to {}", output.display()))?;

    if exported == 0 {
        ui::print_warning(&format!("No tweets reached intensity {threshold}"));
    } else {
        ui::print_success(&format!(
            "Exported {exported} high-intensity tweets to {}",
            output.display()
        ));
    }

    Ok(())
}
