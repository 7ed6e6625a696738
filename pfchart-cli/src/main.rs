//! pfchart CLI — chart CSV files or synthetic walks as Point-and-Figure boxes.
//!
//! Commands:
//! - `chart` — load one or more series, transform them, print text or JSON
//! - `config` — print the effective settings as TOML

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pfchart_core::data::{generate, read_csv};
use pfchart_core::rng::SeedHierarchy;
use pfchart_core::settings::Settings;
use pfchart_core::{transform, EngineConfig, InitialDirection, PriceObservation};
use rayon::prelude::*;
use render::{render_json, render_text, ChartedSeries};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pfchart",
    about = "pfchart — Point-and-Figure charts from daily price series"
)]
struct Cli {
    /// Log at debug level (RUST_LOG is used otherwise).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart CSV files or synthetic walks.
    Chart {
        /// CSV file(s) with Date, Open, High, Low, Close columns.
        #[arg(long = "csv", value_name = "FILE")]
        csv: Vec<PathBuf>,

        /// Chart synthetic random walks instead of files.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Number of synthetic series (with --synthetic). Defaults to 1.
        #[arg(long)]
        series: Option<u64>,

        /// Master seed for synthetic series. Defaults to the settings file.
        #[arg(long)]
        seed: Option<u64>,

        /// Price per box. Defaults to the settings file, then 1.0.
        #[arg(long)]
        box_size: Option<f64>,

        /// Boxes needed for a reversal. Defaults to the settings file, then 3.
        #[arg(long)]
        reversal: Option<u32>,

        /// Direction of the first column.
        #[arg(long, value_enum)]
        initial_direction: Option<DirectionArg>,

        /// TOML settings file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write output here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the effective settings as TOML.
    Config {
        /// TOML settings file to merge over the defaults.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Rising,
    Inferred,
}

impl From<DirectionArg> for InitialDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Rising => InitialDirection::Rising,
            DirectionArg::Inferred => InitialDirection::Inferred,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// A named input series.
struct Series {
    name: String,
    observations: Vec<PriceObservation>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Chart {
            csv,
            synthetic,
            series,
            seed,
            box_size,
            reversal,
            initial_direction,
            config,
            format,
            output,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            if let Some(box_size) = box_size {
                settings.chart.box_size = box_size;
            }
            if let Some(reversal) = reversal {
                settings.chart.reversal = reversal;
            }
            if let Some(direction) = initial_direction {
                settings.chart.initial_direction = direction.into();
            }
            if let Some(seed) = seed {
                settings.synthetic.seed = seed;
            }
            run_chart(&settings, &csv, synthetic, series, format, output.as_deref())
        }
        Commands::Config { config } => {
            let settings = load_settings(config.as_deref())?;
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn run_chart(
    settings: &Settings,
    csv: &[PathBuf],
    synthetic: bool,
    series_count: Option<u64>,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    // Validate mutually exclusive sources
    if synthetic && !csv.is_empty() {
        bail!("--csv and --synthetic are mutually exclusive");
    }
    if !synthetic && csv.is_empty() {
        bail!("one of --csv or --synthetic is required");
    }
    if !synthetic && series_count.is_some() {
        bail!("--series only applies to --synthetic");
    }

    let engine_config = settings
        .engine_config()
        .context("invalid chart settings")?;

    let inputs = if synthetic {
        load_synthetic(settings, series_count.unwrap_or(1))?
    } else {
        load_csv_files(csv)?
    };

    let charts = chart_all(&inputs, &engine_config)?;

    let rendered = match format {
        Format::Text => charts
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Json => render_json(&charts)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {} chart(s) to {}", charts.len(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn load_csv_files(paths: &[PathBuf]) -> Result<Vec<Series>> {
    paths
        .par_iter()
        .map(|path| -> Result<Series> {
            let observations =
                read_csv(path).with_context(|| format!("loading {}", path.display()))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(Series { name, observations })
        })
        .collect()
}

fn load_synthetic(settings: &Settings, count: u64) -> Result<Vec<Series>> {
    if count == 0 {
        bail!("--series must be at least 1");
    }
    let seeds = SeedHierarchy::new(settings.synthetic.seed);
    log::debug!(
        "generating {count} synthetic series from master seed {}",
        seeds.master_seed()
    );

    (0..count)
        .into_par_iter()
        .map(|index| -> Result<Series> {
            let mut rng = seeds.rng_for("synthetic", index);
            let observations = generate(&settings.synthetic.params, &mut rng)
                .context("generating synthetic series")?;
            Ok(Series {
                name: format!("synthetic-{index}"),
                observations,
            })
        })
        .collect()
}

/// Transform every series independently; output order follows input order.
fn chart_all(inputs: &[Series], config: &EngineConfig) -> Result<Vec<ChartedSeries>> {
    inputs
        .par_iter()
        .map(|series| -> Result<ChartedSeries> {
            let points = transform(&series.observations, config)
                .with_context(|| format!("charting {}", series.name))?;
            Ok(ChartedSeries::new(
                series.name.clone(),
                series.observations.len(),
                config,
                points,
            ))
        })
        .collect()
}
