use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use seamap::area::{ApproximationSelector, Spacing};
use seamap::config::prompt::{PromptAnswers, Prompter};
use seamap::config::{self, FileConfig};
use seamap::grid::GridShape;
use seamap::report::{count_islands, write_curve_csv, write_map, write_summary};
use seamap::simulation::{DryMasks, SimulationConfig, SimulationResult, accumulate};

/// Estimate how much land stays above water under sea level rise
///
/// Input files hold one `<lat> <lon> <elevation>` record per line, grouped in
/// bands of constant latitude.
///
/// Examples:
///   # Ask for every setting interactively
///   seamap
///
///   # Single 10 m rise with both area approximations, plus a map
///   seamap -i australia.txt -r 10 -a all --map australia.png
///
///   # Scan 50 rises from 1 to 800 m and export the curve
///   seamap -i netherlands.txt --curve netherlands.csv
#[derive(Parser, Debug)]
#[command(name = "seamap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches seamap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid file; relative names are looked up in the data directory
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Directory holding grid files (defaults to ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Mean horizontal cell spacing in km (0 = derive from the grid)
    #[arg(long)]
    horizontal_spacing: Option<f64>,

    /// Mean vertical cell spacing in km (0 = derive from the grid)
    #[arg(long)]
    vertical_spacing: Option<f64>,

    /// Sea level rise in meters (0 = scan 50 values from 1 to 800)
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    rise: Option<f64>,

    /// Area approximation: first, second, or all
    #[arg(short = 'a', long)]
    approximation: Option<ApproximationSelector>,

    /// Ask for settings on the terminal
    #[arg(long)]
    interactive: bool,

    /// Write a before/after PNG map (single sea level only)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Write the percentage-remaining curve as CSV
    #[arg(long)]
    curve: Option<PathBuf>,

    /// Print results as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let data_dir = args.data_dir.clone().unwrap_or_else(|| file_config.data_dir());
    let mut answers = PromptAnswers {
        input: args
            .input
            .clone()
            .or_else(|| file_config.input.clone())
            .unwrap_or_default(),
        horizontal_spacing: args
            .horizontal_spacing
            .or(file_config.horizontal_spacing)
            .unwrap_or(0.0),
        vertical_spacing: args
            .vertical_spacing
            .or(file_config.vertical_spacing)
            .unwrap_or(0.0),
        rise: args.rise.or(file_config.rise).unwrap_or(0.0),
        approximation: args
            .approximation
            .or(file_config.approximation)
            .unwrap_or_default(),
    };
    let map_path = args.map.clone().or_else(|| file_config.map.clone());
    let curve_path = args.curve.clone().or_else(|| file_config.curve.clone());

    if args.interactive || answers.input.as_os_str().is_empty() {
        let files = config::available_inputs(&data_dir).unwrap_or_else(|e| {
            warn!("Cannot list data directory {}: {}", data_dir.display(), e);
            Vec::new()
        });
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        answers = prompter
            .ask_all(&files, &answers)
            .context("Failed to read settings from the terminal")?;
        println!();
    }

    if answers.input.as_os_str().is_empty() {
        bail!("No grid file given; use --input or add files to {}", data_dir.display());
    }

    let input = config::resolve_input(&answers.input, &data_dir);
    if !input.is_file() {
        bail!("Grid file not found: {}", input.display());
    }

    let sim_config = SimulationConfig::new(
        input,
        answers.horizontal_spacing,
        answers.vertical_spacing,
        answers.rise,
        answers.approximation,
    );

    if !args.json {
        println!("seamap - Sea Level Rise Area Estimator");
        println!("======================================");
        println!();
        if args.verbose > 0 {
            println!("Configuration:");
            println!("  Input: {}", sim_config.input.display());
            println!("  Horizontal spacing: {} km", sim_config.horizontal_spacing);
            println!("  Vertical spacing: {} km", sim_config.vertical_spacing);
            println!("  Sea levels: {}", sim_config.sea_levels.len());
            println!("  Approximation: {:?}", answers.approximation);
            println!();
        }
    }

    let result = run_stages(&sim_config)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize results")?;
        println!("{}", json);
    } else {
        println!();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_summary(&mut out, &result)?;
        if let Some(masks) = result.masks.as_ref() {
            print_islands(&mut out, &result, masks)?;
        }
        out.flush()?;
    }

    if let Some(path) = map_path {
        if result.is_single_level() {
            let spinner = create_spinner("Writing map...");
            let size = write_map(&path, &result).context("Failed to write map")?;
            spinner.finish_with_message(format!(
                "Wrote map {} ({:.1} KB)",
                path.display(),
                size as f64 / 1024.0
            ));
        } else {
            warn!("Skipping map: maps need a single sea level rise");
        }
    }

    if let Some(path) = curve_path {
        write_curve_csv(&path, &result).context("Failed to write curve")?;
        if !args.json {
            println!("Curve: {}", path.display());
        }
    } else if !result.is_single_level() && !args.json {
        println!("Tip: pass --curve <file.csv> to export the percentage-remaining curve");
    }

    if !args.json {
        println!();
        println!("Done! Total time: {:.1}s", total_start.elapsed().as_secs_f32());
    }

    Ok(())
}

/// Shape inference, spacing and the accumulation pass, each with its own spinner or bar.
fn run_stages(config: &SimulationConfig) -> Result<SimulationResult> {
    let spinner = create_spinner("Mapping grid file...");
    let start = Instant::now();
    let shape = GridShape::infer(&config.input)
        .with_context(|| format!("Failed to map grid file: {}", config.input.display()))?;
    spinner.finish_with_message(format!(
        "Mapped {} records: {} bands x {} rows [{:.1}s]",
        shape.total_records,
        shape.longitude_band_count,
        shape.rows_per_latitude_band,
        start.elapsed().as_secs_f32()
    ));
    if !shape.is_rectangular() {
        warn!(
            "{} trailing records do not fill a whole band",
            shape.total_records - shape.grid_len()
        );
    }

    let spacing = Spacing::resolve(&shape, config.horizontal_spacing, config.vertical_spacing)
        .context("Failed to resolve cell spacing")?;
    info!(
        "Cell spacing: {:.4} km x {:.4} km",
        spacing.horizontal_km, spacing.vertical_km
    );

    let bar = create_bar(shape.total_records as u64, "Accumulating dry area");
    let start = Instant::now();
    let totals = accumulate(&config.input, &shape, &spacing, config, |n| {
        bar.set_position(n as u64)
    })
    .context("Failed to accumulate dry area")?;
    bar.finish_with_message(format!(
        "Accumulated {} sea levels [{:.1}s]",
        config.sea_levels.len(),
        start.elapsed().as_secs_f32()
    ));

    SimulationResult::from_totals(shape, spacing, config, totals)
        .context("Failed to compute dry area ratios")
}

fn print_islands<W: Write>(
    out: &mut W,
    result: &SimulationResult,
    masks: &DryMasks,
) -> io::Result<()> {
    let before = count_islands(&DryMasks::to_grid(&masks.was_dry_before, &result.shape));
    let after = count_islands(&DryMasks::to_grid(&masks.is_dry_after_rise, &result.shape));
    writeln!(out, "Islands before the rise: {}", before)?;
    writeln!(out, "Islands after the rise:  {}", after)?;
    Ok(())
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn create_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_message(message.to_string());
    pb
}
