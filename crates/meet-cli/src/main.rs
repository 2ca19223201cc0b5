mod config;
mod plates;
mod report_writer;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meet::models::{classification_key, convert};
use meet::{Division, PlateLoadSolver, PlateSet, WeightClass, WeightUnit};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use report_writer::ReportWriter;
use session::Session;

#[derive(Parser)]
#[command(name = "meet")]
#[command(about = "Powerlifting meet scoring and bar loading", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Work out the plates to load for a target weight
    Plates {
        weight: f64,

        #[arg(long)]
        unit: Option<WeightUnit>,

        /// JSON plate set replacing the standard one for the unit
        #[arg(long)]
        plate_set: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Show the division and weight class a lifter competes in
    Classify {
        age: i32,

        bodyweight: f64,

        #[arg(long)]
        unit: Option<WeightUnit>,
    },
    /// Run judging table commands from a script or stdin
    Session {
        #[arg(long)]
        script: Option<PathBuf>,

        #[arg(long, env = "MEET_REPORT_DIR")]
        report_dir: Option<PathBuf>,

        #[arg(long)]
        unit: Option<WeightUnit>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("meet={},meet_cli={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Plates {
            weight,
            unit,
            plate_set,
            json,
        } => {
            let unit = unit.unwrap_or(config.default_unit);
            handle_plates(weight, unit, plate_set, json)?;
        }
        Commands::Classify {
            age,
            bodyweight,
            unit,
        } => {
            let unit = unit.unwrap_or(config.default_unit);
            handle_classify(age, bodyweight, unit);
        }
        Commands::Session {
            script,
            report_dir,
            unit,
        } => {
            let config = config.with_overrides(report_dir, unit);
            handle_session(script, config)?;
        }
    }

    Ok(())
}

fn handle_plates(weight: f64, unit: WeightUnit, plate_set: Option<PathBuf>, json: bool) -> Result<()> {
    let solver = match plate_set {
        Some(path) => PlateLoadSolver::new(load_plate_set(&path)?),
        None => PlateLoadSolver::for_unit(unit),
    };

    let set = solver.plate_set();
    tracing::debug!(
        "Loading from {:?} {} plates on a {} {} bar",
        set.denominations(),
        set.unit,
        set.bar_weight,
        set.unit
    );

    let layout = solver
        .solve(weight, unit)
        .with_context(|| format!("Cannot load {} {}", weight, unit))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        println!("{}", plates::describe_layout(&layout, weight, unit));
    }

    Ok(())
}

fn load_plate_set(path: &Path) -> Result<PlateSet> {
    tracing::info!("Loading plate set from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plate set {}", path.display()))?;
    let raw: PlateSet = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse plate set {}", path.display()))?;

    PlateSet::new(raw.unit, raw.plates, raw.bar_weight)
        .with_context(|| format!("Invalid plate set {}", path.display()))
}

fn handle_classify(age: i32, bodyweight: f64, unit: WeightUnit) {
    let kg = convert(bodyweight, unit, WeightUnit::Kg);
    let division = Division::for_age(age);
    let weight_class = WeightClass::for_bodyweight_kg(kg);

    println!("Division: {}", division);
    println!("Class: {}", weight_class);
    println!("Key: {}", classification_key(weight_class, division));
}

fn handle_session(script: Option<PathBuf>, config: Config) -> Result<()> {
    tracing::info!(
        "Starting judging session in {}, reports go to {}",
        config.default_unit,
        config.report_dir.display()
    );

    let writer = ReportWriter::new(config.report_dir);
    let stdout = std::io::stdout();
    let mut session = Session::new(config.default_unit, writer, stdout.lock());

    let failures = match script {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file))?
        }
        None => session.run(std::io::stdin().lock())?,
    };

    if failures > 0 {
        tracing::warn!(
            "{} command(s) were rejected, {} competitor(s) entered",
            failures,
            session.roster().len()
        );
    }

    Ok(())
}
