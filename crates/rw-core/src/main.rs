//! RangeWatch command-line entry point.
//!
//! Thin calling layer over the detector and report crates: reads JSON
//! input, enforces minimum batch sizes, and prints JSON results on
//! stdout. Errors go to stderr as structured JSON with a stable code.

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rw_common::{Error, StructuredError};
use rw_core::{ClusterAnomalyDetector, IsolationAnomalyDetector, LABEL_ANOMALY};
use rw_report::{generate_full_report, FeedRecord};

/// Explicit training requires this many readings.
const MIN_TRAIN_SAMPLES: usize = 20;

/// Detection requires this many readings.
const MIN_DETECT_SAMPLES: usize = 5;

/// RangeWatch - distance-sensor anomaly detection and reporting
#[derive(Parser)]
#[command(name = "rangewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Directory holding persisted model blobs
    #[arg(long, global = true, env = "RANGEWATCH_MODEL_DIR", default_value = "models")]
    model_dir: PathBuf,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a detector on a batch of readings
    Train(BatchArgs),

    /// Score a batch of readings against the (possibly auto-trained) model
    Detect(BatchArgs),

    /// Generate the full dual-sensor report from feed records
    Report(ReportArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorKind {
    Cluster,
    Isolation,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Which detector to use
    #[arg(long, value_enum, default_value = "cluster")]
    detector: DetectorKind,

    /// JSON array of readings; "-" reads stdin
    #[arg(long, default_value = "-")]
    input: String,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// JSON array of feed records; "-" reads stdin
    #[arg(long, default_value = "-")]
    input: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = match &cli.command {
        Commands::Train(args) => run_train(&cli.global, args),
        Commands::Detect(args) => run_detect(&cli.global, args),
        Commands::Report(args) => run_report(args),
    };

    if let Err(err) = result {
        eprintln!("{}", StructuredError::from(&err).to_json());
        std::process::exit(1);
    }
}

fn init_logging(global: &GlobalOpts) {
    let default_level = if global.quiet {
        "error"
    } else {
        match global.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if global.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Read a JSON document from a file, or stdin for `-`.
fn read_input(input: &str) -> Result<String, Error> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Parse readings, coercing malformed entries to the zero sentinel.
fn read_values(input: &str) -> Result<Vec<f64>, Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(&read_input(input)?)?;
    Ok(rw_math::clean(&raw))
}

fn require_samples(n: usize, min: usize) -> Result<(), Error> {
    if n < min {
        return Err(Error::InsufficientSamples { n, min });
    }
    Ok(())
}

fn run_train(global: &GlobalOpts, args: &BatchArgs) -> Result<(), Error> {
    let values = read_values(&args.input)?;
    require_samples(values.len(), MIN_TRAIN_SAMPLES)?;

    match args.detector {
        DetectorKind::Cluster => {
            let mut det = ClusterAnomalyDetector::new(&global.model_dir);
            det.train(&values);
            println!(
                "{}",
                serde_json::json!({
                    "detector": "cluster",
                    "trained_on": values.len(),
                    "n_clusters": det.n_clusters(),
                })
            );
        }
        DetectorKind::Isolation => {
            let mut det = IsolationAnomalyDetector::new(&global.model_dir);
            det.train(&values);
            println!(
                "{}",
                serde_json::json!({
                    "detector": "isolation",
                    "trained_on": values.len(),
                })
            );
        }
    }
    Ok(())
}

fn run_detect(global: &GlobalOpts, args: &BatchArgs) -> Result<(), Error> {
    let values = read_values(&args.input)?;
    require_samples(values.len(), MIN_DETECT_SAMPLES)?;

    let output = match args.detector {
        DetectorKind::Cluster => {
            let mut det = ClusterAnomalyDetector::new(&global.model_dir);
            let labels = det.detect(&values);
            let anomalies = det.analyze(&values);
            serde_json::json!({
                "detector": "cluster",
                "labels": labels,
                "anomalies": anomalies,
            })
        }
        DetectorKind::Isolation => {
            let mut det = IsolationAnomalyDetector::new(&global.model_dir);
            let labels = det.detect(&values);
            let scores = det.anomaly_score(&values);
            let anomalies: Vec<serde_json::Value> = labels
                .iter()
                .enumerate()
                .filter(|(_, &label)| label == LABEL_ANOMALY)
                .map(|(index, _)| {
                    serde_json::json!({
                        "index": index,
                        "value": rw_math::round_to(values[index], 2),
                        "score": rw_math::round_to(scores[index], 4),
                        "severity": IsolationAnomalyDetector::severity(values[index], &values),
                    })
                })
                .collect();
            serde_json::json!({
                "detector": "isolation",
                "labels": labels,
                "scores": scores,
                "anomalies": anomalies,
            })
        }
    };

    println!("{output}");
    Ok(())
}

fn run_report(args: &ReportArgs) -> Result<(), Error> {
    let records: Vec<FeedRecord> = serde_json::from_str(&read_input(&args.input)?)?;
    let report = generate_full_report(&records, chrono::Utc::now());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
