use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use mineguard_engine::{Class, ConfusionMatrix, Metrics, SensorType};
use mineguard_io::{ModelReader, ReadingReader};

#[derive(Parser)]
#[command(name = "mineguard")]
#[command(about = "Mining-safety sensor risk classification: ensemble inference and evaluation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel batch prediction (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single sensor reading
    Predict {
        /// Path to the model artifact (JSON)
        #[arg(long)]
        model: PathBuf,

        /// Raw sensor value to classify
        #[arg(long)]
        value: f64,

        /// Sensor type name (mq7, pulse, body_temp, ax, ay)
        #[arg(long)]
        sensor: String,

        /// Authoritative type code, overriding the sensor-name table
        #[arg(long)]
        type_code: Option<i64>,
    },

    /// Evaluate the model against a labelled readings dataset
    Evaluate {
        /// Path to the model artifact (JSON)
        #[arg(long)]
        model: PathBuf,

        /// Path to the labelled readings CSV
        #[arg(long)]
        data: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct PredictOutput {
    sensor: String,
    value: f64,
    predicted_class: String,
    probability_risk: f64,
    probability_normal: f64,
    risk_level: String,
    trees_used: usize,
    model_n_trees: usize,
}

#[derive(Serialize)]
struct ConfusionOutput {
    true_positives: usize,
    true_negatives: usize,
    false_positives: usize,
    false_negatives: usize,
}

#[derive(Serialize)]
struct EvaluateOutput {
    n_records: usize,
    n_rows_skipped: usize,
    n_unclassified: usize,
    accuracy: f64,
    precision: f64,
    recall: f64,
    f1: f64,
    confusion: ConfusionOutput,
    model_n_trees: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Predict {
            model,
            value,
            sensor,
            type_code,
        } => {
            let ensemble = ModelReader::new(&model)
                .read()
                .context("failed to load model")?;

            let result = ensemble
                .classify(value, &sensor, type_code)
                .context("prediction failed")?;

            info!(
                class = %result.predicted_class,
                probability_risk = result.probability_risk,
                trees_used = result.trees_used,
                "reading classified"
            );

            let sensor_name = SensorType::from_name(&sensor)
                .map_or_else(|| sensor.clone(), |s| s.display_name().to_string());

            let output = PredictOutput {
                sensor: sensor_name,
                value,
                predicted_class: result.predicted_class.to_string(),
                probability_risk: result.probability_risk,
                probability_normal: result.probability_normal,
                risk_level: result.risk_level().to_string(),
                trees_used: result.trees_used,
                model_n_trees: ensemble.n_trees(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Evaluate { model, data } => {
            let ensemble = ModelReader::new(&model)
                .read()
                .context("failed to load model")?;

            let dataset = ReadingReader::new(&data)
                .read()
                .context("failed to read dataset")?;
            info!(n_records = dataset.n_records(), "dataset loaded");

            let results = ensemble.classify_batch(&dataset.observations());

            let mut pairs: Vec<(Class, Class)> = Vec::with_capacity(results.len());
            let mut n_unclassified = 0usize;
            for (record, result) in dataset.records.iter().zip(&results) {
                match result {
                    Ok(prediction) => pairs.push((prediction.predicted_class, record.label)),
                    Err(err) => {
                        n_unclassified += 1;
                        warn!(reading_id = %record.reading_id, %err, "observation skipped");
                    }
                }
            }

            let confusion = ConfusionMatrix::from_pairs(&pairs);
            let metrics = Metrics::from_confusion(&confusion);

            info!(
                accuracy = metrics.accuracy,
                precision = metrics.precision,
                recall = metrics.recall,
                f1 = metrics.f1,
                "evaluation complete"
            );

            let output = EvaluateOutput {
                n_records: dataset.n_records(),
                n_rows_skipped: dataset.n_skipped,
                n_unclassified,
                accuracy: metrics.accuracy,
                precision: metrics.precision,
                recall: metrics.recall,
                f1: metrics.f1,
                confusion: ConfusionOutput {
                    true_positives: confusion.true_positives(),
                    true_negatives: confusion.true_negatives(),
                    false_positives: confusion.false_positives(),
                    false_negatives: confusion.false_negatives(),
                },
                model_n_trees: ensemble.n_trees(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
