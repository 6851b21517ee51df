//! # cli
//!
//! Command-line interface for hint-guided ridge prediction.

use clap::{Parser, Subcommand};
use predict_facade::prelude::*;
use predict_facade::Feature;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "predict")]
#[command(about = "Hint-guided ridge prediction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit on observed data and predict at new inputs
    Predict {
        /// JSON request file (same schema as POST /predict)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how a hint is interpreted
    Interpret {
        /// Free-text hint
        hint: String,
    },
}

#[derive(Debug, Serialize)]
struct Interpretation {
    spec: HintSpec,
    columns: Vec<String>,
}

fn load_pipeline() -> CliResult<PredictionPipeline> {
    let config = PredictorConfig::from_env().map_err(|e| e.to_string())?;
    config.build_pipeline().map_err(|e| e.to_string())
}

/// Load a prediction request from a JSON file
fn load_request(path: &Path) -> CliResult<PredictRequest> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| format!("Malformed request: {}", e))
}

fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode: {}", e))?;
    match output {
        Some(path) => {
            let mut file =
                File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
            writeln!(file, "{}", json).map_err(|e| format!("Failed to write output: {}", e))?;
            eprintln!("Predictions written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_predict(input: PathBuf, output: Option<PathBuf>) -> CliResult<()> {
    let pipeline = load_pipeline()?;
    let request = load_request(&input)?;
    let result = run_request(&pipeline, request).map_err(|e| e.to_string())?;
    write_json(&PredictResponse::success(result), output.as_ref())
}

fn interpret(pipeline: &PredictionPipeline, hint: &str) -> CliResult<Interpretation> {
    let spec = pipeline.interpret(Some(hint));
    let columns = pipeline
        .layout(&spec)
        .map_err(|e| e.to_string())?
        .iter()
        .map(Feature::to_string)
        .collect();
    Ok(Interpretation { spec, columns })
}

fn run_interpret(hint: String) -> CliResult<()> {
    let pipeline = load_pipeline()?;
    write_json(&interpret(&pipeline, &hint)?, None)
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict { input, output } => run_predict(input, output),
        Commands::Interpret { hint } => run_interpret(hint),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
