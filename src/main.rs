//! Failure predictor entrypoint: loads the scaler and classifier once, then predicts from
//! command-line readings, prints global importance, or runs an interactive prompt session.

use clap::{Args, Parser, Subcommand};
use failure_predictor::{
    config::{OutputFormat, PredictorConfig},
    explain,
    features::{MachineType, SensorReadings},
    logging::StructuredLogger,
    model::Artifacts,
    pipeline::{ExplainMode, PredictionPipeline},
    prompt::{self, LineSource},
    risk::Predictor,
};
use rustyline::config::{Behavior, Config};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "failure-predictor")]
#[command(about = "Mining equipment failure prediction from sensor readings", long_about = None)]
struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(
        short,
        long,
        env = "FAILURE_PREDICTOR_CONFIG",
        default_value = "failure_predictor.json"
    )]
    config: PathBuf,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict failure for one set of readings
    Predict(PredictArgs),

    /// Show the model's global feature importance
    Importance,

    /// Prompt for readings repeatedly
    Interactive {
        #[arg(short, long, value_enum, default_value_t = ExplainMode::Gated)]
        explain: ExplainMode,
    },
}

#[derive(Args)]
struct PredictArgs {
    /// Machine type (L, M or H)
    #[arg(short = 't', long = "type", default_value = "L")]
    machine_type: MachineType,

    /// Air temperature [K]
    #[arg(long, default_value_t = 295.0)]
    air_temp: f64,

    /// Process temperature [K]
    #[arg(long, default_value_t = 305.0)]
    process_temp: f64,

    /// Rotational speed [rpm]
    #[arg(long, default_value_t = 1650)]
    rot_speed: u32,

    /// Torque [Nm]
    #[arg(long, default_value_t = 40.0)]
    torque: f64,

    /// Tool wear [min]
    #[arg(long, default_value_t = 15)]
    tool_wear: u32,

    /// When to compute the set-to-mean sensitivity chart
    #[arg(short, long, value_enum, default_value_t = ExplainMode::Gated)]
    explain: ExplainMode,

    /// Also show global feature importance
    #[arg(short, long)]
    importance: bool,
}

impl PredictArgs {
    fn readings(&self) -> SensorReadings {
        SensorReadings {
            machine_type: self.machine_type,
            air_temperature: self.air_temp,
            process_temperature: self.process_temp,
            rotational_speed: self.rot_speed,
            torque: self.torque,
            tool_wear: self.tool_wear,
        }
    }
}

/// Line-edited terminal input with history. Prompts go to the terminal, not stdout.
struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    fn new() -> rustyline::Result<Self> {
        let config = Config::builder().behavior(Behavior::PreferTerm).build();
        Ok(Self {
            editor: DefaultEditor::with_config(config)?,
        })
    }
}

impl LineSource for Terminal {
    fn next_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config = match PredictorConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            StructuredLogger::init(false, "info");
            error!(config = %cli.config.display(), error = %e, "cannot load configuration");
            return Err(e.into());
        }
    };

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(config = %cli.config.display(), "failure predictor starting");

    let artifacts = match Artifacts::load(
        &config.artifacts.scaler_path,
        &config.artifacts.model_path,
    ) {
        Ok(a) => Arc::new(a),
        Err(e) => {
            error!(error = %e, "cannot load model artifacts");
            return Err(e.into());
        }
    };
    let means = explain::reference_means(&config.explain, &artifacts);
    let predictor = Predictor::new(artifacts, config.thresholds, config.type_encoding);
    let format = cli.format.unwrap_or(config.output.format);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Predict(args) => {
            let pipeline = PredictionPipeline::new(predictor, means)
                .with_explain(args.explain)
                .with_importance(args.importance);
            let report = pipeline.run(&args.readings())?;
            report.render(format, &mut out)?;
        }
        Command::Importance => {
            PredictionPipeline::new(predictor, means)
                .importance_report()
                .render(format, &mut out)?;
        }
        Command::Interactive { explain } => {
            let pipeline = PredictionPipeline::new(predictor, means).with_explain(explain);
            let mut terminal = match Terminal::new() {
                Ok(t) => t,
                Err(e) => {
                    error!(error = %e, "cannot open terminal for the prompt session");
                    return Err(e.to_string().into());
                }
            };
            let mut notices = io::stderr();
            let rounds =
                prompt::run_session(&pipeline, format, &mut terminal, &mut notices, &mut out)?;
            info!(rounds, "interactive session ended");
        }
    }

    Ok(())
}
