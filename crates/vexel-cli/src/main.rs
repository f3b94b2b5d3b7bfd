//! Vexel CLI - synthesize vector documents from composition plans and judge
//! them against a design intent.
//!
//! - `synthesize`: plan (+ grounding) → document JSON
//! - `validate`: document + intent → quality verdict
//! - `render`: document JSON → SVG markup
//! - `pipeline`: synthesize, validate and repair in one go
//! - `repair-markup`: fix SVG markup produced elsewhere

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

use commands::SynthesisArgs;
use config::VexelConfig;
use output::OutputFormat;

/// Vexel CLI
#[derive(Parser)]
#[command(name = "vexel")]
#[command(about = "Vexel - deterministic vector synthesis and quality gate", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "VEXEL_CONFIG")]
    config: Option<String>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "VEXEL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "VEXEL_LOG_JSON")]
    json_logs: bool,

    /// Output format for verdicts
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SynthesisOpts {
    /// Composition plan (JSON)
    plan: PathBuf,

    /// Grounding context (JSON)
    #[arg(short, long)]
    grounding: Option<PathBuf>,

    /// Prompt recorded in document metadata
    #[arg(long, default_value = "")]
    prompt: String,

    /// Seed recorded in document metadata
    #[arg(long)]
    seed: Option<u64>,

    /// Model label recorded in document metadata
    #[arg(long)]
    model: Option<String>,

    /// Skip the built-in component library
    #[arg(long)]
    no_library: bool,
}

impl SynthesisOpts {
    fn args(&self) -> SynthesisArgs<'_> {
        SynthesisArgs {
            plan: &self.plan,
            grounding: self.grounding.as_deref(),
            prompt: self.prompt.clone(),
            seed: self.seed,
            model: self.model.clone(),
            no_library: self.no_library,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Lower a composition plan into a document
    Synthesize {
        #[command(flatten)]
        opts: SynthesisOpts,

        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Score a document against a design intent
    Validate {
        /// Document (JSON)
        document: PathBuf,

        /// Design intent (JSON)
        #[arg(short, long)]
        intent: Option<PathBuf>,
    },

    /// Render a document to SVG markup
    Render {
        /// Document (JSON)
        document: PathBuf,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Synthesize, validate and repair
    Pipeline {
        #[command(flatten)]
        opts: SynthesisOpts,

        /// Design intent (JSON)
        #[arg(short, long)]
        intent: Option<PathBuf>,

        /// Repair passes (overrides the configuration file)
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Write the final document JSON here
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the final document as SVG here
        #[arg(long)]
        svg_out: Option<PathBuf>,
    },

    /// Repair SVG markup from another producer
    RepairMarkup {
        /// SVG file
        input: PathBuf,

        #[arg(long)]
        out: Option<PathBuf>,

        /// Minimum stroke width
        #[arg(long, default_value_t = 1.0)]
        min_stroke_width: f64,
    },
}

fn init_tracing(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.to_string().into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = VexelConfig::load(cli.config.as_deref())?;

    // CLI flags override file and environment
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    init_tracing(&config.logging.level, config.logging.json);

    let passed = match cli.command {
        Commands::Synthesize { opts, out } => {
            commands::synthesize(&config, opts.args(), out.as_deref())?;
            true
        }
        Commands::Validate { document, intent } => {
            commands::validate(&config, &document, intent.as_deref(), cli.output).await?
        }
        Commands::Render { document, out } => {
            commands::render(&document, out.as_deref())?;
            true
        }
        Commands::Pipeline {
            opts,
            intent,
            max_attempts,
            out,
            svg_out,
        } => {
            if let Some(max_attempts) = max_attempts {
                config.repair.max_attempts = max_attempts;
            }
            commands::pipeline(
                &config,
                opts.args(),
                intent.as_deref(),
                out.as_deref(),
                svg_out.as_deref(),
                cli.output,
            )
            .await?
        }
        Commands::RepairMarkup {
            input,
            out,
            min_stroke_width,
        } => {
            commands::repair_markup(&input, out.as_deref(), min_stroke_width)?;
            true
        }
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
