//! Output formatting utilities

use colored::*;
use serde::Serialize;
use vexel_types::QualityGateResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Pretty JSON for any serializable value.
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Print a verdict as a checklist with its score.
pub fn print_verdict(result: &QualityGateResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(result)?),
        OutputFormat::Text => {
            let headline = format!("score {}/100", result.score);
            if result.passed {
                println!("{} passed, {}", "✓".green(), headline);
            } else {
                println!("{} failed, {}", "✗".red(), headline);
            }
            for category in &result.categories {
                println!(
                    "  {:<10} {:>3}  (weight {:.2})",
                    category.name, category.score, category.weight
                );
            }
            for issue in &result.issues {
                println!("  {} {}", "✗".red(), issue);
            }
            for warning in &result.warnings {
                println!("  {} {}", "⚠".yellow(), warning);
            }
        }
    }
    Ok(())
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}
