//! Subcommand implementations.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;
use vexel_gate::QualityGate;
use vexel_repair::{MarkupRepairer, RepairLoop};
use vexel_synth::{render_svg, InMemoryLibrary, Synthesizer};
use vexel_types::{
    CompositionPlan, DesignIntent, GroundingContext, SvgDocument, SynthesisContext,
};

use crate::config::VexelConfig;
use crate::output::{self, OutputFormat};

/// Inputs shared by `synthesize` and `pipeline`.
pub struct SynthesisArgs<'a> {
    pub plan: &'a Path,
    pub grounding: Option<&'a Path>,
    pub prompt: String,
    pub seed: Option<u64>,
    pub model: Option<String>,
    pub no_library: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn read_intent(path: Option<&Path>) -> Result<DesignIntent> {
    match path {
        Some(path) => read_json(path),
        None => Ok(DesignIntent::default()),
    }
}

/// Write to a file, or stdout when no path is given.
fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            output::print_info(&format!("wrote {}", path.display()));
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn build_gate(config: &VexelConfig) -> Result<QualityGate> {
    QualityGate::new(config.gate.clone()).context("building quality gate")
}

fn synthesize_document(config: &VexelConfig, args: SynthesisArgs<'_>) -> Result<SvgDocument> {
    let plan: CompositionPlan = read_json(args.plan)?;
    let grounding: GroundingContext = match args.grounding {
        Some(path) => read_json(path)?,
        None => GroundingContext::default(),
    };
    let context = SynthesisContext {
        prompt: args.prompt,
        seed: args.seed,
        model: args.model,
        user_id: None,
    };

    let library = if args.no_library {
        InMemoryLibrary::new()
    } else {
        InMemoryLibrary::with_defaults()
    };
    let synthesizer = Synthesizer::with_config(Arc::new(library), config.synth.clone());
    synthesizer
        .synthesize(&plan, &grounding, &context)
        .with_context(|| format!("synthesizing {}", args.plan.display()))
}

pub fn synthesize(config: &VexelConfig, args: SynthesisArgs<'_>, out: Option<&Path>) -> Result<()> {
    let document = synthesize_document(config, args)?;
    emit(&output::to_json(&document)?, out)
}

/// Returns whether the document passed.
pub async fn validate(
    config: &VexelConfig,
    document: &Path,
    intent: Option<&Path>,
    format: OutputFormat,
) -> Result<bool> {
    let document: SvgDocument = read_json(document)?;
    let intent = read_intent(intent)?;
    let result = build_gate(config)?.validate(&document, &intent).await;
    output::print_verdict(&result, format)?;
    Ok(result.passed)
}

pub fn render(document: &Path, out: Option<&Path>) -> Result<()> {
    let document: SvgDocument = read_json(document)?;
    emit(&render_svg(&document), out)
}

/// Synthesize, validate and repair. Returns whether the final document passed.
pub async fn pipeline(
    config: &VexelConfig,
    args: SynthesisArgs<'_>,
    intent: Option<&Path>,
    out: Option<&Path>,
    svg_out: Option<&Path>,
    format: OutputFormat,
) -> Result<bool> {
    let intent = read_intent(intent)?;
    let document = synthesize_document(config, args)?;

    let gate = Arc::new(build_gate(config)?);
    let outcome = RepairLoop::new(gate, config.repair.clone())
        .run(document, &intent)
        .await;

    info!(
        passed = outcome.passed,
        attempts = outcome.attempts,
        "Pipeline finished"
    );
    for action in &outcome.actions {
        output::print_info(&format!("repair: {}", action));
    }
    for error in &outcome.errors {
        output::print_warning(&format!("unrepaired: {}", error));
    }
    if outcome.fallback_recommended {
        output::print_warning("document did not pass; fallback recommended");
    }
    output::print_verdict(&outcome.result, format)?;

    if let Some(path) = out {
        emit(&output::to_json(&outcome.document)?, Some(path))?;
    }
    if let Some(path) = svg_out {
        emit(&render_svg(&outcome.document), Some(path))?;
    }
    Ok(outcome.passed)
}

pub fn repair_markup(input: &Path, out: Option<&Path>, min_stroke_width: f64) -> Result<()> {
    if !(min_stroke_width.is_finite() && min_stroke_width > 0.0) {
        bail!("minimum stroke width must be positive, got {}", min_stroke_width);
    }
    let markup = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let report = MarkupRepairer::new(min_stroke_width)?
        .repair(&markup)
        .with_context(|| format!("repairing {}", input.display()))?;
    for fix in &report.fixes {
        output::print_info(&format!("fixed: {}", fix));
    }
    emit(&report.markup, out)
}
