//! Synthesis → gate → repair, end to end.

use std::sync::Arc;

use vexel_gate::{GateConfig, QualityGate};
use vexel_repair::{MarkupRepairer, RepairConfig, RepairLoop};
use vexel_synth::{render_svg, Synthesizer};
use vexel_types::{
    AttributeValue, CompositionPlan, DesignIntent, GroundingContext, SynthesisContext,
};

fn plan() -> CompositionPlan {
    serde_json::from_str(
        r##"{
            "components": [
                {"id": "sun", "type": "circle", "position": {"x": 256, "y": 140}, "size": {"width": 120, "height": 120},
                 "style": {"stroke": "#f59e0b", "strokeWidth": 3}, "motif": "sun"},
                {"id": "sea", "type": "path", "position": {"x": 256, "y": 380}, "size": {"width": 400, "height": 60},
                 "style": {"stroke": "#0ea5e9", "strokeWidth": 2, "fill": "none"}, "motif": "wave"},
                {"id": "ray", "type": "line", "position": {"x": 256, "y": 260}, "size": {"width": 200, "height": 2},
                 "rotation": 30, "style": {"stroke": "#f59e0b", "strokeWidth": 2}}
            ],
            "layout": {"bounds": {"width": 512, "height": 512}, "arrangement": "stacked"},
            "zIndex": [1, 0, 2]
        }"##,
    )
    .unwrap()
}

fn intent() -> DesignIntent {
    DesignIntent::default()
        .stroke_only()
        .with_max_elements(5)
        .with_motifs(["sun", "wave", "line"])
        .with_required_motifs(["sun", "wave"])
}

fn gate() -> Arc<QualityGate> {
    Arc::new(QualityGate::new(GateConfig::default()).unwrap())
}

#[tokio::test]
async fn synthesized_document_passes_the_gate() {
    let doc = Synthesizer::procedural()
        .synthesize(&plan(), &GroundingContext::default(), &SynthesisContext::new("sunset"))
        .unwrap();
    let ids: Vec<_> = doc.components.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["sea", "sun", "ray"]);

    let result = gate().validate(&doc, &intent()).await;
    assert!(result.passed, "{:?}", result);
    assert_eq!(result.score, 100);
}

#[tokio::test]
async fn corrupted_document_is_repaired() {
    let mut doc = Synthesizer::procedural()
        .synthesize(&plan(), &GroundingContext::default(), &SynthesisContext::new("sunset"))
        .unwrap();
    doc.components[1]
        .attributes
        .insert("r".into(), AttributeValue::Number(f64::NAN));
    doc.components[1]
        .attributes
        .insert("fill".into(), AttributeValue::Text("#f59e0b".into()));
    doc.components[2]
        .attributes
        .insert("stroke-width".into(), AttributeValue::Number(0.25));

    let before = gate().validate(&doc, &intent()).await;
    assert!(!before.passed);

    let outcome = RepairLoop::new(gate(), RepairConfig::default())
        .run(doc, &intent())
        .await;
    assert!(outcome.passed, "{:?}", outcome.result);
    assert!(!outcome.fallback_recommended);
    assert_eq!(outcome.attempts, 1);
}

#[test]
fn rendered_markup_survives_markup_repair() {
    let doc = Synthesizer::procedural()
        .synthesize(&plan(), &GroundingContext::default(), &SynthesisContext::new("sunset"))
        .unwrap();
    let svg = render_svg(&doc);
    let report = MarkupRepairer::new(1.0).unwrap().repair(&svg).unwrap();
    assert!(!report.success, "{:?}", report.fixes);
    assert_eq!(report.markup, svg);

    let stripped = svg.replacen(r#" xmlns="http://www.w3.org/2000/svg""#, "", 1);
    let report = MarkupRepairer::new(1.0).unwrap().repair(&stripped).unwrap();
    assert!(report.success);
    assert!(report.markup.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
}
