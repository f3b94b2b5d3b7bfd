use assert_cmd::Command;
use predicates::prelude::*;

const PLAN: &str = r##"{
    "components": [
        {"id": "sun", "type": "circle", "position": {"x": 100, "y": 100}, "size": {"width": 50, "height": 50},
         "style": {"stroke": "#f59e0b", "strokeWidth": 2}, "motif": "sun"},
        {"id": "home", "type": "polygon", "position": {"x": 300, "y": 300}, "size": {"width": 120, "height": 120},
         "style": {"stroke": "#334155", "strokeWidth": 2}, "motif": "house"}
    ],
    "layout": {"bounds": {"width": 512, "height": 512}},
    "zIndex": [0, 1]
}"##;

const INTENT: &str = r#"{
    "motifs": ["sun", "house"],
    "constraints": {"strokeOnly": true, "maxElements": 5, "requiredMotifs": ["sun"]}
}"#;

fn vexel() -> Command {
    let mut cmd = Command::cargo_bin("vexel").unwrap();
    cmd.env_remove("VEXEL_CONFIG").env("RUST_LOG", "off");
    cmd
}

#[test]
fn synthesize_writes_document_json() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    std::fs::write(&plan, PLAN).unwrap();

    vexel()
        .args(["synthesize", plan.to_str().unwrap(), "--prompt", "sunny house"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""cx": 100.0"#))
        .stdout(predicate::str::contains(r#""usedObjects": ["#))
        .stdout(predicate::str::contains("tpl-house"));
}

#[test]
fn pipeline_passes_and_renders() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    let intent = dir.path().join("intent.json");
    let svg = dir.path().join("out.svg");
    std::fs::write(&plan, PLAN).unwrap();
    std::fs::write(&intent, INTENT).unwrap();

    vexel()
        .args([
            "pipeline",
            plan.to_str().unwrap(),
            "--intent",
            intent.to_str().unwrap(),
            "--svg-out",
            svg.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("passed, score 100/100"));

    let markup = std::fs::read_to_string(&svg).unwrap();
    assert!(markup.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
    assert!(markup.contains(r#"data-motif="house""#));
}

#[test]
fn validate_fails_on_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("doc.json");
    std::fs::write(
        &doc,
        r#"{"components": [], "metadata": {"generatedAt": "2026-01-01T00:00:00Z"}, "bounds": {"width": 100, "height": 100}}"#,
    )
    .unwrap();

    vexel()
        .args(["--output", "json", "validate", doc.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Document has no components"))
        .stdout(predicate::str::contains(r#""score": 0"#));
}

#[test]
fn invalid_plan_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.json");
    std::fs::write(&plan, PLAN.replace(r#""width": 50"#, r#""width": -5"#)).unwrap();

    vexel()
        .args(["synthesize", plan.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Size dimensions must be positive"));
}

#[test]
fn repair_markup_injects_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    std::fs::write(&input, r#"<svg width="64" height="32"><line stroke-width="0.2"/></svg>"#).unwrap();

    vexel()
        .args(["repair-markup", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"viewBox="0 0 64 32""#))
        .stdout(predicate::str::contains(r#"stroke-width="1""#));
}
