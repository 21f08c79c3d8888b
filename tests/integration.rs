//! Integration tests for gptdoc
//!
//! End-to-end runs of the pipeline over documents on disk.
mod common;
use common::*;
use gptdoc::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_full_run_writes_both_exports() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "atendimento.json", DETAILED_JSON);
    let out_dir = tmp.path().join("exports");

    let pipeline = Pipeline::new(PipelineConfig::new(&out_dir).unwrap());
    let outcome = pipeline.run(&input).unwrap();

    assert_eq!(outcome.document.name, "Assistente de Atendimento");
    assert_eq!(outcome.metrics.as_ref().unwrap().block_count, 5);
    assert_eq!(
        outcome.written,
        vec![
            out_dir.join("atendimento.export.json"),
            out_dir.join("atendimento.report.html"),
        ]
    );

    let exported = fs::read(out_dir.join("atendimento.export.json")).unwrap();
    let reparsed = parse(&exported).unwrap();
    assert_eq!(reparsed, outcome.document);

    let html = fs::read_to_string(out_dir.join("atendimento.report.html")).unwrap();
    assert!(html.contains("<h2>Médias</h2>"));
    assert!(outcome.summary.contains("Blocks: 5 | Connections: 4"));
}

#[test]
fn test_run_respects_disabled_exports() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "example.json", EXAMPLE_JSON);
    let out_dir = tmp.path().join("out");

    let config = PipelineConfig::new(&out_dir)
        .unwrap()
        .with_json(false)
        .with_html(false);
    let outcome = Pipeline::new(config).run(&input).unwrap();

    assert!(outcome.written.is_empty());
    assert!(!out_dir.exists());
}

#[test]
fn test_empty_document_is_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(
        &tmp,
        "empty.json",
        r#"{"nome_do_gpt": "Vazio", "categoria": "Y", "blocos_funcionais": [], "conexoes": []}"#,
    );
    let out_dir = tmp.path().join("out");

    let outcome = Pipeline::new(PipelineConfig::new(&out_dir).unwrap())
        .run(&input)
        .unwrap();

    assert_eq!(outcome.metrics, Err(MetricsError::EmptyDocument));
    assert_eq!(outcome.written, vec![out_dir.join("empty.report.html")]);
    assert!(outcome.summary.contains("Average S(x): n/a"));
}

#[test]
fn test_invalid_document_aborts_only_that_run() {
    let tmp = TempDir::new().unwrap();
    let bad = write_input(&tmp, "bad.json", r#"{"nome_do_gpt": "X"}"#);
    let good = write_input(&tmp, "good.json", EXAMPLE_JSON);
    let pipeline = Pipeline::new(PipelineConfig::new(tmp.path().join("out")).unwrap());

    match pipeline.run(&bad) {
        Err(PipelineError::Validation { path, source }) => {
            assert!(path.ends_with("bad.json"));
            assert_eq!(
                source,
                ValidationError::Schema(SchemaError::MissingKey { key: "categoria" })
            );
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert!(pipeline.run(&good).is_ok());
}

#[test]
fn test_strict_pipeline_rejects_dangling_connections() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "triagem.json", TEXTUAL_JSON);

    let lenient = Pipeline::new(PipelineConfig::new(tmp.path().join("a")).unwrap());
    assert!(lenient.run(&input).is_ok());

    let strict = Pipeline::new(
        PipelineConfig::new(tmp.path().join("b"))
            .unwrap()
            .with_strictness(Strictness::Strict),
    );
    let err = strict.run(&input).unwrap_err();
    assert!(err.to_string().contains("t4"));
}

#[test]
fn test_missing_input_file() {
    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::new(tmp.path().join("out")).unwrap());
    let err = pipeline.run(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, PipelineError::Read { .. }));
}

#[test]
fn test_logo_is_embedded_in_report() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "example.json", EXAMPLE_JSON);
    let logo = tmp.path().join("logo.png");
    fs::write(&logo, b"PNG").unwrap();
    let out_dir = tmp.path().join("out");

    let config = PipelineConfig::new(&out_dir)
        .unwrap()
        .with_json(false)
        .with_logo(&logo)
        .unwrap();
    Pipeline::new(config).run(&input).unwrap();

    let html = fs::read_to_string(out_dir.join("example.report.html")).unwrap();
    assert!(html.contains("data:image/png;base64,UE5H"));
}

#[test]
fn test_unreadable_logo_fails_the_run() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "example.json", EXAMPLE_JSON);
    let out_dir = tmp.path().join("out");
    let config = PipelineConfig::new(&out_dir)
        .unwrap()
        .with_logo(tmp.path().join("missing.png"))
        .unwrap();

    let err = Pipeline::new(config).run(&input).unwrap_err();
    assert!(err.to_string().contains("missing.png"));
    assert!(!out_dir.join("example.export.json").exists());
    assert!(!out_dir.exists());
}
