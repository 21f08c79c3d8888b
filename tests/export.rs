//! Tests for the JSON, HTML and plain-text exports.
mod common;
use common::*;
use gptdoc::prelude::*;
use serde_json::Value;

fn export_string(doc: &CatalogDocument) -> String {
    let metrics = derive_metrics(doc).unwrap();
    String::from_utf8(to_export_json(doc, &metrics).unwrap()).unwrap()
}

#[test]
fn test_example_export_json() {
    let doc = parse(EXAMPLE_JSON.as_bytes()).unwrap();
    let exported: Value = serde_json::from_str(&export_string(&doc)).unwrap();

    assert_eq!(exported["nome_do_gpt"], "X");
    assert_eq!(exported["categoria"], "Y");
    assert!((exported["media_S(x)"].as_f64().unwrap() - 0.6).abs() < 1e-12);
    assert_eq!(exported["media_fuzzy"]["α"].as_f64(), Some(0.5));
    assert_eq!(exported["conexoes"], serde_json::json!([["b1", "b2"]]));

    let blocks = exported["blocos"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["id"], "b1");
    assert_eq!(blocks[0]["nome"], "A");
    assert_eq!(blocks[0]["tipo"], "ação");
    assert_eq!(blocks[0]["descricao"], "d");
    assert_eq!(blocks[0]["fuzzy"]["α"].as_f64(), Some(1.0));
    assert_eq!(blocks[0]["S(x)"].as_f64(), Some(0.5));
    assert_eq!(blocks[1]["id"], "b2");
    assert!(blocks[0].get("texto").is_none());
}

#[test]
fn test_export_json_key_order_and_formatting() {
    let doc = parse(EXAMPLE_JSON.as_bytes()).unwrap();
    let text = export_string(&doc);

    let positions: Vec<usize> = [
        "\"nome_do_gpt\"",
        "\"categoria\"",
        "\"media_S(x)\"",
        "\"media_fuzzy\"",
        "\"blocos\"",
        "\"conexoes\"",
    ]
    .iter()
    .map(|key| text.find(key).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(text.starts_with("{\n  \"nome_do_gpt\": \"X\""));
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_export_json_preserves_non_ascii() {
    let doc = parse(DETAILED_JSON.as_bytes()).unwrap();
    let text = export_string(&doc);

    assert!(text.contains("Recepção"));
    assert!(text.contains("\"α\""));
    assert!(text.contains("validação"));
    assert!(!text.contains("\\u"));
}

#[test]
fn test_export_json_round_trip() {
    for source in [EXAMPLE_JSON, DETAILED_JSON, TEXTUAL_JSON] {
        let doc = parse(source.as_bytes()).unwrap();
        let exported = export_string(&doc);
        let reparsed = parse(exported.as_bytes()).unwrap();

        assert_eq!(reparsed.name, doc.name);
        assert_eq!(reparsed.category, doc.category);
        assert_eq!(reparsed.blocks, doc.blocks);
        assert_eq!(reparsed.connections, doc.connections);
        assert_eq!(reparsed, doc);
    }
}

#[test]
fn test_export_writes_source_blocks_verbatim() {
    let source = r#"{"nome_do_gpt":"X","categoria":"Y","blocos_funcionais":[
        {"id":"b1","nome":"A","tipo":"ação","descricao":"d","cor":"azul","fuzzy":{"α":1,"β":0},"S(x)":1},
        {"tipo":"fim","id":"b2","texto":"Fecha","S(x)":0.5}
    ],"conexoes":[["b1","b2"]]}"#;
    let input: Value = serde_json::from_str(source).unwrap();
    let doc = parse(source.as_bytes()).unwrap();
    let text = export_string(&doc);
    let exported: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(exported["blocos"], input["blocos_funcionais"]);
    assert_eq!(exported["blocos"][0]["cor"], "azul");
    assert!(exported["blocos"][0]["S(x)"].is_u64());
    assert!(text.contains("\"α\": 1,"));
    assert!(text.find("\"tipo\": \"fim\"").unwrap() < text.find("\"id\": \"b2\"").unwrap());
}

#[test]
fn test_built_blocks_are_exported_from_their_fields() {
    let doc = document(vec![block("b1", 0.25, &[("α", 0.5)])], &[]);
    let exported: Value = serde_json::from_str(&export_string(&doc)).unwrap();
    let first = &exported["blocos"][0];

    assert_eq!(first["id"], "b1");
    assert_eq!(first["nome"], "Block b1");
    assert_eq!(first["descricao"], "Description of b1");
    assert_eq!(first["fuzzy"]["α"].as_f64(), Some(0.5));
    assert_eq!(first["S(x)"].as_f64(), Some(0.25));
}

#[test]
fn test_textual_export_keeps_its_convention() {
    let doc = parse(TEXTUAL_JSON.as_bytes()).unwrap();
    let exported: Value = serde_json::from_str(&export_string(&doc)).unwrap();

    assert_eq!(
        exported["função_principal"],
        "Classificar petições recebidas e encaminhar ao setor responsável."
    );
    let first = &exported["blocos"][0];
    assert_eq!(first["texto"], "Lê o documento enviado e extrai o cabeçalho.");
    assert!(first.get("nome").is_none());
    assert!(first.get("descricao").is_none());
}

#[test]
fn test_export_without_fuzzy_omits_fuzzy_means() {
    let doc = document(vec![block("b1", 0.3, &[])], &[]);
    let exported: Value = serde_json::from_str(&export_string(&doc)).unwrap();
    assert!(exported.get("media_fuzzy").is_none());
    assert!(exported.get("função_principal").is_none());
}

#[test]
fn test_exports_do_not_modify_the_document() {
    let doc = parse(DETAILED_JSON.as_bytes()).unwrap();
    let before = doc.clone();
    let metrics = derive_metrics(&doc).unwrap();

    let _ = to_export_json(&doc, &metrics).unwrap();
    let _ = HtmlReport::new(&doc).with_metrics(&metrics).render();
    let _ = SummaryFormatter::format(&doc, Some(&metrics));

    assert_eq!(doc, before);
}

#[test]
fn test_html_lists_blocks_in_document_order() {
    let doc = parse(DETAILED_JSON.as_bytes()).unwrap();
    let html = to_export_html(&doc);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"utf-8\">"));
    let positions: Vec<usize> = doc
        .blocks
        .iter()
        .map(|b| html.find(&format!("<h3>{} | {}", b.id, b.name)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.contains("class=\"block block-validacao\""));
    assert!(html.contains("Confere se os dados do pedido correspondem ao cliente."));
    assert!(html.contains("S(x): <code>0.71</code>"));
    assert!(html.contains("<th>α</th>"));
}

#[test]
fn test_html_renders_connections_as_edge_list() {
    let doc = parse(EXAMPLE_JSON.as_bytes()).unwrap();
    let html = to_export_html(&doc);
    assert!(html.contains("<li>A (<code>b1</code>) &rarr; B (<code>b2</code>)</li>"));
}

#[test]
fn test_html_marks_missing_connection_endpoints() {
    let doc = parse(TEXTUAL_JSON.as_bytes()).unwrap();
    let html = to_export_html(&doc);
    assert!(html.contains("<code>t4</code> <span class=\"missing\">(ausente)</span>"));
    assert!(html.contains("Função principal:"));
}

#[test]
fn test_html_is_self_contained_and_escaped() {
    let mut doc = document(vec![block("b1", 0.5, &[("α", 0.25)])], &[]);
    doc.blocks[0].name = "<script>alert('x')</script>".to_string();
    let html = to_export_html(&doc);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(!html.contains("src=\"http"));
    assert!(!html.contains("<link"));
    assert!(html.contains("Nenhuma conexão."));
}

#[test]
fn test_html_with_metrics_and_logo() {
    let doc = parse(EXAMPLE_JSON.as_bytes()).unwrap();
    let metrics = derive_metrics(&doc).unwrap();
    let html = HtmlReport::new(&doc)
        .with_metrics(&metrics)
        .with_logo(b"PNG", "image/png")
        .render();

    assert!(html.contains("<tr><th>S(x)</th><td>0.60</td></tr>"));
    assert!(html.contains("<tr><th>β</th><td>0.50</td></tr>"));
    assert!(html.contains("<img src=\"data:image/png;base64,UE5H\" alt=\"logo\">"));
    assert_eq!(to_export_html(&doc), HtmlReport::new(&doc).render());
}

#[test]
fn test_summary_format() {
    let doc = parse(EXAMPLE_JSON.as_bytes()).unwrap();
    let metrics = derive_metrics(&doc).unwrap();
    let summary = SummaryFormatter::format(&doc, Some(&metrics));

    assert!(summary.starts_with("GPT: X\nCategory: Y\n"));
    assert!(summary.contains("Blocks: 2 | Connections: 1"));
    assert!(summary.contains("Average S(x): 0.60"));
    assert!(summary.contains("Average fuzzy: α=0.50, β=0.50"));
    assert!(summary.contains("  [b1] A (ação) S(x)=0.50"));
    assert!(summary.contains("  b1 -> b2"));
}

#[test]
fn test_summary_without_metrics() {
    let doc = document(vec![], &[]);
    let summary = SummaryFormatter::format(&doc, None);
    assert!(summary.contains("Average S(x): n/a"));
    assert!(!summary.contains("Blocks:\n"));
}

#[test]
fn test_summary_prints_large_whole_numbers_exactly() {
    let doc = document(vec![block("b1", 1e20, &[]), block("b2", 1.0, &[])], &[]);
    let summary = SummaryFormatter::format(&doc, None);
    assert!(summary.contains("[b1] Block b1 (ação) S(x)=100000000000000000000\n"));
    assert!(summary.contains("[b2] Block b2 (ação) S(x)=1\n"));
}
