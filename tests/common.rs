//! Common test utilities for building catalog documents.
use gptdoc::prelude::*;

/// The end-to-end example document: two blocks, one connection.
#[allow(dead_code)]
pub const EXAMPLE_JSON: &str = r#"{"nome_do_gpt":"X","categoria":"Y","blocos_funcionais":[{"id":"b1","nome":"A","tipo":"ação","descricao":"d","fuzzy":{"α":1,"β":0},"S(x)":0.5},{"id":"b2","nome":"B","tipo":"fim","descricao":"e","fuzzy":{"α":0,"β":1},"S(x)":0.7}],"conexoes":[["b1","b2"]]}"#;

/// A five-block document written with `nome`/`descricao` keys.
#[allow(dead_code)]
pub const DETAILED_JSON: &str = include_str!("../data/atendimento_detailed.json");

/// A three-block document written with `texto` keys and a `função_principal`.
/// Its last connection points at a block that does not exist.
#[allow(dead_code)]
pub const TEXTUAL_JSON: &str = include_str!("../data/triagem_textual.json");

/// Builds a block with the given fuzzy parameters.
#[allow(dead_code)]
pub fn block(id: &str, membership: f64, fuzzy: &[(&str, f64)]) -> FunctionalBlock {
    FunctionalBlock {
        id: id.to_string(),
        name: format!("Block {}", id),
        kind_tag: "ação".to_string(),
        description: format!("Description of {}", id),
        membership,
        fuzzy: fuzzy.iter().copied().collect(),
        source: None,
    }
}

/// Builds a detailed-convention document from blocks and connection pairs.
#[allow(dead_code)]
pub fn document(blocks: Vec<FunctionalBlock>, connections: &[(&str, &str)]) -> CatalogDocument {
    CatalogDocument {
        name: "Test GPT".to_string(),
        category: "Testing".to_string(),
        main_function: None,
        blocks,
        connections: connections
            .iter()
            .map(|(source, target)| Connection::new(*source, *target))
            .collect(),
        convention: Convention::Detailed,
    }
}

/// Asserts two floats are equal within a tight tolerance.
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}
