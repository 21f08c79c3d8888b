use crate::document::{CatalogDocument, Connection, Convention, FunctionalBlock, FuzzyScores};
use crate::error::ExportError;
use crate::metrics::Metrics;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The export form of a catalog document. Field order is the key order of the output.
#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(rename = "nome_do_gpt")]
    name: &'a str,
    #[serde(rename = "categoria")]
    category: &'a str,
    #[serde(rename = "função_principal", skip_serializing_if = "Option::is_none")]
    main_function: Option<&'a str>,
    #[serde(rename = "media_S(x)")]
    average_membership: f64,
    #[serde(rename = "media_fuzzy", skip_serializing_if = "is_empty_map")]
    average_fuzzy: &'a BTreeMap<String, f64>,
    #[serde(rename = "blocos")]
    blocks: Vec<ExportBlock<'a>>,
    #[serde(rename = "conexoes")]
    connections: &'a [Connection],
}

/// A block is written verbatim when it came from a source document.
#[derive(Serialize)]
#[serde(untagged)]
enum ExportBlock<'a> {
    Verbatim(&'a Map<String, Value>),
    Built(BuiltBlock<'a>),
}

impl<'a> ExportBlock<'a> {
    fn new(block: &'a FunctionalBlock, convention: Convention) -> Self {
        match &block.source {
            Some(source) => Self::Verbatim(source),
            None => Self::Built(BuiltBlock::new(block, convention)),
        }
    }
}

#[derive(Serialize)]
struct BuiltBlock<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nome: Option<&'a str>,
    tipo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    descricao: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    texto: Option<&'a str>,
    fuzzy: &'a FuzzyScores,
    #[serde(rename = "S(x)")]
    membership: f64,
}

impl<'a> BuiltBlock<'a> {
    /// Writes the block with the text keys of the document's own convention.
    fn new(block: &'a FunctionalBlock, convention: Convention) -> Self {
        let (nome, descricao, texto) = match convention {
            Convention::Detailed => (Some(block.name.as_str()), Some(block.description.as_str()), None),
            // A textual block's name defaults to its id, so only a distinct name is written.
            Convention::Textual => (
                (block.name != block.id).then_some(block.name.as_str()),
                None,
                Some(block.description.as_str()),
            ),
        };
        Self {
            id: &block.id,
            nome,
            tipo: &block.kind_tag,
            descricao,
            texto,
            fuzzy: &block.fuzzy,
            membership: block.membership,
        }
    }
}

fn is_empty_map(map: &&BTreeMap<String, f64>) -> bool {
    map.is_empty()
}

/// Serializes a document and its metrics as pretty-printed export JSON.
///
/// The output is UTF-8 with two-space indentation and a trailing newline.
/// Non-ASCII characters are written as-is, never escaped.
pub fn to_export_json(doc: &CatalogDocument, metrics: &Metrics) -> Result<Vec<u8>, ExportError> {
    let export = ExportDocument {
        name: &doc.name,
        category: &doc.category,
        main_function: doc.main_function.as_deref(),
        average_membership: metrics.average_membership,
        average_fuzzy: &metrics.average_fuzzy,
        blocks: doc
            .blocks
            .iter()
            .map(|b| ExportBlock::new(b, doc.convention))
            .collect(),
        connections: &doc.connections,
    };

    let mut bytes =
        serde_json::to_vec_pretty(&export).map_err(|e| ExportError::Json(e.to_string()))?;
    bytes.push(b'\n');
    tracing::debug!(bytes = bytes.len(), "rendered export JSON");
    Ok(bytes)
}
