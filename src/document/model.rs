use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use super::kind::BlockKind;

/// The key convention a document was written in.
///
/// Both conventions share the top-level keys. They differ in how a block
/// carries its human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    /// Blocks carry separate `nome` and `descricao` keys.
    #[default]
    Detailed,
    /// Blocks carry a single `texto` key, and the document may add `função_principal`.
    Textual,
}

/// Named fuzzy parameters of a block, keyed by their symbol (e.g. `"α"`).
///
/// Iteration order is the code-point order of the symbols, so every export
/// and report lists parameters in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzyScores(BTreeMap<String, f64>);

impl FuzzyScores {
    /// Parameter symbols observed across catalog documents.
    pub const STANDARD_SYMBOLS: [&'static str; 6] = ["α", "β", "γ", "δ", "ε", "θ"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains_key(symbol)
    }

    pub fn insert(&mut self, symbol: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(symbol.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(symbol, value)| (symbol.as_str(), *value))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FuzzyScores {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A single functional block of a catalog document.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalBlock {
    /// Unique within the document; the join key used by connections.
    pub id: String,
    pub name: String,
    /// The block's `tipo` exactly as written in the source document.
    pub kind_tag: String,
    pub description: String,
    /// Semantic membership score `S(x)`. Expected in [0, 1], never clamped.
    pub membership: f64,
    pub fuzzy: FuzzyScores,
    /// The block object as written in the source document, keys and number
    /// spellings included. The JSON export writes it back unchanged; blocks
    /// built in code have none and are exported from the fields above.
    pub source: Option<Map<String, Value>>,
}

impl FunctionalBlock {
    /// The display category of this block, derived from its `tipo` tag.
    pub fn kind(&self) -> BlockKind {
        BlockKind::from_tag(&self.kind_tag)
    }
}

/// A directed edge between two blocks, serialized as `[source, target]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Connection {
    pub source: String,
    pub target: String,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl From<(String, String)> for Connection {
    fn from((source, target): (String, String)) -> Self {
        Self { source, target }
    }
}

impl From<Connection> for (String, String) {
    fn from(connection: Connection) -> Self {
        (connection.source, connection.target)
    }
}

/// The canonical, validated form of a catalog document.
///
/// Produced by the parser regardless of which input convention was used.
/// Nothing in this crate mutates a document after it has been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDocument {
    pub name: String,
    pub category: String,
    pub main_function: Option<String>,
    /// Document order is the default reading order of the flow.
    pub blocks: Vec<FunctionalBlock>,
    pub connections: Vec<Connection>,
    pub convention: Convention,
}

impl CatalogDocument {
    /// Finds the first block with the given id.
    pub fn block(&self, id: &str) -> Option<&FunctionalBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The union of fuzzy parameter symbols defined by any block.
    pub fn fuzzy_parameters(&self) -> BTreeSet<&str> {
        self.blocks.iter().flat_map(|b| b.fuzzy.symbols()).collect()
    }

    /// Every connection endpoint that does not name a block, as
    /// `(connection_index, endpoint_id)` in connection order.
    pub fn dangling_endpoints(&self) -> Vec<(usize, &str)> {
        let known: AHashSet<&str> = self.blocks.iter().map(|b| b.id.as_str()).collect();
        self.connections
            .iter()
            .enumerate()
            .flat_map(|(i, c)| [(i, c.source.as_str()), (i, c.target.as_str())])
            .filter(|(_, id)| !known.contains(id))
            .collect()
    }
}
