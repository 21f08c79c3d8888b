use crate::document::CatalogDocument;
use crate::error::ValidationError;
use tracing::{debug, warn};

mod conversion;
pub mod raw;
mod strict;

pub use conversion::IntoCatalog;
pub use raw::{RawBlock, RawDocument};

/// How much integrity checking the parser performs beyond the required schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Only decoding and required keys are checked.
    #[default]
    Lenient,
    /// Additionally rejects duplicate block ids, connections to unknown blocks,
    /// blocks missing a fuzzy parameter used elsewhere in the document, and
    /// membership or fuzzy values outside [0, 1].
    Strict,
}

/// Parses raw catalog documents into the canonical model.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    strictness: Strictness,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentParserBuilder {
    strictness: Strictness,
}

impl DocumentParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn strict(self) -> Self {
        self.strictness(Strictness::Strict)
    }

    pub fn build(self) -> DocumentParser {
        DocumentParser {
            strictness: self.strictness,
        }
    }
}

impl DocumentParser {
    pub fn builder() -> DocumentParserBuilder {
        DocumentParserBuilder::new()
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Parses and validates a document from raw bytes.
    ///
    /// No partial document is ever returned: either the whole document is
    /// valid under the configured strictness, or the first problem found is
    /// reported.
    pub fn parse(&self, raw: &[u8]) -> Result<CatalogDocument, ValidationError> {
        let _span = tracing::debug_span!("parse", bytes = raw.len()).entered();
        let doc = RawDocument::from_bytes(raw)?.into_catalog()?;
        self.finish(doc)
    }

    /// Parses and validates a document that is already decoded text.
    pub fn parse_str(&self, text: &str) -> Result<CatalogDocument, ValidationError> {
        let _span = tracing::debug_span!("parse", bytes = text.len()).entered();
        let doc = RawDocument::from_json_str(text)?.into_catalog()?;
        self.finish(doc)
    }

    fn finish(&self, doc: CatalogDocument) -> Result<CatalogDocument, ValidationError> {
        debug!(
            name = %doc.name,
            convention = ?doc.convention,
            blocks = doc.blocks.len(),
            connections = doc.connections.len(),
            "normalized document"
        );

        match self.strictness {
            Strictness::Strict => strict::check(&doc)?,
            Strictness::Lenient => {
                let dangling = doc.dangling_endpoints().len();
                if dangling > 0 {
                    warn!(
                        name = %doc.name,
                        dangling,
                        "connections reference blocks that are not in the document"
                    );
                }
            }
        }

        Ok(doc)
    }
}

/// Parses a document with the default, lenient parser.
pub fn parse(raw: &[u8]) -> Result<CatalogDocument, ValidationError> {
    DocumentParser::default().parse(raw)
}
