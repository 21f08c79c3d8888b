use super::raw::{RawBlock, RawDocument};
use crate::document::{CatalogDocument, Convention, FunctionalBlock};
use crate::error::SchemaError;

/// A trait for source formats that can be normalized into a [`CatalogDocument`].
///
/// This is the seam where key-naming differences between document conventions
/// are resolved. Everything downstream of it sees one canonical model.
///
/// # Example
///
/// ```rust
/// use gptdoc::document::{CatalogDocument, Convention, FunctionalBlock, FuzzyScores};
/// use gptdoc::error::SchemaError;
/// use gptdoc::parse::IntoCatalog;
///
/// // A legacy format that only knows about block titles.
/// struct Legacy {
///     title: String,
///     steps: Vec<String>,
/// }
///
/// impl IntoCatalog for Legacy {
///     fn into_catalog(self) -> Result<CatalogDocument, SchemaError> {
///         let blocks = self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, step)| FunctionalBlock {
///                 id: format!("b{}", i + 1),
///                 name: step.clone(),
///                 kind_tag: "outros".to_string(),
///                 description: step,
///                 membership: 1.0,
///                 fuzzy: FuzzyScores::new(),
///                 source: None,
///             })
///             .collect();
///
///         Ok(CatalogDocument {
///             name: self.title,
///             category: "legacy".to_string(),
///             main_function: None,
///             blocks,
///             connections: vec![],
///             convention: Convention::Detailed,
///         })
///     }
/// }
///
/// let doc = Legacy { title: "X".into(), steps: vec!["a".into()] }.into_catalog().unwrap();
/// assert_eq!(doc.blocks[0].id, "b1");
/// ```
pub trait IntoCatalog {
    /// Consumes the source and converts it into the canonical document model.
    fn into_catalog(self) -> Result<CatalogDocument, SchemaError>;
}

impl IntoCatalog for RawDocument {
    fn into_catalog(self) -> Result<CatalogDocument, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyField {
                key: super::raw::KEY_NAME,
            });
        }

        let convention = if self.blocks.iter().any(|b| b.texto.is_some()) {
            Convention::Textual
        } else {
            Convention::Detailed
        };

        let blocks = self
            .blocks
            .into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_block(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CatalogDocument {
            name: self.name,
            category: self.category,
            main_function: self.main_function,
            blocks,
            connections: self.connections,
            convention,
        })
    }
}

/// Resolves a raw block into its canonical form.
///
/// `texto` stands in for the description when `descricao` is absent. A block
/// without `nome` but with `texto` follows the textual convention: the id is
/// its name and `texto` its description, even if a `descricao` is also present.
fn normalize_block(index: usize, raw: RawBlock) -> Result<FunctionalBlock, SchemaError> {
    let missing = |key| SchemaError::MissingBlockField { index, key };

    let id = raw.id.ok_or_else(|| missing("id"))?;
    let kind_tag = raw.tipo.ok_or_else(|| missing("tipo"))?;
    let membership = raw.membership.ok_or_else(|| missing("S(x)"))?;

    let (name, description) = match (raw.nome, raw.descricao, raw.texto) {
        (Some(name), Some(description), _) => (name, description),
        (Some(name), None, Some(text)) => (name, text),
        (None, _, Some(text)) => (id.clone(), text),
        (None, _, None) => return Err(missing("nome")),
        (Some(_), None, None) => return Err(missing("descricao")),
    };

    Ok(FunctionalBlock {
        id,
        name,
        kind_tag,
        description,
        membership,
        fuzzy: raw.fuzzy.unwrap_or_default(),
        source: raw.source,
    })
}
