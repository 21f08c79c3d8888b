use crate::document::CatalogDocument;
use crate::error::ValidationError;
use ahash::AHashSet;

/// Runs the opt-in integrity checks against a normalized document.
///
/// Checks run in a fixed order (duplicate ids, dangling connections, fuzzy
/// completeness, value ranges) and the first violation is returned.
pub(super) fn check(doc: &CatalogDocument) -> Result<(), ValidationError> {
    check_unique_ids(doc)?;
    check_connections(doc)?;
    check_fuzzy_completeness(doc)?;
    check_ranges(doc)
}

fn check_unique_ids(doc: &CatalogDocument) -> Result<(), ValidationError> {
    let mut seen = AHashSet::with_capacity(doc.blocks.len());
    for block in &doc.blocks {
        if !seen.insert(block.id.as_str()) {
            return Err(ValidationError::DuplicateBlockId(block.id.clone()));
        }
    }
    Ok(())
}

fn check_connections(doc: &CatalogDocument) -> Result<(), ValidationError> {
    match doc.dangling_endpoints().first() {
        Some((index, missing_id)) => Err(ValidationError::DanglingConnection {
            index: *index,
            missing_id: missing_id.to_string(),
        }),
        None => Ok(()),
    }
}

/// Every block must define every parameter that any block of the document defines.
fn check_fuzzy_completeness(doc: &CatalogDocument) -> Result<(), ValidationError> {
    let parameters = doc.fuzzy_parameters();
    for block in &doc.blocks {
        if let Some(parameter) = parameters.iter().find(|p| !block.fuzzy.contains(p)) {
            return Err(ValidationError::IncompleteFuzzy {
                block_id: block.id.clone(),
                parameter: parameter.to_string(),
            });
        }
    }
    Ok(())
}

fn check_ranges(doc: &CatalogDocument) -> Result<(), ValidationError> {
    let in_range = |v: f64| (0.0..=1.0).contains(&v);
    for block in &doc.blocks {
        if !in_range(block.membership) {
            return Err(ValidationError::OutOfRange {
                block_id: block.id.clone(),
                field: "S(x)".to_string(),
                value: block.membership,
            });
        }
        if let Some((symbol, value)) = block.fuzzy.iter().find(|(_, v)| !in_range(*v)) {
            return Err(ValidationError::OutOfRange {
                block_id: block.id.clone(),
                field: format!("fuzzy.{}", symbol),
                value,
            });
        }
    }
    Ok(())
}
