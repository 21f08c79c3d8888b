use crate::document::CatalogDocument;
use crate::error::MetricsError;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Aggregate values derived from a catalog document.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Arithmetic mean of every block's `S(x)`.
    pub average_membership: f64,
    /// Per-parameter mean over the blocks that define that parameter.
    /// Parameters defined by no block are absent.
    pub average_fuzzy: BTreeMap<String, f64>,
    pub block_count: usize,
}

impl Metrics {
    /// Rounds a value to two decimals for display. Stored values keep full precision.
    pub fn rounded(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}

/// Computes the aggregate metrics of a document.
///
/// A parameter missing from a block is excluded from that parameter's mean;
/// it is never counted as zero. An empty document has no defined mean and is
/// reported as [`MetricsError::EmptyDocument`].
pub fn derive_metrics(doc: &CatalogDocument) -> Result<Metrics, MetricsError> {
    let _span = tracing::debug_span!("derive_metrics", blocks = doc.blocks.len()).entered();

    let average_membership =
        mean(doc.blocks.iter().map(|b| b.membership)).ok_or(MetricsError::EmptyDocument)?;

    let average_fuzzy = doc
        .blocks
        .iter()
        .flat_map(|b| b.fuzzy.iter())
        .into_group_map_by(|(symbol, _)| *symbol)
        .into_iter()
        .filter_map(|(symbol, pairs)| {
            mean(pairs.into_iter().map(|(_, v)| v)).map(|m| (symbol.to_string(), m))
        })
        .collect();

    tracing::debug!(average_membership, "derived metrics");

    Ok(Metrics {
        average_membership,
        average_fuzzy,
        block_count: doc.blocks.len(),
    })
}

/// Mean of the values, independent of their order.
///
/// Values are summed in ascending order with Neumaier compensation, so any
/// permutation of the same values yields the same bits.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let sorted: Vec<f64> = values.sorted_by(f64::total_cmp).collect();
    if sorted.is_empty() {
        return None;
    }
    let count = sorted.len() as f64;
    let total = compensated_sum(&sorted);
    if total.is_finite() {
        return Some(total / count);
    }
    // The total overflowed; scaling first keeps the mean of finite values finite.
    let scaled: Vec<f64> = sorted.iter().map(|v| v / count).collect();
    Some(compensated_sum(&scaled))
}

fn compensated_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}
