use crate::document::CatalogDocument;
use crate::metrics::Metrics;
use itertools::Itertools;

/// Formats a document into a plain-text summary for terminals and logs.
pub struct SummaryFormatter;

impl SummaryFormatter {
    /// Formats the document header, its averages (when available), every block
    /// in document order and every connection in connection order.
    pub fn format(doc: &CatalogDocument, metrics: Option<&Metrics>) -> String {
        let mut out = String::new();
        out.push_str(&format!("GPT: {}\n", doc.name));
        out.push_str(&format!("Category: {}\n", doc.category));
        if let Some(main_function) = &doc.main_function {
            out.push_str(&format!("Main function: {}\n", main_function));
        }
        out.push_str(&format!(
            "Blocks: {} | Connections: {}\n",
            doc.blocks.len(),
            doc.connections.len()
        ));

        match metrics {
            Some(m) => {
                out.push_str(&format!("Average S(x): {:.2}\n", m.average_membership));
                if !m.average_fuzzy.is_empty() {
                    let fuzzy = m
                        .average_fuzzy
                        .iter()
                        .map(|(symbol, value)| format!("{}={:.2}", symbol, value))
                        .join(", ");
                    out.push_str(&format!("Average fuzzy: {}\n", fuzzy));
                }
            }
            None => out.push_str("Average S(x): n/a\n"),
        }

        if !doc.blocks.is_empty() {
            out.push_str("\nBlocks:\n");
            for block in &doc.blocks {
                out.push_str(&format!(
                    "  [{}] {} ({}) S(x)={}\n",
                    block.id,
                    block.name,
                    block.kind_tag,
                    Self::format_value(block.membership)
                ));
            }
        }

        if !doc.connections.is_empty() {
            out.push_str("\nConnections:\n");
            for connection in &doc.connections {
                out.push_str(&format!("  {} -> {}\n", connection.source, connection.target));
            }
        }

        out
    }

    /// Whole numbers print without a fractional part, everything else with two decimals.
    fn format_value(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value)
        } else {
            format!("{:.2}", value)
        }
    }
}
