//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! gptdoc crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use gptdoc::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = std::fs::read("path/to/document.json")?;
//! let doc = DocumentParser::builder().strict().build().parse(&raw)?;
//! let metrics = derive_metrics(&doc)?;
//!
//! println!("{}", SummaryFormatter::format(&doc, Some(&metrics)));
//! std::fs::write("report.html", HtmlReport::new(&doc).with_metrics(&metrics).render())?;
//! # Ok(())
//! # }
//! ```

// Parsing and validation
pub use crate::parse::{DocumentParser, IntoCatalog, Strictness, parse};

// Document model
pub use crate::document::{
    BlockKind, CatalogDocument, Connection, Convention, DisplayHint, FunctionalBlock, FuzzyScores,
};

// Metrics and export
pub use crate::export::{HtmlReport, SummaryFormatter, to_export_html, to_export_json};
pub use crate::metrics::{Metrics, derive_metrics};

// Pipeline
pub use crate::config::PipelineConfig;
pub use crate::pipeline::{Pipeline, RunOutcome};

// Error types
pub use crate::error::{
    DecodeError, ExportError, MetricsError, PipelineError, SchemaError, ValidationError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
