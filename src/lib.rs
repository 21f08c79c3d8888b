//! # gptdoc - Catalog Document Pipeline
//!
//! **gptdoc** loads JSON documents that describe a GPT (its name, category, a list
//! of functional blocks carrying fuzzy-membership scores, and the directed
//! connections between those blocks), validates them into one canonical model,
//! derives aggregate metrics and produces export artifacts.
//!
//! ## Core Workflow
//!
//! 1.  **Parse**: [`parse::parse`] (or a configured [`parse::DocumentParser`]) turns raw
//!     bytes into a [`document::CatalogDocument`]. Both observed key conventions are
//!     normalized at this boundary.
//! 2.  **Derive**: [`metrics::derive_metrics`] computes the mean `S(x)` and the
//!     per-parameter fuzzy means.
//! 3.  **Export**: [`export::to_export_json`] writes the technical JSON form,
//!     [`export::HtmlReport`] a self-contained HTML report and
//!     [`export::SummaryFormatter`] a plain-text summary.
//!
//! [`pipeline::Pipeline`] runs all three steps over files on disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use gptdoc::prelude::*;
//!
//! let raw = r#"{
//!     "nome_do_gpt": "X",
//!     "categoria": "Y",
//!     "blocos_funcionais": [
//!         {"id": "b1", "nome": "A", "tipo": "ação", "descricao": "d",
//!          "fuzzy": {"α": 1, "β": 0}, "S(x)": 0.5},
//!         {"id": "b2", "nome": "B", "tipo": "fim", "descricao": "e",
//!          "fuzzy": {"α": 0, "β": 1}, "S(x)": 0.7}
//!     ],
//!     "conexoes": [["b1", "b2"]]
//! }"#;
//!
//! let doc = parse(raw.as_bytes())?;
//! let metrics = derive_metrics(&doc)?;
//! assert!((metrics.average_membership - 0.6).abs() < 1e-12);
//!
//! let json = to_export_json(&doc, &metrics)?;
//! let html = HtmlReport::new(&doc).with_metrics(&metrics).render();
//! assert!(String::from_utf8(json)?.contains("\"media_S(x)\""));
//! assert!(html.contains("Blocos Funcionais"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod metrics;
pub mod parse;
pub mod pipeline;
pub mod prelude;
