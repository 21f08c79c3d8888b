use crate::config::PipelineConfig;
use crate::document::CatalogDocument;
use crate::error::{MetricsError, PipelineError};
use crate::export::{HtmlReport, SummaryFormatter, to_export_json};
use crate::metrics::{Metrics, derive_metrics};
use crate::parse::DocumentParser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything one pipeline run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub document: CatalogDocument,
    /// An empty document is not fatal to the run; its metrics error is reported here.
    pub metrics: Result<Metrics, MetricsError>,
    pub summary: String,
    /// Export files written during the run, in the order they were written.
    pub written: Vec<PathBuf>,
}

/// Runs read → parse → metrics → export cycles over documents on disk.
///
/// Each call to [`Pipeline::run`] is independent: nothing is cached between
/// runs, and every file handle is closed before `run` returns.
pub struct Pipeline {
    config: PipelineConfig,
    parser: DocumentParser,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let parser = DocumentParser::builder()
            .strictness(config.strictness())
            .build();
        Self { config, parser }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes one document file.
    ///
    /// Exports are named after the input file: `<stem>.export.json` and
    /// `<stem>.report.html`. The JSON export needs metrics, so it is skipped
    /// for a document without blocks.
    pub fn run(&self, input: &Path) -> Result<RunOutcome, PipelineError> {
        let _span = tracing::info_span!("pipeline.run", input = %input.display()).entered();

        let bytes = fs::read(input).map_err(|e| PipelineError::Read {
            path: input.display().to_string(),
            message: e.to_string(),
        })?;
        let document = self
            .parser
            .parse(&bytes)
            .map_err(|source| PipelineError::Validation {
                path: input.display().to_string(),
                source,
            })?;

        let metrics = derive_metrics(&document);
        if let Err(e) = &metrics {
            warn!(error = %e, "metrics unavailable");
        }

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");

        // Every artifact is rendered before the first write, so a failed run
        // leaves nothing behind in the output directory.
        let mut artifacts: Vec<(PathBuf, Vec<u8>)> = Vec::new();
        if self.config.write_json() {
            match &metrics {
                Ok(m) => artifacts.push((
                    self.config.output_dir().join(format!("{}.export.json", stem)),
                    to_export_json(&document, m)?,
                )),
                Err(_) => warn!("skipping JSON export: document has no blocks"),
            }
        }
        if self.config.write_html() {
            let html = self.render_html(&document, metrics.as_ref().ok())?;
            artifacts.push((
                self.config.output_dir().join(format!("{}.report.html", stem)),
                html.into_bytes(),
            ));
        }

        let mut written = Vec::with_capacity(artifacts.len());
        for (path, contents) in artifacts {
            self.write(&path, &contents)?;
            written.push(path);
        }

        let summary = SummaryFormatter::format(&document, metrics.as_ref().ok());
        info!(exports = written.len(), "run finished");

        Ok(RunOutcome {
            document,
            metrics,
            summary,
            written,
        })
    }

    fn render_html(
        &self,
        document: &CatalogDocument,
        metrics: Option<&Metrics>,
    ) -> Result<String, PipelineError> {
        let mut report = HtmlReport::new(document);
        if let Some(m) = metrics {
            report = report.with_metrics(m);
        }
        if let Some(logo) = self.config.logo() {
            let image = fs::read(&logo.path).map_err(|e| PipelineError::Read {
                path: logo.path.display().to_string(),
                message: e.to_string(),
            })?;
            report = report.with_logo(&image, logo.mime);
        }
        Ok(report.render())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), PipelineError> {
        let to_error = |e: std::io::Error| PipelineError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        fs::create_dir_all(self.config.output_dir()).map_err(to_error)?;
        fs::write(path, contents).map_err(to_error)?;
        info!(path = %path.display(), bytes = contents.len(), "wrote export");
        Ok(())
    }
}
