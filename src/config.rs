//! Pipeline configuration.
//!
//! A `PipelineConfig` is resolved once at startup (from CLI flags or by the
//! embedding application) and passed into [`crate::pipeline::Pipeline`]. The
//! pipeline never consults environment variables or other ambient state.

use crate::error::PipelineError;
use crate::parse::Strictness;
use std::path::{Path, PathBuf};

/// An image to embed in the HTML report header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoSource {
    pub path: PathBuf,
    pub mime: &'static str,
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    output_dir: PathBuf,
    strictness: Strictness,
    write_json: bool,
    write_html: bool,
    logo: Option<LogoSource>,
}

impl PipelineConfig {
    /// Creates a configuration that writes both exports into `output_dir`.
    ///
    /// The directory is created on first write. It is an error for the path to
    /// name an existing regular file.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let output_dir = output_dir.into();
        if output_dir.is_file() {
            return Err(PipelineError::Config(format!(
                "output path '{}' is a file, not a directory",
                output_dir.display()
            )));
        }

        Ok(Self {
            output_dir,
            strictness: Strictness::default(),
            write_json: true,
            write_html: true,
            logo: None,
        })
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_json(mut self, enabled: bool) -> Self {
        self.write_json = enabled;
        self
    }

    pub fn with_html(mut self, enabled: bool) -> Self {
        self.write_html = enabled;
        self
    }

    /// Sets the image embedded in the HTML report. Its extension must be a known image type.
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        let mime = image_mime_type(&path).ok_or_else(|| {
            PipelineError::Config(format!(
                "logo '{}' is not a png, jpeg, gif, svg or webp image",
                path.display()
            ))
        })?;
        self.logo = Some(LogoSource { path, mime });
        Ok(self)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn write_json(&self) -> bool {
        self.write_json
    }

    pub fn write_html(&self) -> bool {
        self.write_html
    }

    pub fn logo(&self) -> Option<&LogoSource> {
        self.logo.as_ref()
    }
}

/// Maps an image file extension onto its MIME type.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
