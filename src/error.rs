use thiserror::Error;

/// Errors raised while turning raw bytes into a JSON object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Document is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("Failed to parse document JSON: {0}")]
    InvalidJson(String),

    #[error("Document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Errors raised when the decoded JSON does not have the catalog shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Missing required key '{key}'")]
    MissingKey { key: &'static str },

    #[error("Key '{key}' must not be empty")]
    EmptyField { key: &'static str },

    #[error("Key '{key}' has an invalid value: {message}")]
    InvalidField { key: String, message: String },

    #[error("Block {index} is missing required key '{key}'")]
    MissingBlockField { index: usize, key: &'static str },

    #[error("Connection {index} is invalid: {message}")]
    InvalidConnection { index: usize, message: String },
}

/// Errors that can occur while parsing and validating a catalog document.
///
/// `Decode` and `Schema` are always checked. The remaining variants are only
/// produced when the parser runs with `Strictness::Strict`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Block id '{0}' is used by more than one block")]
    DuplicateBlockId(String),

    #[error("Connection {index} references block '{missing_id}', which is not in the document")]
    DanglingConnection { index: usize, missing_id: String },

    #[error("Block '{block_id}' does not define fuzzy parameter '{parameter}'")]
    IncompleteFuzzy { block_id: String, parameter: String },

    #[error("Block '{block_id}' has {field} = {value}, outside the range [0, 1]")]
    OutOfRange {
        block_id: String,
        field: String,
        value: f64,
    },
}

/// Errors that can occur while deriving aggregate metrics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Cannot compute metrics for a document without blocks")]
    EmptyDocument,
}

/// Errors that can occur while serializing an export artifact.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Failed to serialize export JSON: {0}")]
    Json(String),
}

/// Errors that abort one pipeline run.
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not read '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Could not write '{path}': {message}")]
    Write { path: String, message: String },

    #[error("Document '{path}' is invalid: {source}")]
    Validation {
        path: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}
