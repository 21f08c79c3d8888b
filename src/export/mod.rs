pub mod html;
pub mod json;
pub mod summary;

pub use html::{HtmlReport, to_export_html};
pub use json::to_export_json;
pub use summary::SummaryFormatter;
