//! Rendering module for alignments, reading orders and ordered text.

mod json;
mod report;
mod text;

pub use json::{to_json, write_json, JsonFormat};
pub use report::{alignment_report, alignment_report_with_stats, ReportStats};
pub use text::{document_text_in_order, page_header, page_text_in_order, TextOptions, PAGE_DIGITS};
