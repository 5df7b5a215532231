//! Input parsing module.

mod options;
mod reader;

pub use options::{LoadOptions, PageSelection};
pub use reader::DocumentReader;
