//! Document model types for OCR page content.
//!
//! This module defines the per-page representation shared by the aligner
//! and the reading-order detector: bounding boxes, lines, blocks and pages.
//! All entities are built fresh per page from the extraction stage's
//! structured output.

mod document;
mod geometry;
mod line;
mod page;

pub use document::Document;
pub use geometry::{BoundingBox, Point};
pub use line::{normalize_soft_hyphens, strip_spaces, Line, SOFT_HYPHEN};
pub use page::{Block, BlockRole, MarginBands, MarginConfig, Page};
