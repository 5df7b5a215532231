//! # pagealign
//!
//! Line alignment and reading-order reconstruction for OCR editions of
//! printed documents.
//!
//! Two OCR runs over the same page (different engines, different scans,
//! different years) are reconciled line by line, including lines that one
//! side split into two fragments. Independently, the blocks of a page can
//! be put into reading order using interval-algebra reasoning over their
//! bounding boxes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagealign::{align_files, render, AlignOptions, LoadOptions};
//!
//! fn main() -> pagealign::Result<()> {
//!     let alignment = align_files(
//!         "edition_a.json",
//!         "edition_b.json",
//!         &LoadOptions::default(),
//!         &AlignOptions::default(),
//!     )?;
//!
//!     let json = render::to_json(&alignment, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Greedy alignment**: center distance plus edit distance, gated by a
//!   maximum distance
//! - **Split-line reconciliation**: fragments on the same row are fused and
//!   matched against a leftover line of the other edition
//! - **Reading order**: Allen interval relations, three spatial strategies,
//!   cycle-tolerant linearization
//! - **Parallel processing**: Uses Rayon across pages

pub mod align;
pub mod error;
pub mod model;
pub mod order;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use align::{
    AlignOptions, Aligner, DocumentAlignment, LineRef, PageAlignment, Pairing, Target,
};
pub use error::{Error, Result};
pub use model::{Block, BlockRole, BoundingBox, Document, Line, MarginConfig, Page, Point};
pub use order::{DocumentOrder, OrderOptions, PageOrder, ReadingOrderDetector, SpatialRule};
pub use parser::{DocumentReader, LoadOptions, PageSelection};
pub use render::{JsonFormat, TextOptions};

use std::path::Path;

/// Load an OCR edition from a JSON file.
///
/// # Example
///
/// ```no_run
/// use pagealign::load_file;
///
/// let doc = load_file("edition.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocumentReader::new().read_path(path)
}

/// Load an OCR edition with custom options.
///
/// # Example
///
/// ```no_run
/// use pagealign::{load_file_with_options, LoadOptions, PageSelection};
///
/// let options = LoadOptions::new()
///     .with_margin_exclusion(true)
///     .with_pages(PageSelection::Range(1..=10));
/// let doc = load_file_with_options("edition.json", options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Document> {
    DocumentReader::with_options(options).read_path(path)
}

/// Load an OCR edition from JSON bytes.
pub fn load_bytes(data: &[u8]) -> Result<Document> {
    DocumentReader::new().read_slice(data)
}

/// Load two editions and align them page by page.
pub fn align_files<P: AsRef<Path>, Q: AsRef<Path>>(
    a: P,
    b: Q,
    load: &LoadOptions,
    options: &AlignOptions,
) -> Result<DocumentAlignment> {
    let reader = DocumentReader::with_options(load.clone());
    let a_doc = reader.read_path(a)?;
    let b_doc = reader.read_path(b)?;
    Ok(Aligner::with_options(options.clone()).align_documents(&a_doc, &b_doc))
}

/// Reconstruct the reading order of every page in a file.
///
/// # Example
///
/// ```no_run
/// use pagealign::reading_order;
///
/// for page in reading_order("edition.json").unwrap().pages {
///     println!("{}: {:?}", page.page, page.order);
/// }
/// ```
pub fn reading_order<P: AsRef<Path>>(path: P) -> Result<DocumentOrder> {
    let doc = load_file(path)?;
    Ok(ReadingOrderDetector::new().order_document(&doc))
}

/// Builder for loading editions and running the aligner or the
/// reading-order detector with one set of options.
///
/// # Example
///
/// ```no_run
/// use pagealign::PageAlign;
///
/// let report = PageAlign::new()
///     .with_max_dist(25.0)
///     .with_labels("1914", "1915")
///     .exclude_margins()
///     .align("a.json", "b.json")?
///     .report()?;
/// # Ok::<(), pagealign::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageAlign {
    load_options: LoadOptions,
    align_options: AlignOptions,
    order_options: OrderOptions,
}

impl PageAlign {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geometric gating threshold.
    pub fn with_max_dist(mut self, max_dist: f32) -> Self {
        self.align_options = self.align_options.with_max_dist(max_dist);
        self
    }

    /// Set the edition labels.
    pub fn with_labels(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.align_options = self.align_options.with_labels(a, b);
        self
    }

    /// Skip split-line reconciliation.
    pub fn without_splits(mut self) -> Self {
        self.align_options = self.align_options.with_split_reconciliation(false);
        self
    }

    /// Exclude header/footer lines from alignment.
    pub fn exclude_margins(mut self) -> Self {
        self.load_options = self.load_options.with_margin_exclusion(true);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.load_options = self.load_options.with_pages(pages);
        self
    }

    /// Set the reading-order strategy.
    pub fn with_rule(mut self, rule: SpatialRule) -> Self {
        self.order_options = self.order_options.with_rule(rule);
        self
    }

    /// Set the interval tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.order_options = self.order_options.with_tolerance(tolerance);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.align_options = self.align_options.sequential();
        self.order_options = self.order_options.sequential();
        self
    }

    /// Load and align two editions.
    pub fn align<P: AsRef<Path>, Q: AsRef<Path>>(self, a: P, b: Q) -> Result<AlignResult> {
        let reader = DocumentReader::with_options(self.load_options);
        let a_doc = reader.read_path(a)?;
        let b_doc = reader.read_path(b)?;
        let alignment = Aligner::with_options(self.align_options).align_documents(&a_doc, &b_doc);
        Ok(AlignResult {
            alignment,
            a_doc,
            b_doc,
        })
    }

    /// Load one edition and reconstruct its reading order.
    pub fn order<P: AsRef<Path>>(self, path: P) -> Result<OrderResult> {
        let document = DocumentReader::with_options(self.load_options).read_path(path)?;
        let order = ReadingOrderDetector::with_options(self.order_options).order_document(&document);
        Ok(OrderResult { document, order })
    }
}

/// Result of aligning two editions, with both editions kept for rendering.
#[derive(Debug, Clone)]
pub struct AlignResult {
    /// The computed alignment
    pub alignment: DocumentAlignment,
    /// Edition A as loaded
    pub a_doc: Document,
    /// Edition B as loaded
    pub b_doc: Document,
}

impl AlignResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.alignment, format)
    }

    /// Human-readable report.
    pub fn report(&self) -> Result<String> {
        render::alignment_report(&self.alignment, &self.a_doc, &self.b_doc)
    }
}

/// Result of reading-order reconstruction.
#[derive(Debug, Clone)]
pub struct OrderResult {
    /// The document as loaded
    pub document: Document,
    /// Per-page block orders
    pub order: DocumentOrder,
}

impl OrderResult {
    /// Convert the orders to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.order, format)
    }

    /// Page texts in reading order.
    pub fn to_text(&self, options: &TextOptions) -> String {
        render::document_text_in_order(&self.document, &self.order, options)
    }
}
