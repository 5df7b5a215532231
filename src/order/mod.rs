//! Reading-order reconstruction.
//!
//! Blocks come out of OCR in extraction order, which for multi-column or
//! mixed layouts is rarely the order a person reads them in. The detector
//! compares every pair of blocks with Allen interval relations on both
//! axes, builds a precedence graph from a [`ReadingRule`], and linearizes
//! the (possibly cyclic) graph greedily.
//!
//! # Example
//!
//! ```
//! use pagealign::model::BoundingBox;
//! use pagealign::order::ReadingOrderDetector;
//!
//! let boxes = vec![
//!     BoundingBox::new(150.0, 0.0, 250.0, 100.0),
//!     BoundingBox::new(0.0, 0.0, 100.0, 100.0),
//! ];
//! assert_eq!(ReadingOrderDetector::new().order_boxes(&boxes), vec![1, 0]);
//! ```

mod graph;
mod interval;
mod rules;

pub use graph::ReadingGraph;
pub use interval::IntervalRelation;
pub use rules::{ColumnWise, General, ReadingRule, RowWise, SpatialRule};

use crate::model::{BoundingBox, Document, Page};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default boundary tolerance for interval relations, in page units.
pub const DEFAULT_TOLERANCE: f32 = 5.0;

/// Options for reading-order reconstruction.
#[derive(Debug, Clone)]
pub struct OrderOptions {
    /// Spatial reasoning strategy
    pub rule: SpatialRule,

    /// Interval boundaries this close are treated as coinciding
    pub tolerance: f32,

    /// Fall back to extraction order for pairs the rule leaves unordered
    pub use_default_order: bool,

    /// Process pages in parallel
    pub parallel: bool,
}

impl OrderOptions {
    /// Create new order options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial reasoning strategy.
    pub fn with_rule(mut self, rule: SpatialRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the interval tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable the extraction-order fallback.
    pub fn with_default_order(mut self, enabled: bool) -> Self {
        self.use_default_order = enabled;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            rule: SpatialRule::default(),
            tolerance: DEFAULT_TOLERANCE,
            use_default_order: true,
            parallel: true,
        }
    }
}

/// Reading order of one page: block indices, first-read first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOrder {
    /// Page number (1-indexed)
    pub page: u32,

    /// Permutation of the page's block indices
    pub order: Vec<usize>,
}

/// Reading orders for every page of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOrder {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,

    /// Strategy the orders were computed with
    pub rule: SpatialRule,

    pub pages: Vec<PageOrder>,
}

impl DocumentOrder {
    /// Order for a page by number.
    pub fn get_page(&self, page: u32) -> Option<&PageOrder> {
        self.pages.iter().find(|p| p.page == page)
    }
}

/// Reconstructs the reading order of blocks on a page.
#[derive(Debug, Clone, Default)]
pub struct ReadingOrderDetector {
    options: OrderOptions,
}

impl ReadingOrderDetector {
    /// Create a detector with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom options.
    pub fn with_options(options: OrderOptions) -> Self {
        Self { options }
    }

    /// Get the order options.
    pub fn options(&self) -> &OrderOptions {
        &self.options
    }

    /// Build the precedence graph for a set of boxes.
    pub fn graph(&self, boxes: &[BoundingBox]) -> ReadingGraph {
        ReadingGraph::build(
            boxes,
            self.options.rule.rule(),
            self.options.tolerance,
            self.options.use_default_order,
        )
    }

    /// Order arbitrary boxes; returns a permutation of `0..boxes.len()`.
    pub fn order_boxes(&self, boxes: &[BoundingBox]) -> Vec<usize> {
        let graph = self.graph(boxes);
        log::debug!(
            "Reading graph: {} nodes, {} edges ({})",
            graph.len(),
            graph.edge_count(),
            self.options.rule
        );
        graph.into_order()
    }

    /// Order the blocks of a page.
    pub fn order_page(&self, page: &Page) -> PageOrder {
        PageOrder {
            page: page.number,
            order: self.order_boxes(&page.reading_boxes()),
        }
    }

    /// Order the blocks of every page.
    pub fn order_document(&self, doc: &Document) -> DocumentOrder {
        let pages = if self.options.parallel {
            doc.pages.par_iter().map(|p| self.order_page(p)).collect()
        } else {
            doc.pages.iter().map(|p| self.order_page(p)).collect()
        };
        DocumentOrder {
            source: doc.source.clone(),
            rule: self.options.rule,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Line, Point};

    fn block(left: f32, top: f32, right: f32, bottom: f32, text: &str) -> Block {
        let bbox = BoundingBox::new(left, top, right, bottom);
        Block::from_lines(vec![Line::new(Point::new(left, bottom - 2.0), bbox, text)])
    }

    fn two_column_page() -> Page {
        let mut page = Page::new(1, BoundingBox::new(0.0, 0.0, 300.0, 300.0));
        page.add_block(block(150.0, 0.0, 250.0, 100.0, "right"));
        page.add_block(block(0.0, 120.0, 100.0, 200.0, "left lower"));
        page.add_block(block(0.0, 0.0, 100.0, 100.0, "left upper"));
        page
    }

    #[test]
    fn test_order_two_columns() {
        let order = ReadingOrderDetector::new().order_page(&two_column_page());
        assert_eq!(order.page, 1);
        assert_eq!(order.order, vec![2, 1, 0]);
    }

    #[test]
    fn test_order_row_wise() {
        let detector =
            ReadingOrderDetector::with_options(OrderOptions::new().with_rule(SpatialRule::RowWise));
        let order = detector.order_page(&two_column_page());
        assert_eq!(order.order, vec![2, 0, 1]);
    }

    #[test]
    fn test_empty_and_single() {
        let detector = ReadingOrderDetector::new();
        assert!(detector.order_boxes(&[]).is_empty());
        assert_eq!(
            detector.order_boxes(&[BoundingBox::new(0.0, 0.0, 1.0, 1.0)]),
            vec![0]
        );
    }

    #[test]
    fn test_order_document_sequential_matches_parallel() {
        let mut doc = Document::with_source("book.json");
        doc.add_page(two_column_page());
        let mut second = two_column_page();
        second.number = 2;
        doc.add_page(second);

        let parallel = ReadingOrderDetector::new().order_document(&doc);
        let sequential =
            ReadingOrderDetector::with_options(OrderOptions::new().sequential()).order_document(&doc);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.pages.len(), 2);
        assert_eq!(parallel.get_page(2).map(|p| p.order.clone()), Some(vec![2, 1, 0]));
        assert_eq!(parallel.source, "book.json");
    }

    #[test]
    fn test_options_builder() {
        let options = OrderOptions::new()
            .with_rule(SpatialRule::General)
            .with_tolerance(2.0)
            .with_default_order(false)
            .sequential();
        assert_eq!(options.rule, SpatialRule::General);
        assert_eq!(options.tolerance, 2.0);
        assert!(!options.use_default_order);
        assert!(!options.parallel);
    }
}
