//! Cross-edition line alignment.
//!
//! Two OCR runs over the same printed page rarely agree line for line:
//! boxes drift, text is re-flowed, and a line may come back as two
//! fragments. The aligner pairs lines by a blended cost (center distance
//! plus edit distance of the space-free texts), picking the cheapest
//! remaining pair greedily, then tries to fuse leftover fragments on
//! either side.
//!
//! # Example
//!
//! ```
//! use pagealign::align::Aligner;
//! use pagealign::model::{BoundingBox, Line, Point};
//!
//! let a = vec![Line::new(Point::new(0.0, 12.0), BoundingBox::new(0.0, 0.0, 20.0, 14.0), "Hello world")];
//! let b = vec![Line::new(Point::new(0.0, 13.0), BoundingBox::new(0.0, 1.0, 20.0, 15.0), "Hello world")];
//!
//! let alignment = Aligner::new().align_lines(&a, &b);
//! assert_eq!(alignment.matched_count(), 1);
//! ```

mod matrix;
mod options;
mod pairing;
mod reconcile;

pub use matrix::{pair_cost, Candidate, CostMatrix};
pub use options::{AlignOptions, DEFAULT_MAX_DIST};
pub use pairing::{DocumentAlignment, LineRef, PageAlignment, Pairing, Target, UNMATCHED_KEY};

use crate::model::{Document, Line, Page};
use rayon::prelude::*;

/// Aligns lines of two editions page by page.
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    options: AlignOptions,
}

impl Aligner {
    /// Create an aligner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aligner with custom options.
    pub fn with_options(options: AlignOptions) -> Self {
        Self { options }
    }

    /// Get the alignment options.
    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Align two line lists without touching the inputs.
    pub fn align_lines(&self, a: &[Line], b: &[Line]) -> PageAlignment {
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        self.align_lines_mut(&mut a, &mut b)
    }

    /// Align two line lists, merging matched split fragments in place.
    ///
    /// Callers must pass per-page copies: a merged fragment pair leaves the
    /// first line holding both texts and the second blanked.
    pub fn align_lines_mut(&self, a: &mut [Line], b: &mut [Line]) -> PageAlignment {
        let max_dist = self.options.max_dist;
        let rows: Vec<Candidate> = a.iter().map(Candidate::from_line).collect();
        let cols: Vec<Candidate> = b.iter().map(Candidate::from_line).collect();

        let mut alignment = PageAlignment::default();
        let mut matched_a = vec![false; a.len()];
        let mut matched_b = vec![false; b.len()];

        for (i, j, cost) in CostMatrix::new(&rows, &cols, max_dist).greedy_pairs() {
            log::trace!("{} -> {} ({:.2})", i, j, cost);
            matched_a[i] = true;
            matched_b[j] = true;
            alignment
                .pairings
                .push(Pairing::matched(LineRef::Single(i), LineRef::Single(j), cost));
        }
        let primary = alignment.pairings.len();

        let mut unmatched_a: Vec<usize> = (0..a.len()).filter(|&i| !matched_a[i]).collect();
        let mut unmatched_b: Vec<usize> = (0..b.len()).filter(|&j| !matched_b[j]).collect();

        if self.options.reconcile_splits {
            for m in reconcile::reconcile(a, &mut unmatched_a, b, &mut unmatched_b, max_dist) {
                alignment.pairings.push(Pairing::matched(
                    LineRef::Merged(m.first, m.second),
                    LineRef::Single(m.other),
                    m.cost,
                ));
            }
            for m in reconcile::reconcile(b, &mut unmatched_b, a, &mut unmatched_a, max_dist) {
                alignment.pairings.push(Pairing::matched(
                    LineRef::Single(m.other),
                    LineRef::Merged(m.first, m.second),
                    m.cost,
                ));
            }
        }

        log::debug!(
            "Aligned {}x{} lines: {} primary, {} split, {} unmatched A, {} unmatched B",
            a.len(),
            b.len(),
            primary,
            alignment.pairings.len() - primary,
            unmatched_a.len(),
            unmatched_b.len()
        );

        alignment.pairings.extend(
            unmatched_a
                .into_iter()
                .map(|i| Pairing::unmatched(LineRef::Single(i))),
        );
        alignment.unmatched_b = unmatched_b;
        alignment.sort();
        alignment
    }

    /// Align the body lines of two pages.
    pub fn align_pages(&self, a: &Page, b: &Page) -> PageAlignment {
        let mut a_lines = a.body_lines();
        let mut b_lines = b.body_lines();
        self.align_lines_mut(&mut a_lines, &mut b_lines)
    }

    /// Align two documents page by page.
    ///
    /// Only the first `min(pages_a, pages_b)` pages are aligned.
    pub fn align_documents(&self, a: &Document, b: &Document) -> DocumentAlignment {
        let count = a.pages.len().min(b.pages.len());
        if a.pages.len() != b.pages.len() {
            log::warn!(
                "Page count mismatch ({} vs {}), aligning the first {}",
                a.pages.len(),
                b.pages.len(),
                count
            );
        }

        let pairs: Vec<(&Page, &Page)> = a.pages.iter().zip(b.pages.iter()).collect();
        let pages: Vec<PageAlignment> = if self.options.parallel {
            pairs
                .par_iter()
                .map(|(pa, pb)| self.align_pages(pa, pb))
                .collect()
        } else {
            pairs
                .iter()
                .map(|(pa, pb)| self.align_pages(pa, pb))
                .collect()
        };

        DocumentAlignment {
            a_file: a.source.clone(),
            b_file: b.source.clone(),
            a_label: self.options.a_label.clone(),
            b_label: self.options.b_label.clone(),
            pages,
        }
    }
}
