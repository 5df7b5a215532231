//! Text line type.

use super::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// Soft hyphen as emitted by some OCR engines at line ends.
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// A single text line on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Baseline anchor of the line's first glyph
    pub origin: Point,

    /// Bounding box in page coordinates
    pub bbox: BoundingBox,

    /// Midpoint of `bbox`
    pub center: Point,

    /// Raw line text, soft hyphens already normalized to `-`
    pub text: String,
}

impl Line {
    /// Create a line, deriving the center from the bounding box.
    pub fn new(origin: Point, bbox: BoundingBox, text: impl Into<String>) -> Self {
        Self {
            origin,
            bbox,
            center: bbox.center(),
            text: normalize_soft_hyphens(&text.into()),
        }
    }

    /// Line text with every ASCII space removed.
    pub fn text_without_spaces(&self) -> String {
        strip_spaces(&self.text)
    }

    /// Whether two lines sit on the same printed row: each baseline falls
    /// strictly within the other's vertical span.
    pub fn shares_row_with(&self, other: &Line) -> bool {
        other.bbox.spans_y(self.origin.y) && self.bbox.spans_y(other.origin.y)
    }

    /// Fold `other` into this line: union of boxes, concatenated text,
    /// recomputed center.
    pub fn absorb(&mut self, other: &Line) {
        self.bbox = self.bbox.union(&other.bbox);
        self.text.push_str(&other.text);
        self.center = self.bbox.center();
    }

    /// Blank the text so the line is not offered again as a match.
    pub fn blank(&mut self) {
        self.text = " ".to_string();
    }
}

/// Remove ASCII spaces from `text`.
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| *c != ' ').collect()
}

/// Replace soft hyphens with a plain `-`.
pub fn normalize_soft_hyphens(text: &str) -> String {
    if text.contains(SOFT_HYPHEN) {
        text.replace(SOFT_HYPHEN, "-")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(left: f32, top: f32, right: f32, bottom: f32, baseline: f32, text: &str) -> Line {
        Line::new(
            Point::new(left, baseline),
            BoundingBox::new(left, top, right, bottom),
            text,
        )
    }

    #[test]
    fn test_soft_hyphen_normalized() {
        let l = line(0.0, 0.0, 10.0, 10.0, 8.0, "exam\u{00AD}");
        assert_eq!(l.text, "exam-");
    }

    #[test]
    fn test_text_without_spaces() {
        let l = line(0.0, 0.0, 10.0, 10.0, 8.0, " Hello  world ");
        assert_eq!(l.text_without_spaces(), "Helloworld");
    }

    #[test]
    fn test_shares_row() {
        let a = line(0.0, 0.0, 40.0, 14.0, 12.0, "Hello");
        let b = line(50.0, 1.0, 90.0, 15.0, 12.5, "world");
        let c = line(0.0, 20.0, 40.0, 34.0, 32.0, "below");
        assert!(a.shares_row_with(&b));
        assert!(b.shares_row_with(&a));
        assert!(!a.shares_row_with(&c));
    }

    #[test]
    fn test_absorb_and_blank() {
        let mut a = line(0.0, 0.0, 40.0, 14.0, 12.0, "Hello");
        let mut b = line(50.0, 1.0, 90.0, 15.0, 12.5, "world");
        a.absorb(&b);
        b.blank();
        assert_eq!(a.text, "Helloworld");
        assert_eq!(a.bbox, BoundingBox::new(0.0, 0.0, 90.0, 15.0));
        assert_eq!(a.center, Point::new(45.0, 7.5));
        assert_eq!(b.text, " ");
    }
}
