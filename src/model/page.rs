//! Page-level types.

use super::{BoundingBox, Line};
use serde::{Deserialize, Serialize};

/// A single page of an OCR edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(default)]
    pub number: u32,

    /// Page extent in page coordinates
    pub cropbox: BoundingBox,

    /// Layout blocks in extraction order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page with the given extent.
    pub fn new(number: u32, cropbox: BoundingBox) -> Self {
        Self {
            number,
            cropbox,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get the number of lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    /// Check if the page has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }

    /// Owned copy of every line, flattened in block order.
    ///
    /// Index `i` of the returned vector is the page-level line index.
    pub fn lines(&self) -> Vec<Line> {
        self.blocks
            .iter()
            .flat_map(|b| b.lines.iter().cloned())
            .collect()
    }

    /// Owned copy of the lines of body blocks only (header/footer blocks
    /// tagged by [`Page::tag_margins`] are skipped).
    pub fn body_lines(&self) -> Vec<Line> {
        self.blocks
            .iter()
            .filter(|b| b.role == BlockRole::Body)
            .flat_map(|b| b.lines.iter().cloned())
            .collect()
    }

    /// Compute the margin bands for this page.
    ///
    /// A band is only active when at least one single-line block lies
    /// entirely inside it.
    pub fn margin_bands(&self, config: &MarginConfig) -> MarginBands {
        let height = self.cropbox.height();
        let top_limit = self.cropbox.top + height * config.top;
        let bottom_limit = self.cropbox.bottom - height * config.bottom;

        let top_active = self
            .blocks
            .iter()
            .any(|b| b.is_single_line() && b.bbox.bottom <= top_limit);
        let bottom_active = self
            .blocks
            .iter()
            .any(|b| b.is_single_line() && b.bbox.top >= bottom_limit);

        MarginBands {
            top: top_active.then_some(top_limit),
            bottom: bottom_active.then_some(bottom_limit),
        }
    }

    /// Tag single-line blocks inside an active margin band as header/footer.
    ///
    /// Returns the number of blocks tagged.
    pub fn tag_margins(&mut self, config: &MarginConfig) -> usize {
        let bands = self.margin_bands(config);
        let mut tagged = 0;
        for block in &mut self.blocks {
            if !block.is_single_line() {
                continue;
            }
            if bands.top.is_some_and(|limit| block.bbox.bottom <= limit) {
                block.role = BlockRole::Header;
                tagged += 1;
            } else if bands.bottom.is_some_and(|limit| block.bbox.top >= limit) {
                block.role = BlockRole::Footer;
                tagged += 1;
            }
        }
        tagged
    }

    /// Reading-order boxes of all blocks, in block order.
    pub fn reading_boxes(&self) -> Vec<BoundingBox> {
        self.blocks.iter().map(Block::reading_box).collect()
    }
}

/// A layout block: an ordered run of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Aggregate bounding box (union of the line boxes)
    pub bbox: BoundingBox,

    /// Lines in extraction order
    pub lines: Vec<Line>,

    /// Header/footer tag
    #[serde(default, skip_serializing_if = "BlockRole::is_body")]
    pub role: BlockRole,
}

impl Block {
    /// Create a block whose box is the union of its lines' boxes.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let bbox = lines
            .iter()
            .map(|l| l.bbox)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default();
        Self {
            bbox,
            lines,
            role: BlockRole::Body,
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.lines.len() == 1
    }

    /// Box used for reading-order reasoning: top of the first line, bottom
    /// of the last line, and the horizontal extremes of all lines.
    pub fn reading_box(&self) -> BoundingBox {
        let (first, last) = match (self.lines.first(), self.lines.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.bbox,
        };
        let left = self
            .lines
            .iter()
            .map(|l| l.bbox.left)
            .fold(f32::INFINITY, f32::min);
        let right = self
            .lines
            .iter()
            .map(|l| l.bbox.right)
            .fold(f32::NEG_INFINITY, f32::max);
        BoundingBox::new(left, first.bbox.top, right, last.bbox.bottom)
    }

    /// Block text, one source line per output line.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Role of a block within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    #[default]
    Body,
    Header,
    Footer,
}

impl BlockRole {
    pub fn is_body(&self) -> bool {
        *self == BlockRole::Body
    }
}

/// Fractions of the page height treated as header/footer margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginConfig {
    /// Top band as a fraction of page height
    pub top: f32,
    /// Bottom band as a fraction of page height
    pub bottom: f32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 0.1,
            bottom: 0.1,
        }
    }
}

/// Active margin bands of a page, as vertical limits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarginBands {
    /// Blocks ending at or above this y belong to the header band
    pub top: Option<f32>,
    /// Blocks starting at or below this y belong to the footer band
    pub bottom: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn single(top: f32, bottom: f32, text: &str) -> Block {
        Block::from_lines(vec![Line::new(
            Point::new(50.0, bottom - 2.0),
            BoundingBox::new(50.0, top, 300.0, bottom),
            text,
        )])
    }

    fn page_with(blocks: Vec<Block>) -> Page {
        let mut page = Page::new(1, BoundingBox::new(0.0, 0.0, 600.0, 1000.0));
        for b in blocks {
            page.add_block(b);
        }
        page
    }

    #[test]
    fn test_lines_flatten_in_block_order() {
        let page = page_with(vec![single(200.0, 220.0, "a"), single(300.0, 320.0, "b")]);
        let texts: Vec<_> = page.lines().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(page.line_count(), 2);
    }

    #[test]
    fn test_margin_band_activates_only_with_candidate() {
        let page = page_with(vec![single(200.0, 220.0, "body")]);
        let bands = page.margin_bands(&MarginConfig::default());
        assert_eq!(bands, MarginBands::default());

        let page = page_with(vec![
            single(20.0, 40.0, "Running head"),
            single(200.0, 220.0, "body"),
            single(950.0, 970.0, "12"),
        ]);
        let bands = page.margin_bands(&MarginConfig::default());
        assert_eq!(bands.top, Some(100.0));
        assert_eq!(bands.bottom, Some(900.0));
    }

    #[test]
    fn test_tag_margins_excludes_from_body_lines() {
        let mut page = page_with(vec![
            single(20.0, 40.0, "Running head"),
            single(200.0, 220.0, "body"),
            single(950.0, 970.0, "12"),
        ]);
        assert_eq!(page.tag_margins(&MarginConfig::default()), 2);
        assert_eq!(page.blocks[0].role, BlockRole::Header);
        assert_eq!(page.blocks[2].role, BlockRole::Footer);
        let body: Vec<_> = page.body_lines().into_iter().map(|l| l.text).collect();
        assert_eq!(body, vec!["body"]);
        assert_eq!(page.lines().len(), 3);
    }

    #[test]
    fn test_multi_line_block_never_tagged() {
        let lines = vec![
            Line::new(
                Point::new(0.0, 18.0),
                BoundingBox::new(0.0, 5.0, 100.0, 20.0),
                "one",
            ),
            Line::new(
                Point::new(0.0, 38.0),
                BoundingBox::new(0.0, 25.0, 100.0, 40.0),
                "two",
            ),
        ];
        let mut page = page_with(vec![Block::from_lines(lines)]);
        assert_eq!(page.tag_margins(&MarginConfig::default()), 0);
    }

    #[test]
    fn test_reading_box() {
        let lines = vec![
            Line::new(
                Point::new(10.0, 18.0),
                BoundingBox::new(10.0, 5.0, 100.0, 20.0),
                "one",
            ),
            Line::new(
                Point::new(0.0, 38.0),
                BoundingBox::new(0.0, 25.0, 120.0, 40.0),
                "two",
            ),
        ];
        let block = Block::from_lines(lines);
        assert_eq!(block.reading_box(), BoundingBox::new(0.0, 5.0, 120.0, 40.0));
        assert_eq!(block.text(), "one\ntwo");
    }
}
