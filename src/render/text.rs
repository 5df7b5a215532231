//! Plain text rendering in reconstructed reading order.

use crate::model::{Document, Page};
use crate::order::DocumentOrder;

/// Number of digits in the `#{pageNNNN}` page header.
pub const PAGE_DIGITS: usize = 4;

/// Options for plain text output.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    /// Precede each block with `B<idx>[top,bottom,left,right]`
    pub block_markers: bool,
}

impl TextOptions {
    /// Create new text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable block markers.
    pub fn with_block_markers(mut self, enabled: bool) -> Self {
        self.block_markers = enabled;
        self
    }
}

/// Concatenate the blocks of a page in the given order.
///
/// Each block starts on a fresh line after a blank separator; each source
/// line becomes one output line. Indices outside the page are skipped.
pub fn page_text_in_order(page: &Page, order: &[usize], options: &TextOptions) -> String {
    let mut output = String::new();
    for &idx in order {
        let Some(block) = page.blocks.get(idx) else {
            log::warn!("Page {}: no block {}", page.number, idx);
            continue;
        };
        output.push('\n');
        if options.block_markers {
            let b = block.reading_box();
            output.push_str(&format!(
                "B{}[{:.2},{:.2},{:.2},{:.2}]\n",
                idx, b.top, b.bottom, b.left, b.right
            ));
        }
        for line in &block.lines {
            output.push_str(&line.text);
            output.push('\n');
        }
    }
    output
}

/// Render every ordered page, each headed by `#{pageNNNN}`.
///
/// Pages without an order entry fall back to extraction order.
pub fn document_text_in_order(doc: &Document, order: &DocumentOrder, options: &TextOptions) -> String {
    let mut output = String::new();
    for page in &doc.pages {
        let fallback: Vec<usize>;
        let page_order = match order.get_page(page.number) {
            Some(o) => o.order.as_slice(),
            None => {
                fallback = (0..page.blocks.len()).collect();
                &fallback
            }
        };
        output.push_str(&page_header(page.number));
        output.push('\n');
        output.push_str(&page_text_in_order(page, page_order, options));
        output.push_str("\n\n");
    }
    output
}

/// `#{page0007}` style header.
pub fn page_header(number: u32) -> String {
    format!("#{{page{:0width$}}}", number, width = PAGE_DIGITS)
}
