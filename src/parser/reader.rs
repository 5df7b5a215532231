//! JSON reader for the extraction stage's page/block/line format.
//!
//! Required fields are checked eagerly: the upstream extractor is trusted,
//! so any structural gap is reported instead of being patched over.

use super::LoadOptions;
use crate::error::{Error, Result};
use crate::model::{Block, BlockRole, BoundingBox, Document, Line, Page, Point};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads documents from the structured JSON representation.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    options: LoadOptions,
}

impl DocumentReader {
    /// Create a reader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom options.
    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Get the loading options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Read a document from a file; the path becomes the document source.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut doc = self.read_reader(BufReader::new(file))?;
        doc.source = path.display().to_string();
        Ok(doc)
    }

    /// Read a document from bytes.
    pub fn read_slice(&self, data: &[u8]) -> Result<Document> {
        let value: Value = serde_json::from_slice(data)?;
        self.read_value(value)
    }

    /// Read a document from any reader.
    pub fn read_reader<R: Read>(&self, reader: R) -> Result<Document> {
        let value: Value = serde_json::from_reader(reader)?;
        self.read_value(value)
    }

    /// Build a document from an already-parsed JSON value.
    ///
    /// Accepts either `{"pages": [...]}` or a bare page object.
    pub fn read_value(&self, value: Value) -> Result<Document> {
        let raw_pages: Vec<RawPage> = match value {
            Value::Object(mut map) => {
                if let Some(pages) = map.remove("pages") {
                    serde_json::from_value(pages)?
                } else if map.contains_key("blocks") || map.contains_key("cropbox") {
                    vec![serde_json::from_value(Value::Object(map))?]
                } else {
                    return Err(Error::missing("pages", "document"));
                }
            }
            _ => return Err(Error::Other("Expected a JSON object at top level".into())),
        };

        let mut doc = Document::new();
        for (idx, raw) in raw_pages.into_iter().enumerate() {
            let number = idx as u32 + 1;
            if !self.options.pages.includes(number) {
                continue;
            }
            let mut page = raw.into_page(number, &format!("pages[{}]", idx))?;
            if self.options.exclude_margins {
                let tagged = page.tag_margins(&self.options.margins);
                if tagged > 0 {
                    log::debug!("Page {}: {} header/footer block(s) tagged", number, tagged);
                }
            }
            doc.add_page(page);
        }

        log::debug!(
            "Loaded {} page(s), {} block(s), {} line(s)",
            doc.page_count(),
            doc.block_count(),
            doc.line_count()
        );
        Ok(doc)
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    cropbox: Option<BoundingBox>,
    blocks: Option<Vec<RawBlock>>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    bbox: Option<BoundingBox>,
    lines: Option<Vec<RawLine>>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    origin: Option<Point>,
    bbox: Option<BoundingBox>,
    text: Option<String>,
    center: Option<Point>,
}

impl RawPage {
    fn into_page(self, number: u32, location: &str) -> Result<Page> {
        let cropbox = self
            .cropbox
            .ok_or_else(|| Error::missing("cropbox", location))?;
        check_box(&cropbox, location)?;
        let raw_blocks = self
            .blocks
            .ok_or_else(|| Error::missing("blocks", location))?;

        let mut page = Page::new(number, cropbox);
        for (idx, raw) in raw_blocks.into_iter().enumerate() {
            let block = raw.into_block(&format!("{}.blocks[{}]", location, idx))?;
            page.add_block(block);
        }
        Ok(page)
    }
}

impl RawBlock {
    fn into_block(self, location: &str) -> Result<Block> {
        let bbox = self.bbox.ok_or_else(|| Error::missing("bbox", location))?;
        check_box(&bbox, location)?;
        let raw_lines = self.lines.ok_or_else(|| Error::missing("lines", location))?;

        let lines = raw_lines
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| raw.into_line(&format!("{}.lines[{}]", location, idx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Block {
            bbox,
            lines,
            role: BlockRole::Body,
        })
    }
}

impl RawLine {
    fn into_line(self, location: &str) -> Result<Line> {
        let origin = self
            .origin
            .ok_or_else(|| Error::missing("origin", location))?;
        let bbox = self.bbox.ok_or_else(|| Error::missing("bbox", location))?;
        let text = self.text.ok_or_else(|| Error::missing("text", location))?;

        check_box(&bbox, location)?;
        if !origin.is_finite() {
            return Err(Error::InvalidGeometry(format!(
                "non-finite origin at {}",
                location
            )));
        }

        let mut line = Line::new(origin, bbox, text);
        if let Some(center) = self.center {
            if !center.is_finite() {
                return Err(Error::InvalidGeometry(format!(
                    "non-finite center at {}",
                    location
                )));
            }
            line.center = center;
        }
        Ok(line)
    }
}

fn check_box(bbox: &BoundingBox, location: &str) -> Result<()> {
    if bbox.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidGeometry(format!(
            "non-finite bounding box at {}",
            location
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PageSelection;
    use serde_json::json;

    fn sample_page() -> Value {
        json!({
            "cropbox": [0, 0, 600, 1000],
            "blocks": [
                {
                    "number": 0,
                    "bbox": [50, 20, 300, 40],
                    "lines": [
                        {"origin": [50, 38], "bbox": [50, 20, 300, 40], "text": "Running head", "center": [175, 30]}
                    ]
                },
                {
                    "bbox": [50, 200, 300, 240],
                    "lines": [
                        {"origin": [50, 218], "bbox": [50, 200, 300, 220], "text": "exam\u{00AD}", "center": [175, 210]},
                        {"origin": [50, 238], "bbox": [50, 222, 300, 240], "text": "ple"}
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_read_document() {
        let doc = DocumentReader::new()
            .read_value(json!({ "pages": [sample_page(), sample_page()] }))
            .unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].number, 2);
        assert_eq!(doc.pages[0].line_count(), 3);
    }

    #[test]
    fn test_read_bare_page() {
        let doc = DocumentReader::new().read_value(sample_page()).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_soft_hyphen_and_center_fallback() {
        let doc = DocumentReader::new().read_value(sample_page()).unwrap();
        let lines = doc.pages[0].lines();
        assert_eq!(lines[1].text, "exam-");
        assert_eq!(lines[2].center, Point::new(175.0, 231.0));
    }

    #[test]
    fn test_missing_line_field_fails() {
        let mut page = sample_page();
        page["blocks"][1]["lines"][0]
            .as_object_mut()
            .unwrap()
            .remove("origin");
        let err = DocumentReader::new().read_value(page).unwrap_err();
        match err {
            Error::MissingField { field, location } => {
                assert_eq!(field, "origin");
                assert_eq!(location, "pages[0].blocks[1].lines[0]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_block_bbox_fails() {
        let mut page = sample_page();
        page["blocks"][0].as_object_mut().unwrap().remove("bbox");
        let err = DocumentReader::new().read_value(page).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "bbox", .. }));
    }

    #[test]
    fn test_mistyped_field_is_json_error() {
        let mut page = sample_page();
        page["blocks"][0]["lines"][0]["bbox"] = json!("wide");
        let err = DocumentReader::new().read_value(page).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unknown_top_level() {
        let err = DocumentReader::new().read_value(json!({"foo": 1})).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "pages", .. }));
    }

    #[test]
    fn test_page_selection_and_margins() {
        let options = LoadOptions::new()
            .with_pages(PageSelection::Pages(vec![2]))
            .with_margin_exclusion(true);
        let doc = DocumentReader::with_options(options)
            .read_value(json!({ "pages": [sample_page(), sample_page()] }))
            .unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].number, 2);
        assert_eq!(doc.pages[0].blocks[0].role, BlockRole::Header);
        assert_eq!(doc.pages[0].body_lines().len(), 2);
    }
}
