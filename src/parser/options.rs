//! Loading options and configuration.

use crate::error::{Error, Result};
use crate::model::MarginConfig;
use std::ops::RangeInclusive;

/// Options for loading OCR page data.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Header/footer margin fractions
    pub margins: MarginConfig,

    /// Tag single-line blocks in active margin bands as header/footer
    pub exclude_margins: bool,

    /// Page selection (which pages to load)
    pub pages: PageSelection,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the margin fractions.
    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margins = MarginConfig { top, bottom };
        self
    }

    /// Enable or disable header/footer exclusion.
    pub fn with_margin_exclusion(mut self, exclude: bool) -> Self {
        self.exclude_margins = exclude;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            margins: MarginConfig::default(),
            exclude_margins: false,
            pages: PageSelection::All,
        }
    }
}

/// Page selection for loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Load all pages
    #[default]
    All,
    /// Load a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Load specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let invalid = || Error::InvalidPageRange(s.to_string());

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid())?;
                let end: u32 = end.trim().parse().map_err(|_| invalid())?;
                if start == 0 || end < start {
                    return Err(invalid());
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => (
                    start.trim().parse::<u32>().map_err(|_| invalid())?,
                    end.trim().parse::<u32>().map_err(|_| invalid())?,
                ),
                None => {
                    let p = part.parse::<u32>().map_err(|_| invalid())?;
                    (p, p)
                }
            };
            if start == 0 || end < start {
                return Err(invalid());
            }
            for p in start..=end {
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort_unstable();
        Ok(PageSelection::Pages(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new()
            .with_margins(0.05, 0.08)
            .with_margin_exclusion(true)
            .with_pages(PageSelection::Range(2..=4));

        assert_eq!(options.margins.top, 0.05);
        assert_eq!(options.margins.bottom, 0.08);
        assert!(options.exclude_margins);
        assert!(options.pages.includes(3));
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert!(!options.exclude_margins);
        assert_eq!(options.margins, MarginConfig::default());
        assert_eq!(options.pages, PageSelection::All);
    }

    #[test]
    fn test_page_selection_includes() {
        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3]);
        assert!(pages.includes(1));
        assert!(!pages.includes(2));
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("1-10").unwrap(),
            PageSelection::Range(1..=10)
        );
        assert_eq!(
            PageSelection::parse("1,3,5-7,10").unwrap(),
            PageSelection::Pages(vec![1, 3, 5, 6, 7, 10])
        );
    }

    #[test]
    fn test_page_selection_parse_invalid() {
        assert!(matches!(
            PageSelection::parse("x-3"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(PageSelection::parse("5-2").is_err());
        assert!(PageSelection::parse("0").is_err());
    }
}
