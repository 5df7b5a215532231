//! Human-readable alignment report.

use crate::align::{DocumentAlignment, LineRef, PageAlignment, Target};
use crate::error::{Error, Result};
use crate::model::{normalize_soft_hyphens, Document, Line};
use std::fmt::Write;

/// Summary counts over a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub identical: usize,
    pub differing: usize,
    pub unmatched_a: usize,
    pub unmatched_b: usize,
}

fn reference_text(lines: &[Line], line_ref: LineRef, page: usize) -> Result<String> {
    let mut text = String::new();
    for idx in line_ref.indices() {
        let line = lines.get(idx).ok_or_else(|| {
            Error::Render(format!("page {}: line {} out of range", page, line_ref))
        })?;
        text.push_str(&line.text);
    }
    Ok(text)
}

fn same_text(a: &str, b: &str) -> bool {
    normalize_soft_hyphens(a.trim_end()) == normalize_soft_hyphens(b.trim_end())
}

fn page_report(
    out: &mut String,
    page: &PageAlignment,
    index: usize,
    a_lines: &[Line],
    b_lines: &[Line],
    stats: &mut ReportStats,
) -> Result<()> {
    let _ = writeln!(out, "page {}", index);
    for pairing in &page.pairings {
        let a_text = reference_text(a_lines, pairing.source, index)?;
        let _ = writeln!(out, "[{}] {}", pairing.source, a_text.trim_end());
        match pairing.target {
            Target::Matched(target) => {
                let b_text = reference_text(b_lines, target, index)?;
                if same_text(&a_text, &b_text) {
                    stats.identical += 1;
                    let _ = writeln!(out, "  = {}", target);
                } else {
                    stats.differing += 1;
                    let _ = writeln!(out, "  !!! {} {}", target, b_text.trim_end());
                }
            }
            Target::Unmatched => {
                stats.unmatched_a += 1;
                let _ = writeln!(out, "  (no match)");
            }
        }
    }
    if !page.unmatched_b.is_empty() {
        stats.unmatched_b += page.unmatched_b.len();
        let list: Vec<String> = page.unmatched_b.iter().map(|j| j.to_string()).collect();
        let _ = writeln!(out, "unmatched B: {}", list.join(", "));
    }
    Ok(())
}

/// Render an alignment as text, resolving references against the two
/// editions it was computed from.
///
/// Documents must be loaded with the same options as for alignment, since
/// line indices refer to each page's body lines.
pub fn alignment_report_with_stats(
    alignment: &DocumentAlignment,
    a_doc: &Document,
    b_doc: &Document,
) -> Result<(String, ReportStats)> {
    let mut out = String::new();
    let mut stats = ReportStats::default();
    let _ = writeln!(out, "{}: {}", alignment.a_label, alignment.a_file);
    let _ = writeln!(out, "{}: {}", alignment.b_label, alignment.b_file);

    for (index, page) in alignment.pages.iter().enumerate() {
        let a_page = a_doc
            .pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, a_doc.page_count()))?;
        let b_page = b_doc
            .pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, b_doc.page_count()))?;
        page_report(
            &mut out,
            page,
            index,
            &a_page.body_lines(),
            &b_page.body_lines(),
            &mut stats,
        )?;
    }
    Ok((out, stats))
}

/// Render an alignment as text.
pub fn alignment_report(
    alignment: &DocumentAlignment,
    a_doc: &Document,
    b_doc: &Document,
) -> Result<String> {
    alignment_report_with_stats(alignment, a_doc, b_doc).map(|(text, _)| text)
}
