//! Split-line reconciliation.
//!
//! One edition sometimes cuts a printed line into two fragments on the same
//! row while the other keeps it whole. Leftover fragments on one side are
//! paired into synthetic concatenations and matched against the other
//! side's leftovers with the same cost function as the primary pass.
//!
//! Only the fragments are checked for row alignment; the matched line on
//! the other side is not required to overlap both fragments vertically.

use super::matrix::{Candidate, CostMatrix};
use crate::model::Line;

/// Two fragments on the same row, `first` left of `second`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Concat {
    pub first: usize,
    pub second: usize,
    pub candidate: Candidate,
}

/// A fragment pair matched to a single line on the other side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SplitMatch {
    pub first: usize,
    pub second: usize,
    pub other: usize,
    pub cost: f32,
}

/// Enumerate same-row fragment pairs among `unmatched` lines.
pub(crate) fn find_concats(lines: &[Line], unmatched: &[usize]) -> Vec<Concat> {
    let mut sorted = unmatched.to_vec();
    sorted.sort_by(|&i, &j| lines[i].bbox.left.total_cmp(&lines[j].bbox.left));

    let mut concats = Vec::new();
    for (pos, &i) in sorted.iter().enumerate() {
        for &j in &sorted[pos + 1..] {
            let (left, right) = (&lines[i], &lines[j]);
            if !left.shares_row_with(right) {
                continue;
            }
            let text = format!("{}{}", left.text_without_spaces(), right.text_without_spaces());
            concats.push(Concat {
                first: i,
                second: j,
                candidate: Candidate::new(left.center.midpoint(&right.center), text),
            });
        }
    }
    concats
}

/// Match fragment pairs from `this` against single lines of `other`.
///
/// Matched fragments are merged in place: the first absorbs the second,
/// the second is blanked. All involved indices are removed from the
/// unmatched lists.
pub(crate) fn reconcile(
    this: &mut [Line],
    this_unmatched: &mut Vec<usize>,
    other: &[Line],
    other_unmatched: &mut Vec<usize>,
    max_dist: f32,
) -> Vec<SplitMatch> {
    let concats = find_concats(this, this_unmatched);
    if concats.is_empty() || other_unmatched.is_empty() {
        return Vec::new();
    }
    log::trace!("{} split-line candidate(s)", concats.len());

    let rows: Vec<Candidate> = concats.iter().map(|c| c.candidate.clone()).collect();
    let cols: Vec<Candidate> = other_unmatched
        .iter()
        .map(|&j| Candidate::from_line(&other[j]))
        .collect();
    let mut matrix = CostMatrix::new(&rows, &cols, max_dist);

    let mut matches = Vec::new();
    while let Some((row, col, cost)) = matrix.min_live() {
        let concat = &concats[row];
        matrix.retire_col(col);
        // a fragment can take part in a single merge only
        for (idx, c) in concats.iter().enumerate() {
            let shares = [c.first, c.second]
                .iter()
                .any(|k| *k == concat.first || *k == concat.second);
            if shares {
                matrix.retire_row(idx);
            }
        }

        let absorbed = this[concat.second].clone();
        this[concat.first].absorb(&absorbed);
        this[concat.second].blank();

        matches.push(SplitMatch {
            first: concat.first,
            second: concat.second,
            other: other_unmatched[col],
            cost,
        });
    }

    for m in &matches {
        this_unmatched.retain(|&i| i != m.first && i != m.second);
        other_unmatched.retain(|&j| j != m.other);
    }
    matches
}
