//! Cost matrix and greedy minimal-cost matching.
//!
//! The matrix keeps its full size for its whole life; matched rows and
//! columns are retired through live masks instead of being removed, so
//! indices stay stable and a scan is always row-major over the original
//! layout.

use crate::model::{Line, Point};
use strsim::levenshtein;

/// A matchable item: a position plus its space-free text.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub center: Point,
    pub text: String,
}

impl Candidate {
    pub fn new(center: Point, text: impl Into<String>) -> Self {
        Self {
            center,
            text: text.into(),
        }
    }

    pub fn from_line(line: &Line) -> Self {
        Self::new(line.center, line.text_without_spaces())
    }
}

/// Cost of pairing two candidates.
///
/// Pairs whose centers are `max_dist` or further apart are infinite;
/// otherwise the cost is the center distance plus the edit distance of the
/// space-free texts.
pub fn pair_cost(a: &Candidate, b: &Candidate, max_dist: f32) -> f32 {
    let dist = a.center.distance(&b.center);
    if dist >= max_dist {
        f32::INFINITY
    } else {
        dist + levenshtein(&a.text, &b.text) as f32
    }
}

/// Dense cost matrix with retirable rows and columns.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f32>,
    live_rows: Vec<bool>,
    live_cols: Vec<bool>,
}

impl CostMatrix {
    /// Build the matrix for every (row, column) candidate pair.
    pub fn new(rows: &[Candidate], cols: &[Candidate], max_dist: f32) -> Self {
        let mut cells = Vec::with_capacity(rows.len() * cols.len());
        for a in rows {
            for b in cols {
                cells.push(pair_cost(a, b, max_dist));
            }
        }
        Self {
            rows: rows.len(),
            cols: cols.len(),
            cells,
            live_rows: vec![true; rows.len()],
            live_cols: vec![true; cols.len()],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cost at `(row, col)`, regardless of liveness.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.cols + col]
    }

    /// Cheapest finite live cell. Ties go to the first cell in row-major order.
    pub fn min_live(&self) -> Option<(usize, usize, f32)> {
        let mut best: Option<(usize, usize, f32)> = None;
        for row in (0..self.rows).filter(|&r| self.live_rows[r]) {
            let base = row * self.cols;
            for col in (0..self.cols).filter(|&c| self.live_cols[c]) {
                let cost = self.cells[base + col];
                if !cost.is_finite() {
                    continue;
                }
                if best.map_or(true, |(_, _, b)| cost < b) {
                    best = Some((row, col, cost));
                }
            }
        }
        best
    }

    pub fn retire_row(&mut self, row: usize) {
        self.live_rows[row] = false;
    }

    pub fn retire_col(&mut self, col: usize) {
        self.live_cols[col] = false;
    }

    /// Run greedy matching to exhaustion, returning `(row, col, cost)` in
    /// selection order.
    pub fn greedy_pairs(mut self) -> Vec<(usize, usize, f32)> {
        let mut pairs = Vec::new();
        while let Some((row, col, cost)) = self.min_live() {
            self.retire_row(row);
            self.retire_col(col);
            pairs.push((row, col, cost));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(x: f32, y: f32, text: &str) -> Candidate {
        Candidate::new(Point::new(x, y), text)
    }

    #[test]
    fn test_pair_cost_blends_distance_and_text() {
        let a = cand(10.0, 10.0, "Helloworld");
        let b = cand(10.0, 11.0, "Helloworld");
        assert_eq!(pair_cost(&a, &b, 30.0), 1.0);

        let c = cand(10.0, 11.0, "Hellowor1d");
        assert_eq!(pair_cost(&a, &c, 30.0), 2.0);
    }

    #[test]
    fn test_threshold_boundary() {
        let a = cand(0.0, 0.0, "x");
        assert!(pair_cost(&a, &cand(30.0, 0.0, "x"), 30.0).is_infinite());
        assert_eq!(pair_cost(&a, &cand(29.0, 0.0, "x"), 30.0), 29.0);
    }

    #[test]
    fn test_greedy_takes_global_minimum_first() {
        let rows = vec![cand(0.0, 0.0, "abc"), cand(0.0, 20.0, "def")];
        let cols = vec![cand(0.0, 19.0, "def"), cand(0.0, 1.0, "abc")];
        let pairs = CostMatrix::new(&rows, &cols, 30.0).greedy_pairs();
        assert_eq!(pairs, vec![(0, 1, 1.0), (1, 0, 1.0)]);
    }

    #[test]
    fn test_row_major_tie_break() {
        let rows = vec![cand(0.0, 0.0, "a"), cand(0.0, 0.0, "a")];
        let cols = vec![cand(0.0, 0.0, "a")];
        let pairs = CostMatrix::new(&rows, &cols, 30.0).greedy_pairs();
        assert_eq!(pairs, vec![(0, 0, 0.0)]);
    }

    #[test]
    fn test_stops_at_infinite() {
        let rows = vec![cand(0.0, 0.0, "a")];
        let cols = vec![cand(100.0, 0.0, "a")];
        assert!(CostMatrix::new(&rows, &cols, 30.0).greedy_pairs().is_empty());
    }

    #[test]
    fn test_empty_sides() {
        let rows = vec![cand(0.0, 0.0, "a")];
        let matrix = CostMatrix::new(&rows, &[], 30.0);
        assert_eq!(matrix.cols(), 0);
        assert!(matrix.greedy_pairs().is_empty());
        assert!(CostMatrix::new(&[], &rows, 30.0).greedy_pairs().is_empty());
    }
}
