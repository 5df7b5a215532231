//! Precedence graph over the blocks of one page.

use super::ReadingRule;
use crate::model::BoundingBox;
use std::collections::BTreeSet;

/// Directed graph where an edge `i -> j` means block `i` is read before `j`.
///
/// The edges come from heuristic predicates, so the graph may contain
/// cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingGraph {
    successors: Vec<BTreeSet<usize>>,
}

impl ReadingGraph {
    /// Build the graph for `boxes` (indexed in extraction order).
    ///
    /// With `use_default_order`, a pair that the rule leaves unordered in
    /// both directions falls back to extraction order.
    pub fn build(
        boxes: &[BoundingBox],
        rule: &dyn ReadingRule,
        tolerance: f32,
        use_default_order: bool,
    ) -> Self {
        let n = boxes.len();
        let mut before = vec![vec![false; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    before[i][j] = rule.precedes(&boxes[i], &boxes[j], tolerance);
                }
            }
        }

        let mut successors = vec![BTreeSet::new(); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let unordered = !before[i][j] && !before[j][i];
                if before[i][j] || (use_default_order && unordered && i < j) {
                    log::trace!("edge {} -> {}", i, j);
                    successors[i].insert(j);
                }
            }
        }
        Self { successors }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Whether the edge `from -> to` exists.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.successors
            .get(from)
            .is_some_and(|s| s.contains(&to))
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(BTreeSet::len).sum()
    }

    /// Extract a linear order: repeatedly take the remaining node with the
    /// most remaining successors (lowest index on ties) and detach it.
    ///
    /// Always returns a permutation of `0..len()`, cycles or not.
    pub fn into_order(mut self) -> Vec<usize> {
        let n = self.successors.len();
        let mut alive = vec![true; n];
        let mut order = Vec::with_capacity(n);

        while order.len() < n {
            let mut current: Option<usize> = None;
            for node in (0..n).filter(|&k| alive[k]) {
                let better = current.map_or(true, |c| {
                    self.successors[node].len() > self.successors[c].len()
                });
                if better {
                    current = Some(node);
                }
            }
            let Some(current) = current else { break };

            alive[current] = false;
            for (node, succ) in self.successors.iter_mut().enumerate() {
                if alive[node] {
                    succ.remove(&current);
                }
            }
            order.push(current);
        }
        order
    }
}
