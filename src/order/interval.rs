//! Allen interval relations with a tolerance band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The thirteen Allen relations between two 1-D intervals, plus `Unknown`
/// for degenerate inputs that fit none of them.
///
/// Each relation reads "`a` <relation> `b`"; the `*I` variants are the
/// inverses (e.g. `a PrecedesI b` means `b` precedes `a`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalRelation {
    Precedes,
    PrecedesI,
    Meets,
    MeetsI,
    Overlaps,
    OverlapsI,
    Starts,
    StartsI,
    During,
    DuringI,
    Finishes,
    FinishesI,
    Equals,
    Unknown,
}

impl IntervalRelation {
    /// Classify interval `a` against interval `b`.
    ///
    /// Intervals are `(start, end)` with `start <= end`. Boundaries within
    /// `tolerance` of each other are treated as coinciding.
    pub fn classify(a: (f32, f32), b: (f32, f32), tolerance: f32) -> Self {
        let (a_start, a_end) = a;
        let (b_start, b_end) = b;
        let t = tolerance;
        let near = |x: f32, y: f32| y - t <= x && x <= y + t;

        if a_end < b_start - t {
            IntervalRelation::Precedes
        } else if a_start > b_end + t {
            IntervalRelation::PrecedesI
        } else if near(a_end, b_start) {
            IntervalRelation::Meets
        } else if near(a_start, b_end) {
            IntervalRelation::MeetsI
        } else if a_start < b_start - t && b_start + t < a_end && a_end < b_end - t {
            IntervalRelation::Overlaps
        } else if b_start < a_start - t && a_start + t < b_end && b_end < a_end - t {
            IntervalRelation::OverlapsI
        } else if near(a_start, b_start) && a_end < b_end - t {
            IntervalRelation::Starts
        } else if near(b_start, a_start) && b_end < a_end - t {
            IntervalRelation::StartsI
        } else if a_start > b_start + t && a_end < b_end - t {
            IntervalRelation::During
        } else if b_start > a_start + t && b_end < a_end - t {
            IntervalRelation::DuringI
        } else if a_start > b_start + t && near(a_end, b_end) {
            IntervalRelation::Finishes
        } else if b_start > a_start + t && near(b_end, a_end) {
            IntervalRelation::FinishesI
        } else if near(a_start, b_start) && near(a_end, b_end) {
            IntervalRelation::Equals
        } else {
            IntervalRelation::Unknown
        }
    }

    /// The relation seen from `b`'s side.
    pub fn inverse(&self) -> Self {
        use IntervalRelation::*;
        match self {
            Precedes => PrecedesI,
            PrecedesI => Precedes,
            Meets => MeetsI,
            MeetsI => Meets,
            Overlaps => OverlapsI,
            OverlapsI => Overlaps,
            Starts => StartsI,
            StartsI => Starts,
            During => DuringI,
            DuringI => During,
            Finishes => FinishesI,
            FinishesI => Finishes,
            Equals => Equals,
            Unknown => Unknown,
        }
    }

    /// `Precedes`, `Meets` or `Overlaps`: `a` begins clearly before `b`.
    pub fn is_leading(&self) -> bool {
        matches!(
            self,
            IntervalRelation::Precedes | IntervalRelation::Meets | IntervalRelation::Overlaps
        )
    }

    /// Any relation where `a` does not lie entirely after `b`.
    pub fn is_not_trailing(&self) -> bool {
        !matches!(
            self,
            IntervalRelation::PrecedesI | IntervalRelation::MeetsI | IntervalRelation::Unknown
        )
    }
}

impl fmt::Display for IntervalRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IntervalRelation::*;

    const T: f32 = 5.0;

    fn rel(a: (f32, f32), b: (f32, f32)) -> IntervalRelation {
        IntervalRelation::classify(a, b, T)
    }

    #[test]
    fn test_all_thirteen_relations() {
        assert_eq!(rel((0.0, 10.0), (20.0, 30.0)), Precedes);
        assert_eq!(rel((20.0, 30.0), (0.0, 10.0)), PrecedesI);
        assert_eq!(rel((0.0, 18.0), (20.0, 30.0)), Meets);
        assert_eq!(rel((20.0, 30.0), (0.0, 18.0)), MeetsI);
        assert_eq!(rel((0.0, 50.0), (20.0, 80.0)), Overlaps);
        assert_eq!(rel((20.0, 80.0), (0.0, 50.0)), OverlapsI);
        assert_eq!(rel((0.0, 30.0), (2.0, 80.0)), Starts);
        assert_eq!(rel((2.0, 80.0), (0.0, 30.0)), StartsI);
        assert_eq!(rel((20.0, 40.0), (0.0, 80.0)), During);
        assert_eq!(rel((0.0, 80.0), (20.0, 40.0)), DuringI);
        assert_eq!(rel((30.0, 79.0), (0.0, 80.0)), Finishes);
        assert_eq!(rel((0.0, 80.0), (30.0, 79.0)), FinishesI);
        assert_eq!(rel((0.0, 80.0), (3.0, 77.0)), Equals);
    }

    #[test]
    fn test_relations_are_mutually_inverse() {
        let cases = [
            ((0.0, 10.0), (20.0, 30.0)),
            ((0.0, 50.0), (20.0, 80.0)),
            ((0.0, 30.0), (2.0, 80.0)),
            ((20.0, 40.0), (0.0, 80.0)),
            ((30.0, 79.0), (0.0, 80.0)),
        ];
        for (a, b) in cases {
            assert_eq!(rel(a, b).inverse(), rel(b, a), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_tolerance_widens_meets() {
        assert_eq!(IntervalRelation::classify((0.0, 14.0), (20.0, 30.0), 0.0), Precedes);
        assert_eq!(IntervalRelation::classify((0.0, 14.0), (20.0, 30.0), 6.0), Meets);
    }

    #[test]
    fn test_predicates() {
        assert!(Overlaps.is_leading());
        assert!(!OverlapsI.is_leading());
        assert!(Equals.is_not_trailing());
        assert!(!MeetsI.is_not_trailing());
    }
}
