//! Spatial reasoning rules deciding whether one block is read before another.

use super::IntervalRelation;
use crate::error::{Error, Result};
use crate::model::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A "block `a` is read before block `b`" predicate.
pub trait ReadingRule: Send + Sync {
    fn precedes(&self, a: &BoundingBox, b: &BoundingBox, tolerance: f32) -> bool;
}

fn relations(a: &BoundingBox, b: &BoundingBox, tolerance: f32) -> (IntervalRelation, IntervalRelation) {
    (
        IntervalRelation::classify(a.x_interval(), b.x_interval(), tolerance),
        IntervalRelation::classify(a.y_interval(), b.y_interval(), tolerance),
    )
}

/// Decide on the primary axis; on primary overlap, or when the secondary
/// axis leads and the primary does not trail, fall back to the secondary.
fn primary_then_secondary(primary: IntervalRelation, secondary: IntervalRelation) -> bool {
    matches!(primary, IntervalRelation::Precedes | IntervalRelation::Meets)
        || (primary == IntervalRelation::Overlaps && secondary.is_leading())
        || (secondary.is_leading() && primary.is_not_trailing())
}

/// Columns first: a block left of another is read first, whole columns
/// before the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnWise;

impl ReadingRule for ColumnWise {
    fn precedes(&self, a: &BoundingBox, b: &BoundingBox, tolerance: f32) -> bool {
        let (x, y) = relations(a, b, tolerance);
        primary_then_secondary(x, y)
    }
}

/// Rows first: a block above another is read first, whole rows before the
/// next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowWise;

impl ReadingRule for RowWise {
    fn precedes(&self, a: &BoundingBox, b: &BoundingBox, tolerance: f32) -> bool {
        let (x, y) = relations(a, b, tolerance);
        primary_then_secondary(y, x)
    }
}

/// Either axis leading is enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct General;

impl ReadingRule for General {
    fn precedes(&self, a: &BoundingBox, b: &BoundingBox, tolerance: f32) -> bool {
        let (x, y) = relations(a, b, tolerance);
        x.is_leading() || y.is_leading()
    }
}

/// Selectable spatial reasoning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialRule {
    #[default]
    ColumnWise,
    RowWise,
    General,
}

impl SpatialRule {
    /// The rule implementation for this strategy.
    pub fn rule(&self) -> &'static dyn ReadingRule {
        match self {
            SpatialRule::ColumnWise => &ColumnWise,
            SpatialRule::RowWise => &RowWise,
            SpatialRule::General => &General,
        }
    }

    pub fn precedes(&self, a: &BoundingBox, b: &BoundingBox, tolerance: f32) -> bool {
        self.rule().precedes(a, b, tolerance)
    }
}

impl fmt::Display for SpatialRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpatialRule::ColumnWise => "column",
            SpatialRule::RowWise => "row",
            SpatialRule::General => "general",
        };
        f.write_str(name)
    }
}

impl FromStr for SpatialRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "column" | "columnwise" | "column-wise" => Ok(SpatialRule::ColumnWise),
            "row" | "rowwise" | "row-wise" => Ok(SpatialRule::RowWise),
            "general" | "basic" => Ok(SpatialRule::General),
            other => Err(Error::Other(format!("Unknown spatial rule: {}", other))),
        }
    }
}
