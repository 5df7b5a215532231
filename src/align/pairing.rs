//! Correspondence types produced by the aligner.
//!
//! A page alignment serializes as a JSON object whose keys are A-side line
//! references (`"3"` or `"3+4"` for a merged fragment pair) and whose values
//! are B-side references or `null`. The reserved key `"null"` holds the B
//! indices left without any partner.

use crate::error::{Error, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Key under which unmatched B indices are stored.
pub const UNMATCHED_KEY: &str = "null";

/// Reference to a line, or to two adjacent fragments fused into one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineRef {
    Single(usize),
    Merged(usize, usize),
}

impl LineRef {
    /// Lowest referenced index.
    pub fn first(&self) -> usize {
        match *self {
            LineRef::Single(i) => i,
            LineRef::Merged(i, j) => i.min(j),
        }
    }

    /// All concrete line indices covered by this reference.
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            LineRef::Single(i) => vec![i],
            LineRef::Merged(i, j) => vec![i, j],
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self, LineRef::Merged(..))
    }

    fn sort_key(&self) -> (usize, usize) {
        match *self {
            LineRef::Single(i) => (i, 0),
            LineRef::Merged(i, j) => (i.min(j), 1 + i.max(j)),
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Single(i) => write!(f, "{}", i),
            LineRef::Merged(i, j) => write!(f, "{}+{}", i, j),
        }
    }
}

impl FromStr for LineRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidLineRef(s.to_string()))
        };
        match s.split_once('+') {
            Some((first, second)) => Ok(LineRef::Merged(parse(first)?, parse(second)?)),
            None => Ok(LineRef::Single(parse(s)?)),
        }
    }
}

/// Where an A-side reference landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Matched(LineRef),
    Unmatched,
}

impl Target {
    pub fn matched(&self) -> Option<LineRef> {
        match self {
            Target::Matched(r) => Some(*r),
            Target::Unmatched => None,
        }
    }
}

/// One row of a page alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pairing {
    /// Line reference in edition A
    pub source: LineRef,

    /// Counterpart in edition B
    pub target: Target,

    /// Matching cost (distance plus edit distance); `None` when unmatched
    /// or when read back from a serialized alignment
    pub cost: Option<f32>,
}

impl Pairing {
    pub fn matched(source: LineRef, target: LineRef, cost: f32) -> Self {
        Self {
            source,
            target: Target::Matched(target),
            cost: Some(cost),
        }
    }

    pub fn unmatched(source: LineRef) -> Self {
        Self {
            source,
            target: Target::Unmatched,
            cost: None,
        }
    }
}

/// Line correspondence for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageAlignment {
    /// Every A-side reference, ordered by first A index
    pub pairings: Vec<Pairing>,

    /// B indices with no A-side partner, ascending
    pub unmatched_b: Vec<usize>,
}

impl PageAlignment {
    /// Matched pairings only.
    pub fn matched(&self) -> impl Iterator<Item = (LineRef, LineRef)> + '_ {
        self.pairings
            .iter()
            .filter_map(|p| p.target.matched().map(|t| (p.source, t)))
    }

    pub fn matched_count(&self) -> usize {
        self.matched().count()
    }

    /// Number of pairings that involve a merged fragment pair on either side.
    pub fn merged_count(&self) -> usize {
        self.matched()
            .filter(|(s, t)| s.is_merged() || t.is_merged())
            .count()
    }

    /// A indices that were not matched.
    pub fn unmatched_a(&self) -> Vec<usize> {
        self.pairings
            .iter()
            .filter(|p| p.target == Target::Unmatched)
            .flat_map(|p| p.source.indices())
            .collect()
    }

    /// Counterpart of an A-side reference, if present.
    pub fn target_of(&self, source: LineRef) -> Option<Target> {
        self.pairings
            .iter()
            .find(|p| p.source == source)
            .map(|p| p.target)
    }

    pub(crate) fn sort(&mut self) {
        self.pairings.sort_by_key(|p| p.source.sort_key());
        self.unmatched_b.sort_unstable();
    }
}

impl Serialize for PageAlignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairings.len() + 1))?;
        for pairing in &self.pairings {
            let value = pairing.target.matched().map(|r| r.to_string());
            map.serialize_entry(&pairing.source.to_string(), &value)?;
        }
        map.serialize_entry(UNMATCHED_KEY, &self.unmatched_b)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for PageAlignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PageAlignmentVisitor)
    }
}

struct PageAlignmentVisitor;

impl<'de> Visitor<'de> for PageAlignmentVisitor {
    type Value = PageAlignment;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of line references")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> std::result::Result<Self::Value, M::Error> {
        let mut alignment = PageAlignment::default();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            if key == UNMATCHED_KEY {
                alignment.unmatched_b = serde_json::from_value(value).map_err(de::Error::custom)?;
                continue;
            }
            let source = key.parse::<LineRef>().map_err(de::Error::custom)?;
            let target = match value {
                Value::Null => Target::Unmatched,
                Value::String(s) => Target::Matched(s.parse().map_err(de::Error::custom)?),
                Value::Number(n) => {
                    let idx = n
                        .as_u64()
                        .ok_or_else(|| de::Error::custom(format!("invalid line index {}", n)))?;
                    Target::Matched(LineRef::Single(idx as usize))
                }
                other => {
                    return Err(de::Error::custom(format!(
                        "unexpected pairing value {}",
                        other
                    )))
                }
            };
            alignment.pairings.push(Pairing {
                source,
                target,
                cost: None,
            });
        }
        alignment.sort();
        Ok(alignment)
    }
}

/// Alignment of two whole documents, page by page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAlignment {
    /// Source identifier of edition A
    pub a_file: String,

    /// Source identifier of edition B
    pub b_file: String,

    /// Human-readable label of edition A
    #[serde(default)]
    pub a_label: String,

    /// Human-readable label of edition B
    #[serde(default)]
    pub b_label: String,

    /// One alignment per page pair, in page order
    pub pages: Vec<PageAlignment>,
}

impl DocumentAlignment {
    /// Total matched pairings across pages.
    pub fn matched_count(&self) -> usize {
        self.pages.iter().map(PageAlignment::matched_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageAlignment {
        let mut alignment = PageAlignment {
            pairings: vec![
                Pairing::unmatched(LineRef::Single(3)),
                Pairing::matched(LineRef::Merged(1, 2), LineRef::Single(1), 0.5),
                Pairing::matched(LineRef::Single(0), LineRef::Single(0), 1.0),
                Pairing::matched(LineRef::Single(4), LineRef::Merged(2, 3), 2.0),
            ],
            unmatched_b: vec![5],
        };
        alignment.sort();
        alignment
    }

    #[test]
    fn test_line_ref_display_and_parse() {
        assert_eq!(LineRef::Single(7).to_string(), "7");
        assert_eq!(LineRef::Merged(3, 4).to_string(), "3+4");
        assert_eq!("3+4".parse::<LineRef>().unwrap(), LineRef::Merged(3, 4));
        assert_eq!("12".parse::<LineRef>().unwrap(), LineRef::Single(12));
        assert!(matches!(
            "a+b".parse::<LineRef>(),
            Err(Error::InvalidLineRef(_))
        ));
    }

    #[test]
    fn test_serialize_key_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"0":"0","1+2":"1","3":null,"4":"2+3","null":[5]}"#
        );
    }

    #[test]
    fn test_deserialize_accepts_numbers() {
        let parsed: PageAlignment =
            serde_json::from_str(r#"{"1": 4, "0": "2+3", "2": null, "null": [0, 1]}"#).unwrap();
        assert_eq!(
            parsed.target_of(LineRef::Single(0)),
            Some(Target::Matched(LineRef::Merged(2, 3)))
        );
        assert_eq!(
            parsed.target_of(LineRef::Single(1)),
            Some(Target::Matched(LineRef::Single(4)))
        );
        assert_eq!(parsed.unmatched_a(), vec![2]);
        assert_eq!(parsed.unmatched_b, vec![0, 1]);
    }

    #[test]
    fn test_counts() {
        let alignment = sample();
        assert_eq!(alignment.matched_count(), 3);
        assert_eq!(alignment.merged_count(), 2);
        assert_eq!(alignment.unmatched_a(), vec![3]);
    }
}
