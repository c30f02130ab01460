//! Spar marks: arc distances measured along a spar to where parts attach.
//!
//! Each mark is keyed `<digit><word>:<name>`, e.g. `1Spar:Cross-Piece`. The
//! leading digit fixes the print order of the categories, and marks are kept
//! in a sorted map so iteration order is the lexicographic key order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Group a spar mark belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarkCategory {
    /// Marks for parts clamped to the spar itself
    Spar,
    /// Where the metal strips cross the spar
    Metal,
    /// Check distances near the outer end of the spar
    Guide,
}

impl MarkCategory {
    /// All categories in print order
    pub const ALL: [MarkCategory; 3] = [MarkCategory::Spar, MarkCategory::Metal, MarkCategory::Guide];

    /// Sort digit that prefixes the key
    pub fn order(&self) -> u8 {
        match self {
            MarkCategory::Spar => 1,
            MarkCategory::Metal => 2,
            MarkCategory::Guide => 3,
        }
    }

    /// Category name as printed in reports and keys
    pub fn word(&self) -> &'static str {
        match self {
            MarkCategory::Spar => "Spar",
            MarkCategory::Metal => "Metal",
            MarkCategory::Guide => "Guide",
        }
    }

    /// Key prefix, e.g. `2Metal`
    pub fn prefix(&self) -> String {
        format!("{}{}", self.order(), self.word())
    }

    /// Full mark key, e.g. `2Metal:BC-long`
    pub fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix(), name)
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        MarkCategory::ALL.into_iter().find(|c| c.prefix() == prefix)
    }
}

impl fmt::Display for MarkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// One mark split back into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct SparMark<'a> {
    pub category: MarkCategory,
    pub name: &'a str,
    pub distance: f64,
}

/// Spar marks by key, in sorted key order.
///
/// ## JSON Example
///
/// ```json
/// { "1Spar:Cross-Piece": 1874.84, "2Metal:BC-inter": 2202.87, "2Metal:BC-long": 4018.97 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparMarks(BTreeMap<String, f64>);

impl SparMarks {
    /// Record a mark, replacing any earlier mark with the same key
    pub fn insert(&mut self, category: MarkCategory, name: &str, distance: f64) {
        self.0.insert(category.key(name), distance);
    }

    /// Distance for a full key such as `1Spar:Cross-Piece`
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Number of marks
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no mark has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(key, distance)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Marks split into category and name, in key order.
    ///
    /// Keys are only ever built by [`SparMarks::insert`], so every key splits.
    pub fn entries(&self) -> impl Iterator<Item = SparMark<'_>> {
        self.0.iter().filter_map(|(key, distance)| {
            let (prefix, name) = key.split_once(':')?;
            let category = MarkCategory::from_prefix(prefix)?;
            Some(SparMark {
                category,
                name,
                distance: *distance,
            })
        })
    }
}
