//! The per-page set of triples.

use crate::graph::terms::{Triple, ntriples_line};
use std::collections::BTreeMap;

/// Triples produced from one page of catalog records.
///
/// Keyed by the rendered N-Triples line: duplicates collapse and the
/// serialized form is the same for the same content regardless of
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    lines: BTreeMap<String, Triple>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let line = ntriples_line(&triple);
        if self.lines.contains_key(&line) {
            return false;
        }
        self.lines.insert(line, triple);
        true
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.lines.contains_key(&ntriples_line(triple))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.lines.values()
    }

    /// Canonical N-Triples document, one statement per line.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for line in self.lines.keys() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl Extend<Triple> for Batch {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Batch {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

impl IntoIterator for Batch {
    type Item = Triple;
    type IntoIter = std::collections::btree_map::IntoValues<String, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_values()
    }
}
