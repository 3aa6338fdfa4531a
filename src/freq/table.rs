//! Word counts and the merger that combines them.

use fnv::FnvHashMap;

/// A mapping from token to the number of times it was seen.
///
/// Counts only ever grow. Every addition saturates at [`u64::MAX`]
/// instead of wrapping, which keeps [`merge`] associative and
/// commutative even at the limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: FnvHashMap<String, u64>,
}

impl CountTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `token`.
    #[inline]
    pub fn increment(&mut self, token: impl Into<String>) {
        self.add(token, 1);
    }

    /// Adds `delta` occurrences of `token`.
    pub fn add(&mut self, token: impl Into<String>, delta: u64) {
        let count = self.counts.entry(token.into()).or_insert(0);
        *count = count.saturating_add(delta);
    }

    /// Adds every count in `other` into this table.
    pub fn merge_from(&mut self, other: &CountTable) {
        for (token, &count) in other.iter() {
            match self.counts.get_mut(token) {
                Some(existing) => *existing = existing.saturating_add(count),
                None => {
                    self.counts.insert(token.to_owned(), count);
                }
            }
        }
    }

    /// The count for `token`, zero if it was never seen.
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(token, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), count))
    }
}

impl IntoIterator for CountTable {
    type Item = (String, u64);
    type IntoIter = std::collections::hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for CountTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = CountTable::new();
        table.extend(iter);
        table
    }
}

impl<S: Into<String>> Extend<(S, u64)> for CountTable {
    fn extend<I: IntoIterator<Item = (S, u64)>>(&mut self, iter: I) {
        for (token, count) in iter {
            self.add(token, count);
        }
    }
}

/// Sums any number of partial tables into one.
///
/// The result does not depend on the order or grouping of `tables`,
/// so partial results may be merged in as many passes as convenient.
pub fn merge<I>(tables: I) -> CountTable
where
    I: IntoIterator<Item = CountTable>,
{
    let mut tables = tables.into_iter();
    let mut merged = tables.next().unwrap_or_default();
    for table in tables {
        if table.len() > merged.len() {
            let smaller = std::mem::replace(&mut merged, table);
            merged.merge_from(&smaller);
        } else {
            merged.merge_from(&table);
        }
    }
    merged
}
