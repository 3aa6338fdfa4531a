//! Top-K selection with a deterministic tie-break.

use std::cmp::Ordering;
use std::fmt;

use super::table::CountTable;

/// How many entries every stage keeps unless told otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// A token and its count.
///
/// Entries are ordered by rank: a higher count sorts first, and equal
/// counts fall back to the token in ascending byte order. Sorting a
/// slice of entries ascending therefore puts the most frequent first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RankedEntry {
    pub token: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

impl Ord for RankedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.token.cmp(&other.token))
    }
}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.token, self.count)
    }
}

impl From<(String, u64)> for RankedEntry {
    fn from((token, count): (String, u64)) -> Self {
        Self { token, count }
    }
}

/// Returns the `k` highest-ranked entries of `table`, best first.
///
/// The result has `min(k, table.len())` entries. The table is consumed;
/// it is not needed once ranked.
pub fn top_k(table: CountTable, k: usize) -> Vec<RankedEntry> {
    if k == 0 {
        return Vec::new();
    }
    let mut entries: Vec<RankedEntry> = table.into_iter().map(RankedEntry::from).collect();
    if k < entries.len() {
        // Everything before index k now ranks at or above entries[k].
        entries.select_nth_unstable(k - 1);
        entries.truncate(k);
    }
    // The order is total, so an unstable sort is still deterministic.
    entries.sort_unstable();
    entries
}
