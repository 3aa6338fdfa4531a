//! Per-shard word counting.

use super::table::CountTable;
use super::tokenizer::tokenize;

/// The running count for one shard.
///
/// Create one per map invocation, [`feed`](Self::feed) it every record
/// of the shard, then [`finish`](Self::finish) it once. It is never
/// shared between shards.
#[derive(Debug, Default)]
pub struct LocalAggregator {
    table: CountTable,
    records: usize,
}

impl LocalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes `record` and counts every token in it.
    pub fn feed(&mut self, record: &str) {
        for token in tokenize(record) {
            self.table.increment(token);
        }
        self.records += 1;
    }

    /// Number of records fed so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Consumes the aggregator, returning the shard's counts.
    pub fn finish(self) -> CountTable {
        self.table
    }
}

impl<'a> Extend<&'a str> for LocalAggregator {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, records: I) {
        for record in records {
            self.feed(record);
        }
    }
}
