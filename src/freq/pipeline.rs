//! Typed composition of the map and reduce phases.
//!
//! A map invocation counts its shard and keeps only the local top-K.
//! The single reducer sums whatever entries reach it and keeps the
//! top-K of that union. A word that never makes any shard's local
//! top-K therefore never reaches the output, whatever its true global
//! count. This is intended: it bounds shuffle volume at K entries per
//! shard.

use tracing::trace;

use super::aggregator::LocalAggregator;
use super::table::{merge, CountTable};
use super::topk::{top_k, RankedEntry};

/// Runs the map side for one shard of records.
pub fn map_shard<'a, I>(records: I, k: usize) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut aggregator = LocalAggregator::new();
    aggregator.extend(records);
    trace!(records = aggregator.records(), "shard aggregated");
    top_k(aggregator.finish(), k)
}

/// Runs the reduce side over partial results from any number of shards
/// or combiner passes.
///
/// Every partial becomes a table and the tables are merged before
/// selection, so neither the order of the partials nor the order of
/// entries within one matters.
pub fn reduce_partials<P, I>(partials: P, k: usize) -> Vec<RankedEntry>
where
    P: IntoIterator<Item = I>,
    I: IntoIterator<Item = RankedEntry>,
{
    let tables = partials.into_iter().map(|partial| {
        partial
            .into_iter()
            .map(|entry| (entry.token, entry.count))
            .collect::<CountTable>()
    });
    top_k(merge(tables), k)
}

/// Runs a whole job in memory with one reducer.
pub fn run_local<'a, S, R>(shards: S, k: usize) -> Vec<RankedEntry>
where
    S: IntoIterator<Item = R>,
    R: IntoIterator<Item = &'a str>,
{
    let partials = shards.into_iter().map(|shard| map_shard(shard, k));
    reduce_partials(partials, k)
}

/// Formats entries as `token\tcount` lines.
pub fn render(entries: &[RankedEntry]) -> String {
    entries.iter().map(|entry| format!("{entry}\n")).collect()
}
