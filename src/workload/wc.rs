//! A MapReduce-compatible implementation of word count.
//!
//! Uses the same tokenizer as `top-words` but keeps every word, so the
//! output is the exact count table, ranked.

use crate::freq::{top_k, LocalAggregator};
use crate::utils::{count_from_bytes, count_to_bytes, string_from_bytes};
use crate::*;
use anyhow::Result;
use bytes::Bytes;

pub fn map(kv: KeyValue, _aux: Bytes) -> MapOutput {
    let s = string_from_bytes(kv.value)?;
    let mut aggregator = LocalAggregator::new();
    aggregator.extend(s.lines());

    let iter = aggregator.finish().into_iter().map(|(word, count)| {
        Ok(KeyValue {
            key: Bytes::from(word),
            value: count_to_bytes(count),
        })
    });
    Ok(Box::new(iter))
}

pub use super::top_words::reduce;
pub use super::top_words::render;

pub fn cleanup(reduced: Vec<KeyValue>, _aux: Bytes) -> MapOutput {
    let table = reduced
        .into_iter()
        .map(|KeyValue { key, value }| Ok((string_from_bytes(key)?, count_from_bytes(value)?)))
        .collect::<Result<crate::freq::CountTable>>()?;
    let ranked = top_k(table, usize::MAX)
        .into_iter()
        .map(|entry| KeyValue {
            key: Bytes::from(entry.token),
            value: count_to_bytes(entry.count),
        })
        .map(Ok);
    Ok(Box::new(ranked))
}
