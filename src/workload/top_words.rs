//! A MapReduce-compatible implementation of "top words".
//!
//! Every shard reports only its local top-K words, and each reducer
//! reports the top-K of what it received. With one reducer that is
//! the final answer.

use crate::freq::{pipeline, RankedEntry, DEFAULT_TOP_K};
use crate::utils::{count_from_bytes, count_to_bytes, string_from_bytes};
use crate::*;
use anyhow::Result;
use bytes::Bytes;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(no_binary_name = true)]
struct Args {
    /// How many words each stage keeps
    #[clap(short = 'k', long, value_parser, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
}

fn parse_args(aux: &Bytes) -> Result<Args> {
    let argv = if aux.is_empty() {
        Vec::new()
    } else {
        serde_json::from_slice::<Vec<String>>(aux)?
    };
    Ok(Args::try_parse_from(argv)?)
}

fn emit(entries: Vec<RankedEntry>) -> MapOutput {
    let iter = entries.into_iter().map(|RankedEntry { token, count }| {
        Ok(KeyValue {
            key: Bytes::from(token),
            value: count_to_bytes(count),
        })
    });
    Ok(Box::new(iter))
}

pub fn map(kv: KeyValue, aux: Bytes) -> MapOutput {
    let args = parse_args(&aux)?;
    let shard = string_from_bytes(kv.value)?;
    let entries = pipeline::map_shard(shard.lines(), args.top_k);
    debug!(
        shard = %String::from_utf8_lossy(&kv.key),
        emitted = entries.len(),
        "mapped shard"
    );
    emit(entries)
}

pub fn reduce(
    _key: Bytes,
    values: Box<dyn Iterator<Item = Bytes> + '_>,
    _aux: Bytes,
) -> Result<Bytes> {
    let mut total: u64 = 0;
    for value in values {
        total = total.saturating_add(count_from_bytes(value)?);
    }
    Ok(count_to_bytes(total))
}

pub fn cleanup(reduced: Vec<KeyValue>, aux: Bytes) -> MapOutput {
    let args = parse_args(&aux)?;
    let entries = reduced
        .into_iter()
        .map(|KeyValue { key, value }| {
            Ok(RankedEntry::new(string_from_bytes(key)?, count_from_bytes(value)?))
        })
        .collect::<Result<Vec<_>>>()?;
    emit(pipeline::reduce_partials([entries], args.top_k))
}

pub fn render(kv: &KeyValue) -> Result<Bytes> {
    let entry = RankedEntry::new(string_from_bytes(kv.key())?, count_from_bytes(kv.value())?);
    Ok(Bytes::from(pipeline::render(&[entry])))
}
