//! Word-frequency statistics with a map/reduce pipeline.
//!
//! Input is split into shards, every shard is counted on its own
//! (stop words excluded) and only its most frequent words leave the map
//! side. A reducer sums the partial counts and reports the globally most
//! frequent words. Jobs run on a local, multi-threaded engine; see
//! [`standalone::engine`].

use bytes::Bytes;
use std::hash::Hasher;

pub mod freq;
pub mod standalone;
pub mod telemetry;
pub mod utils;
pub mod workload;

/////////////////////////////////////////////////////////////////////////////
// MapReduce application types
/////////////////////////////////////////////////////////////////////////////

/// The output of an application map function.
///
/// There are 2 layers of [`anyhow::Result`]s here. The outer layer
/// accounts for errors that arise while creating the iterator.
/// The inner layer accounts for errors that occur during iteration.
///
/// This accomodates both batch (all keys emitted at once) and lazy
/// (keys only emitted when the iterator is consumed) map operations.
pub type MapOutput = anyhow::Result<Box<dyn Iterator<Item = anyhow::Result<KeyValue>>>>;

/// A map function takes one shard and auxiliary arguments.
///
/// The key of the shard names where it came from; the value holds its
/// records, one per line. It returns an iterator that yields new
/// key-value pairs.
pub type MapFn = fn(kv: KeyValue, aux: Bytes) -> MapOutput;

/// A reduce function takes in a key, an iterator over values for that key,
/// and an auxiliary argument. It returns an [`anyhow::Result`]
/// containing a single output value for that key.
pub type ReduceFn = fn(
    key: Bytes,
    values: Box<dyn Iterator<Item = Bytes> + '_>,
    aux: Bytes,
) -> anyhow::Result<Bytes>;

/// A cleanup function runs once per reducer, after every key it owns
/// has been reduced. It receives all reduced pairs, sorted by key, and
/// decides which pairs are emitted and in what order.
pub type CleanupFn = fn(reduced: Vec<KeyValue>, aux: Bytes) -> MapOutput;

/// Turns one emitted pair into the bytes written to the output file.
pub type RenderFn = fn(kv: &KeyValue) -> anyhow::Result<Bytes>;

/// A map reduce application.
#[derive(Copy, Clone)]
pub struct Workload {
    pub map_fn: MapFn,
    pub reduce_fn: ReduceFn,
    pub cleanup_fn: CleanupFn,
    pub render_fn: RenderFn,
    /// Run reduce and cleanup over each shard's map output before the
    /// shuffle, like a combiner.
    pub combine: bool,
    /// The cleanup output is only final when one reducer sees every key.
    /// Jobs running such a workload must use exactly one reducer.
    pub single_reducer: bool,
}

/////////////////////////////////////////////////////////////////////////////
// Key-value pairs
/////////////////////////////////////////////////////////////////////////////

/// A single key-value pair.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyValue {
    /// The key.
    pub key: Bytes,
    /// The value.
    pub value: Bytes,
}

impl KeyValue {
    /// Construct a new key-value pair from the given key and value.
    pub fn new(key: Bytes, value: Bytes) -> Self {
        Self { key, value }
    }

    /// Get the key of this key-value pair.
    ///
    /// This method is cheap, since [`Bytes`] are cheaply cloneable.
    #[inline]
    pub fn key(&self) -> Bytes {
        self.key.clone()
    }

    /// Get the value of this key-value pair.
    ///
    /// This method is cheap, since [`Bytes`] are cheaply cloneable.
    #[inline]
    pub fn value(&self) -> Bytes {
        self.value.clone()
    }

    /// Consumes the key-value pair and returns the key.
    #[inline]
    pub fn into_key(self) -> Bytes {
        self.key
    }

    /// Consumes the key-value pair and returns the value.
    #[inline]
    pub fn into_value(self) -> Bytes {
        self.value
    }
}

/// Hashes an intermediate key. Compute a reduce bucket for a given key
/// by calculating `ihash(key) % n_reduce`.
pub fn ihash(key: &[u8]) -> u32 {
    let mut hasher = fnv::FnvHasher::with_key(0);
    hasher.write(key);
    let value = hasher.finish() & 0x7fffffff;
    // The mask leaves 31 bits, which always fit.
    value as u32
}
