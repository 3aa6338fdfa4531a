//! Word-frequency primitives shared by every stage of a job.
//!
//! The same pieces run on both sides of the shuffle: a map invocation
//! tokenizes and aggregates its shard, then keeps only its local top-K;
//! a reducer merges whatever arrived and selects the top-K again.

pub mod aggregator;
pub mod pipeline;
pub mod stopwords;
pub mod table;
pub mod tokenizer;
pub mod topk;

pub use aggregator::LocalAggregator;
pub use table::{merge, CountTable};
pub use tokenizer::tokenize;
pub use topk::{top_k, RankedEntry, DEFAULT_TOP_K};
