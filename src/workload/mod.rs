//! Converts MapReduce application names to actual application code.
//!
//! # Example
//!
//! To get the top words application:
//! ```
//! # use anyhow::Result;
//! use topwords::workload;
//! # fn main() -> Result<()> {
//! let app = workload::named("top-words")?;
//! assert!(app.combine);
//! assert!(app.single_reducer);
//! # Ok(())
//! # }
//! ```

use crate::Workload;
use anyhow::{bail, Result};

pub mod top_words;
pub mod wc;

/// The workload a job runs when none is named.
pub const DEFAULT_WORKLOAD: &str = "top-words";

/// Gets the [`Workload`] named `name`.
///
/// Returns [`None`] if no application with the given name was found.
pub fn try_named(name: &str) -> Option<Workload> {
    match name {
        "top-words" => Some(Workload {
            map_fn: top_words::map,
            reduce_fn: top_words::reduce,
            cleanup_fn: top_words::cleanup,
            render_fn: top_words::render,
            combine: true,
            single_reducer: true,
        }),
        "wc" => Some(Workload {
            map_fn: wc::map,
            reduce_fn: wc::reduce,
            cleanup_fn: wc::cleanup,
            render_fn: wc::render,
            combine: false,
            single_reducer: false,
        }),
        _ => None,
    }
}

/// Gets the [`Workload`] named `name`.
///
/// Returns an [`anyhow::Error`] if no application with the given name was found.
pub fn named(name: &str) -> Result<Workload> {
    match try_named(name) {
        Some(app) => Ok(app),
        None => bail!("No app named `{}` found.", name),
    }
}
