use anyhow::{ensure, Context, Result};
use bytes::Bytes;
use dashmap::DashMap;
use glob::glob;
use itertools::Itertools;
use rayon::prelude::*;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};
use tracing::{debug, info};

use crate::standalone::Job;
use crate::utils::args_to_bytes;
use crate::*;

// types related to this engine
type BucketIndex = u32;
type Buckets = DashMap<BucketIndex, Vec<KeyValue>>;

/// Reads every file matched by the job's input glob and cuts it into shards.
///
/// A shard's key is the file path, suffixed with `:<n>` when files are
/// split by line count; its value is the shard's text. Files are visited
/// in path order, so shard order is stable across runs.
pub fn read_shards(job: &Job) -> Result<Vec<KeyValue>> {
    let mut shards = Vec::new();
    for pathspec in glob(&job.input).with_context(|| format!("bad input glob `{}`", job.input))? {
        let pathspec = pathspec?;
        if !pathspec.is_file() {
            continue;
        }
        let buf = fs::read(&pathspec)
            .with_context(|| format!("failed to read {}", pathspec.display()))?;
        let filename = pathspec.to_string_lossy().into_owned();

        match job.shard_lines {
            None => shards.push(KeyValue::new(Bytes::from(filename), Bytes::from(buf))),
            Some(lines) => {
                let text = String::from_utf8(buf)
                    .with_context(|| format!("{} is not valid UTF-8", pathspec.display()))?;
                for (n, mut chunk) in text.lines().chunks(lines.get()).into_iter().enumerate() {
                    let key = format!("{}:{}", filename, n);
                    shards.push(KeyValue::new(Bytes::from(key), Bytes::from(chunk.join("\n"))));
                }
            }
        }
    }
    Ok(shards)
}

/// Reduces a batch of pairs key by key, then runs the workload's cleanup
/// over the results.
///
/// This is what a reducer does with its bucket, and what the combiner
/// does with one shard's map output.
pub fn reduce_group(engine: &Workload, mut kvs: Vec<KeyValue>, serialized_args: &Bytes) -> Result<Vec<KeyValue>> {
    let reduce_func = engine.reduce_fn;
    kvs.sort_unstable_by_key(KeyValue::key);

    let mut reduced = Vec::new();
    for (key, value_group) in &kvs.into_iter().chunk_by(KeyValue::key) {
        let iter = value_group.map(KeyValue::into_value);
        let value = reduce_func(key.clone(), Box::new(iter), serialized_args.clone())?;
        reduced.push(KeyValue { key, value });
    }

    (engine.cleanup_fn)(reduced, serialized_args.clone())?.collect()
}

/// Runs the map function over every shard in parallel and partitions the
/// output into `num_reduce_worker` buckets.
///
/// Each shard is mapped by exactly one task with no state shared with
/// other tasks. When the workload asks for it, the shard's output goes
/// through [`reduce_group`] before it is partitioned.
pub fn perform_map(
    engine: &Workload,
    serialized_args: &Bytes,
    num_reduce_worker: u32,
    shards: Vec<KeyValue>,
) -> Result<Buckets> {
    ensure!(num_reduce_worker > 0, "a job needs at least one reducer");
    let buckets: Buckets = Buckets::new();
    let map_func = engine.map_fn;

    shards.into_par_iter().try_for_each(|input_kv| -> Result<()> {
        let name = String::from_utf8_lossy(&input_kv.key).into_owned();
        let mut output = map_func(input_kv, serialized_args.clone())?.collect::<Result<Vec<_>>>()?;
        let mapped = output.len();
        if engine.combine {
            output = reduce_group(engine, output, serialized_args)?;
        }
        debug!(shard = %name, mapped, emitted = output.len(), "map task done");

        // For each KeyValue emitted, insert it into a bucket according
        // to the hashed key (mod # reducers)
        for kv in output {
            let bucket_no = ihash(&kv.key) % num_reduce_worker;
            buckets.entry(bucket_no).or_insert_with(Vec::new).push(kv);
        }
        Ok(())
    })?;

    Ok(buckets)
}

/// Reduces every bucket and writes `mr-out-<bucket>` into the job's output
/// directory. Every reducer writes a file, even one that received nothing.
///
/// Returns the paths written, in bucket order.
pub fn perform_reduce(
    job: &Job,
    engine: &Workload,
    serialized_args: &Bytes,
    num_reduce_worker: u32,
    buckets: Buckets,
) -> Result<Vec<PathBuf>> {
    let output_dir = PathBuf::from(&job.output);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    (0..num_reduce_worker)
        .into_par_iter()
        .map(|reduce_id| -> Result<PathBuf> {
            let bkt = buckets.remove(&reduce_id).map(|(_, bkt)| bkt).unwrap_or_default();
            let received = bkt.len();
            let emitted = reduce_group(engine, bkt, serialized_args)?;

            let out_pathspec = output_dir.join(format!("mr-out-{}", reduce_id));
            let file = File::create(&out_pathspec)
                .with_context(|| format!("failed to create {}", out_pathspec.display()))?;
            let mut out_file = BufWriter::new(file);
            for kv in &emitted {
                out_file.write_all(&(engine.render_fn)(kv)?)?;
            }
            out_file.flush()?;

            debug!(reduce_id, received, emitted = emitted.len(), "reduce task done");
            Ok(out_pathspec)
        })
        .collect()
}

/// Runs `job` from input files to output files.
///
/// Fails before reading any input if the workload needs a single reducer
/// and the job asks for more.
pub fn run_job(job: &Job, engine: &Workload) -> Result<Vec<PathBuf>> {
    ensure!(
        !engine.single_reducer || job.n_reduce == 1,
        "workload `{}` needs exactly one reducer, got {}",
        job.workload,
        job.n_reduce
    );
    let serialized_args = args_to_bytes(&job.args)?;
    let n_reduce = job.n_reduce;

    let shards = read_shards(job)?;
    info!(input = %job.input, shards = shards.len(), workload = %job.workload, "map phase");

    let run = || -> Result<Vec<PathBuf>> {
        /*  The map logic carries out mapping and also shuffle. This makes sense in
         *  the case of a standalone system.
         */
        let buckets = perform_map(engine, &serialized_args, n_reduce, shards)?;
        info!(reducers = n_reduce, "reduce phase");
        perform_reduce(job, engine, &serialized_args, n_reduce, buckets)
    };

    let outputs = match job.workers {
        Some(workers) => rayon::ThreadPoolBuilder::new()
            .num_threads(workers.get())
            .build()?
            .install(run)?,
        None => run()?,
    };
    info!(output = %job.output, files = outputs.len(), "job complete");
    Ok(outputs)
}
