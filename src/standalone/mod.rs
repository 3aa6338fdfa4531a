use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};

use crate::workload::DEFAULT_WORKLOAD;

pub mod engine;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a job on this machine
    Submit {
        /// Glob spec for the input files
        #[arg(short, long)]
        input: String,

        /// Name of the workload
        #[arg(short, long, default_value = DEFAULT_WORKLOAD)]
        workload: String,

        /// Output directory
        #[arg(short, long)]
        output: String,

        /// Number of reducers, one output file each (`top-words` needs exactly one)
        #[arg(short = 'r', long = "reducers", default_value_t = 1,
              value_parser = clap::value_parser!(u32).range(1..))]
        n_reduce: u32,

        /// Threads running map and reduce tasks [default: one per CPU]
        #[arg(short = 'j', long)]
        workers: Option<NonZeroUsize>,

        /// Split every input file into shards of at most this many lines
        #[arg(short = 'l', long)]
        shard_lines: Option<NonZeroUsize>,

        /// Auxiliary arguments to pass to the MapReduce application.
        #[clap(value_parser, last = true)]
        args: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Job {
    pub input: String,
    pub workload: String,
    pub output: String,
    pub args: Vec<String>,
    pub n_reduce: u32,
    pub workers: Option<NonZeroUsize>,
    pub shard_lines: Option<NonZeroUsize>,
}

impl Job {
    /// A job over `input` writing to `output`, with every other
    /// setting at its command-line default.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            workload: DEFAULT_WORKLOAD.to_string(),
            output: output.into(),
            args: Vec::new(),
            n_reduce: 1,
            workers: None,
            shard_lines: None,
        }
    }
}

impl From<Commands> for Job {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Submit {
                input,
                workload,
                output,
                n_reduce,
                workers,
                shard_lines,
                args,
            } => Job {
                input,
                workload,
                output,
                args,
                n_reduce,
                workers,
                shard_lines,
            },
        }
    }
}
