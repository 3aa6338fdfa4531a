use anyhow::*;
use clap::Parser;
use topwords::standalone::{engine::run_job, Args, Job};
use topwords::*;

fn parse_args() -> Job {
    let args = Args::parse();
    Job::from(args.command)
}

fn main() -> Result<()> {
    telemetry::init_tracing("info")?;
    let job = parse_args();
    let engine = workload::named(&job.workload)?;

    for path in run_job(&job, &engine)? {
        println!("{}", path.display());
    }
    Ok(())
}
