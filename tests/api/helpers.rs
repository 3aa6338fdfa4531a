//! tests/api/helpers.rs
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use topwords::standalone::{engine::run_job, Job};
use topwords::workload;

/// A scratch directory holding an `input/` tree and an `output/` target.
pub struct Scratch {
    pub dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("input")).expect("Failed to create input dir");
        Self { dir }
    }

    pub fn write_input(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join("input").join(name);
        fs::write(&path, contents).expect("Failed to write input file");
        path
    }

    pub fn input_glob(&self) -> String {
        format!("{}/input/*", self.dir.path().display())
    }

    pub fn output_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn job(&self, output: &str) -> Job {
        Job::new(self.input_glob(), self.output_dir(output).to_string_lossy())
    }
}

pub fn lines(n: usize) -> Option<NonZeroUsize> {
    NonZeroUsize::new(n)
}

pub fn run(job: &Job) -> anyhow::Result<Vec<PathBuf>> {
    let engine = workload::named(&job.workload)?;
    run_job(job, &engine)
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read output file")
}

/// Runs `job` and returns the content of its single output file.
pub fn run_single(job: &Job) -> String {
    let outputs = run(job).expect("Job failed");
    assert_eq!(outputs.len(), 1);
    read(&outputs[0])
}
