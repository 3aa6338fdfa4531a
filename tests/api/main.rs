mod helpers;
mod run_job;
