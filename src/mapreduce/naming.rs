//! File names shared by map and reduce tasks.
//!
//! Map and reduce tasks never talk to each other; they only agree on these
//! names. Both functions are pure and return paths relative to the workspace.

use std::path::PathBuf;

/// Intermediate file written by map task `map_task` for reduce bucket `reduce_task`.
pub fn intermediate_name(job_name: &str, map_task: usize, reduce_task: usize) -> PathBuf {
    PathBuf::from(format!("mrtmp.{}-{}-{}", job_name, map_task, reduce_task))
}

/// Result file written by reduce task `reduce_task`.
pub fn output_name(job_name: &str, reduce_task: usize) -> PathBuf {
    PathBuf::from(format!("mrtmp.{}-res-{}", job_name, reduce_task))
}
