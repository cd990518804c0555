//! Worker-side task execution for a file-based MapReduce engine.
//!
//! A scheduler calls [`do_map`] once per input partition and, after every map
//! task of the job has finished, [`do_reduce`] once per bucket. The two never
//! talk to each other: they agree on file names through [`naming`] inside a
//! shared [`Workspace`] directory.

pub mod mapreduce;

pub use mapreduce::error::{MapReduceError, Phase, TaskId};
pub use mapreduce::map::do_map;
pub use mapreduce::naming;
pub use mapreduce::reduce::do_reduce;
pub use mapreduce::util::{bucket_for, ihash, KeyValue, MapFn, ReduceFn};
pub use mapreduce::workspace::Workspace;
