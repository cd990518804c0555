use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::mapreduce::codec::Encoder;
use crate::mapreduce::error::{MapReduceError, Result, TaskId};
use crate::mapreduce::util::{bucket_for, KeyValue};
use crate::mapreduce::workspace::Workspace;

/// Runs map task `map_task` of `job_name` over `in_file`.
///
/// Calls `map_fn` once with the file's name and full contents, shuffles every
/// emitted pair into bucket `ihash(key) % n_reduce`, and publishes exactly
/// `n_reduce` intermediate files (empty buckets included). Pairs keep their
/// emission order within a bucket.
///
/// Files from an earlier attempt of the same map task are removed first, and
/// each new file only appears once it is fully written. On failure some
/// buckets may therefore be missing, but none is ever half-written.
pub fn do_map<F>(
    workspace: &Workspace,
    job_name: &str,
    map_task: usize,
    in_file: &Path,
    n_reduce: usize,
    map_fn: F,
) -> Result<()>
where
    F: Fn(&str, &str) -> Vec<KeyValue>,
{
    let task = TaskId::map(job_name, map_task);
    if n_reduce == 0 {
        return Err(MapReduceError::InvalidTask {
            task,
            reason: "number of reduce buckets must be positive".to_owned(),
        });
    }

    info!(job = job_name, map_task, in_file = %in_file.display(), n_reduce, "starting map task");

    for reduce_task in 0..n_reduce {
        let path = workspace.intermediate_path(job_name, map_task, reduce_task);
        workspace
            .remove_stale(&path)
            .map_err(|e| MapReduceError::io(&task, &path, e))?;
    }

    // input is opaque bytes; the map function sees it as text
    let bytes = fs::read(in_file).map_err(|e| MapReduceError::io(&task, in_file, e))?;
    let contents = String::from_utf8_lossy(&bytes);
    debug!(bytes = bytes.len(), "read input partition");

    let name = in_file.to_string_lossy();
    let res_map = map_fn(&*name, &*contents);
    debug!(pairs = res_map.len(), "map function returned");

    let res_part = partition(res_map, n_reduce);

    // each bucket is closed as soon as it is written; only its path is held
    let mut closed = Vec::with_capacity(n_reduce);
    for (reduce_task, part) in res_part.iter().enumerate() {
        let path = workspace.intermediate_path(job_name, map_task, reduce_task);
        let file = workspace
            .stage(&path)
            .map_err(|e| MapReduceError::io(&task, &path, e))?;

        let mut enc = Encoder::new(file);
        for kv in part {
            enc.encode(kv)
                .map_err(|e| MapReduceError::codec(&task, &path, e))?;
        }
        let stage = enc
            .into_inner()
            .close()
            .map_err(|e| MapReduceError::io(&task, &path, e))?;
        debug!(file = %path.display(), records = part.len(), "wrote bucket");
        closed.push(stage);
    }

    // publish only once every bucket has been written in full
    for stage in closed {
        let path = stage.dest().to_path_buf();
        stage
            .publish()
            .map_err(|e| MapReduceError::io(&task, path, e))?;
    }

    info!(job = job_name, map_task, "map task done");
    Ok(())
}

/// Splits pairs into `n` buckets by key hash, keeping their relative order.
fn partition(keyvals: Vec<KeyValue>, n: usize) -> Vec<Vec<KeyValue>> {
    let mut res: Vec<Vec<KeyValue>> = (0..n).map(|_| Vec::new()).collect();

    for keyval in keyvals {
        res[bucket_for(&keyval.key, n)].push(keyval);
    }

    res
}
