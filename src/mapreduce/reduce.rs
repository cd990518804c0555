use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use tracing::{debug, info};

use crate::mapreduce::codec::{self, Encoder};
use crate::mapreduce::error::{MapReduceError, Result, TaskId};
use crate::mapreduce::util::KeyValue;
use crate::mapreduce::workspace::Workspace;

/// Runs reduce task `reduce_task` of `job_name`.
///
/// Reads the intermediate file of every map task `0..n_map` for this bucket,
/// groups values by key, and calls `reduce_fn` once per distinct key in
/// ascending key order. Results are published as a single output file with
/// one record per key.
///
/// Every input is read and decoded before the output is created, so a missing
/// or malformed intermediate file fails the task without producing output.
pub fn do_reduce<F>(
    workspace: &Workspace,
    job_name: &str,
    reduce_task: usize,
    n_map: usize,
    reduce_fn: F,
) -> Result<()>
where
    F: Fn(&str, Vec<&str>) -> String,
{
    let task = TaskId::reduce(job_name, reduce_task);
    if n_map == 0 {
        return Err(MapReduceError::InvalidTask {
            task,
            reason: "number of map tasks must be positive".to_owned(),
        });
    }

    info!(job = job_name, reduce_task, n_map, "starting reduce task");

    let out_path = workspace.output_path(job_name, reduce_task);
    workspace
        .remove_stale(&out_path)
        .map_err(|e| MapReduceError::io(&task, &out_path, e))?;

    let grouped = collect_intermediate(workspace, &task, n_map)?;

    let mut keys: Vec<&String> = grouped.keys().collect();
    keys.sort_unstable();
    debug!(keys = keys.len(), "grouped intermediate values");

    let file = workspace
        .stage(&out_path)
        .map_err(|e| MapReduceError::io(&task, &out_path, e))?;
    let mut enc = Encoder::new(file);
    for key in keys {
        let values: Vec<&str> = grouped[key].iter().map(String::as_str).collect();
        let output = reduce_fn(key.as_str(), values);
        enc.encode(&KeyValue::new(key.clone(), output))
            .map_err(|e| MapReduceError::codec(&task, &out_path, e))?;
    }
    enc.into_inner()
        .commit()
        .map_err(|e| MapReduceError::io(&task, &out_path, e))?;

    info!(job = job_name, reduce_task, output = %out_path.display(), "reduce task done");
    Ok(())
}

/// Values per key, in ascending map-task order and then file order.
fn collect_intermediate(
    workspace: &Workspace,
    task: &TaskId,
    n_map: usize,
) -> Result<HashMap<String, Vec<String>>> {
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();

    for map_task in 0..n_map {
        let path = workspace.intermediate_path(&task.job_name, map_task, task.index);
        let file = File::open(&path).map_err(|e| MapReduceError::io(task, &path, e))?;

        let mut records = 0usize;
        for kv in codec::decode(BufReader::new(file)) {
            let kv = kv.map_err(|e| MapReduceError::codec(task, &path, e))?;
            grouped.entry(kv.key).or_default().push(kv.value);
            records += 1;
        }
        debug!(file = %path.display(), records, "read intermediate file");
    }

    Ok(grouped)
}
