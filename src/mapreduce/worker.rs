//! Runs a single map or reduce task and exits.
//!
//! Exit status 0 means the task's files are complete; anything else means the
//! task failed and must be re-run as a whole.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use mrexec::mapreduce::apps::{get_app, APP_NAMES};
use mrexec::{do_map, do_reduce, Workspace};

#[derive(Parser, Debug)]
#[command(version, about = "Execute one MapReduce task", long_about = None)]
struct Args {
    /// Directory holding intermediate and result files
    #[arg(long, env = "MR_WORK_DIR", default_value = ".")]
    work_dir: PathBuf,

    /// Name of the map/reduce application
    #[arg(long, env = "MR_APP", default_value = "wc")]
    app: String,

    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand, Debug)]
enum Task {
    /// Map one input file into per-bucket intermediate files
    Map {
        #[arg(long)]
        job: String,
        /// Index of this map task
        #[arg(long)]
        task: usize,
        #[arg(long)]
        input: PathBuf,
        /// Number of reduce buckets
        #[arg(long)]
        n_reduce: usize,
    },
    /// Reduce one bucket across every map task's output
    Reduce {
        #[arg(long)]
        job: String,
        /// Index of this reduce task (bucket)
        #[arg(long)]
        task: usize,
        /// Number of map tasks in the job
        #[arg(long)]
        n_map: usize,
    },
}

fn init_log() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let (map_fn, reduce_fn) = get_app(&args.app).ok_or_else(|| {
        anyhow!(
            "unknown app `{}` (available: {})",
            args.app,
            APP_NAMES.join(", ")
        )
    })?;
    let workspace = Workspace::new(args.work_dir);

    match args.task {
        Task::Map {
            job,
            task,
            input,
            n_reduce,
        } => do_map(&workspace, &job, task, &input, n_reduce, map_fn)
            .with_context(|| format!("app `{}`", args.app)),
        Task::Reduce { job, task, n_map } => do_reduce(&workspace, &job, task, n_map, reduce_fn)
            .with_context(|| format!("app `{}`", args.app)),
    }
}

fn main() -> Result<()> {
    init_log();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("task failed: {e:#}");
        return Err(e);
    }
    Ok(())
}
