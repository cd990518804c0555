use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Map,
    Reduce,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Map => write!(f, "map"),
            Phase::Reduce => write!(f, "reduce"),
        }
    }
}

/// Identifies the task an error belongs to, so a scheduler can decide what
/// to re-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId {
    pub job_name: String,
    pub phase: Phase,
    pub index: usize,
}

impl TaskId {
    pub fn map(job_name: &str, index: usize) -> Self {
        TaskId {
            job_name: job_name.to_owned(),
            phase: Phase::Map,
            index,
        }
    }

    pub fn reduce(job_name: &str, index: usize) -> Self {
        TaskId {
            job_name: job_name.to_owned(),
            phase: Phase::Reduce,
            index,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} task {} of job `{}`", self.phase, self.index, self.job_name)
    }
}

/// Every failure is fatal to the task that hit it.
#[derive(Debug, Error)]
pub enum MapReduceError {
    #[error("{task}: {reason}")]
    InvalidTask { task: TaskId, reason: String },

    #[error("{task}: i/o error on {}: {source}", .path.display())]
    Io {
        task: TaskId,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{task}: bad record in {}: {source}", .path.display())]
    Serialization {
        task: TaskId,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MapReduceError {
    pub fn task(&self) -> &TaskId {
        match self {
            MapReduceError::InvalidTask { task, .. }
            | MapReduceError::Io { task, .. }
            | MapReduceError::Serialization { task, .. } => task,
        }
    }

    pub(crate) fn io(task: &TaskId, path: impl Into<PathBuf>, source: io::Error) -> Self {
        MapReduceError::Io {
            task: task.clone(),
            path: path.into(),
            source,
        }
    }

    /// serde_json reports underlying read/write failures as its own error;
    /// those are sorted back into `Io`.
    pub(crate) fn codec(
        task: &TaskId,
        path: impl Into<PathBuf>,
        source: serde_json::Error,
    ) -> Self {
        if source.is_io() {
            MapReduceError::io(task, path, io::Error::from(source))
        } else {
            MapReduceError::Serialization {
                task: task.clone(),
                path: path.into(),
                source,
            }
        }
    }
}

pub type Result<T, E = MapReduceError> = std::result::Result<T, E>;
