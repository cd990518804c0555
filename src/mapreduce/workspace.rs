//! The shared directory tasks read and write, and how files get published
//! into it.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};
use tracing::debug;

use crate::mapreduce::naming;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Workspace { dir: dir.into() }
    }

    pub fn intermediate_path(
        &self,
        job_name: &str,
        map_task: usize,
        reduce_task: usize,
    ) -> PathBuf {
        self.dir
            .join(naming::intermediate_name(job_name, map_task, reduce_task))
    }

    pub fn output_path(&self, job_name: &str, reduce_task: usize) -> PathBuf {
        self.dir.join(naming::output_name(job_name, reduce_task))
    }

    /// Opens a hidden temporary file next to `dest`. Nothing appears under
    /// `dest` until [`StagedFile::commit`] succeeds; dropping the staged
    /// file without committing deletes it.
    pub fn stage(&self, dest: impl Into<PathBuf>) -> io::Result<StagedFile> {
        let tmp = tempfile::Builder::new()
            .prefix(".mrtmp-stage-")
            .tempfile_in(&self.dir)?;
        Ok(StagedFile {
            dest: dest.into(),
            out: BufWriter::new(tmp),
        })
    }

    /// Removes a result left behind by an earlier attempt of the same task.
    pub fn remove_stale(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed stale file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

pub struct StagedFile {
    dest: PathBuf,
    out: BufWriter<NamedTempFile>,
}

impl StagedFile {
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Flushes and syncs the temporary file, then closes its handle. The
    /// file stays hidden until [`ClosedStage::publish`].
    pub fn close(self) -> io::Result<ClosedStage> {
        let tmp = self
            .out
            .into_inner()
            .map_err(|e| e.into_error())?;
        tmp.as_file().sync_all()?;
        Ok(ClosedStage {
            dest: self.dest,
            tmp: tmp.into_temp_path(),
        })
    }

    /// Closes and publishes in one step.
    pub fn commit(self) -> io::Result<()> {
        self.close()?.publish()
    }
}

/// A fully written staged file that no longer holds an open handle.
/// Dropping it without publishing deletes it.
pub struct ClosedStage {
    dest: PathBuf,
    tmp: TempPath,
}

impl ClosedStage {
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Renames the temporary file onto its destination.
    pub fn publish(self) -> io::Result<()> {
        self.tmp.persist(&self.dest).map_err(|e| e.error)
    }
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
