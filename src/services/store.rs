use crate::utils::validation::validate_oid;
use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Content-addressed blob store backed by a local directory.
///
/// Canonical objects live at `<root>/objects/<oid>`; in-flight uploads live
/// under `<root>/staging/` with per-attempt unique names. The rename from
/// staging into the objects directory is the only publish point, so readers
/// either see nothing at an oid or a complete, digest-verified file.
pub struct ObjectStore {
    objects_dir: PathBuf,
    staging_dir: PathBuf,
}

/// One upload attempt's private scratch file. Consumed by
/// [`ObjectStore::publish`] on success or [`ObjectStore::discard`] on any
/// failure; a dropped staging file is left behind for external maintenance.
pub struct StagingFile {
    path: PathBuf,
    file: File,
}

impl StagingFile {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await
    }
}

impl ObjectStore {
    /// Opens a store rooted at `root`, creating its directories if needed.
    pub async fn open(root: &Path) -> io::Result<Self> {
        let objects_dir = root.join("objects");
        let staging_dir = root.join("staging");
        fs::create_dir_all(&objects_dir).await?;
        fs::create_dir_all(&staging_dir).await?;
        Ok(Self {
            objects_dir,
            staging_dir,
        })
    }

    /// Canonical path for a validated oid. Callers must have validated the
    /// oid before asking for its path.
    fn object_path(&self, oid: &str) -> PathBuf {
        self.objects_dir.join(oid)
    }

    /// Whether a canonical file exists for `oid`. Malformed oids are never
    /// stored, so they report `false` without touching the filesystem.
    pub async fn exists(&self, oid: &str) -> bool {
        if validate_oid(oid).is_err() {
            return false;
        }
        fs::try_exists(self.object_path(oid)).await.unwrap_or(false)
    }

    /// Allocates a staging file with a name unique across concurrent
    /// callers, so simultaneous uploads of the same oid never contend.
    pub async fn begin_upload(&self) -> io::Result<StagingFile> {
        let name = format!("{}-{}.part", Utc::now().timestamp_micros(), Uuid::new_v4());
        let path = self.staging_dir.join(name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        Ok(StagingFile { path, file })
    }

    /// Atomically renames a fully written, digest-verified staging file
    /// into the canonical namespace. Competing publishes of the same oid
    /// are last-writer-wins; both files passed verification against the
    /// same oid, so they are byte-identical.
    pub async fn publish(&self, staging: StagingFile, oid: &str) -> io::Result<()> {
        let StagingFile { path, mut file } = staging;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&path, self.object_path(oid)).await
    }

    /// Deletes a staging file on any failure path.
    pub async fn discard(&self, staging: StagingFile) {
        let StagingFile { path, file } = staging;
        drop(file);
        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!("failed to remove staging file {}: {}", path.display(), e);
        }
    }

    /// Opens the canonical file for streaming. Each call returns an
    /// independent handle.
    pub async fn read(&self, oid: &str) -> io::Result<File> {
        File::open(self.object_path(oid)).await
    }

    /// Deletes a canonical file. Administrative hook only; not reachable
    /// through the batch/object protocol surface.
    pub async fn remove(&self, oid: &str) -> io::Result<()> {
        fs::remove_file(self.object_path(oid)).await
    }
}
