use crate::keys::PhotoId;
use crate::traits::{PhotoStore, SavedPhoto, StorageError, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

/// A base directory that file operations cannot escape.
///
/// Names are resolved as a single normal path component directly under the root, and the
/// root itself is re-canonicalized before every operation so that swapping it (or one of
/// its ancestors) for a symlink is detected.
#[derive(Debug, Clone)]
pub struct ConfinedRoot {
    root: PathBuf,
}

impl ConfinedRoot {
    /// Open `base_path`, creating it if missing.
    pub async fn open(base_path: impl AsRef<Path>) -> StorageResult<Self> {
        let base_path = base_path.as_ref();

        fs::create_dir_all(base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let root = fs::canonicalize(base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to canonicalize storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        if !fs::metadata(&root).await?.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "Storage path {} is not a directory",
                root.display()
            )));
        }

        Ok(ConfinedRoot { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` to a path directly under the root.
    pub fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(component)), None) if component == name => {
                Ok(self.root.join(component))
            }
            _ => Err(StorageError::InvalidKey(format!(
                "{:?} is not a plain file name",
                name
            ))),
        }
    }

    fn check_resolves_to_root(&self, current: PathBuf) -> StorageResult<()> {
        if current != self.root {
            return Err(StorageError::InvalidKey(format!(
                "Storage root {} now resolves to {}",
                self.root.display(),
                current.display()
            )));
        }
        Ok(())
    }

    async fn verify(&self) -> StorageResult<()> {
        self.check_resolves_to_root(fs::canonicalize(&self.root).await?)
    }

    /// Create `name` exclusively. Fails if anything, including a symlink, already exists there.
    pub async fn create_new(&self, name: &str) -> StorageResult<fs::File> {
        let path = self.resolve(name)?;
        self.verify().await?;

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
                _ => StorageError::IoError(e),
            })?;

        Ok(file)
    }

    /// Remove `name` from under the root. Blocking, so it can run from `Drop`.
    ///
    /// A missing file is not an error.
    pub fn remove(&self, name: &str) -> StorageResult<()> {
        let path = self.resolve(name)?;
        self.check_resolves_to_root(std::fs::canonicalize(&self.root)?)?;

        match std::fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(StorageError::IoError(e)),
            _ => Ok(()),
        }
    }
}

/// Removes a freshly created photo file on drop unless committed.
///
/// Covers early returns and futures dropped mid-write (client disconnects).
struct PendingPhoto {
    root: ConfinedRoot,
    name: String,
    committed: bool,
}

impl PendingPhoto {
    fn new(root: ConfinedRoot, name: &str) -> Self {
        PendingPhoto {
            root,
            name: name.to_string(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PendingPhoto {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        match self.root.remove(&self.name) {
            Ok(()) => {
                tracing::debug!(photo_id = %self.name, "Removed incomplete photo file");
            }
            Err(e) => {
                tracing::error!(
                    photo_id = %self.name,
                    root = %self.root.path().display(),
                    error = %e,
                    "Failed to remove incomplete photo file"
                );
            }
        }
    }
}

/// Local filesystem photo storage
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: ConfinedRoot,
}

impl LocalPhotoStore {
    /// Create a new LocalPhotoStore rooted at `base_path` (e.g. "/var/lib/barnlog/photos").
    pub async fn new(base_path: impl AsRef<Path>) -> StorageResult<Self> {
        let root = ConfinedRoot::open(base_path).await?;
        tracing::info!(root = %root.path().display(), "Local photo store ready");
        Ok(LocalPhotoStore { root })
    }

    pub fn base_path(&self) -> &Path {
        self.root.path()
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn save(
        &self,
        source: &mut (dyn AsyncRead + Unpin + Send),
        max_bytes: u64,
        cancel: &CancellationToken,
    ) -> StorageResult<SavedPhoto> {
        let photo_id = PhotoId::generate()?;
        let start = std::time::Instant::now();

        let file = self.root.create_new(photo_id.as_str()).await?;
        let pending = PendingPhoto::new(self.root.clone(), photo_id.as_str());
        // Rebound after the guard so the handle is closed before the guard removes the file.
        let mut file = file;

        let mut limited = source.take(max_bytes.saturating_add(1));
        let size_bytes = tokio::io::copy(&mut limited, &mut file)
            .await
            .map_err(StorageError::Copy)?;

        if size_bytes > max_bytes {
            tracing::warn!(
                photo_id = %photo_id,
                limit = max_bytes,
                "Photo exceeds storage size limit"
            );
            return Err(StorageError::PayloadTooLarge { limit: max_bytes });
        }

        file.sync_all().await?;
        drop(file);

        if cancel.is_cancelled() {
            tracing::warn!(photo_id = %photo_id, "Upload cancelled after write, discarding photo");
            return Err(StorageError::Cancelled);
        }

        pending.commit();

        tracing::info!(
            photo_id = %photo_id,
            size_bytes = size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local photo store save successful"
        );

        Ok(SavedPhoto {
            photo_id,
            size_bytes,
        })
    }
}
