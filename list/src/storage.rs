//! File-backed persistence primitive.
//!
//! Each key is one file, `<dir>/<key>.json`. Writes go to a sibling temp file
//! that is then renamed over the target, so a crash mid-write leaves the
//! previous record intact.

pub use shopping_list_core::storage::{KeyValueStorage, StorageError, StorageFuture};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// [`KeyValueStorage`] that keeps one JSON file per key in a directory
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Store records under `dir`
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the record files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let path = self.path_for(key);
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
                Err(error) => Err(StorageError::Io(error)),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            tokio::fs::create_dir_all(&self.dir).await?;

            let path = self.path_for(key);
            let tmp = self.dir.join(format!(".{key}.json.tmp"));

            tokio::fs::write(&tmp, value.as_bytes()).await?;
            tokio::fs::rename(&tmp, &path).await?;

            tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote record");
            Ok::<(), StorageError>(())
        })
    }
}
