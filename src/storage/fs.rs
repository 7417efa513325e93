//! Filesystem-backed object store
//!
//! Each object is a file under the root directory; the part of the key before
//! the last `/` becomes a subdirectory. Modification times come from file
//! metadata, so ordering is only as fine-grained as the filesystem clock.

use crate::storage::object_store::{ObjectMeta, ObjectStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Object store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys must be relative, `/`-separated and free of `.`/`..` segments
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.contains('\\')
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, key: &str, body: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(key, e))?;
        }

        fs::write(&path, body).await.map_err(|e| io_error(key, e))?;
        debug!("Stored object {} ({} bytes)", key, body.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectMeta>> {
        let (dir, name_prefix) = match prefix.rfind('/') {
            Some(index) => (&prefix[..index], &prefix[index + 1..]),
            None => ("", prefix),
        };

        let dir_path = if dir.is_empty() {
            self.root.clone()
        } else {
            self.path_for(dir)?
        };

        let mut entries = match fs::read_dir(&dir_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(prefix, e)),
        };

        let mut listed = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(prefix, e))? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(name_prefix) {
                continue;
            }

            let metadata = entry.metadata().await.map_err(|e| io_error(&name, e))?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata.modified().map_err(|e| io_error(&name, e))?;
            let key = if dir.is_empty() {
                name
            } else {
                format!("{}/{}", dir, name)
            };

            listed.push(ObjectMeta {
                key,
                last_modified: DateTime::<Utc>::from(modified),
            });
        }

        listed.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(listed)
    }
}
