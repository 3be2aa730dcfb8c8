//! File-backed blob store
//!
//! Persists cache entries across runs. Keys are base64-encoded into
//! filenames so arbitrary key content never leaks into the filesystem
//! namespace.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tracing::debug;

use speech::SpeechError;
use speech::ports::BlobStore;

const BLOB_EXTENSION: &str = "bin";

/// Directory-per-store persistent key-value store
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open a store rooted at a directory, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Storage` when the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, SpeechError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| SpeechError::Storage(format!("cannot create {}: {e}", dir.display())))?;
        debug!(dir = %dir.display(), "file blob store opened");
        Ok(Self { dir })
    }

    /// Root directory of this store
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        let encoded = URL_SAFE_NO_PAD.encode(key.as_bytes());
        self.dir.join(format!("{encoded}.{BLOB_EXTENSION}"))
    }

    fn decode_file_name(name: &str) -> Option<String> {
        let encoded = name.strip_suffix(&format!(".{BLOB_EXTENSION}"))?;
        let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        String::from_utf8(bytes).ok()
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpeechError> {
        match tokio::fs::read(self.blob_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SpeechError::Storage(format!("read failed: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), SpeechError> {
        tokio::fs::write(self.blob_path(key), value)
            .await
            .map_err(|e| SpeechError::Storage(format!("write failed: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), SpeechError> {
        match tokio::fs::remove_file(self.blob_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SpeechError::Storage(format!("delete failed: {e}"))),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, SpeechError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| SpeechError::Storage(format!("list failed: {e}")))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SpeechError::Storage(format!("list failed: {e}")))?
        {
            if let Some(key) = entry
                .file_name()
                .to_str()
                .and_then(Self::decode_file_name)
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
