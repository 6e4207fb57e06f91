use crate::domain::{ConfigStore, DomainError, DomainResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension every stored configuration file carries
const CONFIG_EXTENSION: &str = "txt";

/// Filesystem-backed ConfigStore keeping one `{name}.txt` file per device
/// under a fixed upload root
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    root: PathBuf,
}

impl FsConfigStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ConfigStore for FsConfigStore {
    fn path_for(&self, device_name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", device_name, CONFIG_EXTENSION))
    }

    async fn write(&self, device_name: &str, content: Bytes) -> DomainResult<PathBuf> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::StorageError(format!("creating upload root: {e}")))?;

        let path = self.path_for(device_name);
        tokio::fs::write(&path, &content)
            .await
            .map_err(|e| DomainError::StorageError(format!("writing {}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = content.len(), "wrote config file");
        Ok(path)
    }

    async fn read(&self, path: &Path) -> DomainResult<String> {
        let is_text = path
            .extension()
            .is_some_and(|ext| ext == CONFIG_EXTENSION);

        if !is_text {
            return Err(DomainError::ConfigNotFound(
                "File not found or not a text file".to_string(),
            ));
        }

        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DomainError::ConfigNotFound(
                "File not found or not a text file".to_string(),
            )),
            Err(e) => Err(DomainError::StorageError(format!(
                "reading {}: {e}",
                path.display()
            ))),
        }
    }

    async fn delete(&self, path: &Path) -> DomainResult<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "removed config file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::StorageError(format!(
                "removing {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, FsConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_path_for_is_name_keyed() {
        let (dir, store) = test_store();
        assert_eq!(store.path_for("edge1"), dir.path().join("edge1.txt"));
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let (_dir, store) = test_store();

        let path = store
            .write("edge1", Bytes::from_static(b"interface eth0\nip addr 10.0.0.1"))
            .await
            .unwrap();

        let content = store.read(&path).await.unwrap();
        assert_eq!(content, "interface eth0\nip addr 10.0.0.1");
    }

    #[tokio::test]
    async fn test_write_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::new(dir.path().join("uploads"));

        let path = store.write("edge1", Bytes::from_static(b"x")).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_content() {
        let (_dir, store) = test_store();

        let first = store.write("edge1", Bytes::from_static(b"old")).await.unwrap();
        let second = store.write("edge1", Bytes::from_static(b"new")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.read(&second).await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let (dir, store) = test_store();

        let result = store.read(&dir.path().join("ghost.txt")).await;
        assert!(matches!(result, Err(DomainError::ConfigNotFound(_))));
    }

    #[tokio::test]
    async fn test_read_wrong_extension_is_not_found() {
        let (dir, store) = test_store();

        let path = dir.path().join("edge1.cfg");
        std::fs::write(&path, "x").unwrap();

        let result = store.read(&path).await;
        assert!(matches!(result, Err(DomainError::ConfigNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = test_store();

        let path = store.write("edge1", Bytes::from_static(b"x")).await.unwrap();
        store.delete(&path).await.unwrap();
        assert!(!path.exists());

        // Second delete of the same path is not an error
        store.delete(&path).await.unwrap();
    }
}
