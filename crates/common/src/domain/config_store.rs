use crate::domain::result::DomainResult;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Read-time pairing of a device and the full text of its configuration
/// file. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub device_name: String,
    pub content: String,
}

/// Store mapping a device name to a single plaintext configuration file
/// under a fixed upload root. Device names are unique and immutable, so the
/// mapping is injective and stable for the device's lifetime.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Deterministic location for a device's configuration file
    fn path_for(&self, device_name: &str) -> PathBuf;

    /// Overwrite the device's configuration file, creating the upload root
    /// if absent; returns the path written. Last writer wins.
    async fn write(&self, device_name: &str, content: Bytes) -> DomainResult<PathBuf>;

    /// Read the file at `path`. Fails with `ConfigNotFound` when the file is
    /// missing or does not carry the expected text extension.
    async fn read(&self, path: &Path) -> DomainResult<String>;

    /// Remove the file at `path` if present; removing an absent file is not
    /// an error
    async fn delete(&self, path: &Path) -> DomainResult<()>;
}
