use crate::domain::result::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Managed network device with an optional uploaded configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub ip_address: String,
    pub config_file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a device (id and timestamp assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertDeviceInput {
    pub name: String,
    pub ip_address: String,
}

/// Input for replacing a device's IP address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateIpInput {
    pub device_id: i64,
    pub ip_address: String,
}

/// Input for recording where a device's uploaded configuration file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetConfigPathInput {
    pub device_id: i64,
    pub config_file_path: String,
}

/// Repository trait for device storage operations
/// Infrastructure layer (postgres) implements this trait
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// True iff a device with this exact name exists
    async fn exists_by_name(&self, name: &str) -> DomainResult<bool>;

    /// Get a device by id; absence is not an error
    async fn find_by_id(&self, device_id: i64) -> DomainResult<Option<Device>>;

    /// All devices in insertion order
    async fn list_all(&self) -> DomainResult<Vec<Device>>;

    /// Insert a new device. The unique constraint on `name` is the
    /// authoritative duplicate check; callers may pre-check for a friendlier
    /// rejection but cannot rely on it under concurrency.
    async fn insert(&self, input: InsertDeviceInput) -> DomainResult<Device>;

    async fn update_ip(&self, input: UpdateIpInput) -> DomainResult<Device>;

    async fn set_config_path(&self, input: SetConfigPathInput) -> DomainResult<Device>;

    /// Delete a device and return the removed snapshot so the caller can
    /// clean up its configuration file
    async fn delete(&self, device_id: i64) -> DomainResult<Device>;
}
