use bytes::Bytes;
use common::domain::{
    ConfigSnapshot, ConfigStore, Device, DeviceRepository, DomainError, DomainResult,
    InsertDeviceInput, SetConfigPathInput, UpdateIpInput,
};
use garde::Validate;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Only media type accepted for uploaded configuration files. The declared
/// type is trusted as-is; content is never sniffed.
const PLAIN_TEXT: &str = "text/plain";

/// Service request for registering a device
#[derive(Debug, Clone, Validate)]
pub struct CreateDeviceRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub ip_address: String,
}

/// Service request for uploading a device configuration file
#[derive(Debug, Clone)]
pub struct UploadConfigRequest {
    pub device_id: i64,
    /// Media type declared by the caller, e.g. the multipart part's
    /// Content-Type
    pub content_type: String,
    pub content: Bytes,
}

/// Domain service for the device-configuration lifecycle: device CRUD,
/// config upload/retrieval, and pairwise comparison.
pub struct DeviceService {
    device_repository: Arc<dyn DeviceRepository>,
    config_store: Arc<dyn ConfigStore>,
}

impl DeviceService {
    pub fn new(device_repository: Arc<dyn DeviceRepository>, config_store: Arc<dyn ConfigStore>) -> Self {
        Self {
            device_repository,
            config_store,
        }
    }

    /// List all devices in insertion order
    #[instrument(skip(self))]
    pub async fn list_devices(&self) -> DomainResult<Vec<Device>> {
        let devices = self.device_repository.list_all().await?;
        debug!(count = devices.len(), "listed devices");
        Ok(devices)
    }

    /// Get a device by id
    #[instrument(skip(self))]
    pub async fn get_device(&self, device_id: i64) -> DomainResult<Device> {
        self.find_device(device_id).await
    }

    /// Register a new device. The name pre-check gives duplicate names a
    /// friendly early rejection; under a create/create race the store's
    /// unique constraint produces the same error.
    #[instrument(skip(self, request), fields(device_name = %request.name))]
    pub async fn create_device(&self, request: CreateDeviceRequest) -> DomainResult<Device> {
        common::garde::validate_struct(&request)?;

        if self.device_repository.exists_by_name(&request.name).await? {
            return Err(DomainError::DeviceAlreadyExists(request.name));
        }

        let device = self
            .device_repository
            .insert(InsertDeviceInput {
                name: request.name,
                ip_address: request.ip_address,
            })
            .await?;

        debug!(device_id = device.id, "created device");
        Ok(device)
    }

    /// Replace a device's IP address
    #[instrument(skip(self, ip_address))]
    pub async fn update_device_ip(&self, device_id: i64, ip_address: String) -> DomainResult<Device> {
        let device = self
            .device_repository
            .update_ip(UpdateIpInput {
                device_id,
                ip_address,
            })
            .await?;

        debug!(device_id, "updated device ip address");
        Ok(device)
    }

    /// Delete a device and its configuration file. The record goes first;
    /// file removal is best effort, so a failure here can orphan a file but
    /// never leaves a record behind.
    #[instrument(skip(self))]
    pub async fn delete_device(&self, device_id: i64) -> DomainResult<()> {
        let device = self.device_repository.delete(device_id).await?;

        if let Some(path) = &device.config_file_path {
            if let Err(e) = self.config_store.delete(Path::new(path)).await {
                warn!(device_id, path = %path, error = %e, "config file cleanup failed");
            }
        }

        debug!(device_id, "deleted device");
        Ok(())
    }

    /// Store an uploaded configuration file and record its path on the
    /// device. Rejected declared media types leave the device untouched.
    #[instrument(skip(self, request), fields(device_id = request.device_id))]
    pub async fn upload_config(&self, request: UploadConfigRequest) -> DomainResult<Device> {
        let device = self.find_device(request.device_id).await?;

        if request.content_type != PLAIN_TEXT {
            return Err(DomainError::UnsupportedMediaType(request.content_type));
        }

        let path = self.config_store.write(&device.name, request.content).await?;

        let updated = self
            .device_repository
            .set_config_path(SetConfigPathInput {
                device_id: device.id,
                config_file_path: path.to_string_lossy().into_owned(),
            })
            .await?;

        debug!(device_id = updated.id, path = %path.display(), "uploaded device config");
        Ok(updated)
    }

    /// Read a device's configuration. The recorded path is re-validated at
    /// read time: a file deleted out-of-band surfaces exactly like a config
    /// that was never uploaded.
    #[instrument(skip(self))]
    pub async fn get_config(&self, device_id: i64) -> DomainResult<ConfigSnapshot> {
        let device = self.find_device(device_id).await?;

        let path = device.config_file_path.as_deref().ok_or_else(|| {
            DomainError::ConfigNotFound(format!("no config for device {device_id}"))
        })?;

        let content = self.config_store.read(Path::new(path)).await?;

        Ok(ConfigSnapshot {
            device_name: device.name,
            content,
        })
    }

    /// Render an HTML comparison of two devices' configuration files
    #[instrument(skip(self))]
    pub async fn compare_configs(&self, left_id: i64, right_id: i64) -> DomainResult<String> {
        let left = self.get_config(left_id).await?;
        let right = self.get_config(right_id).await?;

        let left_lines: Vec<&str> = left.content.lines().collect();
        let right_lines: Vec<&str> = right.content.lines().collect();

        Ok(common::diff::render_side_by_side(
            &left.device_name,
            &right.device_name,
            &left_lines,
            &right_lines,
        ))
    }

    async fn find_device(&self, device_id: i64) -> DomainResult<Device> {
        self.device_repository
            .find_by_id(device_id)
            .await?
            .ok_or_else(|| DomainError::DeviceNotFound(device_id.to_string()))
    }
}
