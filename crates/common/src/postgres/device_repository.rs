use crate::domain::{
    Device, DeviceRepository, DomainError, DomainResult, InsertDeviceInput, SetConfigPathInput,
    UpdateIpInput,
};
use crate::postgres::PostgresClient;
use async_trait::async_trait;
use tokio_postgres::Row;
use tracing::{debug, instrument};

fn device_from_row(row: &Row) -> Device {
    Device {
        id: row.get("id"),
        name: row.get("name"),
        ip_address: row.get("ip_address"),
        config_file_path: row.get("config_file_path"),
        created_at: row.get("created_at"),
    }
}

/// PostgreSQL implementation of DeviceRepository trait
#[derive(Clone)]
pub struct PostgresDeviceRepository {
    client: PostgresClient,
}

impl PostgresDeviceRepository {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeviceRepository for PostgresDeviceRepository {
    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> DomainResult<bool> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt("SELECT 1 FROM devices WHERE name = $1 LIMIT 1", &[&name])
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        Ok(row.is_some())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, device_id: i64) -> DomainResult<Option<Device>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "SELECT id, name, ip_address, config_file_path, created_at
                 FROM devices
                 WHERE id = $1",
                &[&device_id],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        Ok(row.as_ref().map(device_from_row))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> DomainResult<Vec<Device>> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let rows = conn
            .query(
                "SELECT id, name, ip_address, config_file_path, created_at
                 FROM devices
                 ORDER BY id",
                &[],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        debug!("found {} devices", rows.len());

        Ok(rows.iter().map(device_from_row).collect())
    }

    #[instrument(skip(self, input), fields(device_name = %input.name))]
    async fn insert(&self, input: InsertDeviceInput) -> DomainResult<Device> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let result = conn
            .query_one(
                "INSERT INTO devices (name, ip_address)
                 VALUES ($1, $2)
                 RETURNING id, name, ip_address, config_file_path, created_at",
                &[&input.name, &input.ip_address],
            )
            .await;

        match result {
            Ok(row) => {
                let device = device_from_row(&row);
                debug!(device_id = device.id, "registered device");
                Ok(device)
            }
            Err(e) => {
                // PostgreSQL error code 23505 is unique_violation
                if let Some(db_err) = e.as_db_error() {
                    if db_err.code().code() == "23505" {
                        return Err(DomainError::DeviceAlreadyExists(input.name));
                    }
                }
                Err(DomainError::RepositoryError(e.into()))
            }
        }
    }

    #[instrument(skip(self, input), fields(device_id = input.device_id))]
    async fn update_ip(&self, input: UpdateIpInput) -> DomainResult<Device> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "UPDATE devices SET ip_address = $2
                 WHERE id = $1
                 RETURNING id, name, ip_address, config_file_path, created_at",
                &[&input.device_id, &input.ip_address],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        match row {
            Some(row) => {
                debug!("updated device ip address");
                Ok(device_from_row(&row))
            }
            None => Err(DomainError::DeviceNotFound(input.device_id.to_string())),
        }
    }

    #[instrument(skip(self, input), fields(device_id = input.device_id))]
    async fn set_config_path(&self, input: SetConfigPathInput) -> DomainResult<Device> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "UPDATE devices SET config_file_path = $2
                 WHERE id = $1
                 RETURNING id, name, ip_address, config_file_path, created_at",
                &[&input.device_id, &input.config_file_path],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        match row {
            Some(row) => {
                debug!(path = %input.config_file_path, "recorded device config path");
                Ok(device_from_row(&row))
            }
            None => Err(DomainError::DeviceNotFound(input.device_id.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, device_id: i64) -> DomainResult<Device> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let row = conn
            .query_opt(
                "DELETE FROM devices
                 WHERE id = $1
                 RETURNING id, name, ip_address, config_file_path, created_at",
                &[&device_id],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        match row {
            Some(row) => {
                debug!("deleted device");
                Ok(device_from_row(&row))
            }
            None => Err(DomainError::DeviceNotFound(device_id.to_string())),
        }
    }
}
