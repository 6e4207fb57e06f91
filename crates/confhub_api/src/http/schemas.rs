//! JSON request/response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use common::domain::{ConfigSnapshot, Device, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRead {
    pub id: i64,
    pub name: String,
    pub ip_address: String,
    pub config_file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Device> for DeviceRead {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            ip_address: device.ip_address,
            config_file_path: device.config_file_path,
            created_at: device.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCreate {
    pub name: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceUpdate {
    pub ip_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfigRead {
    pub device_name: String,
    pub config_content: String,
}

impl From<ConfigSnapshot> for DeviceConfigRead {
    fn from(snapshot: ConfigSnapshot) -> Self {
        Self {
            device_name: snapshot.device_name,
            config_content: snapshot.content,
        }
    }
}

/// User as returned by the API; the password hash never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRead {
    pub id: String,
    pub email: String,
    pub username: String,
    pub putty_login: String,
    pub putty_password: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            putty_login: user.putty_login,
            putty_password: user.putty_password,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub putty_login: String,
    #[serde(default)]
    pub putty_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRead {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentialsUpdate {
    pub putty_login: String,
    pub putty_password: String,
}
