mod client;
mod config;
mod device_repository;
mod schema;
mod user_repository;

pub use client::*;
pub use config::*;
pub use device_repository::*;
pub use user_repository::*;
