mod device_service;
mod user_service;

pub use device_service::*;
pub use user_service::*;
