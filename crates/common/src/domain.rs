mod config_store;
mod device;
mod result;
mod user;

pub use config_store::*;
pub use device::*;
pub use result::*;
pub use user::*;
