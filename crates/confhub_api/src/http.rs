mod device_handlers;
mod pages;
mod router;
mod schemas;
mod user_handlers;

pub use router::*;
pub use schemas::*;
