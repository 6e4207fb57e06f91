mod context;
mod cookie;
mod error;
mod server;

pub use context::*;
pub use cookie::*;
pub use error::*;
pub use server::*;
