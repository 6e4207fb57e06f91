mod fs_config_store;

pub use fs_config_store::*;
