pub mod confhub_api;
pub mod domain;
pub mod http;
