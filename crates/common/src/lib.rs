pub mod auth;
pub mod diff;
pub mod domain;
pub mod garde;
pub mod http;
pub mod postgres;
pub mod storage;
pub mod telemetry;

// Re-export mocks when the testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use auth::{MockAuthTokenProvider, MockPasswordService};
#[cfg(any(test, feature = "testing"))]
pub use domain::{MockConfigStore, MockDeviceRepository, MockUserRepository};
