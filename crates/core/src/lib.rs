// Toolinfo Core - Adapter contract, domain values and ports
// NO process or OS dependencies (see toolinfo-infra-system)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
