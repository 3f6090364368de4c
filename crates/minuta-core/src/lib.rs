pub mod config;
pub mod error;
pub mod types;

pub use config::MinutaConfig;
pub use error::{MinutaError, Result};
pub use types::*;
