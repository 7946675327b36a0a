//! Image Resizer
//!
//! Event handler that turns each image uploaded to the upload bucket into a
//! bounded JPEG thumbnail in the resize bucket and records the pair in the
//! metadata table.

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{HandlerError, Result};
pub use models::HandlerResult;
