//! Data model and shared policy for the fluid diagnoser.
//!
//! - [`snapshot`]: the collector's view of cluster state
//! - [`scoring`]: confidence tiers every rule scores against
//! - [`hypothesis`] / [`result`]: engine output
//! - [`codec`]: JSON / YAML interchange

pub mod codec;
pub mod config;
pub mod error;
pub mod hypothesis;
pub mod result;
pub mod scoring;
pub mod snapshot;

pub use codec::Format;
pub use config::{Config, EvaluationMode, OutputFormat};
pub use error::*;
pub use hypothesis::*;
pub use result::*;
pub use scoring::*;
pub use snapshot::*;
