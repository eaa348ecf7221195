//! trendpost domain crate
//!
//! This crate contains the core pipeline logic following hexagonal architecture:
//! - `model`: Pipeline entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `prompts`: Stage-keyed prompt templates
//! - `sanitize`: Model output cleanup before display and publishing
//! - `usecases`: Digest building, draft composition, and the interaction loop

pub mod model;
pub mod ports;
pub mod prompts;
pub mod sanitize;
pub mod usecases;

pub use model::*;
pub use ports::*;
pub use prompts::{PromptStage, PromptTemplates};
pub use sanitize::sanitize;
