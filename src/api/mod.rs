//! Clients for external services.
//!
//! - **Gemini**: turns job keywords into a written job description

pub mod gemini;

pub use gemini::{DescriptionGenerator, GenerationError};
