//! User-facing messages.
//!
//! [`Message`] names every line tradelog shows; [`display`] holds the wording
//! and [`macros`] the `msg_*` output macros.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
