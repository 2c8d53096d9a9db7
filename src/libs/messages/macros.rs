//! Message output macros with debug-aware routing.
//!
//! Every user-facing line in tradelog goes through one of these macros. In
//! normal mode they print to the console (`println!` / `eprintln!`). When
//! `TRADELOG_DEBUG` or `RUST_LOG` is set they go to `tracing` instead, so the
//! output interleaves with the structured diagnostics installed by the binary.
//!
//! ## Usage Examples
//!
//! ```rust
//! use tradelog::{msg_info, msg_success, msg_error};
//! use tradelog::libs::messages::Message;
//!
//! msg_success!(Message::ConfigSaved);
//! msg_info!(Message::GeneratingDescription, true);
//! msg_error!(Message::PdfNotGenerated);
//! ```
//!
//! ```rust
//! use tradelog::{msg_error_anyhow, msg_bail_anyhow};
//! use tradelog::libs::messages::Message;
//!
//! fn check() -> anyhow::Result<()> {
//!     let _error = msg_error_anyhow!(Message::ConfigParseError);
//!     msg_bail_anyhow!(Message::JobSheetEmpty);
//! }
//! ```

use std::sync::OnceLock;

/// Cached result of the debug mode check.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when tradelog runs with debug logging enabled.
///
/// Debug mode is on when either `TRADELOG_DEBUG` or `RUST_LOG` is present in
/// the environment. The answer is computed once and cached for the lifetime
/// of the process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("TRADELOG_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a plain message.
///
/// ```rust
/// # use tradelog::{msg_print, libs::messages::Message};
/// msg_print!(Message::JobListHeader);
/// msg_print!(Message::JobListHeader, true); // surrounded by blank lines
/// ```
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with a ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

/// Prints an error message with a ❌ prefix.
///
/// Goes to stderr in normal mode so scripts can separate it from output such
/// as generated links or summaries.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

/// Prints a warning message with a ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️  {}", $msg);
        } else {
            println!("⚠️  {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️  {}\n", $msg);
        } else {
            println!("\n⚠️  {}\n", $msg);
        }
    };
}

/// Prints an informational message with an ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️  {}", $msg);
        } else {
            println!("ℹ️  {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️  {}\n", $msg);
        } else {
            println!("\nℹ️  {}\n", $msg);
        }
    };
}

/// Emits a debug line. Silent unless debug mode is on.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
