//! # Tradelog - job logging and summary export for tradespeople
//!
//! Records job visits (client, address, date, time in/out, work performed,
//! materials, optional GPS position) and turns a single job into something
//! that can be handed to a client or the office.
//!
//! ## Features
//!
//! - **Job Log**: In-memory job collection ordered by visit date, newest first
//! - **Durations**: "HH:MM" time pairs as readable durations, overnight shifts included
//! - **Text Summaries**: Fixed-layout plain text for email bodies and messaging
//! - **PDF Export**: Light-themed summary card rasterized at 2x onto an A4 page
//! - **Sharing**: PDF download, WhatsApp (native file share or text link) and email links
//! - **AI Descriptions**: Job descriptions written from a few keywords
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tradelog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
