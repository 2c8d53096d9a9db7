//! Core library modules for tradelog.
//!
//! ## Features
//!
//! - **Job Model**: Job records, form validation and the in-memory job log
//! - **Formatting**: Durations and plain-text job summaries
//! - **Rendering**: Light-themed summary cards as SVG
//! - **Export**: Rasterization and single-page A4 PDF composition
//! - **Sharing**: Download, WhatsApp and email delivery with busy-state tracking
//! - **Infrastructure**: Configuration, data storage, messaging, location capture
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tradelog::libs::{card::SummaryCard, export::PdfExporter, job::JobLog};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let log = JobLog::from_sheet(std::path::Path::new("jobs.json"))?;
//! if let Some(job) = log.jobs().first() {
//!     let artifact = PdfExporter::default().export(&SummaryCard::render(job)).await;
//!     println!("exported: {}", artifact.is_some());
//! }
//! # Ok(())
//! # }
//! ```

pub mod card;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod job;
pub mod location;
pub mod messages;
pub mod platform;
pub mod share;
pub mod summary;
pub mod view;
