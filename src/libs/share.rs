//! Delivery of a job summary: PDF download, WhatsApp share and email.
//!
//! The [`ShareDispatcher`] owns one job and offers three actions:
//!
//! - **Download** exports the PDF and saves it under its suggested name.
//! - **WhatsApp** exports the PDF and hands it to the platform's native file
//!   share when the platform can take files. Otherwise it opens a `wa.me`
//!   link pre-filled with the plain-text summary.
//! - **Email** never exports. It opens a `mailto:` link with the plain-text
//!   summary as the body.
//!
//! Download and WhatsApp each raise a busy flag for their duration. While any
//! flag is up an interface should disable all three actions; the flags are
//! cleared on every exit path, including export failures.
//!
//! Share failures are not data-critical. They are logged and otherwise
//! swallowed, so a cancelled share sheet does not alarm the user.

use super::config::Config;
use super::export::{ExportedArtifact, PdfExporter, Rasterizer, SvgRasterizer};
use super::card::SummaryCard;
use super::job::Job;
use super::summary::{email_subject, format_job_as_text, share_caption};
use anyhow::Result;
use parking_lot::Mutex;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::PathBuf;
use std::sync::Arc;

/// Title given to natively shared files.
pub const SHARE_TITLE: &str = "Job Summary";

/// Base of the WhatsApp click-to-chat link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a query component the way browsers' `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `https://wa.me/?text=<encoded text>`
pub fn whatsapp_link(text: &str) -> String {
    format!("{}?text={}", WHATSAPP_BASE_URL, encode_component(text))
}

/// `mailto:<recipient>?cc=<cc>&subject=<encoded>&body=<encoded>`
///
/// The addresses are inserted as typed.
pub fn mailto_link(recipient: &str, cc: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?cc={}&subject={}&body={}",
        recipient,
        cc,
        encode_component(subject),
        encode_component(body)
    )
}

/// Where a link should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// A new window or tab; the current view stays put.
    NewContext,
    /// The current context, e.g. handing off to the mail client.
    SameContext,
}

/// Files and text handed to the native share sheet.
#[derive(Debug, Clone, Copy)]
pub struct ShareRequest<'a> {
    pub artifact: &'a ExportedArtifact,
    pub title: &'a str,
    pub text: &'a str,
}

/// Capabilities of the environment the dispatcher runs in.
#[allow(async_fn_in_trait)]
pub trait SharePlatform {
    /// Whether the native share sheet accepts this file.
    fn can_share_files(&self, artifact: &ExportedArtifact) -> bool;

    /// Hands files to the native share sheet. An error covers both a refusal
    /// by the OS and a user cancelling the sheet.
    async fn share_files(&self, request: ShareRequest<'_>) -> Result<()>;

    fn open_url(&self, url: &str, target: LinkTarget) -> Result<()>;

    /// Saves the artifact locally under its suggested name.
    async fn save_file(&self, artifact: &ExportedArtifact) -> Result<PathBuf>;
}

/// Which busy flags are raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareStatus {
    pub downloading: bool,
    pub sharing: bool,
}

impl ShareStatus {
    pub fn is_busy(&self) -> bool {
        self.downloading || self.sharing
    }

    /// Status line for the active operation, if any.
    pub fn status_text(&self) -> Option<&'static str> {
        if self.downloading {
            Some("Generating PDF...")
        } else if self.sharing {
            Some("Preparing to share...")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Activity {
    Downloading,
    Sharing,
}

/// Raises one busy flag and lowers it again when dropped.
struct BusyGuard {
    status: Arc<Mutex<ShareStatus>>,
    activity: Activity,
}

impl BusyGuard {
    fn raise(status: &Arc<Mutex<ShareStatus>>, activity: Activity) -> Self {
        set_flag(&mut status.lock(), activity, true);
        Self {
            status: Arc::clone(status),
            activity,
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        set_flag(&mut self.status.lock(), self.activity, false);
    }
}

fn set_flag(status: &mut ShareStatus, activity: Activity, value: bool) {
    match activity {
        Activity::Downloading => status.downloading = value,
        Activity::Sharing => status.sharing = value,
    }
}

/// Result of the WhatsApp action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The PDF went to the native share sheet.
    FileShared,
    /// The native share was refused or cancelled.
    Dismissed,
    /// A text-only WhatsApp link was opened.
    TextFallback,
    /// The fallback link could not be opened either.
    Failed,
}

/// Read-only handle on a dispatcher's busy flags.
#[derive(Debug, Clone)]
pub struct StatusHandle(Arc<Mutex<ShareStatus>>);

impl StatusHandle {
    pub fn get(&self) -> ShareStatus {
        *self.0.lock()
    }
}

/// Share actions for one job.
pub struct ShareDispatcher<P: SharePlatform, R: Rasterizer = SvgRasterizer> {
    job: Job,
    user_email: String,
    recipient_email: String,
    platform: P,
    exporter: PdfExporter<R>,
    status: Arc<Mutex<ShareStatus>>,
}

impl<P: SharePlatform, R: Rasterizer> ShareDispatcher<P, R> {
    pub fn new(job: Job, config: &Config, platform: P, exporter: PdfExporter<R>) -> Self {
        Self {
            job,
            user_email: config.user_email.clone(),
            recipient_email: config.recipient_email.clone(),
            platform,
            exporter,
            status: Arc::new(Mutex::new(ShareStatus::default())),
        }
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn status(&self) -> ShareStatus {
        *self.status.lock()
    }

    /// A handle that can watch the busy flags while an action runs.
    pub fn status_handle(&self) -> StatusHandle {
        StatusHandle(Arc::clone(&self.status))
    }

    pub fn is_busy(&self) -> bool {
        self.status().is_busy()
    }

    /// Suggested file name of the exported PDF.
    pub fn file_name(&self) -> String {
        super::export::export_file_name(&self.job.client_name, &self.job.iso_date())
    }

    /// Exports the PDF and saves it locally.
    ///
    /// Returns the saved path, or `None` if export or saving failed.
    pub async fn download(&self) -> Option<PathBuf> {
        let _busy = BusyGuard::raise(&self.status, Activity::Downloading);

        let artifact = self.exporter.export(&SummaryCard::render(&self.job)).await?;
        match self.platform.save_file(&artifact).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "saved job summary");
                Some(path)
            }
            Err(e) => {
                tracing::error!(error = %e, file = %artifact.file_name, "failed to save job summary");
                None
            }
        }
    }

    /// Shares the PDF through the native share sheet, falling back to a
    /// text-only WhatsApp link.
    pub async fn share_to_whatsapp(&self) -> ShareOutcome {
        let _busy = BusyGuard::raise(&self.status, Activity::Sharing);

        let artifact = self.exporter.export(&SummaryCard::render(&self.job)).await;
        if let Some(artifact) = artifact.as_ref().filter(|a| self.platform.can_share_files(a)) {
            let caption = share_caption(&self.job);
            let request = ShareRequest {
                artifact,
                title: SHARE_TITLE,
                text: &caption,
            };
            return match self.platform.share_files(request).await {
                Ok(()) => ShareOutcome::FileShared,
                Err(e) => {
                    tracing::debug!(error = %e, "error sharing");
                    ShareOutcome::Dismissed
                }
            };
        }

        let link = whatsapp_link(&format_job_as_text(&self.job));
        match self.platform.open_url(&link, LinkTarget::NewContext) {
            Ok(()) => ShareOutcome::TextFallback,
            Err(e) => {
                tracing::error!(error = %e, "failed to open WhatsApp link");
                ShareOutcome::Failed
            }
        }
    }

    /// The `mailto:` link for this job.
    pub fn email_link(&self) -> String {
        mailto_link(
            &self.recipient_email,
            &self.user_email,
            &email_subject(&self.job),
            &format_job_as_text(&self.job),
        )
    }

    /// Opens the mail client with the summary. Synchronous, no busy state.
    pub fn email(&self) -> Result<String> {
        let link = self.email_link();
        self.platform.open_url(&link, LinkTarget::SameContext)?;
        Ok(link)
    }
}
