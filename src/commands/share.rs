//! Export or share a single job.
//!
//! Picks one job out of a job sheet and delivers it through one channel:
//!
//! - **pdf**: renders the summary card, exports it to A4 PDF and saves it
//! - **whatsapp**: a text-only WhatsApp link (no native share sheet in a terminal)
//! - **email**: a `mailto:` link addressed to the configured recipient
//! - **text**: prints the plain-text summary
//!
//! Each invocation produces exactly one kind of artifact.

use crate::{
    libs::{
        config::Config,
        export::PdfExporter,
        job::{Job, JobLog},
        messages::Message,
        platform::DesktopPlatform,
        share::{ShareDispatcher, ShareOutcome},
        summary::format_job_as_text,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShareChannel {
    /// Save the job summary as a PDF
    Pdf,
    /// Open WhatsApp with the text summary
    Whatsapp,
    /// Open the mail client with the text summary
    Email,
    /// Print the text summary
    Text,
}

#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Job sheet (JSON) holding one job or an array of jobs
    sheet: PathBuf,

    /// How to deliver the summary
    #[arg(value_enum)]
    channel: ShareChannel,

    /// Id (or id prefix) of the job; required when the sheet holds several
    #[arg(long)]
    id: Option<String>,

    /// Directory for the PDF, overriding the configured download directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print links instead of opening them
    #[arg(long)]
    print_only: bool,
}

pub async fn cmd(args: ShareArgs) -> Result<()> {
    let log = JobLog::from_sheet(&args.sheet)?;
    let job = select_job(&log, args.id.as_deref())?;
    msg_info!(Message::SelectedJob(job.client_name.clone(), job.display_date()));

    deliver(job, args.channel, &PdfExporter::default(), args.output, args.print_only).await
}

/// Picks the job named by `id`, or the only job in the log.
pub fn select_job(log: &JobLog, id: Option<&str>) -> Result<Job> {
    match id {
        Some(id) => {
            let matches = log.matching(id);
            match matches.as_slice() {
                [job] => Ok((*job).clone()),
                [] => msg_bail_anyhow!(Message::JobNotFound(id.to_string())),
                _ => msg_bail_anyhow!(Message::JobIdAmbiguous(id.to_string())),
            }
        }
        None => match log.jobs() {
            [job] => Ok(job.clone()),
            [] => msg_bail_anyhow!(Message::JobSheetEmpty),
            jobs => msg_bail_anyhow!(Message::MultipleJobsNeedId(jobs.len())),
        },
    }
}

/// Delivers one job through one channel.
///
/// `exporter` is shared between calls. Its fonts are scanned on the first PDF
/// render, not when a dispatcher is built.
pub async fn deliver(job: Job, channel: ShareChannel, exporter: &PdfExporter, output: Option<PathBuf>, print_only: bool) -> Result<()> {
    let config = Config::read()?;
    let platform = DesktopPlatform::new(output.unwrap_or_else(|| config.download_dir())).print_only(print_only);
    let dispatcher = ShareDispatcher::new(job, &config, platform, exporter.clone());
    let status = dispatcher.status_handle();

    // Each action raises its busy flag before its first await, so the status
    // is readable as soon as the action has been polled once.
    let report_status = async {
        if let Some(text) = status.get().status_text() {
            msg_info!(text);
        }
    };

    match channel {
        ShareChannel::Text => msg_print!(format_job_as_text(dispatcher.job())),
        ShareChannel::Pdf => {
            let (saved, _) = tokio::join!(dispatcher.download(), report_status);
            match saved {
                Some(path) => msg_success!(Message::PdfSaved(path.display().to_string())),
                None => msg_warning!(Message::PdfNotGenerated),
            }
        }
        ShareChannel::Whatsapp => {
            let (outcome, _) = tokio::join!(dispatcher.share_to_whatsapp(), report_status);
            match outcome {
                ShareOutcome::FileShared => msg_success!(Message::WhatsAppShared),
                ShareOutcome::Dismissed => msg_info!(Message::WhatsAppDismissed),
                ShareOutcome::TextFallback => msg_success!(Message::WhatsAppTextFallback),
                ShareOutcome::Failed => msg_error!(Message::WhatsAppFailed),
            }
        }
        ShareChannel::Email => {
            dispatcher.email()?;
            msg_success!(Message::EmailOpened(config.recipient_email.clone()));
        }
    }

    Ok(())
}
