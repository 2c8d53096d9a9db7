//! Job editing.
//!
//! Re-opens the job form for one job of a sheet with its current values
//! filled in. The edited job replaces the old record in the session, the
//! session's jobs are listed again and the share menu is offered for the
//! edited job. The sheet file itself is left untouched.

use super::log::{fill_form, share_menu, FormOptions};
use super::share::select_job;
use crate::{
    libs::{
        job::{JobDraft, JobLog},
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::theme::ColorfulTheme;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Job sheet (JSON) holding one job or an array of jobs
    sheet: PathBuf,

    /// Id (or id prefix) of the job; required when the sheet holds several
    #[arg(long)]
    id: Option<String>,
}

pub async fn cmd(args: EditArgs) -> Result<()> {
    let mut log = JobLog::from_sheet(&args.sheet)?;
    let job = select_job(&log, args.id.as_deref())?;
    msg_info!(Message::SelectedJob(job.client_name.clone(), job.display_date()));

    let theme = ColorfulTheme::default();
    let draft = fill_form(&theme, Some(&JobDraft::from(&job)), FormOptions::default()).await?;

    let edited = match log.edit(job.id, draft) {
        Ok(edited) => edited.clone(),
        Err(e) => {
            msg_error!(Message::JobInvalid(e.to_string()));
            return Err(e.into());
        }
    };
    msg_success!(Message::JobUpdated(edited.client_name.clone()));

    msg_print!(Message::JobListHeader, true);
    View::jobs(log.jobs());

    share_menu(&theme, &edited).await
}
