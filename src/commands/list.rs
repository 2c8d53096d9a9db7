use crate::{
    libs::{job::JobLog, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Job sheet (JSON) holding one job or an array of jobs
    sheet: PathBuf,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let log = JobLog::from_sheet(&args.sheet)?;
    if log.is_empty() {
        msg_info!(Message::JobSheetEmpty);
        return Ok(());
    }

    msg_print!(Message::JobListHeader, true);
    View::jobs(log.jobs());
    Ok(())
}
