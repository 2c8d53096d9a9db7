use crate::libs::formatter::format_duration;
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DurationArgs {
    /// Start time, HH:MM
    time_in: String,
    /// End time, HH:MM; earlier than the start means the next day
    time_out: String,
}

pub fn cmd(args: DurationArgs) -> Result<()> {
    msg_print!(format_duration(&args.time_in, &args.time_out));
    Ok(())
}
