//! Preference setup.
//!
//! Prompts for the two email addresses used by the email action and the
//! directory PDFs are saved to, then writes them to the config file.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Restore the default placeholders without prompting
    #[arg(short, long)]
    reset: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.reset {
        Config::default().save()?;
        msg_success!(Message::ConfigReset);
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
