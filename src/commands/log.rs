//! Interactive job logging.
//!
//! Walks through the job form, optionally filling the address from supplied
//! GPS coordinates and writing the description with AI, then shows the jobs
//! of this session and offers the share menu for the new job.
//!
//! Jobs are kept in memory only. `--sheet` seeds the session with an
//! existing job sheet so the new job is listed among them.

use super::share::{deliver, ShareChannel};
use crate::{
    api::gemini::DescriptionGenerator,
    libs::{
        export::PdfExporter,
        job::{Job, JobDraft, JobLog},
        location::{capture_location, gps_address, FixedLocation},
        messages::Message,
        view::View,
    },
    msg_error, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Existing job sheet to list alongside the new job
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Latitude of the job site, fills the address with GPS coordinates
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Longitude of the job site
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Ask for keywords and let AI write the work description
    #[arg(long)]
    describe: bool,
}

/// Optional helpers offered by the job form.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct FormOptions {
    pub location: Option<FixedLocation>,
    pub describe: bool,
}

pub async fn cmd(args: LogArgs) -> Result<()> {
    let mut log = match &args.sheet {
        Some(path) => JobLog::from_sheet(path)?,
        None => JobLog::new(),
    };

    let theme = ColorfulTheme::default();
    let options = FormOptions {
        location: args.latitude.map(|_| FixedLocation::from_parts(args.latitude, args.longitude)),
        describe: args.describe,
    };
    let draft = fill_form(&theme, None, options).await?;

    let job = match log.add(draft) {
        Ok(job) => job.clone(),
        Err(e) => {
            msg_error!(Message::JobInvalid(e.to_string()));
            return Err(e.into());
        }
    };
    msg_success!(Message::JobAdded(job.client_name.clone()));

    msg_print!(Message::JobListHeader, true);
    View::jobs(log.jobs());

    share_menu(&theme, &job).await
}

/// Prompts for every job field. With `current`, its values are the defaults.
pub(super) async fn fill_form(theme: &ColorfulTheme, current: Option<&JobDraft>, options: FormOptions) -> Result<JobDraft> {
    let client_name = text_input(theme, Message::PromptClientName, current.map(|d| d.client_name.clone()), false)?;

    let mut coordinates = current.and_then(|d| d.coordinates);
    let mut address_default = current.map(|d| d.address.clone());
    if let Some(provider) = options.location {
        match capture_location(&provider).await {
            Ok(position) => {
                let address = gps_address(&position);
                msg_success!(Message::LocationCaptured(address.clone()));
                coordinates = Some(position);
                address_default = Some(address);
            }
            Err(e) => msg_error!(Message::LocationFailed(e.user_message())),
        }
    }
    let address = text_input(theme, Message::PromptAddress, address_default, false)?;

    let timestamp = prompt_date(theme, current.map(|d| d.timestamp))?;
    let time_in = text_input(theme, Message::PromptTimeIn, current.map(|d| d.time_in.clone()), false)?;
    let time_out = text_input(theme, Message::PromptTimeOut, current.map(|d| d.time_out.clone()), false)?;

    let generated = if options.describe {
        let keywords = text_input(theme, Message::PromptKeywords, None, false)?;
        describe(&keywords).await
    } else {
        None
    };
    let description = match generated {
        Some(description) => description,
        None => text_input(theme, Message::PromptDescription, current.map(|d| d.description.clone()), false)?,
    };

    let materials = text_input(theme, Message::PromptMaterials, current.map(|d| d.materials.clone()), true)?;
    let materials = if materials.trim() == "-" { String::new() } else { materials };

    Ok(JobDraft {
        client_name,
        address,
        description,
        materials,
        timestamp,
        time_in,
        time_out,
        coordinates,
    })
}

fn text_input(theme: &ColorfulTheme, prompt: Message, default: Option<String>, allow_empty: bool) -> Result<String> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt.to_string()).allow_empty(allow_empty);
    if let Some(default) = default.filter(|value| !value.is_empty()) {
        input = input.default(default);
    }
    Ok(input.interact_text()?)
}

fn prompt_date(theme: &ColorfulTheme, current: Option<NaiveDate>) -> Result<NaiveDate> {
    let default = current.unwrap_or_else(|| Local::now().date_naive()).format("%Y-%m-%d").to_string();
    let value: String = Input::with_theme(theme)
        .with_prompt(Message::PromptDate.to_string())
        .default(default)
        .validate_with(|input: &String| -> Result<(), String> {
            NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| Message::InvalidDate(input.clone()).to_string())
        })
        .interact_text()?;
    Ok(NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")?)
}

/// Expands keywords with AI. `None` leaves the description to be typed.
async fn describe(keywords: &str) -> Option<String> {
    let generated = match DescriptionGenerator::from_env() {
        Ok(generator) => {
            msg_print!(Message::GeneratingDescription);
            generator.generate(keywords).await
        }
        Err(e) => Err(e),
    };

    match generated {
        Ok(description) if !description.is_empty() => {
            msg_success!(Message::DescriptionGenerated);
            msg_print!(description);
            Some(description)
        }
        Ok(_) => None,
        Err(_) => {
            msg_error!(Message::GenerationFailed);
            None
        }
    }
}

/// Offers download and share actions for `job` until the user is done.
pub(super) async fn share_menu(theme: &ColorfulTheme, job: &Job) -> Result<()> {
    let items = [
        Message::ShareMenuDownload.to_string(),
        Message::ShareMenuWhatsApp.to_string(),
        Message::ShareMenuEmail.to_string(),
        Message::ShareMenuText.to_string(),
        Message::ShareMenuDone.to_string(),
    ];
    let exporter = PdfExporter::default();

    loop {
        let choice = Select::with_theme(theme)
            .with_prompt(Message::ShareMenuPrompt(job.client_name.clone()).to_string())
            .items(&items)
            .default(0)
            .interact()?;

        let channel = match choice {
            0 => ShareChannel::Pdf,
            1 => ShareChannel::Whatsapp,
            2 => ShareChannel::Email,
            3 => ShareChannel::Text,
            _ => return Ok(()),
        };
        deliver(job.clone(), channel, &exporter, None, false).await?;
    }
}
