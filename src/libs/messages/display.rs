//! Human-readable text for every [`Message`].
//!
//! All user-facing wording lives here so commands never format prose
//! themselves.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigReset => "Configuration reset to defaults".to_string(),
            Message::ConfigParseError => "Failed to parse configuration".to_string(),

            // === JOB MESSAGES ===
            Message::JobAdded(client) => format!("Job logged for {}", client),
            Message::JobUpdated(client) => format!("Job updated for {}", client),
            Message::JobInvalid(reason) => reason.clone(),
            Message::JobListHeader => "Job History".to_string(),
            Message::JobSheetEmpty => "No jobs logged yet".to_string(),
            Message::JobNotFound(id) => format!("No job matches id '{}'", id),
            Message::JobIdAmbiguous(id) => format!("More than one job matches id '{}', use a longer prefix", id),
            Message::MultipleJobsNeedId(count) => format!("The job sheet holds {} jobs, pick one with --id", count),
            Message::SelectedJob(client, date) => format!("Job for {} on {}", client, date),

            // === FORM PROMPTS ===
            Message::PromptClientName => "Client name".to_string(),
            Message::PromptAddress => "Address".to_string(),
            Message::PromptDate => "Date (YYYY-MM-DD)".to_string(),
            Message::PromptTimeIn => "Time in (HH:MM)".to_string(),
            Message::PromptTimeOut => "Time out (HH:MM)".to_string(),
            Message::PromptDescription => "Work performed".to_string(),
            Message::PromptKeywords => "Keywords for the work performed".to_string(),
            Message::PromptMaterials => "Materials used (optional, '-' for none)".to_string(),
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),

            // === LOCATION MESSAGES ===
            Message::LocationCaptured(address) => format!("Location captured: {}", address),
            Message::LocationFailed(reason) => reason.clone(),

            // === DESCRIPTION MESSAGES ===
            Message::GeneratingDescription => "Generating description...".to_string(),
            Message::DescriptionGenerated => "Description generated".to_string(),
            Message::GenerationFailed => "Failed to generate description. Please check your API key and try again.".to_string(),

            // === SHARE MESSAGES ===
            Message::ShareMenuPrompt(client) => format!("Share job summary for {}", client),
            Message::ShareMenuDownload => "Download PDF".to_string(),
            Message::ShareMenuWhatsApp => "Share to WhatsApp".to_string(),
            Message::ShareMenuEmail => "Email".to_string(),
            Message::ShareMenuText => "Print text summary".to_string(),
            Message::ShareMenuDone => "Done".to_string(),
            Message::PdfSaved(path) => format!("Job summary saved to {}", path),
            Message::PdfNotGenerated => "No PDF was produced".to_string(),
            Message::WhatsAppShared => "Job summary shared".to_string(),
            Message::WhatsAppDismissed => "Share was cancelled".to_string(),
            Message::WhatsAppTextFallback => "Opened WhatsApp with the text summary".to_string(),
            Message::WhatsAppFailed => "Could not open WhatsApp".to_string(),
            Message::EmailOpened(recipient) => format!("Opened email to {}", recipient),
            Message::NativeShareUnsupported => "File sharing is not available on this platform".to_string(),
        };
        write!(f, "{}", text)
    }
}
