#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigReset,
    ConfigParseError,

    // === JOB MESSAGES ===
    JobAdded(String), // client name
    JobUpdated(String), // client name
    JobInvalid(String),
    JobListHeader,
    JobSheetEmpty,
    JobNotFound(String),        // id or prefix
    JobIdAmbiguous(String),     // prefix
    MultipleJobsNeedId(usize),  // job count
    SelectedJob(String, String), // client, date

    // === FORM PROMPTS ===
    PromptClientName,
    PromptAddress,
    PromptDate,
    PromptTimeIn,
    PromptTimeOut,
    PromptDescription,
    PromptKeywords,
    PromptMaterials,
    InvalidDate(String),

    // === LOCATION MESSAGES ===
    LocationCaptured(String), // address text
    LocationFailed(String),   // user-facing error

    // === DESCRIPTION MESSAGES ===
    GeneratingDescription,
    DescriptionGenerated,
    GenerationFailed,

    // === SHARE MESSAGES ===
    ShareMenuPrompt(String), // client name
    ShareMenuDownload,
    ShareMenuWhatsApp,
    ShareMenuEmail,
    ShareMenuText,
    ShareMenuDone,
    PdfSaved(String), // path
    PdfNotGenerated,
    WhatsAppShared,
    WhatsAppDismissed,
    WhatsAppTextFallback,
    WhatsAppFailed,
    EmailOpened(String), // recipient
    NativeShareUnsupported,
}
