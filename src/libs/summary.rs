//! Plain-text job summaries.
//!
//! The text produced here is the email body and the WhatsApp fallback message,
//! so its layout is fixed. The "Materials Used" block is dropped completely
//! when the job has no materials.

use super::job::Job;

/// Formats a job as the fixed plain-text summary block.
///
/// ```rust
/// use chrono::NaiveDate;
/// use tradelog::libs::{job::Job, summary::format_job_as_text};
///
/// let job = Job {
///     id: uuid::Uuid::nil(),
///     client_name: "Jane Doe".into(),
///     address: "12 High Street".into(),
///     description: "Fixed leak".into(),
///     materials: String::new(),
///     timestamp: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     time_in: "09:00".into(),
///     time_out: "10:00".into(),
///     coordinates: None,
/// };
/// let text = format_job_as_text(&job);
/// assert!(text.starts_with("--- JOB SUMMARY ---"));
/// assert!(text.ends_with("Fixed leak"));
/// ```
pub fn format_job_as_text(job: &Job) -> String {
    let mut summary = format!(
        "--- JOB SUMMARY ---\n\
         \n\
         *Client:* {client}\n\
         *Address:* {address}\n\
         *Date:* {date}\n\
         *Time:* {time_in} - {time_out} ({duration})\n\
         \n\
         --- Work Performed ---\n\
         {description}\n",
        client = job.client_name,
        address = job.address,
        date = job.display_date(),
        time_in = job.time_in,
        time_out = job.time_out,
        duration = job.duration(),
        description = job.description,
    );

    if job.has_materials() {
        summary.push_str("\n--- Materials Used ---\n");
        summary.push_str(&job.materials);
    }

    summary.trim().to_string()
}

/// One-line caption that accompanies a shared PDF.
pub fn share_caption(job: &Job) -> String {
    format!("Here is the job summary for {}.", job.client_name)
}

/// Subject line for the summary email.
pub fn email_subject(job: &Job) -> String {
    format!("Job Summary: {}", job.client_name)
}
