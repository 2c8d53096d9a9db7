//! Job records and the in-memory job log.
//!
//! A [`Job`] is one logged work visit. Jobs are never edited in place: an edit
//! produces a whole new record that replaces the old one by id, so a job that
//! is being exported or shared is never seen half-updated.
//!
//! The [`JobLog`] keeps the jobs of the current session ordered by visit date,
//! newest first. Nothing here touches disk except [`JobLog::from_sheet`], which
//! reads a user-supplied JSON job sheet. Edits made in a session are not
//! written back to the sheet.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tradelog::libs::job::{JobDraft, JobLog};
//!
//! let mut log = JobLog::new();
//! let draft = JobDraft {
//!     client_name: "Jane Doe".into(),
//!     address: "12 High Street".into(),
//!     description: "Replaced kitchen tap".into(),
//!     materials: String::new(),
//!     timestamp: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
//!     time_in: "09:00".into(),
//!     time_out: "10:30".into(),
//!     coordinates: None,
//! };
//! let job = log.add(draft)?;
//! assert_eq!(job.duration(), "1 hour 30 minutes");
//! # Ok::<(), tradelog::libs::job::JobError>(())
//! ```

use crate::libs::formatter::{format_duration, parse_time_of_day};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while creating, replacing or loading jobs.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("All fields except materials are required.")]
    MissingFields,
    #[error("Invalid {field} '{value}', expected HH:MM")]
    InvalidTime { field: &'static str, value: String },
    #[error("Job {0} not found")]
    NotFound(Uuid),
    #[error("Job {0} appears more than once in the job sheet")]
    DuplicateId(Uuid),
    #[error("Failed to read job sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse job sheet: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A position captured at the job site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One logged work visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub client_name: String,
    pub address: String,
    pub description: String,
    /// Empty when no materials were used.
    #[serde(default)]
    pub materials: String,
    /// Calendar date of the visit.
    pub timestamp: NaiveDate,
    pub time_in: String,
    pub time_out: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// The contents of the job form before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub client_name: String,
    pub address: String,
    pub description: String,
    #[serde(default)]
    pub materials: String,
    pub timestamp: NaiveDate,
    pub time_in: String,
    pub time_out: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl JobDraft {
    /// Checks the form rules: everything but materials is required and both
    /// times must be "HH:MM".
    pub fn validate(&self) -> Result<(), JobError> {
        let required = [&self.client_name, &self.address, &self.description, &self.time_in, &self.time_out];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(JobError::MissingFields);
        }

        validate_time("time in", &self.time_in)?;
        validate_time("time out", &self.time_out)?;
        Ok(())
    }
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        JobDraft {
            client_name: job.client_name.clone(),
            address: job.address.clone(),
            description: job.description.clone(),
            materials: job.materials.clone(),
            timestamp: job.timestamp,
            time_in: job.time_in.clone(),
            time_out: job.time_out.clone(),
            coordinates: job.coordinates,
        }
    }
}

fn validate_time(field: &'static str, value: &str) -> Result<(), JobError> {
    match parse_time_of_day(value) {
        Some(_) => Ok(()),
        None => Err(JobError::InvalidTime {
            field,
            value: value.to_string(),
        }),
    }
}

impl Job {
    /// Creates a job from a validated draft, assigning a fresh id.
    pub fn from_draft(draft: JobDraft) -> Result<Self, JobError> {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// A new record with this job's id and the draft's contents.
    pub fn revise(&self, draft: JobDraft) -> Result<Self, JobError> {
        Self::with_id(self.id, draft)
    }

    fn with_id(id: Uuid, draft: JobDraft) -> Result<Self, JobError> {
        draft.validate()?;
        Ok(Job {
            id,
            client_name: draft.client_name,
            address: draft.address,
            description: draft.description,
            materials: draft.materials,
            timestamp: draft.timestamp,
            time_in: draft.time_in,
            time_out: draft.time_out,
            coordinates: draft.coordinates,
        })
    }

    pub fn has_materials(&self) -> bool {
        !self.materials.is_empty()
    }

    /// Human-readable time on site, e.g. `"8 hours 30 minutes"`.
    pub fn duration(&self) -> String {
        format_duration(&self.time_in, &self.time_out)
    }

    /// Short locale-style date, `M/D/YYYY` without zero padding.
    pub fn display_date(&self) -> String {
        self.timestamp.format("%-m/%-d/%Y").to_string()
    }

    /// ISO calendar date, `YYYY-MM-DD`.
    pub fn iso_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Jobs of the current session, newest visit first.
#[derive(Debug, Default, Clone)]
pub struct JobLog {
    jobs: Vec<Job>,
}

impl JobLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON job sheet holding either one job or an array of jobs.
    pub fn from_sheet(path: &Path) -> Result<Self, JobError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, JobError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Sheet {
            Many(Vec<Job>),
            One(Box<Job>),
        }

        let jobs = match serde_json::from_str::<Sheet>(content)? {
            Sheet::Many(jobs) => jobs,
            Sheet::One(job) => vec![*job],
        };

        let mut log = JobLog::new();
        for job in jobs {
            if log.get(job.id).is_some() {
                return Err(JobError::DuplicateId(job.id));
            }
            log.jobs.push(job);
        }
        log.sort();
        Ok(log)
    }

    /// Validates the draft, assigns an id and inserts the new job.
    pub fn add(&mut self, draft: JobDraft) -> Result<&Job, JobError> {
        let job = Job::from_draft(draft)?;
        let id = job.id;
        self.jobs.insert(0, job);
        self.sort();
        self.get(id).ok_or(JobError::NotFound(id))
    }

    /// Replaces the job with the same id by `job`.
    pub fn update(&mut self, job: Job) -> Result<(), JobError> {
        let slot = self.jobs.iter_mut().find(|existing| existing.id == job.id).ok_or(JobError::NotFound(job.id))?;
        *slot = job;
        self.sort();
        Ok(())
    }

    /// Validates the edited form and replaces job `id` with it.
    pub fn edit(&mut self, id: Uuid, draft: JobDraft) -> Result<&Job, JobError> {
        let revised = self.get(id).ok_or(JobError::NotFound(id))?.revise(draft)?;
        self.update(revised)?;
        self.get(id).ok_or(JobError::NotFound(id))
    }

    pub fn get(&self, id: Uuid) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Jobs whose id starts with `prefix`, with or without hyphens.
    pub fn matching(&self, prefix: &str) -> Vec<&Job> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.jobs
            .iter()
            .filter(|job| job.id.hyphenated().to_string().starts_with(&prefix) || job.id.simple().to_string().starts_with(&prefix))
            .collect()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    // Stable sort: jobs on the same date keep their relative order.
    fn sort(&mut self) {
        self.jobs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}
