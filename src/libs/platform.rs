//! Desktop implementation of [`SharePlatform`] used by the CLI.
//!
//! A terminal has no native share sheet, so file sharing always reports
//! unsupported and the dispatcher takes the text-link path. Links go to the
//! operating system's opener and downloads land in the configured directory.

use super::export::ExportedArtifact;
use super::share::{LinkTarget, SharePlatform, ShareRequest};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use std::env::consts::OS;
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    download_dir: PathBuf,
    print_only: bool,
}

impl DesktopPlatform {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            download_dir,
            print_only: false,
        }
    }

    /// Prints links instead of launching an application for them.
    pub fn print_only(mut self, print_only: bool) -> Self {
        self.print_only = print_only;
        self
    }

    pub fn download_dir(&self) -> &PathBuf {
        &self.download_dir
    }

    fn opener(url: &str) -> Command {
        match OS {
            "windows" => {
                let mut command = Command::new("cmd");
                // The empty argument is the window title expected by `start`.
                command.args(["/C", "start", ""]).arg(url);
                command
            }
            "macos" => {
                let mut command = Command::new("open");
                command.arg(url);
                command
            }
            _ => {
                let mut command = Command::new("xdg-open");
                command.arg(url);
                command
            }
        }
    }
}

impl SharePlatform for DesktopPlatform {
    fn can_share_files(&self, _artifact: &ExportedArtifact) -> bool {
        false
    }

    async fn share_files(&self, _request: ShareRequest<'_>) -> Result<()> {
        msg_bail_anyhow!(Message::NativeShareUnsupported)
    }

    fn open_url(&self, url: &str, target: LinkTarget) -> Result<()> {
        if self.print_only {
            msg_print!(url);
            return Ok(());
        }

        tracing::debug!(?target, "opening link");
        Self::opener(url).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
        Ok(())
    }

    async fn save_file(&self, artifact: &ExportedArtifact) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.download_dir).await?;
        let path = self.download_dir.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.bytes).await?;
        Ok(path)
    }
}
