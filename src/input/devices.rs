//! Capture device implementations.
//!
//! The file picker is the platform's native open dialog ([`DialogFilePicker`],
//! through `rfd`). Cameras, and optionally a scripted file picker, are
//! configured as external commands, for example
//! `["fswebcam", "--no-banner", "-"]`. A command's non-zero exit status or
//! empty output is treated as the user cancelling.

use super::{CaptureDevice, RawCapture};
use crate::domain::{BinSmartError, Result};
use rfd::FileDialog;
use std::path::Path;
use std::process::{Command, Stdio};

/// Extensions offered by the open dialog's image filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Native open dialog filtered to image files.
#[derive(Debug, Clone)]
pub struct DialogFilePicker {
    title: String,
}

impl Default for DialogFilePicker {
    fn default() -> Self {
        Self {
            title: "Select an image of the waste item".to_string(),
        }
    }
}

impl CaptureDevice for DialogFilePicker {
    fn capture(&self) -> Result<Option<RawCapture>> {
        tracing::debug!(title = %self.title, "opening file dialog");

        let Some(path) = FileDialog::new()
            .set_title(&self.title)
            .add_filter("image", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return Ok(None);
        };

        RawCapture::from_path(&path).map(Some)
    }
}

/// How a command's standard output should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutput {
    /// Stdout is the path of the chosen file (file pickers).
    Path,
    /// Stdout is the raw image bytes (cameras).
    Bytes,
}

/// A capture device that runs an external command.
#[derive(Debug, Clone)]
pub struct CommandDevice {
    program: String,
    args: Vec<String>,
    output: CommandOutput,
}

impl CommandDevice {
    /// Builds a device from an argv list.
    ///
    /// Returns `None` when `argv` is empty.
    #[must_use]
    pub fn new(argv: &[String], output: CommandOutput) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            output,
        })
    }
}

impl CaptureDevice for CommandDevice {
    fn capture(&self) -> Result<Option<RawCapture>> {
        tracing::debug!(program = %self.program, args = ?self.args, "running capture command");

        let result = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                BinSmartError::CaptureUnavailable(format!("cannot run {}: {e}", self.program))
            })?;

        if !result.status.success() {
            tracing::debug!(status = ?result.status.code(), "capture command exited unsuccessfully");
            return Ok(None);
        }

        match self.output {
            CommandOutput::Path => {
                let stdout = String::from_utf8_lossy(&result.stdout);
                let chosen = stdout.trim();
                if chosen.is_empty() {
                    return Ok(None);
                }
                RawCapture::from_path(Path::new(chosen)).map(Some)
            }
            CommandOutput::Bytes => {
                if result.stdout.is_empty() {
                    return Ok(None);
                }
                Ok(Some(RawCapture {
                    bytes: result.stdout,
                    file_name: None,
                }))
            }
        }
    }
}

/// Placeholder for a capture source that is not configured.
#[derive(Debug, Clone)]
pub struct UnavailableDevice {
    reason: String,
}

impl UnavailableDevice {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CaptureDevice for UnavailableDevice {
    fn capture(&self) -> Result<Option<RawCapture>> {
        Err(BinSmartError::CaptureUnavailable(self.reason.clone()))
    }
}
