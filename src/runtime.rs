//! Runtime shim between the terminal and the state machine.
//!
//! The runtime owns the [`AppState`], the capture devices and the worker. It
//! maps user commands and worker responses to [`Event`]s, executes the
//! resulting [`Action`]s, and keeps messages that live outside the state
//! machine: one-time notices and the last inline error.
//!
//! Everything arrives on one channel of [`RuntimeMessage`]s, so input lines
//! keep being handled while a classification is in flight.
//!
//! ```text
//! stdin thread ──Input(line)──┐
//!                             ├──▶ Runtime::handle_message ──▶ handle_event
//! worker thread ──Worker(..)──┘                                    │
//!                                 execute_action ◀──── Vec<Action> ┘
//! ```

use crate::app::{handle_event, Action, AppState, Event, Phase};
use crate::client::Classifier;
use crate::domain::error::{BinSmartError, Result};
use crate::domain::{ClassificationFailure, Outcome};
use crate::infrastructure::expand_tilde;
use crate::input::InputAcquisition;
use crate::presenter::{self, ResultView, ABOUT_TEXT, LOW_CONFIDENCE_ADVISORY};
use crate::ui::{render, ScreenViewModel, Theme};
use crate::worker::{ClassificationWorker, WorkerHandle, WorkerMessage, WorkerResponse};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Help text for the interactive shell.
pub const HELP_TEXT: &str = "Commands: open <path> | file | camera | submit | reset | status | about | help | quit";

/// Everything the runtime reacts to.
#[derive(Debug)]
pub enum RuntimeMessage {
    /// A line typed by the user.
    Input(String),
    /// Standard input reached end of file.
    InputClosed,
    /// The worker finished a request.
    Worker(WorkerResponse),
}

impl From<WorkerResponse> for RuntimeMessage {
    fn from(response: WorkerResponse) -> Self {
        Self::Worker(response)
    }
}

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    File,
    Camera,
    Submit,
    Reset,
    Status,
    About,
    Help,
    Quit,
    Blank,
    Unknown(String),
}

impl Command {
    /// Parses one input line. Command words are case-insensitive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use binsmart::runtime::Command;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(Command::parse(" submit "), Command::Submit);
    /// assert_eq!(Command::parse("open /tmp/can.jpg"), Command::Open(PathBuf::from("/tmp/can.jpg")));
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Self::Blank,
            "open" | "o" if !rest.is_empty() => Self::Open(expand_tilde(rest)),
            "file" | "f" | "upload" => Self::File,
            "camera" | "c" | "photo" => Self::Camera,
            "submit" | "s" | "classify" => Self::Submit,
            "reset" | "r" | "clear" => Self::Reset,
            "status" => Self::Status,
            "about" => Self::About,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Whether the loop should keep going, and whether to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue { redraw: bool },
    Quit,
}

/// Final result of one classification, as printed by one-shot mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Accepted { result: ResultView },
    Rejected { advisory: &'static str },
    Failed { message: String },
}

impl Report {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Owns the state machine and executes its actions.
pub struct Runtime {
    state: AppState,
    input: InputAcquisition,
    worker: WorkerHandle,
    notices: Vec<String>,
    inline_error: Option<String>,
    last_report: Option<Report>,
}

impl Runtime {
    /// Starts the worker and returns a runtime around a fresh state.
    ///
    /// Worker responses are delivered to `outbox` as
    /// [`RuntimeMessage::Worker`].
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Io`] if the worker thread cannot start.
    pub fn new(
        input: InputAcquisition,
        classifier: Arc<dyn Classifier>,
        outbox: Sender<RuntimeMessage>,
    ) -> Result<Self> {
        let worker = ClassificationWorker::new(classifier).spawn(outbox)?;
        Ok(Self {
            state: AppState::new(),
            input,
            worker,
            notices: vec![],
            inline_error: None,
            last_report: None,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Outcome of the most recently completed submission.
    #[must_use]
    pub const fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// Notices not yet shown.
    #[must_use]
    pub fn pending_notices(&self) -> &[String] {
        &self.notices
    }

    /// Error shown inline on the next render, if any.
    #[must_use]
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    /// Feeds one event through the state machine and executes its actions.
    ///
    /// Handler errors become the inline error. Returns whether a redraw is
    /// needed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let completes_submission = matches!(event, Event::WorkerResponse(_));

        match handle_event(&mut self.state, event) {
            Ok((changed, actions)) => {
                if changed {
                    self.inline_error = None;
                }
                let acted = !actions.is_empty();
                for action in actions {
                    self.execute_action(action);
                }
                if changed && completes_submission {
                    self.record_report();
                }
                changed || acted
            }
            Err(e) => {
                tracing::debug!(error = %e, "event rejected");
                self.inline_error = Some(e.user_message());
                true
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Classify {
                submission,
                request,
            } => {
                let span = tracing::info_span!("submission", submission);
                let posted = span.in_scope(|| {
                    tracing::debug!(file_name = %request.file_name, "posting request to worker");
                    self.worker.post(WorkerMessage::classify(submission, request))
                });

                if let Err(e) = posted {
                    tracing::error!(error = %e, "failed to reach worker");
                    let outcome =
                        Outcome::Failed(ClassificationFailure::Transport(e.to_string()));
                    self.dispatch(Event::WorkerResponse(WorkerResponse::Classified {
                        submission,
                        outcome,
                    }));
                }
            }
            Action::Advise(advisory) => {
                tracing::debug!(?advisory, "queueing advisory");
                self.notices.push(advisory.message().to_string());
            }
        }
    }

    fn record_report(&mut self) {
        let report = match self.state.phase() {
            Phase::Succeeded { response, .. } => Report::Accepted {
                result: presenter::present(response),
            },
            Phase::Failed { message, .. } => Report::Failed {
                message: message.clone(),
            },
            Phase::Empty => Report::Rejected {
                advisory: LOW_CONFIDENCE_ADVISORY,
            },
            Phase::Ready(_) | Phase::Submitting { .. } => return,
        };
        self.last_report = Some(report);
    }

    /// Runs one acquisition and feeds the asset to the state machine.
    ///
    /// Cancelling the picker changes nothing. Other failures become the
    /// inline error. Returns whether a redraw is needed.
    pub fn acquire(&mut self, command: &Command) -> bool {
        if self.state.is_submitting() {
            self.notices
                .push("Please wait for the current classification to finish.".to_string());
            return true;
        }

        let acquired = match command {
            Command::Open(path) => self.input.acquire_from_path(path),
            Command::File => self.input.acquire_from_file(),
            Command::Camera => self.input.acquire_from_camera(),
            _ => return false,
        };

        match acquired {
            Ok(asset) => self.dispatch(Event::ImageAcquired(asset)),
            Err(BinSmartError::NoFileSelected) => {
                tracing::debug!("capture cancelled");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "image acquisition failed");
                self.inline_error = Some(e.user_message());
                true
            }
        }
    }

    /// Executes one interactive command.
    pub fn handle_command(&mut self, command: Command) -> Flow {
        let redraw = match command {
            Command::Open(_) | Command::File | Command::Camera => self.acquire(&command),
            Command::Submit => self.dispatch(Event::Submit),
            Command::Reset => self.dispatch(Event::Reset),
            Command::Status => true,
            Command::About => {
                self.notices.push(ABOUT_TEXT.to_string());
                true
            }
            Command::Help => {
                self.notices.push(HELP_TEXT.to_string());
                true
            }
            Command::Quit => return Flow::Quit,
            Command::Blank => false,
            Command::Unknown(line) => {
                self.notices
                    .push(format!("Unknown command: {line}. Type 'help' for a list."));
                true
            }
        };
        Flow::Continue { redraw }
    }

    /// Handles one message from the shared channel.
    pub fn handle_message(&mut self, message: RuntimeMessage) -> Flow {
        match message {
            RuntimeMessage::Input(line) => self.handle_command(Command::parse(&line)),
            RuntimeMessage::InputClosed => Flow::Quit,
            RuntimeMessage::Worker(response) => Flow::Continue {
                redraw: self.dispatch(Event::WorkerResponse(response)),
            },
        }
    }

    /// The screen to draw now. Queued notices and the inline error are
    /// handed over and will not be shown again.
    ///
    /// The inline error is about the latest command, so it takes the place
    /// of a committed failure message for this one screen.
    pub fn take_view(&mut self) -> ScreenViewModel {
        let mut vm = self.state.compute_viewmodel();
        vm.notices = std::mem::take(&mut self.notices);
        if let Some(error) = self.inline_error.take() {
            vm.error = Some(error);
        }
        vm
    }

    /// Blocks until the in-flight submission completes.
    ///
    /// Input lines that arrive meanwhile are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Worker`] if the channel closes or `timeout`
    /// elapses first.
    pub fn wait_for_outcome(
        &mut self,
        inbox: &Receiver<RuntimeMessage>,
        timeout: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;

        while self.state.is_submitting() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match inbox.recv_timeout(remaining) {
                Ok(RuntimeMessage::Worker(response)) => {
                    self.dispatch(Event::WorkerResponse(response));
                }
                Ok(other) => tracing::debug!(message = ?other, "ignoring message while waiting"),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(BinSmartError::Worker(
                        "timed out waiting for classification".to_string(),
                    ))
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(BinSmartError::Worker("worker channel closed".to_string()))
                }
            }
        }
        Ok(())
    }

    /// Acquires `path`, submits it and waits for the outcome.
    ///
    /// # Errors
    ///
    /// Acquisition and validation errors are returned as-is; see also
    /// [`Runtime::wait_for_outcome`].
    pub fn classify_path(
        &mut self,
        path: PathBuf,
        inbox: &Receiver<RuntimeMessage>,
        timeout: Duration,
    ) -> Result<Report> {
        let asset = self.input.acquire_from_path(&path)?;
        handle_event(&mut self.state, Event::ImageAcquired(asset))?;

        let (_, actions) = handle_event(&mut self.state, Event::Submit)?;
        for action in actions {
            self.execute_action(action);
        }

        self.wait_for_outcome(inbox, timeout)?;
        self.last_report
            .clone()
            .ok_or_else(|| BinSmartError::Worker("no outcome recorded".to_string()))
    }

    /// Runs the interactive loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Io`] if writing to `out` fails.
    pub fn run<W: Write>(
        &mut self,
        inbox: &Receiver<RuntimeMessage>,
        theme: &Theme,
        out: &mut W,
    ) -> Result<()> {
        let _span = tracing::info_span!("interactive").entered();
        self.notices.push(HELP_TEXT.to_string());
        self.draw(theme, out)?;

        while let Ok(message) = inbox.recv() {
            match self.handle_message(message) {
                Flow::Quit => break,
                Flow::Continue { redraw: true } => self.draw(theme, out)?,
                Flow::Continue { redraw: false } => {
                    write!(out, "> ")?;
                    out.flush()?;
                }
            }
        }

        tracing::info!("interactive session ended");
        Ok(())
    }

    fn draw<W: Write>(&mut self, theme: &Theme, out: &mut W) -> Result<()> {
        let vm = self.take_view();
        writeln!(out)?;
        render(&vm, theme, out)?;
        write!(out, "> ")?;
        out.flush()?;
        Ok(())
    }
}

/// Forwards lines from `reader` to `outbox` on a background thread.
///
/// Sends [`RuntimeMessage::InputClosed`] at end of input.
///
/// # Errors
///
/// Returns [`BinSmartError::Io`] if the thread cannot be spawned.
pub fn spawn_line_reader<R>(reader: R, outbox: Sender<RuntimeMessage>) -> Result<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("binsmart-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else { break };
                if outbox.send(RuntimeMessage::Input(line)).is_err() {
                    return;
                }
            }
            let _ = outbox.send(RuntimeMessage::InputClosed);
        })?;
    Ok(())
}
