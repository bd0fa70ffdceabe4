//! Classification worker thread.
//!
//! The worker owns the [`Classifier`] and performs the blocking network call
//! off the interactive thread. It processes one message at a time; the state
//! machine never has more than one submission in flight.
//!
//! Dropping the [`WorkerHandle`] joins an idle worker. A worker still holding
//! a classification is detached instead, and the request dies with the
//! process.

use crate::client::Classifier;
use crate::domain::error::{BinSmartError, Result};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Processes worker messages against a classifier.
pub struct ClassificationWorker {
    classifier: Arc<dyn Classifier>,
}

impl ClassificationWorker {
    #[must_use]
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Handles one message. Returns `None` when the worker should stop.
    pub fn handle(&self, message: WorkerMessage) -> Option<WorkerResponse> {
        match message {
            WorkerMessage::Classify {
                submission,
                request,
                parent,
            } => parent.in_scope(|| {
                tracing::debug!(submission, "worker classifying image");
                let outcome = self.classifier.classify(&request);
                Some(WorkerResponse::Classified {
                    submission,
                    outcome,
                })
            }),
            WorkerMessage::Shutdown => {
                tracing::debug!("worker shutting down");
                None
            }
        }
    }

    /// Starts the worker on its own thread.
    ///
    /// Responses are converted with `From` and sent to `outbox`, so the
    /// caller can multiplex them with other inputs on a single channel.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Io`] if the thread cannot be spawned.
    pub fn spawn<R>(self, outbox: Sender<R>) -> Result<WorkerHandle>
    where
        R: From<WorkerResponse> + Send + 'static,
    {
        let (sender, inbox) = mpsc::channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let in_worker = Arc::clone(&pending);
        let thread = std::thread::Builder::new()
            .name("binsmart-worker".to_string())
            .spawn(move || self.run(&inbox, &outbox, &in_worker))?;

        Ok(WorkerHandle {
            sender,
            thread: Some(thread),
            pending,
        })
    }

    fn run<R: From<WorkerResponse>>(
        &self,
        inbox: &Receiver<WorkerMessage>,
        outbox: &Sender<R>,
        pending: &AtomicUsize,
    ) {
        while let Ok(message) = inbox.recv() {
            let classify = matches!(message, WorkerMessage::Classify { .. });
            let response = self.handle(message);
            if classify {
                pending.fetch_sub(1, Ordering::AcqRel);
            }
            let Some(response) = response else {
                break;
            };
            if outbox.send(R::from(response)).is_err() {
                tracing::debug!("response receiver dropped, stopping worker");
                break;
            }
        }
    }
}

/// Owner's side of a running worker. Dropping it stops the thread.
#[derive(Debug)]
pub struct WorkerHandle {
    sender: Sender<WorkerMessage>,
    thread: Option<JoinHandle<()>>,
    /// Classify messages posted but not yet answered.
    pending: Arc<AtomicUsize>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Worker`] if the worker has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        let classify = matches!(message, WorkerMessage::Classify { .. });
        if classify {
            self.pending.fetch_add(1, Ordering::AcqRel);
        }

        self.sender.send(message).map_err(|e| {
            if classify {
                self.pending.fetch_sub(1, Ordering::AcqRel);
            }
            BinSmartError::Worker(format!("worker is not running: {e}"))
        })
    }

    /// Whether a posted classification has not been answered yet.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.load(Ordering::Acquire) > 0
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        let _ = self.sender.send(WorkerMessage::Shutdown);
        let Some(thread) = self.thread.take() else {
            return;
        };

        if self.is_busy() {
            tracing::info!("abandoning in-flight classification");
            return;
        }
        if thread.join().is_err() {
            tracing::warn!("worker thread panicked");
        }
    }
}
