//! Background worker for the classification call.
//!
//! The network exchange is the only operation that can take a long time, so
//! it runs on a worker thread while the interactive loop keeps accepting
//! input.
//!
//! # Architecture
//!
//! - `messages`: request/response types with tracing span propagation
//! - `handler`: worker implementation and thread management

pub mod handler;
pub mod messages;

pub use handler::{ClassificationWorker, WorkerHandle};
pub use messages::{WorkerMessage, WorkerResponse};
