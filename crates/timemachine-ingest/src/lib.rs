//! Upload ingestion pipeline.
//!
//! Takes a batch of user-selected files through classify → preview/extract
//! → upload → create-record, tracking per-file status and isolating every
//! failure to the file that caused it. A batch never aborts early: each
//! file reaches a terminal status and the result reports both sides.

mod ingestor;
mod preview;
mod progress;

pub use ingestor::{BatchResult, Ingestor, RawFile, UploadFailure};
pub use preview::generate_preview;
pub use progress::{NoOpProgressSink, ProgressSink};
