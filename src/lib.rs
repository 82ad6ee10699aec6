//! Statline - record-oriented CSV statistics writer
//!
//! Statline captures a fixed set of named fields and emits them as a header
//! line followed by repeated comma-separated value rows, so instrumentation
//! code can write tabular statistics without maintaining a schema declaration
//! separately from the emission code.
//!
//! # Architecture
//!
//! - **Two-phase writer**: field names are captured until the first
//!   `finalize()`, values stream directly to the sink afterwards
//! - **Single insertion entry point**: one `push()` accepts both name and
//!   value tokens, so the same call site runs in the labeling pass and in
//!   every value pass
//! - **Compound keys**: `Latency[2][1]`-style labels for statistics indexed
//!   by channel, rank, or bank
//! - **Sink-agnostic**: writes to anything `io::Write`; the embedder owns
//!   buffering and sink lifetime

pub mod error;
pub mod key;
pub mod writer;

// Re-export commonly used types
pub use error::KeyError;
pub use key::{compound_key, try_compound_key, MAX_KEY_LEN};
pub use writer::{CsvWriter, Field, Value};

/// Result type used throughout statline
pub type Result<T> = anyhow::Result<T>;
