//! Error types for the form filling library.
//!
//! This module defines all error types that can occur while extracting field
//! metadata, writing intermediate payloads, and driving the form engine.

use std::path::PathBuf;

/// Result type alias for form filling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during form extraction and filling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The field dump process could not be run or exited abnormally
    #[error("Field extraction failed: {0}")]
    Extraction(#[source] EngineFailure),

    /// The fill process could not be run or exited abnormally.
    ///
    /// The intermediate payload file is left on disk for diagnosis.
    #[error("Form fill failed: {0}")]
    FillInvocation(#[source] EngineFailure),

    /// The output document was produced but the intermediate payload could not be removed
    #[error("Form was filled but removing {} failed: {source}", path.display())]
    Cleanup {
        /// Path of the intermediate payload file
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Writing the intermediate payload file failed
    #[error("Failed to write payload {}: {source}", path.display())]
    Payload {
        /// Path of the intermediate payload file
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied field name pattern did not compile
    #[error("Invalid field name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Field values could not be read from JSON
    #[error("Invalid field value JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single form engine invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum EngineFailure {
    /// The engine process could not be started
    #[error("could not launch form engine: {0}")]
    Spawn(#[source] std::io::Error),

    /// The engine process ran and reported failure through its exit status
    #[error("form engine exited with status {}: {stderr}", describe_code(.code))]
    Status {
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
        /// Captured standard error, lossily decoded
        stderr: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

impl Error {
    /// Whether the destination document was written despite the error.
    ///
    /// Only a [`Error::Cleanup`] failure happens after the form engine succeeded.
    pub fn output_produced(&self) -> bool {
        matches!(self, Error::Cleanup { .. })
    }
}
