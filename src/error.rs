//! Error types for the `videoinfo` crate.
//!
//! This module defines [`InspectError`], the error type returned by every
//! fallible operation in the crate. The two variants that matter to the
//! command line are [`InspectError::Open`] and [`InspectError::Probe`]; each
//! carries the path and FFmpeg's own description of the failure.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// Process exit status for an invalid invocation or an output failure.
pub const EXIT_FAILURE: i32 = 1;
/// Process exit status when the container could not be opened.
pub const EXIT_OPEN_FAILED: i32 = 2;
/// Process exit status when stream information could not be read.
pub const EXIT_PROBE_FAILED: i32 = 3;

/// The unified error type for all `videoinfo` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InspectError {
    /// The file could not be opened or its container was not recognised.
    #[error("Failed to open media file at {path}: {reason}")]
    Open {
        /// Path that was passed to [`crate::MediaFile::open`].
        path: PathBuf,
        /// FFmpeg's description of the failure.
        reason: String,
    },

    /// The container opened but its stream information could not be read.
    #[error("Failed to read stream information from {path}: {reason}")]
    Probe {
        /// Path of the opened container.
        path: PathBuf,
        /// FFmpeg's description of the failure.
        reason: String,
    },

    /// Any other error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}

impl InspectError {
    /// The process exit status that reports this error.
    ///
    /// Open failures exit with `2`, probe failures with `3`, and anything
    /// else with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            InspectError::Open { .. } => EXIT_OPEN_FAILED,
            InspectError::Probe { .. } => EXIT_PROBE_FAILED,
            InspectError::FfmpegError(_) | InspectError::IoError(_) => EXIT_FAILURE,
        }
    }
}

impl From<FfmpegError> for InspectError {
    fn from(error: FfmpegError) -> Self {
        InspectError::FfmpegError(error.to_string())
    }
}
