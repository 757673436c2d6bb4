//! # videoinfo
//!
//! Inspect media containers: container format, duration, overall bitrate,
//! and per-stream codec, geometry, frame rate, and channel layout, powered by
//! FFmpeg via the [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)
//! crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use videoinfo::MediaFile;
//!
//! let media = MediaFile::open("input.mp4").unwrap();
//! let info = media.info();
//! print!("{info}");
//! ```
//!
//! Opening runs FFmpeg's open and probe stages separately so callers can
//! tell an unrecognised file ([`InspectError::Open`]) from one whose streams
//! could not be read ([`InspectError::Probe`]). The demuxer is released when
//! the [`MediaFile`] is dropped.
//!
//! When the container does not report an overall bitrate it is estimated
//! from the file size and duration; see [`bitrate`].
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod bitrate;
pub mod conversion;
pub mod error;
pub mod ffmpeg;
pub mod media_file;
pub mod metadata;
pub mod report;

pub use bitrate::{BitRate, BitRateSource};
pub use error::InspectError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use media_file::MediaFile;
pub use metadata::{
    AudioDetails, MediaInfo, StreamCounts, StreamDetails, StreamInfo, StreamKind, VideoDetails,
};
