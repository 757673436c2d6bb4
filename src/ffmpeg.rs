//! FFmpeg console verbosity.
//!
//! libavformat prints its own warnings to stderr while probing (missing
//! timestamps, unknown tags, truncated atoms). That output is independent of
//! the Rust-side [`log`](https://crates.io/crates/log) records, so the
//! inspector exposes a small wrapper to quiet or raise it from the command
//! line.
//!
//! ```no_run
//! use videoinfo::FfmpegLogLevel;
//!
//! let level: FfmpegLogLevel = "warning".parse().unwrap();
//! videoinfo::set_ffmpeg_log_level(level);
//! ```

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log verbosity, from silent to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FfmpegLogLevel {
    /// No output at all.
    Quiet,
    /// Conditions after which the process aborts.
    Panic,
    /// Unrecoverable errors.
    Fatal,
    /// Recoverable errors. Used unless the command line says otherwise.
    #[default]
    Error,
    /// Warnings.
    Warning,
    /// Informational messages.
    Info,
    /// Verbose informational messages.
    Verbose,
    /// Debugging messages.
    Debug,
    /// Extremely verbose tracing.
    Trace,
}

impl FfmpegLogLevel {
    const NAMES: [(&'static str, FfmpegLogLevel); 9] = [
        ("quiet", FfmpegLogLevel::Quiet),
        ("panic", FfmpegLogLevel::Panic),
        ("fatal", FfmpegLogLevel::Fatal),
        ("error", FfmpegLogLevel::Error),
        ("warning", FfmpegLogLevel::Warning),
        ("info", FfmpegLogLevel::Info),
        ("verbose", FfmpegLogLevel::Verbose),
        ("debug", FfmpegLogLevel::Debug),
        ("trace", FfmpegLogLevel::Trace),
    ];

    /// Lower-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            FfmpegLogLevel::Quiet => "quiet",
            FfmpegLogLevel::Panic => "panic",
            FfmpegLogLevel::Fatal => "fatal",
            FfmpegLogLevel::Error => "error",
            FfmpegLogLevel::Warning => "warning",
            FfmpegLogLevel::Info => "info",
            FfmpegLogLevel::Verbose => "verbose",
            FfmpegLogLevel::Debug => "debug",
            FfmpegLogLevel::Trace => "trace",
        }
    }

    fn into_ffmpeg(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

impl Display for FfmpegLogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for FfmpegLogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        if lowered == "warn" {
            return Ok(FfmpegLogLevel::Warning);
        }
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, level)| *level)
            .ok_or_else(|| {
                let accepted: Vec<&str> = Self::NAMES.iter().map(|(name, _)| *name).collect();
                format!(
                    "unsupported FFmpeg log level `{value}` (expected one of: {})",
                    accepted.join(", ")
                )
            })
    }
}

/// Set FFmpeg's own console verbosity.
///
/// Does not affect records emitted through the `log` crate.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    log::debug!("Setting FFmpeg log level to {level}");
    ffmpeg_next::util::log::set_level(level.into_ffmpeg());
}

#[cfg(test)]
mod tests {
    use super::FfmpegLogLevel;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("quiet".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Quiet));
        assert_eq!("ERROR".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Error));
        assert_eq!(" Trace ".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Trace));
    }

    #[test]
    fn warn_is_an_alias_for_warning() {
        assert_eq!("warn".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Warning));
        assert_eq!("warning".parse::<FfmpegLogLevel>(), Ok(FfmpegLogLevel::Warning));
    }

    #[test]
    fn rejects_unknown_names() {
        let error = "loud".parse::<FfmpegLogLevel>().unwrap_err();
        assert!(error.contains("loud"), "{error}");
        assert!(error.contains("verbose"), "{error}");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for (name, level) in FfmpegLogLevel::NAMES {
            assert_eq!(level.to_string(), name);
        }
        assert_eq!(FfmpegLogLevel::default(), FfmpegLogLevel::Error);
    }
}
