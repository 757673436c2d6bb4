//! Overall bitrate resolution.
//!
//! Many containers (raw elementary streams, some MKV and AVI muxers) do not
//! carry an overall bitrate. When that happens the inspector estimates it
//! from the byte size of the file and the container duration.
//!
//! The policy is ordered and the first match wins:
//!
//! 1. the container's own bitrate, when positive;
//! 2. `size * 8 / duration`, when the duration is positive and a size can be
//!    found (the size lookup is supplied by the caller and may fail);
//! 3. unknown.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::Duration,
};

/// Where an overall bitrate value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitRateSource {
    /// Reported by the container.
    Container,
    /// Computed from the file size and duration.
    Estimated,
    /// Neither a container value nor an estimate was available.
    Unknown,
}

impl BitRateSource {
    /// Short lower-case label used in JSON output and logs.
    pub fn label(self) -> &'static str {
        match self {
            BitRateSource::Container => "container",
            BitRateSource::Estimated => "estimated",
            BitRateSource::Unknown => "unknown",
        }
    }
}

/// Overall bitrate of a media file in bits per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRate {
    /// Bits per second, if known.
    pub bits_per_second: Option<u64>,
    /// How the value was obtained.
    pub source: BitRateSource,
}

impl BitRate {
    /// A bitrate that could not be determined.
    pub const UNKNOWN: BitRate = BitRate {
        bits_per_second: None,
        source: BitRateSource::Unknown,
    };

    /// Resolve the overall bitrate.
    ///
    /// `container_bit_rate` is the raw value from the demuxer (`0` or
    /// negative when absent). `byte_size` is only called when an estimate is
    /// needed; returning `None` from it degrades the result to unknown.
    pub fn resolve<F>(container_bit_rate: i64, duration: Option<Duration>, byte_size: F) -> Self
    where
        F: FnOnce() -> Option<u64>,
    {
        if let Some(bits_per_second) = u64::try_from(container_bit_rate)
            .ok()
            .filter(|bits_per_second| *bits_per_second > 0)
        {
            return BitRate {
                bits_per_second: Some(bits_per_second),
                source: BitRateSource::Container,
            };
        }

        let Some(duration) = duration.filter(|duration| !duration.is_zero()) else {
            log::debug!("No container bitrate and no usable duration; bitrate unknown");
            return BitRate::UNKNOWN;
        };

        let Some(size) = byte_size() else {
            log::debug!("File size unavailable; bitrate unknown");
            return BitRate::UNKNOWN;
        };

        match estimate_bits_per_second(size, duration) {
            Some(bits_per_second) => {
                log::debug!(
                    "Estimated bitrate {bits_per_second} bps from {size} bytes over {:.3}s",
                    duration.as_secs_f64()
                );
                BitRate {
                    bits_per_second: Some(bits_per_second),
                    source: BitRateSource::Estimated,
                }
            }
            None => BitRate::UNKNOWN,
        }
    }
}

impl Display for BitRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.bits_per_second {
            Some(bits_per_second) => write!(f, "{bits_per_second}"),
            None => f.write_str("unknown"),
        }
    }
}

/// `size * 8 / duration`, truncated to whole bits per second.
///
/// Computed on microseconds in 128-bit integers so the result is exact up to
/// the final truncation.
pub fn estimate_bits_per_second(byte_size: u64, duration: Duration) -> Option<u64> {
    let micros = duration.as_micros();
    if micros == 0 {
        return None;
    }
    let bits = u128::from(byte_size) * 8 * 1_000_000;
    u64::try_from(bits / micros).ok()
}
