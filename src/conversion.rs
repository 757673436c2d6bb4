//! Time and rate conversion helpers.
//!
//! FFmpeg reports container durations in `AV_TIME_BASE` units
//! (microseconds) and frame rates as rationals that may be `0/0` when the
//! demuxer could not determine them.

use std::time::Duration;

use ffmpeg_next::Rational;

/// Convert a container-level duration in `AV_TIME_BASE` units.
///
/// Negative values, which include `AV_NOPTS_VALUE`, mean the container does
/// not know its duration.
pub fn container_duration(microseconds: i64) -> Option<Duration> {
    u64::try_from(microseconds).ok().map(Duration::from_micros)
}

/// Value of a rational whose numerator and denominator are both positive.
pub fn positive_rational(rational: Rational) -> Option<f64> {
    if rational.numerator() > 0 && rational.denominator() > 0 {
        Some(f64::from(rational.numerator()) / f64::from(rational.denominator()))
    } else {
        None
    }
}

/// Pick the frame rate to report for a video stream.
///
/// The average frame rate wins whenever it is well formed; the stream's
/// real base rate is the fallback.
pub fn preferred_frame_rate(average: Rational, real_base: Rational) -> Option<f64> {
    positive_rational(average).or_else(|| positive_rational(real_base))
}
