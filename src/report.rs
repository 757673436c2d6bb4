//! Report rendering.
//!
//! The text report is line oriented and meant for people, not parsers:
//!
//! ```text
//! Filepath: input.mp4
//! Container: mov,mp4,m4a,3gp,3g2,mj2
//! Duration (ms): 5005
//! Overall bitrate (bps): 1207349
//! Streams: total=2 video=1 audio=1 subtitle=0 other=0
//! [Video #0] h264 1280x720 29.97 fps
//! [Audio #1] aac 2ch 48000 Hz fltp
//! Best video: #0 h264 1280x720 29.97 fps
//! Best audio: #1 aac 2ch 48000 Hz fltp
//! ```
//!
//! Rendering only reads a [`MediaInfo`], so it never touches FFmpeg.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io::{Result as IoResult, Write},
    path::Path,
};

use serde_json::{Value, json};

use crate::metadata::{MediaInfo, StreamDetails, StreamInfo, StreamKind};

/// Write the `Filepath:` line that opens every report.
pub fn write_path_line<W: Write>(out: &mut W, path: &Path) -> IoResult<()> {
    writeln!(out, "Filepath: {}", path.display())
}

/// Write everything after the `Filepath:` line.
pub fn write_summary<W: Write>(out: &mut W, info: &MediaInfo) -> IoResult<()> {
    write!(out, "{info}")
}

impl Display for MediaInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Container: {}", self.format)?;
        match self.duration_millis() {
            Some(milliseconds) => writeln!(f, "Duration (ms): {milliseconds}")?,
            None => writeln!(f, "Duration (ms): unknown")?,
        }
        writeln!(f, "Overall bitrate (bps): {}", self.bit_rate)?;
        writeln!(
            f,
            "Streams: total={} video={} audio={} subtitle={} other={}",
            self.counts.total,
            self.counts.video,
            self.counts.audio,
            self.counts.subtitle,
            self.counts.other,
        )?;

        for stream in &self.streams {
            match stream.kind {
                StreamKind::Video => writeln!(f, "[Video #{}] {stream}", stream.index)?,
                StreamKind::Audio => writeln!(f, "[Audio #{}] {stream}", stream.index)?,
                StreamKind::Subtitle | StreamKind::Other => {}
            }
        }

        if let Some(stream) = self.best_video_stream() {
            writeln!(f, "Best video: #{} {stream}", stream.index)?;
        }
        if let Some(stream) = self.best_audio_stream() {
            writeln!(f, "Best audio: #{} {stream}", stream.index)?;
        }
        Ok(())
    }
}

/// Codec name followed by whichever kind-specific fields are known.
impl Display for StreamInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.codec)?;
        match &self.details {
            StreamDetails::Video(video) => {
                if video.width > 0 && video.height > 0 {
                    write!(f, " {}x{}", video.width, video.height)?;
                }
                if let Some(frame_rate) = video.frame_rate.filter(|rate| *rate > 0.0) {
                    write!(f, " {} fps", format_frame_rate(frame_rate))?;
                }
            }
            StreamDetails::Audio(audio) => {
                if audio.channels > 0 {
                    write!(f, " {}ch", audio.channels)?;
                }
                if audio.sample_rate > 0 {
                    write!(f, " {} Hz", audio.sample_rate)?;
                }
                if let Some(sample_format) = &audio.sample_format {
                    write!(f, " {sample_format}")?;
                }
            }
            StreamDetails::None => {}
        }
        Ok(())
    }
}

/// Up to three decimals with trailing zeros removed (`25`, `29.97`).
pub fn format_frame_rate(frame_rate: f64) -> String {
    let formatted = format!("{frame_rate:.3}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Machine-readable rendering of the same summary.
pub fn to_json(path: &Path, info: &MediaInfo) -> Value {
    let streams: Vec<Value> = info.streams.iter().map(stream_json).collect();

    json!({
        "filepath": path.display().to_string(),
        "format": info.format,
        "duration_ms": info.duration_millis().map(|milliseconds| milliseconds as u64),
        "bit_rate": info.bit_rate.bits_per_second,
        "bit_rate_source": info.bit_rate.source.label(),
        "counts": {
            "total": info.counts.total,
            "video": info.counts.video,
            "audio": info.counts.audio,
            "subtitle": info.counts.subtitle,
            "other": info.counts.other,
        },
        "streams": streams,
        "best_video": info.best_video,
        "best_audio": info.best_audio,
        "tags": info.tags,
    })
}

fn stream_json(stream: &StreamInfo) -> Value {
    let mut value = json!({
        "index": stream.index,
        "kind": stream.kind.label(),
        "codec": stream.codec,
    });

    match &stream.details {
        StreamDetails::Video(video) => {
            value["width"] = json!(video.width);
            value["height"] = json!(video.height);
            value["frame_rate"] = json!(video.frame_rate);
        }
        StreamDetails::Audio(audio) => {
            value["channels"] = json!(audio.channels);
            value["sample_rate"] = json!(audio.sample_rate);
            value["sample_format"] = json!(audio.sample_format);
        }
        StreamDetails::None => {}
    }

    value
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::PathBuf, time::Duration};

    use super::*;
    use crate::{
        bitrate::{BitRate, BitRateSource},
        metadata::{AudioDetails, StreamCounts, VideoDetails},
    };

    fn video_stream(index: usize) -> StreamInfo {
        StreamInfo {
            index,
            kind: StreamKind::Video,
            codec: "h264".to_string(),
            details: StreamDetails::Video(VideoDetails {
                width: 1280,
                height: 720,
                frame_rate: Some(30000.0 / 1001.0),
            }),
        }
    }

    fn audio_stream(index: usize) -> StreamInfo {
        StreamInfo {
            index,
            kind: StreamKind::Audio,
            codec: "aac".to_string(),
            details: StreamDetails::Audio(AudioDetails {
                channels: 2,
                sample_rate: 48_000,
                sample_format: Some("fltp".to_string()),
            }),
        }
    }

    fn subtitle_stream(index: usize) -> StreamInfo {
        StreamInfo {
            index,
            kind: StreamKind::Subtitle,
            codec: "subrip".to_string(),
            details: StreamDetails::None,
        }
    }

    fn media_info(streams: Vec<StreamInfo>) -> MediaInfo {
        let counts = StreamCounts::tally(streams.iter().map(|stream| stream.kind));
        let best_video = streams
            .iter()
            .find(|stream| stream.kind == StreamKind::Video)
            .map(|stream| stream.index);
        let best_audio = streams
            .iter()
            .find(|stream| stream.kind == StreamKind::Audio)
            .map(|stream| stream.index);
        MediaInfo {
            format: "matroska,webm".to_string(),
            duration: Some(Duration::from_millis(5005)),
            bit_rate: BitRate {
                bits_per_second: Some(1_207_349),
                source: BitRateSource::Container,
            },
            streams,
            counts,
            best_video,
            best_audio,
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn renders_full_report() {
        let info = media_info(vec![video_stream(0), audio_stream(1), subtitle_stream(2)]);
        let mut out = Vec::new();
        write_path_line(&mut out, &PathBuf::from("movie.mkv")).unwrap();
        write_summary(&mut out, &info).unwrap();

        let expected = "\
Filepath: movie.mkv
Container: matroska,webm
Duration (ms): 5005
Overall bitrate (bps): 1207349
Streams: total=3 video=1 audio=1 subtitle=1 other=0
[Video #0] h264 1280x720 29.97 fps
[Audio #1] aac 2ch 48000 Hz fltp
Best video: #0 h264 1280x720 29.97 fps
Best audio: #1 aac 2ch 48000 Hz fltp
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn audio_only_has_no_video_lines() {
        let info = media_info(vec![audio_stream(0)]);
        let report = info.to_string();

        assert!(!report.contains("[Video #"), "{report}");
        assert!(!report.contains("Best video"), "{report}");
        assert!(report.contains("Best audio: #0 aac"), "{report}");
    }

    #[test]
    fn unknown_fields_are_omitted() {
        let stream = StreamInfo {
            index: 0,
            kind: StreamKind::Video,
            codec: "mjpeg".to_string(),
            details: StreamDetails::Video(VideoDetails {
                width: 640,
                height: 0,
                frame_rate: None,
            }),
        };
        assert_eq!(stream.to_string(), "mjpeg");

        let stream = StreamInfo {
            index: 1,
            kind: StreamKind::Audio,
            codec: "pcm_s16le".to_string(),
            details: StreamDetails::Audio(AudioDetails::default()),
        };
        assert_eq!(stream.to_string(), "pcm_s16le");
    }

    #[test]
    fn unknown_duration_and_bitrate() {
        let mut info = media_info(Vec::new());
        info.duration = None;
        info.bit_rate = BitRate::UNKNOWN;
        let report = info.to_string();

        assert!(report.contains("Duration (ms): unknown\n"), "{report}");
        assert!(report.contains("Overall bitrate (bps): unknown\n"), "{report}");
        assert!(report.contains("Streams: total=0 video=0 audio=0 subtitle=0 other=0"));
    }

    #[test]
    fn frame_rates_trim_trailing_zeros() {
        assert_eq!(format_frame_rate(25.0), "25");
        assert_eq!(format_frame_rate(30000.0 / 1001.0), "29.97");
        assert_eq!(format_frame_rate(24000.0 / 1001.0), "23.976");
        assert_eq!(format_frame_rate(12.5), "12.5");
    }

    #[test]
    fn json_carries_counts_and_streams() {
        let info = media_info(vec![video_stream(0), audio_stream(1)]);
        let value = to_json(Path::new("clip.mkv"), &info);

        assert_eq!(value["filepath"], "clip.mkv");
        assert_eq!(value["duration_ms"], 5005);
        assert_eq!(value["bit_rate"], 1_207_349);
        assert_eq!(value["bit_rate_source"], "container");
        assert_eq!(value["counts"]["total"], 2);
        assert_eq!(value["streams"][0]["width"], 1280);
        assert_eq!(value["streams"][1]["sample_format"], "fltp");
        assert_eq!(value["best_audio"], 1);
    }
}
