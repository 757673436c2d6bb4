//! Media summary types.
//!
//! [`MediaInfo`] is the owned snapshot produced by
//! [`MediaFile::info`](crate::MediaFile::info). It holds no FFmpeg state, so
//! it outlives the demuxer and can be rendered or inspected freely.

use std::{collections::BTreeMap, time::Duration};

use ffmpeg_next::media::Type;

use crate::bitrate::BitRate;

/// Everything the inspector reports about one media file.
///
/// # Example
///
/// ```no_run
/// use videoinfo::MediaFile;
///
/// let info = MediaFile::open("input.mp4")?.info();
/// println!("{} streams in a {} container", info.counts.total, info.format);
/// # Ok::<(), videoinfo::InspectError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct MediaInfo {
    /// Container format short name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
    /// Container duration, if known.
    pub duration: Option<Duration>,
    /// Overall bitrate, direct or estimated.
    pub bit_rate: BitRate,
    /// Every stream in container order.
    pub streams: Vec<StreamInfo>,
    /// Stream counts by kind.
    pub counts: StreamCounts,
    /// Stream index FFmpeg considers the most representative video stream.
    pub best_video: Option<usize>,
    /// Stream index FFmpeg considers the most representative audio stream.
    pub best_audio: Option<usize>,
    /// Container-level metadata tags.
    pub tags: BTreeMap<String, String>,
}

impl MediaInfo {
    /// Look up a stream by its container index.
    pub fn stream(&self, index: usize) -> Option<&StreamInfo> {
        self.streams.iter().find(|stream| stream.index == index)
    }

    /// The best video stream, if the file has one.
    pub fn best_video_stream(&self) -> Option<&StreamInfo> {
        self.best_video.and_then(|index| self.stream(index))
    }

    /// The best audio stream, if the file has one.
    pub fn best_audio_stream(&self) -> Option<&StreamInfo> {
        self.best_audio.and_then(|index| self.stream(index))
    }

    /// Container duration in whole milliseconds.
    pub fn duration_millis(&self) -> Option<u128> {
        self.duration.map(|duration| duration.as_millis())
    }
}

/// Coarse classification of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// Video stream.
    Video,
    /// Audio stream.
    Audio,
    /// Subtitle stream.
    Subtitle,
    /// Data, attachment, and unknown streams.
    Other,
}

impl StreamKind {
    /// Lower-case label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
            StreamKind::Other => "other",
        }
    }
}

impl From<Type> for StreamKind {
    fn from(medium: Type) -> Self {
        match medium {
            Type::Video => StreamKind::Video,
            Type::Audio => StreamKind::Audio,
            Type::Subtitle => StreamKind::Subtitle,
            Type::Data | Type::Attachment | Type::Unknown => StreamKind::Other,
        }
    }
}

/// One stream of the container.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Index of the stream within the container.
    pub index: usize,
    /// Classification by codec type.
    pub kind: StreamKind,
    /// Codec name (e.g. `"h264"`, `"aac"`), `"none"` when unidentified.
    pub codec: String,
    /// Kind-specific fields.
    pub details: StreamDetails,
}

/// Fields that only make sense for one kind of stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamDetails {
    /// Geometry and frame rate of a video stream.
    Video(VideoDetails),
    /// Layout of an audio stream.
    Audio(AudioDetails),
    /// Subtitle and other streams carry no extra fields.
    None,
}

/// Geometry and rate of a video stream. Zero means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VideoDetails {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second, average rate preferred over the real base rate.
    pub frame_rate: Option<f64>,
}

/// Layout of an audio stream. Zero means unknown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioDetails {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in hertz.
    pub sample_rate: u32,
    /// Sample format name (e.g. `"fltp"`, `"s16"`), if FFmpeg knows it.
    pub sample_format: Option<String>,
}

/// Number of streams of each kind.
///
/// The four kind counts always add up to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamCounts {
    /// All streams in the container.
    pub total: usize,
    /// Video streams.
    pub video: usize,
    /// Audio streams.
    pub audio: usize,
    /// Subtitle streams.
    pub subtitle: usize,
    /// Data, attachment, and unknown streams.
    pub other: usize,
}

impl StreamCounts {
    /// Tally streams by kind.
    pub fn tally<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = StreamKind>,
    {
        kinds.into_iter().fold(Self::default(), |mut counts, kind| {
            counts.total += 1;
            match kind {
                StreamKind::Video => counts.video += 1,
                StreamKind::Audio => counts.audio += 1,
                StreamKind::Subtitle => counts.subtitle += 1,
                StreamKind::Other => counts.other += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_to_total() {
        let counts = StreamCounts::tally([
            StreamKind::Video,
            StreamKind::Audio,
            StreamKind::Audio,
            StreamKind::Subtitle,
            StreamKind::Other,
            StreamKind::Other,
        ]);
        assert_eq!(counts.total, 6);
        assert_eq!(counts.video, 1);
        assert_eq!(counts.audio, 2);
        assert_eq!(counts.subtitle, 1);
        assert_eq!(counts.other, 2);
        assert_eq!(
            counts.video + counts.audio + counts.subtitle + counts.other,
            counts.total
        );
    }

    #[test]
    fn empty_tally_is_zero() {
        assert_eq!(StreamCounts::tally(Vec::<StreamKind>::new()), StreamCounts::default());
    }

    #[test]
    fn data_and_attachments_are_other() {
        assert_eq!(StreamKind::from(Type::Data), StreamKind::Other);
        assert_eq!(StreamKind::from(Type::Attachment), StreamKind::Other);
        assert_eq!(StreamKind::from(Type::Unknown), StreamKind::Other);
        assert_eq!(StreamKind::from(Type::Subtitle), StreamKind::Subtitle);
    }
}
