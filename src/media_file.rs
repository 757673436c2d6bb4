//! Core [`MediaFile`] implementation.
//!
//! `MediaFile` owns the libavformat demuxer context for one file. Opening
//! happens in two stages that fail differently: the open stage
//! (`avformat_open_input`) recognises the container, and the probe stage
//! (`avformat_find_stream_info`) reads enough packets to fill in stream
//! parameters. The context is owned by an [`Input`] from the moment the open
//! stage succeeds, so it is closed exactly once however the caller exits.

use std::{
    ffi::CString,
    fmt::{Debug, Formatter, Result as FmtResult},
    fs,
    path::{Path, PathBuf},
    ptr,
};

use ffmpeg_next::{
    Error as FfmpegError,
    codec::context::Context as CodecContext,
    format::{Sample, context::Input, stream::Stream},
    media::Type,
};
use ffmpeg_sys_next::AVFormatContext;

use crate::{
    bitrate::BitRate,
    conversion::{container_duration, preferred_frame_rate},
    error::InspectError,
    metadata::{
        AudioDetails, MediaInfo, StreamCounts, StreamDetails, StreamInfo, StreamKind,
        VideoDetails,
    },
};

/// An opened and probed media file.
///
/// # Example
///
/// ```no_run
/// use videoinfo::{InspectError, MediaFile};
///
/// let media = MediaFile::open("input.mkv")?;
/// let info = media.info();
/// println!("{}: {} streams", info.format, info.counts.total);
/// # Ok::<(), InspectError>(())
/// ```
pub struct MediaFile {
    /// The probed demuxer context. Closed on drop.
    input_context: Input,
    /// Path of the opened file.
    file_path: PathBuf,
}

impl Debug for MediaFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaFile")
            .field("file_path", &self.file_path)
            .field("stream_count", &self.input_context.nb_streams())
            .finish_non_exhaustive()
    }
}

impl MediaFile {
    /// Open and probe a media file.
    ///
    /// Initialises FFmpeg (idempotent), opens the container, and reads its
    /// stream information.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Open`] if the file cannot be opened or its
    /// container is not recognised, and [`InspectError::Probe`] if the
    /// container opened but its streams could not be probed. In the latter
    /// case the demuxer context is released before returning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, InspectError> {
        let file_path = path.as_ref().to_path_buf();

        log::debug!("Opening media file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| InspectError::Open {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let c_path = file_path
            .to_str()
            .and_then(|path| CString::new(path).ok())
            .ok_or_else(|| InspectError::Open {
                path: file_path.clone(),
                reason: "path cannot be passed to FFmpeg (not UTF-8 or contains NUL)".to_string(),
            })?;

        // SAFETY: `format_context` starts null as `avformat_open_input`
        // requires; on failure FFmpeg frees whatever it allocated, on success
        // ownership moves straight into `Input`, whose drop closes it.
        let mut input_context = unsafe {
            let mut format_context: *mut AVFormatContext = ptr::null_mut();
            let result = ffmpeg_sys_next::avformat_open_input(
                &mut format_context,
                c_path.as_ptr(),
                ptr::null_mut(),
                ptr::null_mut(),
            );
            if result < 0 || format_context.is_null() {
                return Err(InspectError::Open {
                    path: file_path,
                    reason: FfmpegError::from(result).to_string(),
                });
            }
            Input::wrap(format_context)
        };

        log::debug!("Opened {}, probing streams", file_path.display());

        // SAFETY: the context is live and exclusively owned by `input_context`.
        let result = unsafe {
            ffmpeg_sys_next::avformat_find_stream_info(
                input_context.as_mut_ptr(),
                ptr::null_mut(),
            )
        };
        if result < 0 {
            // `input_context` drops here and closes the demuxer.
            return Err(InspectError::Probe {
                path: file_path,
                reason: FfmpegError::from(result).to_string(),
            });
        }

        let media_file = Self {
            input_context,
            file_path,
        };

        log::info!(
            "Probed media file: {} (format={}, streams={})",
            media_file.file_path.display(),
            media_file.format_name(),
            media_file.input_context.nb_streams(),
        );

        Ok(media_file)
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Container format short name.
    pub fn format_name(&self) -> String {
        self.input_context.format().name().to_string()
    }

    /// Extract the full media summary.
    ///
    /// Reads only what the probe stage already gathered, plus a size query
    /// when the bitrate has to be estimated.
    pub fn info(&self) -> MediaInfo {
        let duration = container_duration(self.input_context.duration());

        let streams: Vec<StreamInfo> = self
            .input_context
            .streams()
            .map(|stream| describe_stream(&stream))
            .collect();
        let counts = StreamCounts::tally(streams.iter().map(|stream| stream.kind));

        let best_video = self.best_stream_index(Type::Video);
        let best_audio = self.best_stream_index(Type::Audio);

        let bit_rate = BitRate::resolve(self.container_bit_rate(), duration, || {
            self.byte_size()
        });

        let tags = self
            .input_context
            .metadata()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let info = MediaInfo {
            format: self.format_name(),
            duration,
            bit_rate,
            streams,
            counts,
            best_video,
            best_audio,
            tags,
        };

        log::debug!(
            "Summary for {}: duration={:?}, bitrate={} ({}), video={}, audio={}, subtitle={}, other={}",
            self.file_path.display(),
            info.duration,
            info.bit_rate,
            info.bit_rate.source.label(),
            info.counts.video,
            info.counts.audio,
            info.counts.subtitle,
            info.counts.other,
        );

        info
    }

    /// Stream index chosen by FFmpeg's `av_find_best_stream` heuristic.
    pub fn best_stream_index(&self, medium: Type) -> Option<usize> {
        self.input_context
            .streams()
            .best(medium)
            .map(|stream| stream.index())
    }

    /// Overall bitrate as stored in the container, `0` when absent.
    fn container_bit_rate(&self) -> i64 {
        // SAFETY: the context stays valid for the lifetime of `self`.
        unsafe { (*self.input_context.as_ptr()).bit_rate }
    }

    /// Byte size of the input.
    ///
    /// Asks FFmpeg's I/O layer first and falls back to the filesystem.
    /// Failures of either are absorbed.
    pub fn byte_size(&self) -> Option<u64> {
        // SAFETY: `pb` is either null (formats that do their own I/O) or the
        // context's live I/O handle.
        let io_size = unsafe {
            let io_context = (*self.input_context.as_ptr()).pb;
            if io_context.is_null() {
                -1
            } else {
                ffmpeg_sys_next::avio_size(io_context)
            }
        };

        if let Ok(size) = u64::try_from(io_size) {
            return Some(size);
        }

        log::debug!(
            "FFmpeg could not report the size of {} ({io_size}), asking the filesystem",
            self.file_path.display()
        );

        match fs::metadata(&self.file_path) {
            Ok(metadata) => Some(metadata.len()),
            Err(error) => {
                log::debug!(
                    "Could not stat {}: {error}",
                    self.file_path.display()
                );
                None
            }
        }
    }
}

fn describe_stream(stream: &Stream<'_>) -> StreamInfo {
    let parameters = stream.parameters();
    let kind = StreamKind::from(parameters.medium());
    let codec = parameters.id().name().to_string();

    let details = match kind {
        StreamKind::Video => StreamDetails::Video(video_details(stream)),
        StreamKind::Audio => StreamDetails::Audio(audio_details(stream)),
        StreamKind::Subtitle | StreamKind::Other => StreamDetails::None,
    };

    StreamInfo {
        index: stream.index(),
        kind,
        codec,
        details,
    }
}

fn video_details(stream: &Stream<'_>) -> VideoDetails {
    let frame_rate = preferred_frame_rate(stream.avg_frame_rate(), stream.rate());

    match CodecContext::from_parameters(stream.parameters())
        .and_then(|context| context.decoder().video())
    {
        Ok(decoder) => VideoDetails {
            width: decoder.width(),
            height: decoder.height(),
            frame_rate,
        },
        Err(error) => {
            log::warn!(
                "Could not read video parameters for stream {}: {error}",
                stream.index()
            );
            VideoDetails {
                frame_rate,
                ..VideoDetails::default()
            }
        }
    }
}

fn audio_details(stream: &Stream<'_>) -> AudioDetails {
    match CodecContext::from_parameters(stream.parameters())
        .and_then(|context| context.decoder().audio())
    {
        Ok(decoder) => {
            let sample_format = decoder.format();
            AudioDetails {
                channels: decoder.channels(),
                sample_rate: decoder.rate(),
                sample_format: (sample_format != Sample::None)
                    .then(|| sample_format.name().to_string()),
            }
        }
        Err(error) => {
            log::warn!(
                "Could not read audio parameters for stream {}: {error}",
                stream.index()
            );
            AudioDetails::default()
        }
    }
}
