use std::path::Path;

use crate::error::NormalizationError;
use crate::format::{
    bytes_to_mb, canonical_codec, format_duration, format_resolution, sanitize, DataRate,
    UNAVAILABLE,
};
use crate::probe::{ProbeResult, StreamKind};

/// Column names of the report, in order.
pub const HEADER: [&str; 13] = [
    "Full Path",
    "Filename",
    "Container",
    "Codec",
    "Resolution",
    "Overall Data Rate (Mbps)",
    "File Size (MB)",
    "Duration",
    "TotalTracks",
    "VideoTracks",
    "AudioTracks",
    "SubtitleTracks",
    "ChapterTracks",
];

/// One report row for a successfully probed file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    pub full_path: String,
    pub filename: String,
    pub container: String,
    pub codec: String,
    pub resolution: String,
    pub data_rate: DataRate,
    pub file_size_mb: f64,
    pub duration: String,
    pub total_tracks: usize,
    pub video_tracks: usize,
    pub audio_tracks: usize,
    pub subtitle_tracks: usize,
    pub chapter_tracks: usize,
}

impl MediaRecord {
    /// Fields in `HEADER` order.
    pub fn to_row(&self) -> [String; 13] {
        [
            self.full_path.clone(),
            self.filename.clone(),
            self.container.clone(),
            self.codec.clone(),
            self.resolution.clone(),
            self.data_rate.to_string(),
            format!("{:.2}", self.file_size_mb),
            self.duration.clone(),
            self.total_tracks.to_string(),
            self.video_tracks.to_string(),
            self.audio_tracks.to_string(),
            self.subtitle_tracks.to_string(),
            self.chapter_tracks.to_string(),
        ]
    }
}

/// Turn a raw probe result into a report row.
pub fn normalize(
    probe: &ProbeResult,
    file_size_bytes: u64,
    path: &Path,
) -> Result<MediaRecord, NormalizationError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| NormalizationError::MissingFileName(path.to_path_buf()))?;

    let duration_secs = parse_duration(probe.format.duration.as_deref())?;

    let count = |kind: StreamKind| probe.streams.iter().filter(|s| s.kind == kind).count();

    let primary_video = probe.streams.iter().find(|s| s.kind == StreamKind::Video);
    let codec = primary_video
        .and_then(|s| s.codec_name.as_deref())
        .map(canonical_codec)
        .unwrap_or_else(|| UNAVAILABLE.to_string());
    let resolution = match primary_video.map(|s| (s.width, s.height)) {
        Some((Some(w), Some(h))) => format_resolution(w, h),
        _ => UNAVAILABLE.to_string(),
    };

    let file_size_mb = bytes_to_mb(file_size_bytes);

    Ok(MediaRecord {
        full_path: sanitize(&path.to_string_lossy()),
        filename: sanitize(&filename),
        container: path
            .extension()
            .map(|e| sanitize(&e.to_string_lossy()))
            .unwrap_or_default(),
        codec,
        resolution,
        data_rate: DataRate::compute(file_size_mb, Some(duration_secs)),
        file_size_mb,
        duration: format_duration(duration_secs),
        total_tracks: probe.streams.len(),
        video_tracks: count(StreamKind::Video),
        audio_tracks: count(StreamKind::Audio),
        subtitle_tracks: count(StreamKind::Subtitle),
        chapter_tracks: probe.chapters.len(),
    })
}

fn parse_duration(raw: Option<&str>) -> Result<f64, NormalizationError> {
    let raw = raw.ok_or(NormalizationError::MissingDuration)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| NormalizationError::InvalidDuration(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ChapterInfo, FormatInfo, StreamInfo};
    use std::path::PathBuf;

    fn stream(kind: StreamKind, codec: &str) -> StreamInfo {
        StreamInfo {
            kind,
            codec_name: Some(codec.to_string()),
            width: None,
            height: None,
        }
    }

    fn video(codec: &str, width: u32, height: u32) -> StreamInfo {
        StreamInfo {
            width: Some(width),
            height: Some(height),
            ..stream(StreamKind::Video, codec)
        }
    }

    fn probe_with(streams: Vec<StreamInfo>, duration: Option<&str>, chapters: usize) -> ProbeResult {
        ProbeResult {
            streams,
            format: FormatInfo {
                duration: duration.map(str::to_string),
                format_name: None,
            },
            chapters: vec![ChapterInfo::default(); chapters],
        }
    }

    #[test]
    fn test_normalize_full_file() {
        let probe = probe_with(
            vec![
                video("h265", 1920, 1080),
                stream(StreamKind::Audio, "aac"),
                stream(StreamKind::Audio, "ac3"),
                stream(StreamKind::Subtitle, "subrip"),
                stream(StreamKind::Other, "bin_data"),
            ],
            Some("3661.5"),
            4,
        );
        let path = PathBuf::from("/media/Movies, Old/Film, The.mkv");

        let record = normalize(&probe, 150 * 1024 * 1024, &path).unwrap();

        assert_eq!(record.full_path, "/media/Movies_ Old/Film_ The.mkv");
        assert_eq!(record.filename, "Film_ The.mkv");
        assert_eq!(record.container, "mkv");
        assert_eq!(record.codec, "HEVC");
        assert_eq!(record.resolution, "1920x1080");
        assert_eq!(record.duration, "01:01:01");
        assert_eq!(record.file_size_mb, 150.0);
        assert_eq!(record.data_rate, DataRate::Mbps(0.33));
        assert_eq!(record.total_tracks, 5);
        assert_eq!(record.video_tracks, 1);
        assert_eq!(record.audio_tracks, 2);
        assert_eq!(record.subtitle_tracks, 1);
        assert_eq!(record.chapter_tracks, 4);
        assert!(record.video_tracks + record.audio_tracks + record.subtitle_tracks <= record.total_tracks);
    }

    #[test]
    fn test_first_video_stream_is_primary() {
        let probe = probe_with(
            vec![stream(StreamKind::Audio, "aac"), video("h264", 1280, 720), video("mjpeg", 320, 240)],
            Some("10"),
            0,
        );
        let record = normalize(&probe, 1024, Path::new("/a.mp4")).unwrap();
        assert_eq!(record.codec, "h264");
        assert_eq!(record.resolution, "1280x720");
        assert_eq!(record.video_tracks, 2);
    }

    #[test]
    fn test_audio_only_file_has_no_codec_or_resolution() {
        let probe = probe_with(vec![stream(StreamKind::Audio, "mp3")], Some("180"), 0);
        let record = normalize(&probe, 3 * 1024 * 1024, Path::new("/song.avi")).unwrap();
        assert_eq!(record.codec, "N/A");
        assert_eq!(record.resolution, "N/A");
    }

    #[test]
    fn test_zero_duration_marks_rate_unavailable() {
        let probe = probe_with(vec![video("hevc", 640, 480)], Some("0.000000"), 0);
        let record = normalize(&probe, 1024 * 1024, Path::new("/clip.mp4")).unwrap();
        assert_eq!(record.duration, "00:00:00");
        assert_eq!(record.data_rate, DataRate::Unavailable);
        assert_eq!(record.to_row()[5], "N/A");
    }

    #[test]
    fn test_missing_duration_is_an_error() {
        let probe = probe_with(vec![video("hevc", 640, 480)], None, 0);
        assert!(matches!(
            normalize(&probe, 1024, Path::new("/clip.mp4")),
            Err(NormalizationError::MissingDuration)
        ));
    }

    #[test]
    fn test_non_numeric_duration_is_an_error() {
        let probe = probe_with(vec![], Some("N/A"), 0);
        assert!(matches!(
            normalize(&probe, 1024, Path::new("/clip.mp4")),
            Err(NormalizationError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_row_has_thirteen_fields() {
        let probe = probe_with(vec![video("av1", 3840, 2160)], Some("60"), 0);
        let record = normalize(&probe, 75 * 1024 * 1024, Path::new("/x/y,z.mp4")).unwrap();
        let row = record.to_row();

        assert_eq!(row.len(), HEADER.len());
        assert_eq!(row[5], "10.00");
        assert_eq!(row[6], "75.00");
        assert!(row.iter().all(|field| !field.contains(',')));
    }
}
