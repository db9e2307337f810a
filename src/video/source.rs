use std::path::{Path, PathBuf};

use crate::foundation::error::{MvError, MvResult};
#[cfg(feature = "media-ffmpeg")]
use crate::render::raster::Raster;

/// What `ffprobe` reports about a source video.
#[derive(Clone, Debug)]
pub struct VideoSourceInfo {
    /// Inspected file.
    pub source_path: PathBuf,
    /// Frame width.
    pub width: u32,
    /// Frame height.
    pub height: u32,
    /// Frame rate numerator.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Container duration in seconds (0 if unknown).
    pub duration_sec: f64,
    /// Frame count from `nb_frames`, else estimated from duration and rate.
    pub frame_count: u64,
}

impl VideoSourceInfo {
    /// Frame rate as a float; 0 for a degenerate rate.
    pub fn source_fps(&self) -> f64 {
        if self.fps_den == 0 {
            0.0
        } else {
            f64::from(self.fps_num) / f64::from(self.fps_den)
        }
    }

    /// Frame rate truncated to a whole number, at least 1. 29.97 gives 29.
    pub fn whole_fps(&self) -> u32 {
        (self.source_fps().trunc() as u32).max(1)
    }
}

#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
fn estimate_frame_count(nb_frames: Option<&str>, duration_sec: f64, fps: f64) -> u64 {
    if let Some(n) = nb_frames.and_then(|s| s.trim().parse::<u64>().ok()) {
        return n;
    }
    if duration_sec.is_finite() && duration_sec > 0.0 && fps > 0.0 {
        (duration_sec * fps).round() as u64
    } else {
        0
    }
}

#[cfg(feature = "media-ffmpeg")]
pub fn inspect_video(source_path: &Path) -> MvResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct FfStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        nb_frames: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct FfFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct FfOutput {
        streams: Vec<FfStream>,
        format: Option<FfFormat>,
    }

    if !source_path.exists() {
        return Err(MvError::file_not_found(source_path));
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| MvError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(MvError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: FfOutput = serde_json::from_slice(&out.stdout)
        .map_err(|e| MvError::media(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| MvError::media("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| MvError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| MvError::media("missing video height from ffprobe"))?;

    let (fps_num, fps_den) = parse_ff_ratio(video_stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| MvError::media("invalid video r_frame_rate"))?;
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut info = VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps_num,
        fps_den,
        duration_sec,
        frame_count: 0,
    };
    info.frame_count = estimate_frame_count(
        video_stream.nb_frames.as_deref(),
        duration_sec,
        info.source_fps(),
    );

    tracing::debug!(
        path = %source_path.display(),
        width,
        height,
        fps = info.source_fps(),
        frames = info.frame_count,
        "inspected video"
    );
    Ok(info)
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn inspect_video(_source_path: &Path) -> MvResult<VideoSourceInfo> {
    Err(MvError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

/// Decodes a video front to back, one RGBA frame per call.
///
/// The ffmpeg child is killed when the reader is dropped before the end.
#[cfg(feature = "media-ffmpeg")]
pub struct VideoFrameReader {
    child: std::process::Child,
    stdout: std::process::ChildStdout,
    width: u32,
    height: u32,
    frames_read: u64,
    done: bool,
}

#[cfg(feature = "media-ffmpeg")]
impl VideoFrameReader {
    /// Start decoding `source` at its native size.
    pub fn open(source: &VideoSourceInfo) -> MvResult<Self> {
        use std::process::{Command, Stdio};

        if source.width == 0 || source.height == 0 {
            return Err(MvError::media(
                "decoded video frame size is zero (invalid source dimensions)",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(&source.source_path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MvError::media(format!("failed to run ffmpeg for video decode: {e}")))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MvError::media("failed to open ffmpeg stdout"))?;

        Ok(Self {
            child,
            stdout,
            width: source.width,
            height: source.height,
            frames_read: 0,
            done: false,
        })
    }

    /// Next decoded frame, or `None` once the stream is exhausted.
    pub fn next_frame(&mut self) -> MvResult<Option<Raster>> {
        use std::io::Read as _;

        if self.done {
            return Ok(None);
        }
        let len = self.width as usize * self.height as usize * 4;
        let mut buf = vec![0u8; len];
        let mut filled = 0usize;
        while filled < len {
            match self.stdout.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(MvError::media(format!("failed to read decoded frame: {e}")));
                }
            }
        }

        if filled < len {
            // A truncated trailing frame is treated as end of stream.
            self.done = true;
            let _ = self.child.wait();
            tracing::debug!(frames = self.frames_read, "video stream exhausted");
            return Ok(None);
        }

        self.frames_read += 1;
        Raster::from_rgba8(self.width, self.height, buf).map(Some)
    }

    /// Frames returned so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

#[cfg(feature = "media-ffmpeg")]
impl Drop for VideoFrameReader {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

#[cfg(feature = "media-ffmpeg")]
fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let mut parts = s.split('/');
    let a = parts.next()?.parse::<u32>().ok()?;
    let b = parts.next()?.parse::<u32>().ok()?;
    if b == 0 {
        return None;
    }
    Some((a, b))
}

#[cfg(test)]
#[path = "../../tests/unit/video/source.rs"]
mod tests;
