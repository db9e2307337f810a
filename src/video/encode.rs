use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::error::{MvError, MvResult},
    render::raster::Raster,
};

/// Output settings for [`FfmpegEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Frame width in pixels (even).
    pub width: u32,
    /// Frame height in pixels (even).
    pub height: u32,
    /// Integer frame rate.
    pub fps: u32,
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Reject settings ffmpeg would refuse for yuv420p MP4 output.
    pub fn validate(&self) -> MvResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MvError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(MvError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(MvError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

/// MP4 settings with overwrite enabled.
pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
    }
}

/// Whether `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path`, if it has one.
pub fn ensure_parent_dir(path: &Path) -> MvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into a system `ffmpeg` process.
///
/// Frames are written in call order; [`FfmpegEncoder::encode_frame`] returns only once the
/// bytes are handed to ffmpeg, so callers may reuse the canvas right after.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    frames_written: u64,
}

impl FfmpegEncoder {
    /// Validate settings and spawn ffmpeg.
    pub fn new(cfg: EncodeConfig) -> MvResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(MvError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(MvError::media(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            MvError::media(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| MvError::media("failed to open ffmpeg stdin"))?;

        tracing::debug!(
            out = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "ffmpeg encoder started"
        );

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
            frames_written: 0,
        })
    }

    /// Write one frame; its size must match the configured size.
    pub fn encode_frame(&mut self, frame: &Raster) -> MvResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(MvError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(MvError::media("ffmpeg encoder is already finalized"));
        };

        stdin
            .write_all(&frame.data)
            .map_err(|e| MvError::media(format!("failed to write frame to ffmpeg stdin: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    /// Frames handed to ffmpeg so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Close stdin and wait for ffmpeg to finish the file.
    pub fn finish(mut self) -> MvResult<u64> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| MvError::media(format!("failed to wait for ffmpeg to finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MvError::media(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(
            out = %self.cfg.out_path.display(),
            frames = self.frames_written,
            "video written"
        );
        Ok(self.frames_written)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/encode.rs"]
mod tests;
