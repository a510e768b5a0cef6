use crate::foundation::error::{TrailError, TrailResult};
use crate::render::surface::FrameRGBA;
use std::path::PathBuf;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Redraw rate the frames were produced at.
    pub fps: u32,
}

/// Consumer of presented frames, in presentation order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()>;
    /// Push one presented frame. `idx` increases strictly.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TrailResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> TrailResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in presentation order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TrailResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TrailResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Keeps only the most recent frame, for hosts that present or save one frame at the end.
#[derive(Debug, Default)]
pub struct LatestFrameSink {
    cfg: Option<SinkConfig>,
    last: Option<(u64, FrameRGBA)>,
    pushed: u64,
}

impl LatestFrameSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Most recent frame and its index.
    pub fn latest(&self) -> Option<(u64, &FrameRGBA)> {
        self.last.as_ref().map(|(idx, f)| (*idx, f))
    }

    /// Frames pushed since `begin`.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}

impl FrameSink for LatestFrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()> {
        self.cfg = Some(cfg);
        self.last = None;
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TrailResult<()> {
        self.last = Some((idx, frame.clone()));
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> TrailResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created on `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Path of the file for frame `idx`.
    pub fn path_for(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("frame_{idx:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()> {
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            dir = %self.dir.display(),
            "png sequence started"
        );
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TrailError::io(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> TrailResult<()> {
        let path = self.path_for(idx);
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> TrailResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode one frame as a straight-alpha PNG.
pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> TrailResult<()> {
    let rgba = frame.to_straight_rgba();
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TrailError::io(format!("write png '{}': {e}", path.display())))
}
