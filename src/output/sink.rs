use std::io::Write;

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ChaseResult;
use crate::scene::driver::FrameSnapshot;

/// Configuration provided to a [`FrameSink`] before the first frame of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Fixed step rate of the run.
    pub fps: Fps,
    /// Sequence length in seconds.
    pub duration: f64,
    /// Extra seconds simulated after the sequence ends.
    pub hold: f64,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Consumer of frame snapshots.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, between
/// one `begin` and one `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ChaseResult<()>;
    /// Push one frame in timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameSnapshot) -> ChaseResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ChaseResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameSnapshot)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameSnapshot)] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ChaseResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameSnapshot) -> ChaseResult<()> {
        self.frames.push((idx, *frame));
        Ok(())
    }

    fn end(&mut self) -> ChaseResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Lines written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> ChaseResult<()> {
        self.written = 0;
        tracing::debug!(
            fps = cfg.fps.as_f64(),
            frames = cfg.frame_count,
            "json lines sink started"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameSnapshot) -> ChaseResult<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out
            .write_all(b"\n")
            .with_context(|| format!("write frame {}", idx.0))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ChaseResult<()> {
        self.out.flush().context("flush frame output")?;
        tracing::debug!(frames = self.written, "json lines sink finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
