// ===============================
// src/surface.rs
// ===============================
//
// External collaborators of the core:
// - Renderer: takes view-model frames, owns all presentation
// - NavigationSurface: deep-link fragment + back/forward history
//
use std::io::Write;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::view::Frame;

pub trait Renderer {
    fn render(&mut self, frame: Frame);
}

pub trait NavigationSurface {
    /// Deep-link fragment present at load, without the `#`.
    fn initial_fragment(&self) -> Option<String>;
    fn push_fragment(&mut self, fragment: &str);
    /// Fragment of the entry we moved back to, `None` at the start of history.
    fn back(&mut self) -> Option<String>;
    fn forward(&mut self) -> Option<String>;
}

/// In-memory browser history: a list of fragments and a cursor.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryStack {
    pub fn new(initial: Option<String>) -> Self {
        let first = initial.map(|f| f.trim_start_matches('#').to_string()).unwrap_or_default();
        Self { entries: vec![first], cursor: 0 }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }
}

impl NavigationSurface for HistoryStack {
    fn initial_fragment(&self) -> Option<String> {
        Some(self.entries[0].clone()).filter(|f| !f.is_empty())
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment.to_string());
        self.cursor += 1;
    }

    fn back(&mut self) -> Option<String> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(self.entries[self.cursor].clone())
    }

    fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }
}

/// A rendered frame with wall-clock time, as written by the recorder.
#[derive(Debug, Clone, Serialize)]
pub struct Recorded {
    pub ts_ms: i64,
    #[serde(flatten)]
    pub frame: Frame,
}

/// Live-mode renderer: logs frames and hands them to the JSONL recorder.
pub struct TracingRenderer {
    rec_tx: Option<mpsc::Sender<Recorded>>,
}

impl TracingRenderer {
    pub fn new(rec_tx: Option<mpsc::Sender<Recorded>>) -> Self {
        Self { rec_tx }
    }
}

impl Renderer for TracingRenderer {
    fn render(&mut self, frame: Frame) {
        match &frame {
            Frame::Page { page } => info!(%page, "page active"),
            Frame::NotificationEnter { notification } => {
                info!(id = notification.id, kind = ?notification.kind, msg = %notification.message, "notification")
            }
            Frame::Header { view } => debug!(symbol = %view.symbol, last = %view.last, change = %view.change, "header"),
            other => debug!(frame = ?other, "render"),
        }
        if let Some(tx) = &self.rec_tx {
            // never block the loop on the recorder
            let _ = tx.try_send(Recorded { ts_ms: Utc::now().timestamp_millis(), frame });
        }
    }
}

/// Script-mode renderer: one JSON object per frame.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn emit<T: Serialize>(&mut self, value: &T) {
        let line = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(?e, "serialize error, skip line");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!(?e, "write failed");
        }
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: Frame) {
        self.emit(&frame);
    }
}

/// Keeps every frame; lets tests assert on what was rendered.
#[cfg(test)]
#[derive(Default)]
pub struct FrameBuffer {
    pub frames: Vec<Frame>,
}

#[cfg(test)]
impl Renderer for FrameBuffer {
    fn render(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}
