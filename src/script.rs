// ===============================
// src/script.rs
// ===============================
//
// Script mode: the engine on a virtual clock, driven line by line.
// Besides every interactive command it understands
//
//   tick <component> | snapshot <component> | advance <ms>[ms|s]
//
// Frames and snapshots go out as JSON lines, so a run is reproducible for a
// given seed (42 when unset).
//
use std::io::{BufRead, Write};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::app::Exchange;
use crate::command::{Command, Component};
use crate::config::Args;
use crate::error::SimError;
use crate::random::SeededRandom;
use crate::scheduler::VirtualScheduler;
use crate::surface::{HistoryStack, JsonLinesRenderer};

const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Command(Command),
    Tick(Component),
    Snapshot(Component),
    Advance(Duration),
}

fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if let Some(ms) = raw.strip_suffix("ms") {
        return ms.trim().parse().ok().map(Duration::from_millis);
    }
    if let Some(s) = raw.strip_suffix('s') {
        return s.trim().parse().ok().map(Duration::from_secs);
    }
    raw.parse().ok().map(Duration::from_millis)
}

impl Directive {
    /// `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Directive>, SimError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (verb, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let d = match verb.to_ascii_lowercase().as_str() {
            "tick" => Directive::Tick(arg.parse()?),
            "snapshot" => Directive::Snapshot(arg.parse()?),
            "advance" | "wait" => Directive::Advance(
                parse_duration(arg).ok_or_else(|| SimError::BadCommand(line.to_string()))?,
            ),
            _ => Directive::Command(line.parse()?),
        };
        Ok(Some(d))
    }
}

pub fn run<B: BufRead, W: Write>(args: &Args, input: B, out: W) {
    let seed = args.seed.unwrap_or(DEFAULT_SEED);
    let mut ex = Exchange::new(
        args.timings(),
        VirtualScheduler::new(DateTime::<Utc>::default()),
        JsonLinesRenderer::new(out),
        HistoryStack::new(args.start_page.clone()),
        Box::new(SeededRandom::new(Some(seed))),
        &args.default_pair,
    );
    info!(seed, "script mode");
    ex.start();

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(?e, "script input read failed");
                break;
            }
        };
        if line.trim().eq_ignore_ascii_case("quit") {
            break;
        }
        let directive = match Directive::parse(&line) {
            Ok(Some(d)) => d,
            Ok(None) => continue,
            Err(e) => {
                warn!(%e, "directive ignored");
                ex.renderer_mut().emit(&json!({ "error": e.to_string() }));
                continue;
            }
        };
        match directive {
            Directive::Command(cmd) => ex.dispatch(cmd),
            Directive::Tick(c) => {
                if !ex.tick(c) {
                    let e = SimError::BadCommand(line.trim().to_string());
                    ex.renderer_mut().emit(&json!({ "error": e.to_string() }));
                }
            }
            Directive::Snapshot(c) => {
                let snap = ex.snapshot(c);
                ex.renderer_mut().emit(&snap);
            }
            Directive::Advance(by) => ex.advance(by),
        }
    }
    ex.shutdown();
    info!(
        elapsed_ms = ex.scheduler().elapsed().as_millis() as u64,
        pending = ex.scheduler().pending(),
        page = %ex.page(),
        "script finished"
    );
}
