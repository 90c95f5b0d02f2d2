// ===============================
// src/metrics.rs
// ===============================
use once_cell::sync::Lazy;
use prometheus::{Encoder, GaugeVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use tracing::{debug, error, info, warn};

// Single custom registry (everything below is registered in `init`)
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

// -------- Simulation --------
pub static TICKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(Opts::new("sim_ticks_total", "simulation ticks per component"), &["component"]).unwrap()
});

pub static QUOTE_PRICE: Lazy<GaugeVec> = Lazy::new(|| {
    GaugeVec::new(Opts::new("sim_quote_price", "last simulated price per symbol"), &["symbol"]).unwrap()
});

pub static PNL_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| IntGauge::new("portfolio_pnl_cents", "aggregate position PnL (cents)").unwrap());

// -------- Navigation --------
pub static NAVIGATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(Opts::new("navigations_total", "page activations (label: page)"), &["page"]).unwrap()
});

pub static NAVIGATIONS_IGNORED: Lazy<IntCounter> =
    Lazy::new(|| IntCounter::new("navigations_ignored_total", "navigation to unknown pages").unwrap());

// -------- Feedback / orders --------
pub static NOTIFICATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(Opts::new("notifications_total", "notifications pushed (label: kind)"), &["kind"]).unwrap()
});

pub static NOTIFICATIONS_ACTIVE: Lazy<IntGauge> =
    Lazy::new(|| IntGauge::new("notifications_active", "notifications not yet removed").unwrap());

pub static ORDERS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(Opts::new("orders_submitted_total", "orders accepted and discarded (label: side)"), &["side"])
        .unwrap()
});

// ---- Config visibility ----
pub static CONFIG_PERIOD_MS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(Opts::new("config_timer_period_ms", "periodic timer cadence (label: timer)"), &["timer"]).unwrap()
});

pub fn init() {
    for res in [
        REGISTRY.register(Box::new(TICKS.clone())),
        REGISTRY.register(Box::new(QUOTE_PRICE.clone())),
        REGISTRY.register(Box::new(PNL_TOTAL.clone())),
        REGISTRY.register(Box::new(NAVIGATIONS.clone())),
        REGISTRY.register(Box::new(NAVIGATIONS_IGNORED.clone())),
        REGISTRY.register(Box::new(NOTIFICATIONS.clone())),
        REGISTRY.register(Box::new(NOTIFICATIONS_ACTIVE.clone())),
        REGISTRY.register(Box::new(ORDERS.clone())),
        REGISTRY.register(Box::new(CONFIG_PERIOD_MS.clone())),
    ] {
        if let Err(e) = res {
            warn!(?e, "metric registration failed");
        }
    }
}

// Prometheus text format
fn encode_metrics() -> Vec<u8> {
    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&REGISTRY.gather(), &mut buf) {
        warn!(?e, "metrics encode failed");
        buf.clear();
    }
    if buf.is_empty() {
        buf.extend_from_slice(b"# no sim metrics registered\n");
    }
    buf
}

/// Path of the request line (`GET /metrics HTTP/1.1` -> `/metrics`).
fn request_path(req: &[u8]) -> Option<&str> {
    let line = std::str::from_utf8(req).ok()?.lines().next()?;
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET"), Some(path)) => Some(path),
        _ => None,
    }
}

/// `/` and `/metrics` get the registry; anything else is a 404.
fn respond(path: Option<&str>) -> Vec<u8> {
    let (status, body) = match path {
        Some("/") | Some("/metrics") => ("200 OK", encode_metrics()),
        _ => ("404 Not Found", b"not found\n".to_vec()),
    };
    let mut out = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/plain; version=0.0.4; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    out.extend_from_slice(&body);
    out
}

fn handle_client(mut stream: TcpStream) {
    let mut req = [0u8; 1024];
    let n = stream.read(&mut req).unwrap_or(0);
    let path = request_path(&req[..n]);
    debug!(?path, "metrics scrape");
    if let Err(e) = stream.write_all(&respond(path)).and_then(|_| stream.flush()) {
        warn!(?e, "metrics reply failed");
    }
}

/// Serves on a plain OS thread so the single-threaded runtime never blocks on it.
pub fn serve_metrics(port: u16) {
    thread::spawn(move || {
        let addr = format!("0.0.0.0:{port}");
        let listener = match TcpListener::bind(&addr) {
            Ok(l) => l,
            Err(e) => {
                error!(?e, %addr, "metrics bind failed");
                return;
            }
        };
        info!(%addr, "metrics listening");
        for conn in listener.incoming() {
            match conn {
                Ok(stream) => handle_client(stream),
                Err(e) => warn!(?e, "metrics accept error"),
            }
        }
    });
}
