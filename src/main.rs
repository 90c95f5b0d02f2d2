// ===============================
// src/main.rs
// ===============================
/*
 # live mode: commands on stdin, frames in the log
 RUST_LOG=xtin_sim=debug cargo run -- run

 # scripted, reproducible tape
 printf 'navigate trading\nadvance 5s\nsnapshot book\n' | cargo run -- --seed 7 script

 # metrics
 curl -s localhost:9898/metrics | grep '^sim_ticks_total'
*/
/*
=============================================================================
Project : xtin_sim — simulated crypto trading-venue front-end engine in Rust
Version : 0.1.0
License : MIT

Summary : Page router with history, simulated quotes and order book, static
          portfolio P&L, toast notifications and KYC stubs, driven by a
          timer scheduler (real or virtual). Exposes Prometheus metrics and
          records rendered frames as JSONL.
=============================================================================
*/
mod app;
mod command;
mod config;
mod domain;
mod error;
mod kyc;
mod market;
mod metrics;
mod notify;
mod order_form;
mod orderbook;
mod portfolio;
mod random;
mod recorder;
mod router;
mod runtime;
mod scheduler;
mod script;
mod surface;
mod view;

use std::io;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Mode;
use crate::surface::Recorded;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // ---- Logging (stderr; stdout belongs to script output) ----
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    // ---- Config ----
    let cli = config::load();
    let args = cli.args;
    let mode = cli.mode.unwrap_or(Mode::Run);

    info!(
        ?mode,
        market_tick_ms = args.market_tick_ms,
        order_book_tick_ms = args.order_book_tick_ms,
        market_table_ms = args.market_table_ms,
        start_page = ?args.start_page,
        default_pair = %args.default_pair,
        seed = ?args.seed,
        "startup config"
    );

    // ---- Metrics ----
    metrics::init();
    if args.metrics_port != 0 {
        metrics::serve_metrics(args.metrics_port);
    }

    match mode {
        Mode::Run => {
            // ---- Recorder (optional) ----
            let (rec_tx, rec_task) = match args.record_file.clone() {
                Some(path) => {
                    let (tx, rx) = mpsc::channel::<Recorded>(8192);
                    (Some(tx), Some(tokio::spawn(recorder::run(rx, path))))
                }
                None => (None, None),
            };
            runtime::run(args, rec_tx).await;
            // sender is gone with the engine; let the recorder drain and flush
            if let Some(task) = rec_task {
                let _ = task.await;
            }
        }
        Mode::Script => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            script::run(&args, stdin.lock(), stdout.lock());
        }
    }
}
