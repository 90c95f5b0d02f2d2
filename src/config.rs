// ===============================
// src/config.rs
// ===============================
/*
=============================================================================
Project : xtin_sim — simulated crypto trading-venue front-end engine in Rust
Module  : config.rs
Version : 0.1.0
License : MIT
=============================================================================
*/
//
// Every flag falls back to an env var (and `.env`), e.g.
//   MARKET_TICK_MS=500 START_PAGE=trading SEED=7 xtin_sim run
//
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Debug, Parser)]
#[command(name = "xtin_sim", version, about = "Simulated trading-venue front-end engine")]
pub struct Cli {
    #[command(flatten)]
    pub args: Args,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Real timers; commands are read from stdin (default).
    Run,
    /// Virtual clock; directives from stdin, frames and snapshots as JSON lines on stdout.
    Script,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[arg(long, env = "MARKET_TICK_MS", default_value_t = 2000)]
    pub market_tick_ms: u64,
    #[arg(long, env = "ORDER_BOOK_TICK_MS", default_value_t = 1000)]
    pub order_book_tick_ms: u64,
    #[arg(long, env = "MARKET_TABLE_MS", default_value_t = 3000)]
    pub market_table_ms: u64,

    #[arg(long, env = "NOTIFY_ENTER_MS", default_value_t = 100)]
    pub notify_enter_ms: u64,
    #[arg(long, env = "NOTIFY_DISPLAY_MS", default_value_t = 3000)]
    pub notify_display_ms: u64,
    #[arg(long, env = "NOTIFY_EXIT_MS", default_value_t = 300)]
    pub notify_exit_ms: u64,
    #[arg(long, env = "UPLOAD_MS", default_value_t = 2000)]
    pub upload_ms: u64,

    /// Deep-link fragment to start on (`trading`, `#portfolio`, ...).
    #[arg(long, env = "START_PAGE")]
    pub start_page: Option<String>,
    /// Pair shown when the trading page opens.
    #[arg(long, env = "DEFAULT_PAIR", default_value = "BTC-USDT")]
    pub default_pair: String,
    /// Seed for the simulation jitter. `script` mode uses 42 when unset.
    #[arg(long, env = "SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "RECORD_FILE")]
    pub record_file: Option<String>,
    /// 0 disables the metrics endpoint.
    #[arg(long, env = "METRICS_PORT", default_value_t = 9898)]
    pub metrics_port: u16,
}

/// Periods and delays of every timer in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub market_tick: Duration,
    pub order_book_tick: Duration,
    pub market_table: Duration,
    pub notify_enter: Duration,
    pub notify_display: Duration,
    pub notify_exit: Duration,
    pub upload: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            market_tick: Duration::from_millis(2000),
            order_book_tick: Duration::from_millis(1000),
            market_table: Duration::from_millis(3000),
            notify_enter: Duration::from_millis(100),
            notify_display: Duration::from_millis(3000),
            notify_exit: Duration::from_millis(300),
            upload: Duration::from_millis(2000),
        }
    }
}

impl Args {
    /// Zero periods would spin; they are bumped to 1 ms.
    pub fn timings(&self) -> Timings {
        let ms = |v: u64| Duration::from_millis(v.max(1));
        Timings {
            market_tick: ms(self.market_tick_ms),
            order_book_tick: ms(self.order_book_tick_ms),
            market_table: ms(self.market_table_ms),
            notify_enter: Duration::from_millis(self.notify_enter_ms),
            notify_display: Duration::from_millis(self.notify_display_ms),
            notify_exit: Duration::from_millis(self.notify_exit_ms),
            upload: Duration::from_millis(self.upload_ms),
        }
    }
}

pub fn load() -> Cli {
    // .env first so clap's env fallbacks see it
    let _ = dotenv();
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_cadence() {
        let cli = Cli::try_parse_from(["xtin_sim"]).unwrap();
        assert_eq!(cli.mode, None);
        assert_eq!(cli.args.timings(), Timings::default());
        assert_eq!(cli.args.default_pair, "BTC-USDT");
    }

    #[test]
    fn flags_and_subcommand() {
        let cli = Cli::try_parse_from([
            "xtin_sim",
            "--market-tick-ms",
            "0",
            "--start-page",
            "futures",
            "--seed",
            "7",
            "script",
        ])
        .unwrap();
        assert_eq!(cli.mode, Some(Mode::Script));
        assert_eq!(cli.args.timings().market_tick, Duration::from_millis(1));
        assert_eq!(cli.args.start_page.as_deref(), Some("futures"));
        assert_eq!(cli.args.seed, Some(7));
    }
}
