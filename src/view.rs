// ===============================
// src/view.rs
// ===============================
//
// Read-only view-models handed to the Renderer, plus the number formatting
// they share. Nothing here mutates core state.
//
use serde::Serialize;

use crate::domain::{
    KycField, NotificationEvent, OrderBookLevel, PageId, Position, Quote, Side, UploadState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend { Positive, Negative }

impl Trend {
    pub fn of(x: f64) -> Self { if x >= 0.0 { Trend::Positive } else { Trend::Negative } }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub symbol: String,
    pub price: i64,
    pub change_pct: f64,
    pub last: String,
    pub change: String,
    pub volume: String,
    pub trend: Trend,
}

impl From<&Quote> for HeaderView {
    fn from(q: &Quote) -> Self {
        Self {
            symbol: q.symbol.clone(),
            price: q.price,
            change_pct: q.change_pct,
            last: fmt_usd(q.price),
            change: fmt_change(q.change_pct),
            volume: q.volume.clone(),
            trend: Trend::of(q.change_pct),
        }
    }
}

/// One row of the ticker strip or the futures market table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerView { pub symbol: String, pub price: String, pub change: String, pub trend: Trend }

impl From<&Quote> for TickerView {
    fn from(q: &Quote) -> Self {
        Self { symbol: q.symbol.clone(), price: fmt_usd(q.price), change: fmt_change(q.change_pct), trend: Trend::of(q.change_pct) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelView { pub price: String, pub amount: String, pub total: String }

impl From<&OrderBookLevel> for LevelView {
    fn from(l: &OrderBookLevel) -> Self {
        Self { price: fmt_price(l.price), amount: fmt_tenths(l.amount), total: fmt_tenths(l.total) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView { pub asks: Vec<LevelView>, pub bids: Vec<LevelView> }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRow { pub symbol: String, pub size: String, pub entry: String, pub mark: String, pub pnl: String, pub trend: Trend }

impl From<&Position> for PositionRow {
    fn from(p: &Position) -> Self {
        Self {
            symbol: p.symbol.clone(),
            size: p.size.to_string(),
            entry: fmt_usd(p.entry_price),
            mark: fmt_usd(p.mark_price),
            pnl: fmt_pnl(p.pnl),
            trend: Trend::of(p.pnl as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioView { pub total_pnl: i64, pub unrealized: String, pub trend: Trend }

impl PortfolioView {
    pub fn from_total(total_pnl: i64) -> Self {
        Self { total_pnl, unrealized: fmt_pnl(total_pnl), trend: Trend::of(total_pnl as f64) }
    }
}

/// Everything the core ever asks the Renderer to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame {
    Page { page: PageId },
    Menus { markets_open: bool, mobile_open: bool },
    Ticker { items: Vec<TickerView> },
    ActivePair { symbol: String },
    Header { view: HeaderView },
    OrderBook { book: BookView },
    Positions { rows: Vec<PositionRow> },
    Portfolio { view: PortfolioView },
    MarketTable { rows: Vec<TickerView> },
    OrderTicket { side: Side, submit_label: String, total: Option<String> },
    NotificationEnter { notification: NotificationEvent },
    NotificationExit { id: u64 },
    NotificationRemoved { id: u64 },
    Upload { slot: String, state: UploadState },
    FieldValidity { field: KycField, valid: bool },
}

// ---- formatting ----

/// `4325050` -> `43,250.50`
pub fn fmt_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let digits = (abs / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{:02}", abs % 100)
}

pub fn fmt_usd(cents: i64) -> String {
    format!("${}", fmt_price(cents))
}

/// `+` for zero and up; negatives already carry their `-`.
pub fn fmt_change(pct: f64) -> String {
    // -0.0 would print as "-0.00"
    let pct = pct + 0.0;
    if pct >= 0.0 { format!("+{pct:.2}%") } else { format!("{pct:.2}%") }
}

/// Signed currency, no grouping: `+$1126.03`, `-$5.00`.
pub fn fmt_pnl(cents: i64) -> String {
    let sign = if cents >= 0 { '+' } else { '-' };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

pub fn fmt_tenths(tenths: i64) -> String {
    let sign = if tenths < 0 { "-" } else { "" };
    let abs = tenths.unsigned_abs();
    format!("{sign}{}.{}", abs / 10, abs % 10)
}
