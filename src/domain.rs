// ===============================
// src/domain.rs
// ===============================
//
// Price scale: 2 decimals (px * 100), same as the quote table.
// Order-book amounts/totals: 1 decimal (qty * 10).
//
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side { #[default] Buy, Sell }
impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Side::Buy => "Buy", Side::Sell => "Sell" })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote { pub symbol: String, pub price: i64, pub change_pct: f64, pub volume: String, pub high: i64, pub low: i64 }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderBookLevel { pub price: i64, pub amount: i64, pub total: i64 }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position { pub symbol: String, pub size: f64, pub entry_price: i64, pub mark_price: i64, pub pnl: i64 }

/// Named views. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    #[default]
    Homepage,
    Trading,
    Futures,
    Portfolio,
    Kyc,
}

impl PageId {
    pub const ALL: [PageId; 5] = [PageId::Homepage, PageId::Trading, PageId::Futures, PageId::Portfolio, PageId::Kyc];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Homepage => "homepage",
            PageId::Trading => "trading",
            PageId::Futures => "futures",
            PageId::Portfolio => "portfolio",
            PageId::Kyc => "kyc",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for PageId {
    type Err = SimError;

    /// Accepts a bare id or a fragment (`#trading`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().trim_start_matches('#');
        PageId::ALL
            .into_iter()
            .find(|p| p.as_str() == id)
            .ok_or_else(|| SimError::UnknownPage(id.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind { Success, Info }

/// Lifecycle of a toast. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase { Pending, Entered, Exiting }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationEvent {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub phase: NotificationPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycField { Pan, Ifsc, Number }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState { Uploading, Uploaded }

/// Everything a timer can fire. Periodic ticks plus per-event one-shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    MarketTick,
    OrderBookTick,
    MarketTableRefresh,
    NotificationEnter(u64),
    NotificationExit(u64),
    NotificationRemove(u64),
    UploadComplete(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_parse_from_fragments() {
        assert_eq!("trading".parse::<PageId>(), Ok(PageId::Trading));
        assert_eq!("#portfolio".parse::<PageId>(), Ok(PageId::Portfolio));
        assert_eq!(
            "__unknown__".parse::<PageId>(),
            Err(SimError::UnknownPage("__unknown__".into()))
        );
        for p in PageId::ALL {
            assert_eq!(p.as_str().parse::<PageId>(), Ok(p));
        }
    }

    #[test]
    fn side_labels() {
        assert_eq!(Side::Buy.to_string(), "Buy");
        assert_eq!(Side::Sell.to_string(), "Sell");
        assert_eq!(Side::default(), Side::Buy);
    }
}
