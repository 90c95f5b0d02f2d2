// ===============================
// src/market.rs
// ===============================
//
// Quote table + random-walk generator.
// - tick(): each price moves by U(-0.5%, +0.5%), rounded to 2 decimals,
//   change_pct is resampled from U(-5, 5) (not derived from the move).
// - Quotes live in a Vec so iteration (and therefore the draw order of a
//   seeded source) is stable; the map is only an index.
//
use ahash::AHashMap as HashMap;
use tracing::debug;

use crate::domain::Quote;
use crate::error::SimError;
use crate::metrics::{QUOTE_PRICE, TICKS};
use crate::random::RandomSource;
use crate::view::{HeaderView, TickerView};

const MAX_MOVE: f64 = 0.005;
const CHANGE_RANGE_PCT: f64 = 5.0;

pub struct MarketDataSimulator {
    quotes: Vec<Quote>,
    index: HashMap<String, usize>,
}

impl MarketDataSimulator {
    pub fn new(quotes: Vec<Quote>) -> Self {
        let index = quotes.iter().enumerate().map(|(i, q)| (q.symbol.clone(), i)).collect();
        Self { quotes, index }
    }

    /// Starting table of the simulated venue.
    pub fn seeded() -> Self {
        let q = |symbol: &str, price: i64, change_pct: f64, volume: &str, high: i64, low: i64| Quote {
            symbol: symbol.to_string(),
            price,
            change_pct,
            volume: volume.to_string(),
            high,
            low,
        };
        Self::new(vec![
            q("BTC-USDT", 43_250_50, 2.35, "2.1B", 44_120_00, 42_380_00),
            q("ETH-USDT", 2_650_75, 1.89, "890M", 2_698_00, 2_580_00),
            q("SOL-USDT", 85_42, -0.85, "125M", 87_50, 84_20),
            q("AVAX-USDT", 24_83, 3.21, "67M", 25_10, 23_90),
        ])
    }

    pub fn tick(&mut self, rng: &mut dyn RandomSource) {
        for q in self.quotes.iter_mut() {
            let fluctuation = rng.symmetric(MAX_MOVE);
            q.price = ((q.price as f64) * (1.0 + fluctuation)).round().max(1.0) as i64;
            q.change_pct = rng.symmetric(CHANGE_RANGE_PCT);
            QUOTE_PRICE.with_label_values(&[&q.symbol]).set(q.price as f64 / 100.0);
        }
        TICKS.with_label_values(&["market"]).inc();
    }

    pub fn quote(&self, symbol: &str) -> Result<&Quote, SimError> {
        self.index
            .get(symbol)
            .map(|&i| &self.quotes[i])
            .ok_or_else(|| SimError::UnknownSymbol(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// `None` for unknown symbols; callers render nothing in that case.
    pub fn header_view(&self, symbol: &str) -> Option<HeaderView> {
        match self.quote(symbol) {
            Ok(q) => Some(HeaderView::from(q)),
            Err(e) => {
                debug!(%e, "no header data");
                None
            }
        }
    }

    /// Ticker strip / market table rows, in table order.
    pub fn tickers(&self) -> Vec<TickerView> {
        self.quotes.iter().map(TickerView::from).collect()
    }

    #[cfg(test)]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }
}
