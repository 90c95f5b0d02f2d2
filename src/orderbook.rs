// ===============================
// src/orderbook.rs
// ===============================
//
// Synthetic 3x3 ladder around the BTC mid. Levels are perturbed in place:
// never re-sorted, never added/removed, `total` is display data seeded at
// construction and never recomputed from price * amount.
//
use crate::domain::OrderBookLevel;
use crate::metrics::TICKS;
use crate::random::RandomSource;
use crate::view::{BookView, LevelView};

/// 0.1 in tenths.
const MIN_AMOUNT: i64 = 1;
/// +-0.25 in tenths.
const AMOUNT_JITTER: f64 = 2.5;
/// +-1.00 in cents.
const PRICE_JITTER: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBookSnapshot {
    pub asks: Vec<OrderBookLevel>,
    pub bids: Vec<OrderBookLevel>,
}

impl OrderBookSnapshot {
    pub fn view(&self) -> BookView {
        BookView {
            asks: self.asks.iter().map(LevelView::from).collect(),
            bids: self.bids.iter().map(LevelView::from).collect(),
        }
    }
}

pub struct OrderBookSynthesizer {
    asks: Vec<OrderBookLevel>,
    bids: Vec<OrderBookLevel>,
}

impl OrderBookSynthesizer {
    pub fn new(asks: Vec<OrderBookLevel>, bids: Vec<OrderBookLevel>) -> Self {
        Self { asks, bids }
    }

    pub fn seeded() -> Self {
        let l = |price: i64, amount: i64, total: i64| OrderBookLevel { price, amount, total };
        Self::new(
            vec![l(43_265_00, 32, 75), l(43_260_00, 18, 43), l(43_255_00, 25, 25)],
            vec![l(43_245_00, 19, 19), l(43_240_00, 27, 46), l(43_235_00, 14, 60)],
        )
    }

    pub fn tick(&mut self, rng: &mut dyn RandomSource) {
        for level in self.asks.iter_mut().chain(self.bids.iter_mut()) {
            perturb(level, rng);
        }
        TICKS.with_label_values(&["order_book"]).inc();
    }

    pub fn snapshot(&self) -> OrderBookSnapshot {
        OrderBookSnapshot { asks: self.asks.clone(), bids: self.bids.clone() }
    }
}

fn perturb(level: &mut OrderBookLevel, rng: &mut dyn RandomSource) {
    let amount = level.amount as f64 + rng.symmetric(AMOUNT_JITTER);
    level.amount = (amount.round() as i64).max(MIN_AMOUNT);
    let price = level.price as f64 + rng.symmetric(PRICE_JITTER);
    // ladder prices sit far above the jitter; the floor only guards degenerate seeds
    level.price = (price.round() as i64).max(1);
}
