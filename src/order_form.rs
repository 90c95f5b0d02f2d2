// ===============================
// src/order_form.rs
// ===============================
//
// Order ticket on the trading page. Orders are never matched: submit only
// yields a confirmation message and clears the inputs.
//
use crate::domain::Side;
use crate::metrics::ORDERS;

#[derive(Debug, Default)]
pub struct OrderForm {
    side: Side,
    price: String,
    amount: String,
}

/// Malformed or non-finite input counts as zero.
fn parse_input(s: &str) -> f64 {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl OrderForm {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    pub fn set_price(&mut self, raw: impl Into<String>) {
        self.price = raw.into();
    }

    pub fn set_amount(&mut self, raw: impl Into<String>) {
        self.amount = raw.into();
    }

    /// `price * amount` to 2 decimals; blank (not "0.00") when <= 0 or when
    /// the product overflows.
    pub fn total(&self) -> Option<String> {
        let total = parse_input(&self.price) * parse_input(&self.amount);
        (total.is_finite() && total > 0.0).then(|| format!("{total:.2}"))
    }

    /// `Buy BTC` for `BTC-USDT`.
    pub fn submit_label(&self, pair: &str) -> String {
        let base = pair.split('-').next().unwrap_or(pair);
        format!("{} {base}", self.side)
    }

    /// Accepts and discards the order; returns the confirmation text.
    pub fn submit(&mut self) -> String {
        ORDERS.with_label_values(&[&self.side.to_string()]).inc();
        self.price.clear();
        self.amount.clear();
        format!("{} order submitted successfully!", self.side)
    }
}
