// ===============================
// src/portfolio.rs (static positions & aggregate PnL)
// ===============================
//
// `pnl` is seeded input, not (mark - entry) * size; the aggregate is a plain sum.
//
use crate::domain::Position;
use crate::metrics::PNL_TOTAL;
use crate::view::{PortfolioView, PositionRow};

/// Sum of position PnL (2-decimal fixed point).
pub fn aggregate(positions: &[Position]) -> i64 {
    positions.iter().map(|p| p.pnl).sum()
}

pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            Position { symbol: "BTC-USDT".into(), size: 2.5, entry_price: 42_850_25, mark_price: 43_250_50, pnl: 1_000_63 },
            Position { symbol: "ETH-USDT".into(), size: 1.0, entry_price: 2_525_40, mark_price: 2_650_75, pnl: 125_40 },
        ])
    }

    pub fn rows(&self) -> Vec<PositionRow> {
        self.positions.iter().map(PositionRow::from).collect()
    }

    pub fn stats(&self) -> PortfolioView {
        let total = aggregate(&self.positions);
        PNL_TOTAL.set(total);
        PortfolioView::from_total(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Trend;

    fn pos(pnl: i64) -> Position {
        Position { symbol: "X-USDT".into(), size: 1.0, entry_price: 1_00, mark_price: 1_00, pnl }
    }

    #[test]
    fn sums_seeded_pnl() {
        assert_eq!(aggregate(&[pos(1_000_63), pos(125_40)]), 1_126_03);
        assert_eq!(aggregate(&[]), 0);
    }

    #[test]
    fn pnl_is_not_recomputed_from_marks() {
        // mark == entry, yet pnl is kept as given
        let p = Portfolio::new(vec![pos(-5_00)]);
        let v = p.stats();
        assert_eq!(v.total_pnl, -5_00);
        assert_eq!(v.unrealized, "-$5.00");
        assert_eq!(v.trend, Trend::Negative);
    }

    #[test]
    fn aggregate_view_carries_real_sign() {
        let flat = Portfolio::new(vec![pos(2_50), pos(-2_50)]).stats();
        assert_eq!(flat.unrealized, "+$0.00");
        assert_eq!(flat.trend, Trend::Positive);

        let loss = Portfolio::new(vec![pos(1_000_63), pos(-1_200_00)]).stats();
        assert_eq!(loss.unrealized, "-$199.37");
        assert_eq!(loss.trend, Trend::Negative);
    }

    #[test]
    fn seeded_stats_and_rows() {
        let p = Portfolio::seeded();
        let v = p.stats();
        assert_eq!(v.unrealized, "+$1126.03");
        assert_eq!(v.trend, Trend::Positive);

        let rows = p.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].size, "2.5");
        assert_eq!(rows[0].entry, "$42,850.25");
        assert_eq!(rows[0].pnl, "+$1000.63");
        assert_eq!(rows[1].size, "1");
    }
}
