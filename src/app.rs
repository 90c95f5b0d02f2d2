// ===============================
// src/app.rs
// ===============================
//
// Composition root of the engine. Owns every component; commands and fired
// timers come in, frames go out to the Renderer. Within one tick all state
// mutation finishes before anything is rendered from it.
//
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::command::{Command, Component};
use crate::config::Timings;
use crate::domain::{NotificationEvent, NotificationKind, NotificationPhase, PageId, TimerTask, UploadState};
use crate::kyc::{self, UploadDesk};
use crate::market::MarketDataSimulator;
use crate::metrics::CONFIG_PERIOD_MS;
use crate::notify::NotificationQueue;
use crate::order_form::OrderForm;
use crate::orderbook::OrderBookSynthesizer;
use crate::portfolio::Portfolio;
use crate::random::RandomSource;
use crate::router::Router;
use crate::scheduler::{Scheduler, TimerId, VirtualScheduler};
use crate::surface::{NavigationSurface, Renderer};
use crate::view::{BookView, Frame, PortfolioView, PositionRow, TickerView};

/// Read-only state dump for automation (`snapshot <component>`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum Snapshot {
    Market { quotes: Vec<TickerView> },
    OrderBook { book: BookView },
    MarketTable { rows: Vec<TickerView> },
    Portfolio { stats: PortfolioView, positions: Vec<PositionRow> },
    Router { page: PageId, active_pair: String, markets_open: bool, mobile_open: bool },
    Notifications { active: Vec<NotificationEvent> },
}

pub struct Exchange<S: Scheduler, R: Renderer, N: NavigationSurface> {
    timings: Timings,
    scheduler: S,
    renderer: R,
    rng: Box<dyn RandomSource>,
    router: Router<N>,
    market: MarketDataSimulator,
    book: OrderBookSynthesizer,
    portfolio: Portfolio,
    notifications: NotificationQueue,
    order_form: OrderForm,
    uploads: UploadDesk,
    default_pair: String,
    active_pair: String,
    periodic: Vec<TimerId>,
}

impl<S: Scheduler, R: Renderer, N: NavigationSurface> Exchange<S, R, N> {
    pub fn new(
        timings: Timings,
        scheduler: S,
        renderer: R,
        nav: N,
        rng: Box<dyn RandomSource>,
        default_pair: &str,
    ) -> Self {
        let market = MarketDataSimulator::seeded();
        let default_pair = if market.contains(default_pair) {
            default_pair.to_string()
        } else {
            debug!(pair = %default_pair, "unknown default pair, using BTC-USDT");
            "BTC-USDT".to_string()
        };
        Self {
            timings,
            scheduler,
            renderer,
            rng,
            router: Router::new(nav),
            market,
            book: OrderBookSynthesizer::seeded(),
            portfolio: Portfolio::seeded(),
            notifications: NotificationQueue::new(),
            order_form: OrderForm::default(),
            uploads: UploadDesk::default(),
            active_pair: default_pair.clone(),
            default_pair,
            periodic: Vec::new(),
        }
    }

    /// Arms the three periodic tasks and shows the initial page.
    pub fn start(&mut self) {
        let t = self.timings;
        for (label, period, task) in [
            ("market_tick", t.market_tick, TimerTask::MarketTick),
            ("order_book_tick", t.order_book_tick, TimerTask::OrderBookTick),
            ("market_table", t.market_table, TimerTask::MarketTableRefresh),
        ] {
            self.periodic.push(self.scheduler.schedule_periodic(period, task));
            CONFIG_PERIOD_MS.with_label_values(&[label]).set(period.as_millis() as i64);
        }
        let page = self.router.current();
        info!(%page, pair = %self.active_pair, "exchange started");
        self.show(page);
    }

    /// Stops the periodic tasks. One-shot notification/upload timers are left
    /// to expire on their own.
    pub fn shutdown(&mut self) {
        for id in self.periodic.drain(..) {
            self.scheduler.cancel(id);
        }
        info!("exchange stopped");
    }

    // ---- user interaction ----

    pub fn dispatch(&mut self, cmd: Command) {
        if cmd.is_click() {
            self.close_menus();
        }
        match cmd {
            Command::Navigate(target) => {
                self.navigate(&target);
            }
            Command::Back => {
                if let Some(page) = self.router.back() {
                    self.show(page);
                }
            }
            Command::Forward => {
                if let Some(page) = self.router.forward() {
                    self.show(page);
                }
            }
            Command::Trade(symbol) => self.navigate_to_symbol_trading(&symbol),
            Command::SelectPair(label) => {
                let symbol = label.trim_end_matches("-PERP");
                if self.market.contains(symbol) {
                    self.set_active_pair(symbol);
                }
            }
            Command::ToggleMarkets => {
                let m = self.router.toggle_markets();
                self.renderer.render(Frame::Menus { markets_open: m.markets_open, mobile_open: m.mobile_open });
            }
            Command::ToggleMobile => {
                let m = self.router.toggle_mobile();
                self.renderer.render(Frame::Menus { markets_open: m.markets_open, mobile_open: m.mobile_open });
            }
            Command::Click => {}
            Command::SelectSide(side) => {
                self.order_form.set_side(side);
                self.render_ticket();
            }
            Command::SetPrice(raw) => {
                self.order_form.set_price(raw);
                self.render_ticket();
            }
            Command::SetAmount(raw) => {
                self.order_form.set_amount(raw);
                self.render_ticket();
            }
            Command::Submit => {
                let msg = self.order_form.submit();
                self.notify(msg, NotificationKind::Success);
                self.render_ticket();
            }
            Command::Upload(slot) => {
                if self.uploads.begin(&slot) {
                    self.renderer.render(Frame::Upload { slot: slot.clone(), state: UploadState::Uploading });
                    self.scheduler.schedule_once(self.timings.upload, TimerTask::UploadComplete(slot));
                } else {
                    debug!(%slot, "upload already started");
                }
            }
            Command::EditField { field, value } => {
                let valid = kyc::validate(field, &value);
                self.renderer.render(Frame::FieldValidity { field, valid });
            }
        }
    }

    /// `Some(page)` on a known target; unknown targets only close menus.
    pub fn navigate(&mut self, target: &str) -> Option<PageId> {
        let before = self.router.menus();
        let page = self.router.navigate(target);
        if before != self.router.menus() {
            self.render_menus();
        }
        if let Some(page) = page {
            self.show(page);
        }
        page
    }

    pub fn navigate_to_symbol_trading(&mut self, symbol: &str) {
        self.navigate(PageId::Trading.as_str());
        self.set_active_pair(symbol);
    }

    // ---- timers ----

    pub fn on_timer(&mut self, task: TimerTask) {
        match task {
            TimerTask::MarketTick => {
                self.market.tick(self.rng.as_mut());
                self.renderer.render(Frame::Ticker { items: self.market.tickers() });
                if self.router.current() == PageId::Trading {
                    self.render_header();
                }
            }
            TimerTask::OrderBookTick => {
                self.book.tick(self.rng.as_mut());
                if self.router.current() == PageId::Trading {
                    self.render_book();
                }
            }
            TimerTask::MarketTableRefresh => {
                if self.router.current() == PageId::Futures {
                    self.renderer.render(Frame::MarketTable { rows: self.market.tickers() });
                }
            }
            TimerTask::NotificationEnter(id) => {
                if let Some(ev) = self.notifications.advance(id, NotificationPhase::Entered) {
                    let notification = ev.clone();
                    self.renderer.render(Frame::NotificationEnter { notification });
                }
            }
            TimerTask::NotificationExit(id) => {
                if self.notifications.advance(id, NotificationPhase::Exiting).is_some() {
                    self.renderer.render(Frame::NotificationExit { id });
                    self.scheduler.schedule_once(self.timings.notify_exit, TimerTask::NotificationRemove(id));
                }
            }
            TimerTask::NotificationRemove(id) => {
                if self.notifications.remove(id).is_some() {
                    self.renderer.render(Frame::NotificationRemoved { id });
                }
            }
            TimerTask::UploadComplete(slot) => {
                if self.uploads.complete(&slot) {
                    self.renderer.render(Frame::Upload { slot, state: UploadState::Uploaded });
                    self.notify("Document uploaded successfully!", NotificationKind::Success);
                }
            }
        }
    }

    /// Runs one periodic task right now, outside its cadence.
    pub fn tick(&mut self, component: Component) -> bool {
        match component.timer_task() {
            Some(task) => {
                self.on_timer(task);
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self, component: Component) -> Snapshot {
        match component {
            Component::Market => Snapshot::Market { quotes: self.market.tickers() },
            Component::OrderBook => Snapshot::OrderBook { book: self.book.snapshot().view() },
            Component::MarketTable => Snapshot::MarketTable { rows: self.market.tickers() },
            Component::Portfolio => Snapshot::Portfolio { stats: self.portfolio.stats(), positions: self.portfolio.rows() },
            Component::Router => {
                let m = self.router.menus();
                Snapshot::Router {
                    page: self.router.current(),
                    active_pair: self.active_pair.clone(),
                    markets_open: m.markets_open,
                    mobile_open: m.mobile_open,
                }
            }
            Component::Notifications => Snapshot::Notifications { active: self.notifications.active().to_vec() },
        }
    }

    /// Appends a toast and arms its enter/exit timers; removal is armed when
    /// the exit fires.
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let ev = self.notifications.push(message, kind, self.scheduler.now());
        self.scheduler.schedule_once(self.timings.notify_enter, TimerTask::NotificationEnter(ev.id));
        self.scheduler.schedule_once(self.timings.notify_display, TimerTask::NotificationExit(ev.id));
        ev.id
    }

    // ---- accessors ----

    pub fn page(&self) -> PageId {
        self.router.current()
    }

    pub fn active_pair(&self) -> &str {
        &self.active_pair
    }

    #[cfg(test)]
    pub fn market(&self) -> &MarketDataSimulator {
        &self.market
    }

    #[cfg(test)]
    pub fn router(&self) -> &Router<N> {
        &self.router
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // ---- page refresh ----

    fn show(&mut self, page: PageId) {
        self.renderer.render(Frame::Page { page });
        match page {
            PageId::Trading => {
                self.active_pair = self.default_pair.clone();
                self.render_book();
                self.renderer.render(Frame::ActivePair { symbol: self.active_pair.clone() });
                self.render_header();
                self.renderer.render(Frame::Positions { rows: self.portfolio.rows() });
                self.render_ticket();
            }
            PageId::Portfolio => {
                self.renderer.render(Frame::Portfolio { view: self.portfolio.stats() });
            }
            PageId::Futures => {
                self.renderer.render(Frame::MarketTable { rows: self.market.tickers() });
            }
            PageId::Homepage | PageId::Kyc => {}
        }
    }

    /// Unknown symbols leave the header as it was.
    fn set_active_pair(&mut self, symbol: &str) {
        let Some(view) = self.market.header_view(symbol) else {
            return;
        };
        self.active_pair = view.symbol.clone();
        self.renderer.render(Frame::ActivePair { symbol: view.symbol.clone() });
        self.renderer.render(Frame::Header { view });
        self.render_ticket();
    }

    fn render_header(&mut self) {
        if let Some(view) = self.market.header_view(&self.active_pair) {
            self.renderer.render(Frame::Header { view });
        }
    }

    fn render_book(&mut self) {
        self.renderer.render(Frame::OrderBook { book: self.book.snapshot().view() });
    }

    fn render_ticket(&mut self) {
        let f = &self.order_form;
        let frame = Frame::OrderTicket {
            side: f.side(),
            submit_label: f.submit_label(&self.active_pair),
            total: f.total(),
        };
        self.renderer.render(frame);
    }

    fn render_menus(&mut self) {
        let m = self.router.menus();
        self.renderer.render(Frame::Menus { markets_open: m.markets_open, mobile_open: m.mobile_open });
    }

    fn close_menus(&mut self) {
        if self.router.close_menus() {
            self.render_menus();
        }
    }
}

impl<R: Renderer, N: NavigationSurface> Exchange<VirtualScheduler, R, N> {
    /// Moves virtual time forward by `by`, firing every timer due on the way
    /// in deadline order. Timers armed while firing are honored if they fall
    /// inside the window.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.elapsed() + by;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.on_timer(task);
        }
        self.scheduler.settle(until);
    }
}

#[cfg(test)]
mod tests {

    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::{KycField, Side};
    use crate::random::{SeededRandom, ZeroRandom};
    use crate::surface::{FrameBuffer, HistoryStack};
    use crate::view::{HeaderView, Trend};

    type TestExchange = Exchange<VirtualScheduler, FrameBuffer, HistoryStack>;

    fn exchange_with(fragment: Option<&str>, rng: Box<dyn RandomSource>) -> TestExchange {
        let mut ex = Exchange::new(
            Timings::default(),
            VirtualScheduler::new(DateTime::<Utc>::default()),
            FrameBuffer::default(),
            HistoryStack::new(fragment.map(str::to_string)),
            rng,
            "BTC-USDT",
        );
        ex.start();
        ex.renderer_mut().frames.clear();
        ex
    }

    fn exchange() -> TestExchange {
        exchange_with(None, Box::new(SeededRandom::new(Some(42))))
    }

    fn frames(ex: &mut TestExchange) -> Vec<Frame> {
        std::mem::take(&mut ex.renderer_mut().frames)
    }

    fn headers(frames: &[Frame]) -> Vec<HeaderView> {
        frames
            .iter()
            .filter_map(|f| match f {
                Frame::Header { view } => Some(view.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn trade_symbol_end_to_end() {
        let mut ex = exchange();
        assert_eq!(ex.page(), PageId::Homepage);
        ex.dispatch(Command::Trade("ETH-USDT".into()));

        assert_eq!(ex.page(), PageId::Trading);
        assert_eq!(ex.active_pair(), "ETH-USDT");
        let quote = ex.market().quote("ETH-USDT").unwrap().clone();
        let fr = frames(&mut ex);
        let last = headers(&fr).pop().unwrap();
        assert_eq!(last.symbol, "ETH-USDT");
        assert_eq!(last.price, quote.price);
        assert_eq!(last.change_pct, quote.change_pct);
        assert!(fr.contains(&Frame::OrderTicket { side: Side::Buy, submit_label: "Buy ETH".into(), total: None }));
    }

    #[test]
    fn trading_page_resets_to_default_pair() {
        let mut ex = exchange();
        ex.navigate_to_symbol_trading("SOL-USDT");
        ex.navigate("portfolio");
        ex.navigate("trading");
        assert_eq!(ex.active_pair(), "BTC-USDT");
    }

    #[test]
    fn unknown_symbol_trade_keeps_header() {
        let mut ex = exchange();
        ex.navigate_to_symbol_trading("DOGE-USDT");
        assert_eq!(ex.page(), PageId::Trading);
        assert_eq!(ex.active_pair(), "BTC-USDT");
        let hs = headers(&frames(&mut ex));
        assert!(hs.iter().all(|h| h.symbol == "BTC-USDT"));
    }

    #[test]
    fn unknown_page_renders_nothing() {
        let mut ex = exchange();
        ex.navigate("trading");
        frames(&mut ex);
        let history = ex.router().nav().len();
        assert_eq!(ex.navigate("__unknown__"), None);
        assert_eq!(ex.page(), PageId::Trading);
        assert_eq!(ex.router().nav().len(), history);
        assert!(frames(&mut ex).is_empty());
    }

    #[test]
    fn repeated_navigation_refreshes_without_history() {
        let mut ex = exchange();
        ex.navigate("portfolio");
        let history = ex.router().nav().len();
        frames(&mut ex);
        ex.navigate("portfolio");
        assert_eq!(ex.router().nav().len(), history);
        let fr = frames(&mut ex);
        assert!(fr.iter().any(|f| matches!(f, Frame::Portfolio { view } if view.unrealized == "+$1126.03" && view.trend == Trend::Positive)));
    }

    #[test]
    fn starts_on_deep_link_page() {
        let mut ex = Exchange::new(
            Timings::default(),
            VirtualScheduler::new(DateTime::<Utc>::default()),
            FrameBuffer::default(),
            HistoryStack::new(Some("futures".into())),
            Box::new(ZeroRandom),
            "BTC-USDT",
        );
        ex.start();
        assert_eq!(ex.page(), PageId::Futures);
        let fr = frames(&mut ex);
        assert_eq!(fr[0], Frame::Page { page: PageId::Futures });
        assert!(matches!(fr[1], Frame::MarketTable { .. }));
    }

    #[test]
    fn book_renders_only_on_trading() {
        let mut ex = exchange();
        ex.advance(Duration::from_secs(3));
        let fr = frames(&mut ex);
        assert!(!fr.iter().any(|f| matches!(f, Frame::OrderBook { .. })));
        // market ticks keep feeding the ticker on every page
        assert_eq!(fr.iter().filter(|f| matches!(f, Frame::Ticker { .. })).count(), 1);

        ex.navigate("trading");
        frames(&mut ex);
        ex.advance(Duration::from_secs(3));
        let fr = frames(&mut ex);
        assert_eq!(fr.iter().filter(|f| matches!(f, Frame::OrderBook { .. })).count(), 3);
        assert_eq!(headers(&fr).len(), 2);
    }

    #[test]
    fn market_table_refresh_is_gated_on_futures() {
        let mut ex = exchange();
        ex.advance(Duration::from_secs(6));
        assert!(!frames(&mut ex).iter().any(|f| matches!(f, Frame::MarketTable { .. })));

        ex.navigate("futures");
        frames(&mut ex);
        ex.advance(Duration::from_secs(6));
        let fr = frames(&mut ex);
        assert_eq!(fr.iter().filter(|f| matches!(f, Frame::MarketTable { .. })).count(), 2);
    }

    #[test]
    fn zero_draws_keep_prices_through_ticks() {
        let mut ex = exchange_with(None, Box::new(ZeroRandom));
        let before: Vec<i64> = ex.market().quotes().iter().map(|q| q.price).collect();
        assert!(ex.tick(Component::Market));
        let after: Vec<i64> = ex.market().quotes().iter().map(|q| q.price).collect();
        assert_eq!(before, after);
        assert!(ex.market().quotes().iter().all(|q| q.change_pct == 0.0));
        assert!(!ex.tick(Component::Portfolio));
    }

    #[test]
    fn notification_lifecycle() {
        let mut ex = exchange();
        ex.dispatch(Command::SetPrice("43250".into()));
        ex.dispatch(Command::SetAmount("0.001".into()));
        let fr = frames(&mut ex);
        assert!(fr.contains(&Frame::OrderTicket { side: Side::Buy, submit_label: "Buy BTC".into(), total: Some("43.25".into()) }));

        ex.dispatch(Command::Submit);
        let fr = frames(&mut ex);
        // inputs cleared
        assert!(fr.contains(&Frame::OrderTicket { side: Side::Buy, submit_label: "Buy BTC".into(), total: None }));
        assert_eq!(ex.notifications.active().len(), 1);

        ex.advance(Duration::from_millis(100));
        let entered: Vec<NotificationEvent> = frames(&mut ex)
            .into_iter()
            .filter_map(|f| match f {
                Frame::NotificationEnter { notification } => Some(notification),
                _ => None,
            })
            .collect();
        assert_eq!(entered.len(), 1);
        assert_eq!(entered[0].message, "Buy order submitted successfully!");
        assert_eq!(entered[0].kind, NotificationKind::Success);

        let id = entered[0].id;
        ex.advance(Duration::from_millis(2900));
        assert!(frames(&mut ex).contains(&Frame::NotificationExit { id }));
        assert_eq!(ex.notifications.active().len(), 1);

        ex.advance(Duration::from_millis(300));
        assert!(frames(&mut ex).contains(&Frame::NotificationRemoved { id }));
        assert!(ex.notifications.active().is_empty());
    }

    #[test]
    fn overlapping_notifications_expire_independently() {
        let mut ex = exchange();
        let a = ex.notify("first", NotificationKind::Info);
        ex.advance(Duration::from_millis(1000));
        let b = ex.notify("second", NotificationKind::Success);
        ex.advance(Duration::from_millis(2300));
        let fr = frames(&mut ex);
        assert!(fr.contains(&Frame::NotificationRemoved { id: a }));
        assert!(!fr.contains(&Frame::NotificationRemoved { id: b }));
        assert_eq!(ex.notifications.active().len(), 1);
        ex.advance(Duration::from_millis(1000));
        assert!(frames(&mut ex).contains(&Frame::NotificationRemoved { id: b }));
    }

    #[test]
    fn upload_completes_once() {
        let mut ex = exchange();
        ex.dispatch(Command::Upload("pan".into()));
        ex.dispatch(Command::Upload("pan".into()));
        let fr = frames(&mut ex);
        assert_eq!(fr.iter().filter(|f| matches!(f, Frame::Upload { .. })).count(), 1);

        ex.advance(Duration::from_millis(2000));
        let fr = frames(&mut ex);
        assert!(fr.contains(&Frame::Upload { slot: "pan".into(), state: UploadState::Uploaded }));
        assert_eq!(ex.notifications.active()[0].message, "Document uploaded successfully!");
    }

    #[test]
    fn clicks_close_menus_but_toggles_do_not() {
        let mut ex = exchange();
        ex.dispatch(Command::ToggleMarkets);
        ex.dispatch(Command::ToggleMobile);
        assert_eq!(
            frames(&mut ex).last(),
            Some(&Frame::Menus { markets_open: true, mobile_open: true })
        );
        ex.dispatch(Command::SetPrice("1".into()));
        assert!(ex.router().menus().markets_open);
        ex.dispatch(Command::Click);
        assert_eq!(frames(&mut ex).last(), Some(&Frame::Menus { markets_open: false, mobile_open: false }));
        assert!(!ex.router().menus().mobile_open);
    }

    #[test]
    fn pair_tabs_accept_perp_labels() {
        let mut ex = exchange();
        ex.navigate("trading");
        ex.dispatch(Command::SelectPair("AVAX-USDT-PERP".into()));
        assert_eq!(ex.active_pair(), "AVAX-USDT");
        ex.dispatch(Command::SelectPair("DOGE-USDT-PERP".into()));
        assert_eq!(ex.active_pair(), "AVAX-USDT");
    }

    #[test]
    fn history_back_and_forward_show_pages() {
        let mut ex = exchange();
        ex.navigate("trading");
        ex.navigate("kyc");
        frames(&mut ex);
        ex.dispatch(Command::Back);
        assert_eq!(ex.page(), PageId::Trading);
        ex.dispatch(Command::Back);
        assert_eq!(ex.page(), PageId::Homepage);
        ex.dispatch(Command::Forward);
        assert_eq!(ex.page(), PageId::Trading);
        assert_eq!(ex.router().nav().len(), 3);
        assert!(frames(&mut ex).contains(&Frame::Page { page: PageId::Homepage }));
    }

    #[test]
    fn field_validation_frames() {
        let mut ex = exchange();
        ex.dispatch(Command::EditField { field: KycField::Ifsc, value: "SBIN0001234".into() });
        ex.dispatch(Command::EditField { field: KycField::Pan, value: "nope".into() });
        let fr = frames(&mut ex);
        assert_eq!(
            fr,
            vec![
                Frame::FieldValidity { field: KycField::Ifsc, valid: true },
                Frame::FieldValidity { field: KycField::Pan, valid: false },
            ]
        );
    }

    #[test]
    fn shutdown_stops_periodic_ticks() {
        let mut ex = exchange();
        ex.notify("bye", NotificationKind::Info);
        ex.shutdown();
        ex.advance(Duration::from_secs(10));
        let fr = frames(&mut ex);
        assert!(!fr.iter().any(|f| matches!(f, Frame::Ticker { .. })));
        // the toast still runs to completion
        assert!(fr.iter().any(|f| matches!(f, Frame::NotificationRemoved { .. })));
        assert_eq!(ex.scheduler().pending(), 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let mut ex = exchange();
            ex.navigate("trading");
            ex.advance(Duration::from_secs(10));
            (ex.snapshot(Component::Market), ex.snapshot(Component::OrderBook))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn router_snapshot() {
        let mut ex = exchange();
        ex.dispatch(Command::Trade("SOL-USDT".into()));
        ex.dispatch(Command::ToggleMarkets);
        assert_eq!(
            ex.snapshot(Component::Router),
            Snapshot::Router { page: PageId::Trading, active_pair: "SOL-USDT".into(), markets_open: true, mobile_open: false }
        );
    }
}
