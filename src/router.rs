// ===============================
// src/router.rs (page state machine + history)
// ===============================
//
// Exactly one page is active. Every transition attempt closes the transient
// menus; unknown targets change nothing else. The router only decides *which*
// page is active; page refresh (order book, stats, tables) is run by the app
// on the returned page so the router never reads another component's state.
//
use tracing::{debug, info};

use crate::domain::PageId;
use crate::metrics::{NAVIGATIONS, NAVIGATIONS_IGNORED};
use crate::surface::NavigationSurface;

/// Markets dropdown + mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Menus {
    pub markets_open: bool,
    pub mobile_open: bool,
}

impl Menus {
    /// Returns `true` if anything was open.
    pub fn close_all(&mut self) -> bool {
        let was_open = self.markets_open || self.mobile_open;
        *self = Menus::default();
        was_open
    }
}

pub struct Router<N: NavigationSurface> {
    current: PageId,
    nav: N,
    menus: Menus,
}

impl<N: NavigationSurface> Router<N> {
    /// Initial page comes from the deep-link fragment, `homepage` otherwise.
    pub fn new(nav: N) -> Self {
        let current = nav
            .initial_fragment()
            .and_then(|f| f.parse::<PageId>().ok())
            .unwrap_or_default();
        Self { current, nav, menus: Menus::default() }
    }

    pub fn current(&self) -> PageId {
        self.current
    }

    pub fn menus(&self) -> Menus {
        self.menus
    }

    #[cfg(test)]
    pub fn nav(&self) -> &N {
        &self.nav
    }

    /// `Some(page)` when `target` is known and is now active. Navigating to
    /// the active page keeps history as is but still reports the page so its
    /// refresh hook runs again.
    pub fn navigate(&mut self, target: &str) -> Option<PageId> {
        self.menus.close_all();
        let page = match target.parse::<PageId>() {
            Ok(p) => p,
            Err(e) => {
                debug!(%e, "navigation ignored");
                NAVIGATIONS_IGNORED.inc();
                return None;
            }
        };
        if page != self.current {
            self.nav.push_fragment(page.as_str());
        }
        Some(self.activate(page))
    }

    pub fn back(&mut self) -> Option<PageId> {
        let fragment = self.nav.back()?;
        self.on_history(&fragment)
    }

    pub fn forward(&mut self) -> Option<PageId> {
        let fragment = self.nav.forward()?;
        self.on_history(&fragment)
    }

    /// Back/forward landed on `fragment`: replay the transition without
    /// pushing a new entry. Empty fragment means `homepage`.
    fn on_history(&mut self, fragment: &str) -> Option<PageId> {
        self.menus.close_all();
        let target = if fragment.is_empty() { PageId::Homepage.as_str() } else { fragment };
        match target.parse::<PageId>() {
            Ok(page) => Some(self.activate(page)),
            Err(e) => {
                debug!(%e, "history entry ignored");
                NAVIGATIONS_IGNORED.inc();
                None
            }
        }
    }

    fn activate(&mut self, page: PageId) -> PageId {
        if page != self.current {
            info!(from = %self.current, to = %page, "navigate");
        }
        self.current = page;
        NAVIGATIONS.with_label_values(&[page.as_str()]).inc();
        page
    }

    /// The markets button stops propagation, so it never closes itself.
    pub fn toggle_markets(&mut self) -> Menus {
        self.menus.markets_open = !self.menus.markets_open;
        self.menus
    }

    pub fn toggle_mobile(&mut self) -> Menus {
        self.menus.mobile_open = !self.menus.mobile_open;
        self.menus
    }

    /// Any other click. Returns `true` if something closed.
    pub fn close_menus(&mut self) -> bool {
        self.menus.close_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HistoryStack;

    fn router() -> Router<HistoryStack> {
        Router::new(HistoryStack::new(None))
    }

    #[test]
    fn starts_on_homepage_without_fragment() {
        assert_eq!(router().current(), PageId::Homepage);
    }

    #[test]
    fn starts_on_deep_link() {
        let r = Router::new(HistoryStack::new(Some("#portfolio".into())));
        assert_eq!(r.current(), PageId::Portfolio);
        let r = Router::new(HistoryStack::new(Some("nowhere".into())));
        assert_eq!(r.current(), PageId::Homepage);
    }

    #[test]
    fn navigate_pushes_history() {
        let mut r = router();
        assert_eq!(r.navigate("trading"), Some(PageId::Trading));
        assert_eq!(r.current(), PageId::Trading);
        assert_eq!(r.nav().len(), 2);
        assert_eq!(r.nav().current(), "trading");
    }

    #[test]
    fn navigate_is_idempotent() {
        let mut r = router();
        r.navigate("futures");
        let len = r.nav().len();
        assert_eq!(r.navigate("futures"), Some(PageId::Futures));
        assert_eq!(r.current(), PageId::Futures);
        assert_eq!(r.nav().len(), len);
    }

    #[test]
    fn unknown_page_is_a_no_op() {
        let mut r = router();
        r.navigate("trading");
        let len = r.nav().len();
        assert_eq!(r.navigate("__unknown__"), None);
        assert_eq!(r.current(), PageId::Trading);
        assert_eq!(r.nav().len(), len);
    }

    #[test]
    fn every_attempt_closes_menus() {
        let mut r = router();
        r.toggle_markets();
        r.toggle_mobile();
        assert_eq!(r.menus(), Menus { markets_open: true, mobile_open: true });
        r.navigate("__unknown__");
        assert_eq!(r.menus(), Menus::default());

        r.toggle_markets();
        r.navigate("kyc");
        assert!(!r.menus().markets_open);
        assert!(!r.close_menus());
    }

    #[test]
    fn back_and_forward_replay_without_pushing() {
        let mut r = router();
        r.navigate("trading");
        r.navigate("portfolio");
        assert_eq!(r.back(), Some(PageId::Trading));
        // the initial entry has an empty fragment
        assert_eq!(r.back(), Some(PageId::Homepage));
        assert_eq!(r.back(), None);
        assert_eq!(r.current(), PageId::Homepage);
        assert_eq!(r.forward(), Some(PageId::Trading));
        assert_eq!(r.nav().len(), 3);
    }

    #[test]
    fn markets_toggle_flips() {
        let mut r = router();
        assert!(r.toggle_markets().markets_open);
        assert!(!r.toggle_markets().markets_open);
    }
}
