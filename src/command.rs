// ===============================
// src/command.rs
// ===============================
//
// Typed user interactions. One line of text per command:
//
//   navigate <page> | back | forward | trade <SYMBOL> | pair <SYMBOL>
//   menu | mobile | click | side buy|sell | price <v> | amount <v> | submit
//   upload <slot> | kyc pan|ifsc|number <value>
//
use std::str::FromStr;

use crate::domain::{KycField, Side, TimerTask};
use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(String),
    Back,
    Forward,
    /// Market row / trade button: go to trading with this pair.
    Trade(String),
    SelectPair(String),
    ToggleMarkets,
    ToggleMobile,
    /// A click on nothing in particular.
    Click,
    SelectSide(Side),
    SetPrice(String),
    SetAmount(String),
    Submit,
    Upload(String),
    EditField { field: KycField, value: String },
}

impl Command {
    /// Clicks bubble to the document and close open menus. The menu toggles
    /// stop propagation; typing and history moves are not clicks.
    pub fn is_click(&self) -> bool {
        !matches!(
            self,
            Command::ToggleMarkets
                | Command::ToggleMobile
                | Command::SetPrice(_)
                | Command::SetAmount(_)
                | Command::EditField { .. }
                | Command::Back
                | Command::Forward
        )
    }
}

fn split_verb(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_ascii_lowercase(), rest.trim()),
        None => (line.to_ascii_lowercase(), ""),
    }
}

fn required<'a>(arg: &'a str, line: &str) -> Result<&'a str, SimError> {
    if arg.is_empty() {
        Err(SimError::BadCommand(line.trim().to_string()))
    } else {
        Ok(arg)
    }
}

impl FromStr for Command {
    type Err = SimError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let bad = || SimError::BadCommand(line.trim().to_string());
        let (verb, arg) = split_verb(line);
        let cmd = match verb.as_str() {
            "navigate" | "nav" | "go" => Command::Navigate(required(arg, line)?.to_string()),
            "back" => Command::Back,
            "forward" => Command::Forward,
            "trade" => Command::Trade(required(arg, line)?.to_ascii_uppercase()),
            "pair" => Command::SelectPair(required(arg, line)?.to_ascii_uppercase()),
            "menu" => Command::ToggleMarkets,
            "mobile" => Command::ToggleMobile,
            "click" => Command::Click,
            "side" => match arg.to_ascii_lowercase().as_str() {
                "buy" => Command::SelectSide(Side::Buy),
                "sell" => Command::SelectSide(Side::Sell),
                _ => return Err(bad()),
            },
            "price" => Command::SetPrice(arg.to_string()),
            "amount" => Command::SetAmount(arg.to_string()),
            "submit" => Command::Submit,
            "upload" => Command::Upload(required(arg, line)?.to_string()),
            "kyc" => {
                let (field, value) = split_verb(arg);
                let field = match field.as_str() {
                    "pan" => KycField::Pan,
                    "ifsc" => KycField::Ifsc,
                    "number" => KycField::Number,
                    _ => return Err(bad()),
                };
                Command::EditField { field, value: value.to_string() }
            }
            _ => return Err(bad()),
        };
        Ok(cmd)
    }
}

/// Parts of the engine that can be ticked or snapshotted from automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Market,
    OrderBook,
    MarketTable,
    Portfolio,
    Router,
    Notifications,
}

impl Component {
    /// Only the periodic producers/consumers can be ticked.
    pub fn timer_task(&self) -> Option<TimerTask> {
        match self {
            Component::Market => Some(TimerTask::MarketTick),
            Component::OrderBook => Some(TimerTask::OrderBookTick),
            Component::MarketTable => Some(TimerTask::MarketTableRefresh),
            _ => None,
        }
    }
}

impl FromStr for Component {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "market" | "quotes" => Ok(Component::Market),
            "orderbook" | "order_book" | "book" => Ok(Component::OrderBook),
            "table" | "market_table" => Ok(Component::MarketTable),
            "portfolio" => Ok(Component::Portfolio),
            "router" | "page" => Ok(Component::Router),
            "notifications" | "toasts" => Ok(Component::Notifications),
            other => Err(SimError::UnknownComponent(other.to_string())),
        }
    }
}
