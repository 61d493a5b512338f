pub mod client;
pub mod teams;
pub mod wire;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows requested per listing call. A page with fewer rows is the last one.
pub const PAGE_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

/// Opaque match identifier. Kept in whatever JSON form the listing service
/// used so it can be echoed back to the prediction endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchId {
    Number(u64),
    Text(String),
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchId::Number(n) => write!(f, "{n}"),
            MatchId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub date: String, // "2025-08-15"
    pub time: String, // "20:00"
    pub home_team: String,
    pub away_team: String,
}

impl Match {
    /// Kickoff as a naive local timestamp, when both date and time parse.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(self.time.trim(), "%H:%M:%S"))
            .ok()?;
        Some(date.and_time(time))
    }
}

/// Win/draw/loss percentages for one match. Values are shown as received;
/// nothing forces them to add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prediction {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Home => "Home",
            Outcome::Draw => "Draw",
            Outcome::Away => "Away",
        }
    }
}

impl Prediction {
    /// Most likely outcome. Ties resolve Home, then Draw, then Away.
    pub fn favourite(&self) -> Outcome {
        if self.home_win >= self.draw && self.home_win >= self.away_win {
            Outcome::Home
        } else if self.draw >= self.away_win {
            Outcome::Draw
        } else {
            Outcome::Away
        }
    }

    pub fn probability(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Home => self.home_win,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away_win,
        }
    }
}

/// 1-based page number. Never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    pub fn new(n: u32) -> Self {
        Page(n.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Page(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Self {
        Page::new(self.0.saturating_sub(1))
    }

    pub fn is_first(self) -> bool {
        self.0 == 1
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::FIRST
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
