//! Application state machine
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Loaded
//!                     │  ▲            │
//!                     │  └──submit────┤
//!                     └─err─▶ Error ──┘
//! ```
//!
//! One variant at a time, so a stale report can never be shown next to a
//! fresh error or spinner.

use crate::model::InvestmentAnalysis;

/// Where the session is in its request cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last request produced a record
    Loaded(Box<InvestmentAnalysis>),
    /// The last request failed; holds the user-facing message
    Error(String),
}

/// What the screen shows for a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Intro,
    Loading,
    Error(&'a str),
    Report(&'a InvestmentAnalysis),
}

impl AnalysisState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&InvestmentAnalysis> {
        match self {
            Self::Loaded(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// The single view to render
    pub fn view(&self) -> View<'_> {
        match self {
            Self::Idle => View::Intro,
            Self::Loading => View::Loading,
            Self::Error(message) => View::Error(message),
            Self::Loaded(analysis) => View::Report(analysis),
        }
    }
}
