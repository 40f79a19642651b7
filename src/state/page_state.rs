//! Page state definitions for tracking per-page pipeline progress
//!
//! Each page moves through the pipeline stages in order; the two exits are
//! `FetchFailed` (the page never arrived) and `EmptyPage` (it parsed to zero
//! records, which some sources use as an end-of-chart signal).

use std::fmt;

/// The state of one page as it moves through the adapter pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active states =====
    /// Page index selected, fetch not yet issued
    Pending,

    /// Body received from the fetcher
    Fetched,

    /// Raw records extracted from the body
    Parsed,

    /// Records converted to typed listings
    Normalized,

    // ===== Terminal states =====
    /// Listing batch handed to the orchestrator
    Done,

    /// Fetch returned a failure outcome; recorded as a page failure
    FetchFailed,

    /// Zero records extracted; a successful empty page, not an error
    EmptyPage,
}

impl PageState {
    /// Returns true if no further processing happens for this page
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::FetchFailed | Self::EmptyPage)
    }

    /// Returns true if the page contributed listings or legitimately had none
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done | Self::EmptyPage)
    }

    /// Returns true if this transition follows the pipeline order
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetched)
                | (Self::Pending, Self::FetchFailed)
                | (Self::Fetched, Self::Parsed)
                | (Self::Parsed, Self::Normalized)
                | (Self::Parsed, Self::EmptyPage)
                | (Self::Normalized, Self::Done)
        )
    }

    /// Advances to the next state, rejecting out-of-order transitions
    pub fn transition_to(self, next: PageState) -> crate::Result<PageState> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(crate::ScrapeError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Parsed => "parsed",
            Self::Normalized => "normalized",
            Self::Done => "done",
            Self::FetchFailed => "fetch_failed",
            Self::EmptyPage => "empty_page",
        };
        write!(f, "{}", name)
    }
}
