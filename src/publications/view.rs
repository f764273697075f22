//! View models for the publication browser and the adapter trait that
//! presents them.

use chrono::{DateTime, NaiveDateTime};

use super::grouping::{YearFilter, YearGroup};
use super::model::{DataSource, ScholarProfile};
use crate::error::FetchError;

/// Profile header values, defaults already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileHeader {
    pub name: String,
    pub affiliation: String,
    pub total_publications: u64,
    pub total_citations: u64,
    pub h_index: u64,
    pub i10_index: u64,
    pub scholar_url: String,
}

impl ProfileHeader {
    /// Fill blanks in `profile` from the fallbacks.
    pub fn new(
        profile: &ScholarProfile,
        total_publications: u64,
        fallback_name: &str,
        fallback_url: &str,
    ) -> Self {
        fn or(value: &str, fallback: &str) -> String {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        }
        Self {
            name: or(&profile.name, fallback_name),
            affiliation: profile.affiliation.clone(),
            total_publications,
            total_citations: profile.total_citations,
            h_index: profile.h_index,
            i10_index: profile.i10_index,
            scholar_url: or(&profile.scholar_url, fallback_url),
        }
    }
}

/// Data-source badge: where the data came from and how long it took.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceIndicator {
    pub source: DataSource,
    /// Client-measured round trip.
    pub latency_ms: u64,
    /// Server-reported processing time, when sent.
    pub server_ms: Option<u64>,
    /// Human-readable last update time, when parseable.
    pub last_updated: Option<String>,
}

impl SourceIndicator {
    pub fn label(&self) -> &'static str {
        self.source.label()
    }

    /// e.g. `"Cached data · 120ms"` or `"Cached data · 120ms (server 35ms)"`.
    pub fn summary(&self) -> String {
        match self.server_ms {
            Some(server) => format!("{} · {}ms (server {}ms)", self.label(), self.latency_ms, server),
            None => format!("{} · {}ms", self.label(), self.latency_ms),
        }
    }
}

/// Format an ISO-8601 timestamp for display.
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` forms.
pub fn format_timestamp(raw: &str) -> Option<String> {
    let naive = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Some(naive.format("%b %-d, %Y %H:%M").to_string())
}

/// One year filter button.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterControl {
    pub filter: YearFilter,
    /// Label including the count, e.g. `"2020 (4)"`.
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// State of the refresh button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl RefreshControl {
    pub const IDLE: RefreshControl = RefreshControl {
        enabled: true,
        label: "Refresh",
    };
    pub const BUSY: RefreshControl = RefreshControl {
        enabled: false,
        label: "Refreshing...",
    };
}

/// Diagnostic shown when loading fails.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorView {
    pub title: &'static str,
    /// The error text, verbatim.
    pub message: String,
    pub status: Option<u16>,
    pub causes: Vec<&'static str>,
    /// Canonical source the visitor can open directly.
    pub source_url: String,
}

impl ErrorView {
    pub fn new(error: &FetchError, source_url: &str) -> Self {
        let causes = match error {
            FetchError::Network(_) => vec![
                "The publications service may be offline",
                "Your network connection may have dropped",
            ],
            FetchError::HttpStatus { status: 429, .. } => vec![
                "Google Scholar is rate limiting requests",
                "Try again in a few minutes",
            ],
            FetchError::HttpStatus { .. } => vec![
                "The publications service is temporarily unavailable",
                "Google Scholar may be rate limiting requests",
            ],
            FetchError::MalformedBody(_) => vec![
                "The publications service returned an unexpected response",
            ],
        };
        Self {
            title: "Unable to load publications",
            message: error.message().to_string(),
            status: error.status(),
            causes,
            source_url: source_url.to_string(),
        }
    }
}

/// Presentation adapter for [`PublicationBrowser`](super::PublicationBrowser).
pub trait BrowserView {
    fn show_loading(&mut self, loading: bool);

    fn set_refresh_control(&mut self, control: RefreshControl);

    fn show_header(&mut self, header: &ProfileHeader);

    fn show_source(&mut self, indicator: &SourceIndicator);

    /// Replace all filter controls.
    fn show_filters(&mut self, filters: &[FilterControl]);

    /// Replace the publication list.
    fn show_publications(&mut self, groups: &[YearGroup]);

    /// Replace the publication list with a message.
    fn show_placeholder(&mut self, message: &str);

    fn show_error(&mut self, error: &ErrorView);

    /// Transient status text (cache actions, diagnostics).
    fn show_notice(&mut self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_defaults() {
        let header = ProfileHeader::new(&ScholarProfile::default(), 0, "Researcher", "https://scholar.example");
        assert_eq!(header.name, "Researcher");
        assert_eq!(header.scholar_url, "https://scholar.example");
        assert_eq!(header.h_index, 0);
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(
            format_timestamp("2024-05-01T10:30:00.123456").as_deref(),
            Some("May 1, 2024 10:30")
        );
        assert_eq!(
            format_timestamp("2024-12-24T08:05:00+00:00").as_deref(),
            Some("Dec 24, 2024 08:05")
        );
        assert!(format_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_source_summary() {
        let indicator = SourceIndicator {
            source: DataSource::Stale,
            latency_ms: 120,
            server_ms: Some(35),
            last_updated: None,
        };
        assert_eq!(
            indicator.summary(),
            "Cached data (refreshing in background) · 120ms (server 35ms)"
        );
    }

    #[test]
    fn test_error_view_keeps_message() {
        let err = FetchError::HttpStatus {
            status: 500,
            message: "rate limited".to_string(),
        };
        let view = ErrorView::new(&err, "https://scholar.example");
        assert_eq!(view.message, "rate limited");
        assert_eq!(view.status, Some(500));
        assert!(!view.causes.is_empty());
    }
}
