//! Publication browser.
//!
//! Fetches the author profile and publication list from the backend, groups
//! publications by year and presents them through a [`BrowserView`].
//!
//! # Example
//!
//! ```ignore
//! let mut browser = PublicationBrowser::new(client, view, BrowserConfig::default());
//! pollster::block_on(browser.start())?;
//! browser.filter_by_year("2020");
//! ```

mod api;
mod browser;
mod grouping;
mod model;
mod search;
mod view;

pub use api::{Fetched, HttpClient, HttpResponse, ScholarApi};
pub use browser::{refetch, BrowserConfig, Phase, PublicationBrowser};
pub use grouping::{compare_years, PublicationGroups, YearFilter, YearGroup, UNKNOWN_YEAR};
pub use model::{CacheStatus, DataSource, PublicationRecord, ScholarProfile, ScholarResponse};
pub use search::{strip_tags, SearchQuery};
pub use view::{
    format_timestamp, BrowserView, ErrorView, FilterControl, ProfileHeader, RefreshControl,
    SourceIndicator,
};
