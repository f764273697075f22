//! The publication browser state machine.
//!
//! ```text
//! Loading ──ok──▶ Loaded ◀──▶ Filtered
//!    │
//!    └──err──▶ Error
//! ```
//!
//! Every network step is split into a `begin_*` / `finish_*` pair around
//! the actual request, so a caller that shares the browser behind a
//! `RefCell` can release its borrow while the request is in flight. The
//! `async` methods ([`load`](PublicationBrowser::load),
//! [`refresh`](PublicationBrowser::refresh), ...) run the same steps in
//! sequence for callers that own the browser outright.

use serde::{Deserialize, Serialize};

use super::api::{Fetched, HttpClient, ScholarApi};
use super::grouping::{PublicationGroups, YearFilter, YearGroup};
use super::model::{CacheStatus, ScholarProfile};
use super::search::SearchQuery;
use super::view::{
    format_timestamp, BrowserView, ErrorView, FilterControl, ProfileHeader, RefreshControl,
    SourceIndicator,
};
use crate::error::FetchError;

/// Publication browser settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Base path of the publications API, without trailing slash.
    pub api_base: String,
    pub cache_status_url: String,
    /// Canonical source offered in the error view and as a header fallback.
    pub source_url: String,
    /// Shown when the profile carries no name.
    pub fallback_name: String,
    pub empty_message: String,
    pub no_match_message: String,
    pub all_years_label: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            cache_status_url: "/api/cache-status".to_string(),
            source_url: "https://scholar.google.com".to_string(),
            fallback_name: "Publications".to_string(),
            empty_message: "No publications found.".to_string(),
            no_match_message: "No publications match the current filter.".to_string(),
            all_years_label: "All Years".to_string(),
        }
    }
}

/// Coarse browser state, as seen from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    /// Loaded, with a specific year selected.
    Filtered,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
enum State {
    Loading,
    Loaded,
    Failed(FetchError),
}

/// Fetches, groups, filters and presents the publication list.
pub struct PublicationBrowser<C, V> {
    api: ScholarApi<C>,
    view: V,
    config: BrowserConfig,
    state: State,
    profile: ScholarProfile,
    groups: PublicationGroups,
    total_publications: u64,
    source: Option<SourceIndicator>,
    filter: YearFilter,
    query: SearchQuery,
    refreshing: bool,
}

impl<C: HttpClient, V: BrowserView> PublicationBrowser<C, V> {
    pub fn new(client: C, view: V, config: BrowserConfig) -> Self {
        Self {
            api: ScholarApi::new(client, &config.api_base, &config.cache_status_url),
            view,
            config,
            state: State::Loading,
            profile: ScholarProfile::default(),
            groups: PublicationGroups::default(),
            total_publications: 0,
            source: None,
            filter: YearFilter::All,
            query: SearchQuery::default(),
            refreshing: false,
        }
    }

    pub fn api(&self) -> &ScholarApi<C> {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match (&self.state, &self.filter) {
            (State::Loading, _) => Phase::Loading,
            (State::Failed(_), _) => Phase::Error,
            (State::Loaded, YearFilter::All) => Phase::Loaded,
            (State::Loaded, YearFilter::Year(_)) => Phase::Filtered,
        }
    }

    /// The failure that put the browser in the error state.
    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn profile(&self) -> &ScholarProfile {
        &self.profile
    }

    pub fn groups(&self) -> &PublicationGroups {
        &self.groups
    }

    pub fn filter(&self) -> &YearFilter {
        &self.filter
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn source(&self) -> Option<&SourceIndicator> {
        self.source.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    // ========== Startup ==========

    /// Initial load followed by a full render, or the error view.
    pub async fn start(&mut self) -> Result<(), FetchError> {
        self.begin_load();
        let result = self.api.fetch_scholar().await;
        self.finish_start(result)
    }

    /// Completion half of [`start`](Self::start).
    pub fn finish_start(&mut self, result: Result<Fetched, FetchError>) -> Result<(), FetchError> {
        let outcome = self.finish_load(result);
        self.present(&outcome);
        outcome
    }

    // ========== Loading ==========

    /// Issue exactly one fetch and store its result.
    ///
    /// Does not render the list; see [`start`](Self::start) and
    /// [`refresh`](Self::refresh).
    pub async fn load(&mut self) -> Result<(), FetchError> {
        self.begin_load();
        let result = self.api.fetch_scholar().await;
        self.finish_load(result)
    }

    /// Enter the loading state.
    pub fn begin_load(&mut self) {
        self.state = State::Loading;
        self.view.show_loading(true);
    }

    /// Leave the loading state with the fetch outcome.
    pub fn finish_load(&mut self, result: Result<Fetched, FetchError>) -> Result<(), FetchError> {
        self.view.show_loading(false);
        match result {
            Ok(fetched) => {
                self.apply(fetched);
                self.state = State::Loaded;
                Ok(())
            }
            Err(err) => {
                log::warn!("publication load failed: {}", err);
                self.state = State::Failed(err.clone());
                Err(err)
            }
        }
    }

    fn apply(&mut self, fetched: Fetched) {
        let Fetched { response, latency_ms } = fetched;
        let source = SourceIndicator {
            source: response.source(),
            latency_ms,
            server_ms: response.response_time,
            last_updated: response.last_updated.as_deref().and_then(format_timestamp),
        };

        self.groups = PublicationGroups::new(response.publications_by_year);
        self.total_publications = response
            .total_publications
            .unwrap_or(self.groups.total() as u64);
        self.profile = response.profile;

        let header = ProfileHeader::new(
            &self.profile,
            self.total_publications,
            &self.config.fallback_name,
            &self.config.source_url,
        );
        self.view.show_header(&header);
        self.view.show_source(&source);
        self.source = Some(source);
    }

    /// Render the outcome of a load: list and filters, or the error view.
    fn present(&mut self, outcome: &Result<(), FetchError>) {
        match outcome {
            Ok(()) => {
                self.setup_filters();
                self.render_publications();
            }
            Err(err) => self.show_error(err),
        }
    }

    fn show_error(&mut self, err: &FetchError) {
        let url = if self.profile.scholar_url.is_empty() {
            self.config.source_url.clone()
        } else {
            self.profile.scholar_url.clone()
        };
        self.view.show_error(&ErrorView::new(err, &url));
    }

    // ========== Refresh ==========

    /// Clear the server cache (best effort), reload and re-render.
    ///
    /// The refresh control is disabled for the duration and re-enabled on
    /// every outcome. Calling while a refresh is running does nothing.
    pub async fn refresh(&mut self) -> Result<(), FetchError> {
        if !self.begin_refresh() {
            return Ok(());
        }
        self.begin_load();
        let result = refetch(&self.api).await;
        self.finish_refresh(result)
    }

    /// Disable the refresh control. Returns `false` if already refreshing.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refreshing {
            log::debug!("refresh already in flight, ignoring");
            return false;
        }
        self.refreshing = true;
        self.view.set_refresh_control(RefreshControl::BUSY);
        true
    }

    /// Completion half of [`refresh`](Self::refresh).
    pub fn finish_refresh(&mut self, result: Result<Fetched, FetchError>) -> Result<(), FetchError> {
        let outcome = self.finish_load(result);
        self.present(&outcome);
        self.refreshing = false;
        self.view.set_refresh_control(RefreshControl::IDLE);
        outcome
    }

    // ========== Rendering ==========

    /// Rebuild the list from memory, the year filter and the search query.
    ///
    /// Only a loaded browser draws the list. While loading nothing is drawn,
    /// and after a failure the error view stays up.
    pub fn render_publications(&mut self) {
        match &self.state {
            State::Loaded => {}
            State::Loading => return,
            State::Failed(err) => {
                let err = err.clone();
                self.show_error(&err);
                return;
            }
        }
        if self.groups.is_empty() {
            self.view.show_placeholder(&self.config.empty_message);
            return;
        }
        let visible: Vec<YearGroup> = self
            .groups
            .select(&self.filter)
            .filter_map(|group| {
                let publications: Vec<_> = group
                    .publications
                    .iter()
                    .filter(|p| self.query.matches(p))
                    .cloned()
                    .collect();
                (!publications.is_empty()).then(|| YearGroup {
                    year: group.year.clone(),
                    publications,
                })
            })
            .collect();

        if visible.is_empty() {
            self.view.show_placeholder(&self.config.no_match_message);
        } else {
            self.view.show_publications(&visible);
        }
    }

    /// Filter controls for the current data: "all" first, then one per year.
    pub fn filter_controls(&self) -> Vec<FilterControl> {
        let all = FilterControl {
            filter: YearFilter::All,
            label: format!("{} ({})", self.config.all_years_label, self.groups.total()),
            count: self.groups.total(),
            active: self.filter == YearFilter::All,
        };
        std::iter::once(all)
            .chain(self.groups.groups().iter().map(|group| {
                let filter = YearFilter::Year(group.year.clone());
                FilterControl {
                    label: format!("{} ({})", group.year, group.publications.len()),
                    count: group.publications.len(),
                    active: self.filter == filter,
                    filter,
                }
            }))
            .collect()
    }

    /// Rebuild the filter controls.
    ///
    /// A selected year that no longer exists falls back to "all".
    pub fn setup_filters(&mut self) {
        if let YearFilter::Year(year) = &self.filter {
            if self.groups.count(year) == 0 {
                self.filter = YearFilter::All;
            }
        }
        let controls = self.filter_controls();
        self.view.show_filters(&controls);
    }

    /// Select a year (or `"all"`) and re-render. Never re-fetches.
    ///
    /// Unknown years select "all", so exactly one control is always active.
    pub fn filter_by_year(&mut self, year: &str) {
        let filter = YearFilter::parse(year);
        self.filter = match filter {
            YearFilter::Year(ref y) if self.groups.count(y) == 0 => {
                log::debug!("no publications for year {:?}, showing all", y);
                YearFilter::All
            }
            other => other,
        };
        if self.state == State::Loaded {
            let controls = self.filter_controls();
            self.view.show_filters(&controls);
        }
        self.render_publications();
    }

    /// Narrow the list to records matching `query`; empty clears.
    pub fn search(&mut self, query: &str) {
        self.query = SearchQuery::new(query);
        self.render_publications();
    }

    // ========== Cache diagnostics ==========

    /// Manually clear the server cache without reloading.
    pub async fn clear_cache(&mut self) -> Result<(), FetchError> {
        let result = self.api.clear_cache().await;
        self.report_cache_cleared(result)
    }

    pub fn report_cache_cleared(&mut self, result: Result<(), FetchError>) -> Result<(), FetchError> {
        match &result {
            Ok(()) => self.view.show_notice("Cache cleared."),
            Err(err) => {
                log::warn!("cache clear failed: {}", err);
                self.view.show_notice(&format!("Failed to clear cache: {}", err.message()));
            }
        }
        result
    }

    /// Query `/api/cache-status` and show the result.
    pub async fn check_cache_status(&mut self) -> Result<CacheStatus, FetchError> {
        let result = self.api.cache_status().await;
        self.report_cache_status(result)
    }

    pub fn report_cache_status(
        &mut self,
        result: Result<CacheStatus, FetchError>,
    ) -> Result<CacheStatus, FetchError> {
        match &result {
            Ok(status) => self.view.show_notice(&format!(
                "Cache: {} / {} entries",
                status.cache_size, status.max_size
            )),
            Err(err) => self
                .view
                .show_notice(&format!("Cache status unavailable: {}", err.message())),
        }
        result
    }
}

/// Best-effort cache clear followed by a fresh fetch.
///
/// A failed cache clear is logged and does not stop the fetch.
pub async fn refetch<C: HttpClient>(api: &ScholarApi<C>) -> Result<Fetched, FetchError> {
    if let Err(err) = api.clear_cache().await {
        log::warn!("cache clear before refresh failed, continuing: {}", err);
    }
    api.fetch_scholar().await
}
