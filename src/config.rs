//! Page configuration.
//!
//! Every section defaults, so a JSON document only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "field": { "particle_count": 60 },
//!   "browser": { "api_base": "https://example.org/api" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::FieldConfig;
use crate::publications::BrowserConfig;
use crate::spotlight::SpotlightConfig;

/// Upper bound on `field.particle_count`; every particle is drawn each frame.
pub const MAX_PARTICLES: usize = 10_000;

/// Element ids and class names the browser adapter binds to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub canvas_id: String,
    pub spotlight_id: String,
    /// Marker class of highlightable elements.
    pub highlight_class: String,
    /// Class added to the one captured element.
    pub highlighted_class: String,
    /// Marker class of category-filterable elements.
    pub filterable_class: String,
    /// Attribute carrying a filterable element's category.
    pub category_attribute: String,
    pub category_button_class: String,
    pub tab_button_class: String,
    /// Attribute on a tab button naming the panel it shows.
    pub tab_target_attribute: String,
    pub active_class: String,

    pub profile_name_id: String,
    pub profile_affiliation_id: String,
    pub total_publications_id: String,
    pub total_citations_id: String,
    pub h_index_id: String,
    pub i10_index_id: String,
    pub data_source_id: String,
    pub last_updated_id: String,
    pub loading_id: String,
    pub publications_id: String,
    pub filters_id: String,
    pub search_id: String,
    pub refresh_button_id: String,
    pub clear_cache_button_id: String,
    pub cache_status_button_id: String,
    pub notice_id: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        fn s(v: &str) -> String {
            v.to_string()
        }
        Self {
            canvas_id: s("particles-canvas"),
            spotlight_id: s("spotlight"),
            highlight_class: s("highlightable"),
            highlighted_class: s("highlighted"),
            filterable_class: s("filterable"),
            category_attribute: s("data-category"),
            category_button_class: s("filter-btn"),
            tab_button_class: s("tab-btn"),
            tab_target_attribute: s("data-tab"),
            active_class: s("active"),

            profile_name_id: s("profile-name"),
            profile_affiliation_id: s("profile-affiliation"),
            total_publications_id: s("total-publications"),
            total_citations_id: s("total-citations"),
            h_index_id: s("h-index"),
            i10_index_id: s("i10-index"),
            data_source_id: s("data-source"),
            last_updated_id: s("last-updated"),
            loading_id: s("loading"),
            publications_id: s("publications-container"),
            filters_id: s("year-filters"),
            search_id: s("publication-search"),
            refresh_button_id: s("refresh-btn"),
            clear_cache_button_id: s("clear-cache-btn"),
            cache_status_button_id: s("cache-status-btn"),
            notice_id: s("status-notice"),
        }
    }
}

/// Complete page configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub spotlight: SpotlightConfig,
    pub field: FieldConfig,
    pub browser: BrowserConfig,
    pub dom: DomConfig,
}

impl FolioConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_spotlight(mut self, spotlight: SpotlightConfig) -> Self {
        self.spotlight = spotlight;
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    pub fn with_browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.browser.api_base = api_base.into();
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.field.particle_count = count;
        self
    }

    /// Reject values that would make the animation misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.spotlight;
        if s.capture_radius <= 0.0 || s.proximity_radius <= 0.0 {
            return Err(ConfigError::Invalid("spotlight radii must be positive".into()));
        }
        if !(0.0..=1.0).contains(&s.follow) {
            return Err(ConfigError::Invalid("spotlight.follow must be within [0, 1]".into()));
        }
        if !(0.0..=1.0).contains(&s.max_attraction) {
            return Err(ConfigError::Invalid("spotlight.max_attraction must be within [0, 1]".into()));
        }
        let f = &self.field;
        if f.particle_count > MAX_PARTICLES {
            return Err(ConfigError::Invalid(format!(
                "field.particle_count must be at most {}",
                MAX_PARTICLES
            )));
        }
        if f.pointer_radius <= 0.0 || f.spotlight_radius <= 0.0 {
            return Err(ConfigError::Invalid("repulsion radii must be positive".into()));
        }
        if !(0.0..=1.0).contains(&f.damping) || !(0.0..=1.0).contains(&f.spring) {
            return Err(ConfigError::Invalid("field.damping and field.spring must be within [0, 1]".into()));
        }
        if !(-1.0..=0.0).contains(&f.bounce) {
            return Err(ConfigError::Invalid("field.bounce must be within [-1, 0]".into()));
        }
        Ok(())
    }
}
