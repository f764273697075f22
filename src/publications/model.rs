//! Wire types for the publications API.
//!
//! Decoding is deliberately lenient. Counts may arrive as numbers, numeric
//! strings or `null`; years may be numbers or strings; any missing field
//! takes its default. Only a body that is not a JSON object at all is an
//! error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::grouping::UNKNOWN_YEAR;
use crate::error::FetchError;

/// One publication as delivered by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    /// May contain inline `<strong>` markup around the site owner's name.
    #[serde(deserialize_with = "lenient_string")]
    pub authors: String,
    #[serde(deserialize_with = "lenient_string")]
    pub venue: String,
    #[serde(deserialize_with = "lenient_year")]
    pub year: String,
    #[serde(deserialize_with = "lenient_count")]
    pub citations: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub scholar_url: String,
    #[serde(deserialize_with = "lenient_count")]
    pub pub_number: u64,
}

/// Author profile header data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarProfile {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub affiliation: String,
    #[serde(deserialize_with = "lenient_count")]
    pub total_citations: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub h_index: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub i10_index: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub scholar_url: String,
}

/// Where the served data came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// Served from cache past its freshness window.
    Stale,
    /// Served from a fresh cache entry.
    CachedFresh,
    /// Fetched from the upstream source for this request.
    Live,
}

impl DataSource {
    pub fn from_flags(cached: bool, stale: bool) -> Self {
        match (cached, stale) {
            (true, true) => DataSource::Stale,
            (true, false) => DataSource::CachedFresh,
            (false, _) => DataSource::Live,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Stale => "Cached data (refreshing in background)",
            DataSource::CachedFresh => "Cached data",
            DataSource::Live => "Fresh from Google Scholar",
        }
    }
}

/// Decoded `GET /scholar-realtime` payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScholarResponse {
    pub profile: ScholarProfile,
    /// Year key to records, backend order preserved within each year.
    pub publications_by_year: Vec<(String, Vec<PublicationRecord>)>,
    /// Explicit total from the backend, if it sent one.
    pub total_publications: Option<u64>,
    pub cached: bool,
    pub stale: bool,
    pub last_updated: Option<String>,
    /// Server-side processing time in milliseconds.
    pub response_time: Option<u64>,
}

impl ScholarResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| FetchError::MalformedBody(format!("invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        let Value::Object(map) = value else {
            return Err(FetchError::MalformedBody("expected a JSON object".to_string()));
        };

        let profile = map
            .get("profile")
            .and_then(|v| ScholarProfile::deserialize(v).ok())
            .unwrap_or_default();

        let publications_by_year = match map.get("publications_by_year") {
            Some(Value::Object(years)) => decode_years(years),
            _ => Vec::new(),
        };

        Ok(Self {
            profile,
            publications_by_year,
            total_publications: map.get("total_publications").and_then(count_from_value),
            cached: map.get("cached").and_then(Value::as_bool).unwrap_or(false),
            stale: map.get("stale").and_then(Value::as_bool).unwrap_or(false),
            last_updated: map
                .get("last_updated")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            response_time: map.get("response_time").and_then(count_from_value),
        })
    }

    pub fn source(&self) -> DataSource {
        DataSource::from_flags(self.cached, self.stale)
    }
}

fn decode_years(years: &Map<String, Value>) -> Vec<(String, Vec<PublicationRecord>)> {
    years
        .iter()
        .map(|(year, list)| {
            let year = normalize_year(year);
            let records = match list {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| PublicationRecord::deserialize(item).ok())
                    .collect(),
                _ => Vec::new(),
            };
            (year, records)
        })
        .collect()
}

/// `GET /api/cache-status` payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheStatus {
    #[serde(deserialize_with = "lenient_count")]
    pub cache_size: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub max_size: u64,
}

fn normalize_year(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("null") {
        UNKNOWN_YEAR.to_string()
    } else {
        trimmed.to_string()
    }
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or(0))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => normalize_year(&s),
        Value::Number(n) => n.to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    })
}
