//! Client-side publication search.
//!
//! Matches a case-insensitive substring against title, authors and venue,
//! the same fields the backend search endpoint looks at. Author markup such
//! as `<strong>` is ignored when matching.

use super::model::PublicationRecord;

/// A normalized search query. The empty query matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, record: &PublicationRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [record.title.as_str(), record.venue.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
            || strip_tags(&record.authors).to_lowercase().contains(&self.needle)
    }
}

/// Drop anything between `<` and `>`.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PublicationRecord {
        PublicationRecord {
            title: "Optical Wireless Networks".to_string(),
            authors: "<strong>A Dixit</strong>, B Smith".to_string(),
            venue: "IEEE Photonics".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_fields_case_insensitively() {
        assert!(SearchQuery::new("wireless").matches(&record()));
        assert!(SearchQuery::new("PHOTONICS").matches(&record()));
        assert!(SearchQuery::new("  smith ").matches(&record()));
        assert!(!SearchQuery::new("quantum").matches(&record()));
        assert!(SearchQuery::new("").matches(&record()));
    }

    #[test]
    fn test_markup_is_not_searchable() {
        assert!(!SearchQuery::new("strong").matches(&record()));
        assert!(SearchQuery::new("a dixit").matches(&record()));
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>x</b> y"), "x y");
        assert_eq!(strip_tags("a > b"), "a > b");
    }
}
