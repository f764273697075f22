//! Year grouping and ordering.
//!
//! Groups are ordered newest year first. The `"Unknown"` year always sorts
//! last; any other non-numeric key sorts after every numeric year and before
//! `"Unknown"`. Within a group, records keep the order the backend sent.

use std::cmp::Ordering;

use super::model::PublicationRecord;

/// Year key for publications without a known year.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Which year groups are rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum YearFilter {
    #[default]
    All,
    Year(String),
}

impl YearFilter {
    /// Parse a filter control key; `"all"` (any case) selects every year.
    pub fn parse(key: &str) -> Self {
        if key.trim().eq_ignore_ascii_case("all") {
            YearFilter::All
        } else {
            YearFilter::Year(key.trim().to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            YearFilter::All => "all",
            YearFilter::Year(year) => year,
        }
    }

    pub fn matches(&self, year: &str) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(selected) => selected == year,
        }
    }
}

/// Ordering for year keys: numeric descending, other text, then `"Unknown"`.
pub fn compare_years(a: &str, b: &str) -> Ordering {
    fn rank(year: &str) -> (u8, i64) {
        if year == UNKNOWN_YEAR {
            (2, 0)
        } else if let Ok(n) = year.parse::<i64>() {
            (0, -n)
        } else {
            (1, 0)
        }
    }
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// Publications of one year.
#[derive(Clone, Debug, PartialEq)]
pub struct YearGroup {
    pub year: String,
    pub publications: Vec<PublicationRecord>,
}

/// All publications, grouped and ordered for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublicationGroups {
    groups: Vec<YearGroup>,
}

impl PublicationGroups {
    /// Build from `(year, records)` pairs.
    ///
    /// Pairs sharing a year are concatenated in input order; empty groups are
    /// dropped.
    pub fn new<I>(by_year: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<PublicationRecord>)>,
    {
        let mut groups: Vec<YearGroup> = Vec::new();
        for (year, publications) in by_year {
            match groups.iter_mut().find(|g| g.year == year) {
                Some(group) => group.publications.extend(publications),
                None => groups.push(YearGroup { year, publications }),
            }
        }
        groups.retain(|g| !g.publications.is_empty());
        groups.sort_by(|a, b| compare_years(&a.year, &b.year));
        Self { groups }
    }

    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
    }

    /// Year keys in display order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.year.as_str())
    }

    pub fn count(&self, year: &str) -> usize {
        self.groups
            .iter()
            .find(|g| g.year == year)
            .map_or(0, |g| g.publications.len())
    }

    /// Number of records across all groups.
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.publications.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups selected by `filter`, in display order.
    pub fn select<'a>(&'a self, filter: &'a YearFilter) -> impl Iterator<Item = &'a YearGroup> + 'a {
        self.groups.iter().filter(move |g| filter.matches(&g.year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> PublicationRecord {
        PublicationRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn groups(keys: &[&str]) -> PublicationGroups {
        PublicationGroups::new(keys.iter().map(|k| (k.to_string(), vec![record(k)])))
    }

    #[test]
    fn test_order_newest_first_unknown_last() {
        let g = groups(&["Unknown", "2019", "2020"]);
        assert_eq!(g.years().collect::<Vec<_>>(), ["2020", "2019", "Unknown"]);
    }

    #[test]
    fn test_numeric_not_lexical() {
        let g = groups(&["999", "2020", "Unknown", "10000"]);
        assert_eq!(g.years().collect::<Vec<_>>(), ["10000", "2020", "999", "Unknown"]);
    }

    #[test]
    fn test_other_text_before_unknown() {
        let g = groups(&["Unknown", "In press", "2001"]);
        assert_eq!(g.years().collect::<Vec<_>>(), ["2001", "In press", "Unknown"]);
    }

    #[test]
    fn test_other_text_is_lexical() {
        let g = groups(&["In press", "Accepted", "Unknown", "Preprint"]);
        assert_eq!(
            g.years().collect::<Vec<_>>(),
            ["Accepted", "In press", "Preprint", "Unknown"]
        );
    }

    #[test]
    fn test_backend_order_within_year() {
        let g = PublicationGroups::new(vec![(
            "2020".to_string(),
            vec![record("b"), record("a"), record("c")],
        )]);
        let titles: Vec<_> = g.groups()[0].publications.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["b", "a", "c"]);
    }

    #[test]
    fn test_select_and_counts() {
        let g = PublicationGroups::new(vec![
            ("2020".to_string(), vec![record("a"), record("b")]),
            ("2019".to_string(), vec![record("c")]),
            ("2018".to_string(), vec![]),
        ]);
        assert_eq!(g.total(), 3);
        assert_eq!(g.count("2020"), 2);
        assert_eq!(g.count("2018"), 0);
        assert_eq!(g.years().count(), 2);

        let filter = YearFilter::parse("2019");
        let selected: Vec<_> = g.select(&filter).map(|g| g.year.as_str()).collect();
        assert_eq!(selected, ["2019"]);
        assert_eq!(g.select(&YearFilter::All).count(), 2);
    }

    #[test]
    fn test_filter_keys() {
        assert_eq!(YearFilter::parse("ALL"), YearFilter::All);
        assert_eq!(YearFilter::parse(" 2020 ").key(), "2020");
        assert_eq!(YearFilter::All.key(), "all");
    }
}
