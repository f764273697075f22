//! Tab and category filter widgets.
//!
//! Both are pure state: the browser adapter reads them to toggle classes and
//! visibility on the page.

/// A group of tabs with exactly one active (when non-empty).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabSet {
    ids: Vec<String>,
    active: usize,
}

impl TabSet {
    /// The first tab starts active.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            active: 0,
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn active(&self) -> Option<&str> {
        self.ids.get(self.active).map(String::as_str)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }

    /// Activate `id`. Unknown ids leave the current tab active and return `false`.
    pub fn activate(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|t| t == id) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }
}

/// Category filter over items tagged with a category attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: String,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            selected: Self::ALL.to_string(),
        }
    }
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn select(&mut self, category: &str) {
        let category = category.trim();
        self.selected = if category.is_empty() {
            Self::ALL.to_string()
        } else {
            category.to_lowercase()
        };
    }

    /// Whether an item tagged `category` is visible. Untagged items only show
    /// under "all".
    pub fn shows(&self, category: Option<&str>) -> bool {
        if self.selected == Self::ALL {
            return true;
        }
        category.is_some_and(|c| c.trim().eq_ignore_ascii_case(&self.selected))
    }

    /// Visibility for each item, in order.
    pub fn apply<'a, I>(&self, categories: I) -> Vec<bool>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        categories.into_iter().map(|c| self.shows(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_exclusive() {
        let mut tabs = TabSet::new(["about", "research", "gallery"]);
        assert_eq!(tabs.active(), Some("about"));
        assert!(tabs.activate("gallery"));
        assert!(tabs.is_active("gallery"));
        assert!(!tabs.is_active("about"));
        assert!(!tabs.activate("missing"));
        assert_eq!(tabs.active(), Some("gallery"));
    }

    #[test]
    fn test_empty_tabs() {
        let tabs = TabSet::new(Vec::<String>::new());
        assert_eq!(tabs.active(), None);
    }

    #[test]
    fn test_category_filter() {
        let mut filter = CategoryFilter::default();
        let items = [Some("lab"), Some("Conference"), None];
        assert_eq!(filter.apply(items), vec![true, true, true]);

        filter.select("conference");
        assert_eq!(filter.apply(items), vec![false, true, false]);

        filter.select("  ");
        assert_eq!(filter.selected(), "all");
    }
}
