//! Tab bar state: exactly one tab is active once any has been selected.

/// Element id of the content panel belonging to `tab`.
pub fn content_id(tab: &str) -> String {
    format!("{tab}-tab")
}

/// Result of a tab selection, describing what the view must update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSwitch {
    pub tab: String,
    pub content_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct TabSet {
    tabs: Vec<String>,
    active: Option<usize>,
}

impl TabSet {
    /// Creates a tab set. An `active` id that is not among `tabs` is ignored.
    pub fn new(tabs: Vec<String>, active: Option<&str>) -> Self {
        let active = active.and_then(|id| tabs.iter().position(|t| t == id));
        Self { tabs, active }
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.tabs[i].as_str())
    }

    pub fn is_active(&self, tab: &str) -> bool {
        self.active() == Some(tab)
    }

    /// Makes `tab` the only active tab.
    ///
    /// Reselecting the active tab still returns a switch so its math is
    /// re-rendered. Unknown ids return `None` and change nothing.
    pub fn select(&mut self, tab: &str) -> Option<TabSwitch> {
        let index = self.tabs.iter().position(|t| t == tab)?;
        self.active = Some(index);
        Some(TabSwitch {
            tab: tab.to_owned(),
            content_id: content_id(tab),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> TabSet {
        TabSet::new(
            vec!["intro".into(), "transport".into(), "entropy".into()],
            Some("intro"),
        )
    }

    #[test]
    fn content_id_appends_suffix() {
        assert_eq!(content_id("entropy"), "entropy-tab");
    }

    #[test]
    fn initial_active_tab_is_honored() {
        assert_eq!(tabs().active(), Some("intro"));
    }

    #[test]
    fn unknown_initial_active_is_ignored() {
        let set = TabSet::new(vec!["a".into()], Some("zzz"));
        assert_eq!(set.active(), None);
    }

    #[test]
    fn select_switches_the_single_active_tab() {
        let mut set = tabs();
        let switch = set.select("entropy").unwrap();
        assert_eq!(switch.content_id, "entropy-tab");
        assert!(set.is_active("entropy"));
        assert!(!set.is_active("intro"));
        let active: Vec<_> = set.tabs().iter().filter(|t| set.is_active(t)).collect();
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn reselecting_active_tab_still_reports_switch() {
        let mut set = tabs();
        assert!(set.select("intro").is_some());
        assert_eq!(set.active(), Some("intro"));
    }

    #[test]
    fn unknown_tab_changes_nothing() {
        let mut set = tabs();
        assert!(set.select("appendix").is_none());
        assert_eq!(set.active(), Some("intro"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn at_most_one_tab_active(picks in proptest::collection::vec(0usize..5, 0..20)) {
                let names = ["intro", "transport", "entropy", "ghost", "other"];
                let mut set = tabs();
                for i in picks {
                    set.select(names[i]);
                }
                let active = set.tabs().iter().filter(|t| set.is_active(t)).count();
                prop_assert_eq!(active, 1);
            }
        }
    }
}
