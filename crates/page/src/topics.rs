//! Collapsible topic sections, addressed by document order.

use serde::{Deserialize, Serialize};

/// Declares one topic section: its id and the tab that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDecl {
    pub id: String,
    #[serde(default)]
    pub tab: Option<String>,
}

#[derive(Debug, Clone)]
struct Topic {
    decl: TopicDecl,
    expanded: bool,
}

/// Expanded/collapsed state for every topic on the page. All start collapsed.
#[derive(Debug, Clone, Default)]
pub struct TopicSections {
    topics: Vec<Topic>,
}

impl TopicSections {
    pub fn new(decls: Vec<TopicDecl>) -> Self {
        Self {
            topics: decls
                .into_iter()
                .map(|decl| Topic {
                    decl,
                    expanded: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TopicDecl> {
        self.topics.get(index).map(|t| &t.decl)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.topics.get(index).is_some_and(|t| t.expanded)
    }

    /// Flips the topic and returns its new expanded state, or `None` for an
    /// out-of-range index.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let topic = self.topics.get_mut(index)?;
        topic.expanded = !topic.expanded;
        Some(topic.expanded)
    }

    /// Expands every topic, returning the indices that were collapsed.
    pub fn expand_all(&mut self) -> Vec<usize> {
        self.topics
            .iter_mut()
            .enumerate()
            .filter(|(_, t)| !t.expanded)
            .map(|(i, t)| {
                t.expanded = true;
                i
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(id: &str, tab: &str) -> TopicDecl {
        TopicDecl {
            id: id.into(),
            tab: Some(tab.into()),
        }
    }

    fn sections() -> TopicSections {
        TopicSections::new(vec![
            decl("monge", "transport"),
            decl("kantorovich", "transport"),
            decl("boltzmann", "entropy"),
        ])
    }

    #[test]
    fn topics_start_collapsed() {
        let s = sections();
        assert_eq!(s.len(), 3);
        assert!((0..3).all(|i| !s.is_expanded(i)));
    }

    #[test]
    fn toggle_flips_state() {
        let mut s = sections();
        assert_eq!(s.toggle(1), Some(true));
        assert!(s.is_expanded(1));
        assert_eq!(s.toggle(1), Some(false));
        assert!(!s.is_expanded(1));
    }

    #[test]
    fn toggle_out_of_range_is_none() {
        assert_eq!(sections().toggle(9), None);
    }

    #[test]
    fn expand_all_reports_only_newly_expanded() {
        let mut s = sections();
        s.toggle(0);
        assert_eq!(s.expand_all(), vec![1, 2]);
        assert!(s.expand_all().is_empty());
    }

    #[test]
    fn decl_tab_defaults_to_none() {
        let d: TopicDecl = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(d.tab, None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn toggling_twice_restores(index in 0usize..3, pre in proptest::collection::vec(0usize..3, 0..6)) {
                let mut s = sections();
                for i in pre {
                    s.toggle(i);
                }
                let before = s.is_expanded(index);
                s.toggle(index);
                s.toggle(index);
                prop_assert_eq!(s.is_expanded(index), before);
            }
        }
    }
}
