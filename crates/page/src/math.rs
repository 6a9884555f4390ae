//! Options passed to the math-rendering collaborator, and the regions it is asked to render.

use serde::{Deserialize, Serialize};

/// A pair of math delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiter {
    pub left: String,
    pub right: String,
    /// `true` for display (block) math, `false` for inline.
    pub display: bool,
}

impl Delimiter {
    pub fn new(left: &str, right: &str, display: bool) -> Self {
        Self {
            left: left.to_owned(),
            right: right.to_owned(),
            display,
        }
    }
}

/// Configuration object for an auto-render call, serialized in the
/// collaborator's own shape (`{"delimiters": [...], "throwOnError": false}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathRenderOptions {
    pub delimiters: Vec<Delimiter>,
    pub throw_on_error: bool,
}

impl Default for MathRenderOptions {
    /// `$$…$$` as display math, `$…$` inline, render errors suppressed.
    fn default() -> Self {
        Self {
            delimiters: vec![Delimiter::new("$$", "$$", true), Delimiter::new("$", "$", false)],
            throw_on_error: false,
        }
    }
}

/// Where math should be (re-)rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathRegion {
    /// The whole document, once at startup.
    Document,
    /// A tab's content element, by element id.
    TabContent(String),
    /// The content element of the topic at this index.
    Topic(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_options_serialize_in_collaborator_shape() {
        let value = serde_json::to_value(MathRenderOptions::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "delimiters": [
                    {"left": "$$", "right": "$$", "display": true},
                    {"left": "$", "right": "$", "display": false}
                ],
                "throwOnError": false
            })
        );
    }

    #[test]
    fn display_delimiter_comes_first() {
        // "$$" must be tried before "$" or every display block parses as two inline ones.
        let opts = MathRenderOptions::default();
        assert_eq!(opts.delimiters[0].left, "$$");
        assert!(opts.delimiters[0].display);
    }
}
