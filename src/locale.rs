use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Error, Result};

/// A parsed locale file.
///
/// Only the `scenes` section matters here. It maps section names (`act1`, `cross_section`, ...)
/// to objects keyed by dialogue id. Document order is preserved so batch runs are reproducible.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleDocument {
    #[serde(default)]
    scenes: Map<String, Value>,
}

/// One dialogue line found in a locale document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleEntry<'a> {
    pub act: &'a str,
    pub id: &'a str,
    /// Raw text, still carrying HTML.
    pub text: &'a str,
}

impl LocaleDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|err| {
            Error::msg(format!(
                "failed to read locale file {}: {err}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    /// Dialogue entries in document order.
    ///
    /// Sections must be named `act*` and keys must look like `d<digits>`; anything else (titles,
    /// interactive labels, non-string values) is passed over.
    pub fn entries(&self) -> impl Iterator<Item = LocaleEntry<'_>> {
        self.scenes
            .iter()
            .filter(|(act, _)| act.starts_with("act"))
            .filter_map(|(act, section)| section.as_object().map(|lines| (act, lines)))
            .flat_map(|(act, lines)| {
                lines.iter().filter_map(move |(id, text)| {
                    if !is_dialogue_key(id) {
                        return None;
                    }
                    match text.as_str() {
                        Some(text) => Some(LocaleEntry {
                            act: act.as_str(),
                            id: id.as_str(),
                            text,
                        }),
                        None => {
                            debug!(dialogue = %id, act = %act, "ignoring non-string locale value");
                            None
                        }
                    }
                })
            })
    }
}

/// `d` followed by at least one ASCII digit.
fn is_dialogue_key(key: &str) -> bool {
    key.strip_prefix('d')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_document_order_and_filter_keys() -> anyhow::Result<()> {
        let doc = LocaleDocument::from_json(
            r#"{
                "title": "Da Vinci Trees",
                "scenes": {
                    "act2": { "d20": "second", "d19": "first", "heading": "Act Two" },
                    "cross_section": { "d1": "not an act" },
                    "act1": { "d1": "hello", "d1_new": "skip", "d": "skip", "d2": 7 }
                }
            }"#,
        )?;

        let got: Vec<_> = doc.entries().map(|e| (e.act, e.id, e.text)).collect();
        assert_eq!(
            got,
            vec![
                ("act2", "d20", "second"),
                ("act2", "d19", "first"),
                ("act1", "d1", "hello"),
            ]
        );
        Ok(())
    }

    #[test]
    fn missing_scenes_section_yields_nothing() -> anyhow::Result<()> {
        let doc = LocaleDocument::from_json(r#"{ "title": "x" }"#)?;
        assert_eq!(doc.entries().count(), 0);
        Ok(())
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            LocaleDocument::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn dialogue_key_shape() {
        assert!(is_dialogue_key("d1"));
        assert!(is_dialogue_key("d120"));
        assert!(!is_dialogue_key("d"));
        assert!(!is_dialogue_key("d82_new"));
        assert!(!is_dialogue_key("x12"));
    }
}
