//! The accept filter: which MIME types and extensions the drop zone takes.
//!
//! Two configuration shapes are supported, matching the `accept` option of a
//! file input:
//!
//! - a comma separated list such as `"image/jpeg,.png,audio/*"`,
//! - a map of MIME type to extensions such as `{"image/*": [".png", ".gif"]}`.
//!
//! Both flatten to the same list of entries. Entries that are neither a MIME
//! type nor a `.ext` are skipped with a warning.

use std::collections::BTreeMap;
use std::fmt;

use mime_guess::mime::{self, Mime};
use serde::{Deserialize, Serialize};

use crate::file::File;

/// The `accept` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accept {
    /// A comma separated list of MIME types and extensions.
    Types(String),
    /// MIME types mapped to the extensions that go with them.
    Map(BTreeMap<String, Vec<String>>),
}

impl Accept {
    /// All non-empty entries. A list keeps its written order; a map yields
    /// its MIME types sorted, each followed by its extensions.
    pub fn entries(&self) -> Vec<String> {
        match self {
            Accept::Types(list) => list
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
            Accept::Map(map) => map
                .iter()
                .flat_map(|(mime, exts)| std::iter::once(mime).chain(exts.iter()))
                .map(|e| e.trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Entries that parse into a rule, paired with that rule.
    pub fn rules(&self) -> Vec<(String, AcceptRule)> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match AcceptRule::parse(&entry) {
                Some(rule) => Some((entry, rule)),
                None => {
                    tracing::warn!(%entry, "Skipped accept entry: not a MIME type or extension");
                    None
                }
            })
            .collect()
    }

    /// The value for the file input's `accept` attribute, `None` when no
    /// valid entry is configured.
    pub fn attribute(&self) -> Option<String> {
        let valid: Vec<String> = self.rules().into_iter().map(|(entry, _)| entry).collect();
        if valid.is_empty() {
            None
        } else {
            Some(valid.join(","))
        }
    }
}

impl From<&str> for Accept {
    fn from(list: &str) -> Self {
        Accept::Types(list.to_string())
    }
}

impl From<String> for Accept {
    fn from(list: String) -> Self {
        Accept::Types(list)
    }
}

impl From<BTreeMap<String, Vec<String>>> for Accept {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Accept::Map(map)
    }
}

impl<const N: usize> From<[(&str, &[&str]); N]> for Accept {
    fn from(pairs: [(&str, &[&str]); N]) -> Self {
        Accept::Map(
            pairs
                .into_iter()
                .map(|(mime, exts)| {
                    (
                        mime.to_string(),
                        exts.iter().map(|e| e.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

/// A single parsed accept entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptRule {
    /// `*/*`: anything goes.
    Any,
    /// `image/*`: any subtype of the base type.
    BaseType(String),
    /// `image/png`: an exact MIME type.
    Mime(String),
    /// `.png`: a case-insensitive suffix of the file name, dot included.
    Extension(String),
}

impl AcceptRule {
    /// Parse an entry, returning `None` if it is neither a MIME type nor an
    /// extension.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim().to_lowercase();
        if entry == "*" {
            return Some(AcceptRule::Any);
        }
        if let Some(ext) = entry.strip_prefix('.') {
            if ext.is_empty() || ext.contains('/') {
                return None;
            }
            return Some(AcceptRule::Extension(entry));
        }

        let parsed: Mime = entry.parse().ok()?;
        if parsed.type_() == mime::STAR {
            Some(AcceptRule::Any)
        } else if parsed.subtype() == mime::STAR {
            Some(AcceptRule::BaseType(parsed.type_().as_str().to_string()))
        } else {
            Some(AcceptRule::Mime(parsed.essence_str().to_string()))
        }
    }

    /// Whether a file satisfies this rule.
    pub fn matches(&self, file: &File) -> bool {
        let mime_type = file.mime_type().map(|m| essence(m).to_lowercase());
        match self {
            AcceptRule::Any => true,
            AcceptRule::BaseType(base) => mime_type
                .as_deref()
                .and_then(|m| m.split('/').next())
                .is_some_and(|b| b == base),
            AcceptRule::Mime(expected) => mime_type.as_deref() == Some(expected.as_str()),
            AcceptRule::Extension(ext) => file
                .name()
                .is_some_and(|name| name.to_lowercase().ends_with(ext.as_str())),
        }
    }
}

impl fmt::Display for AcceptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptRule::Any => write!(f, "*/*"),
            AcceptRule::BaseType(base) => write!(f, "{base}/*"),
            AcceptRule::Mime(m) => write!(f, "{m}"),
            AcceptRule::Extension(ext) => write!(f, "{ext}"),
        }
    }
}

/// Whether a file passes the accept filter. An empty rule set accepts
/// everything.
pub fn is_file_accepted(file: &File, rules: &[(String, AcceptRule)]) -> bool {
    rules.is_empty() || rules.iter().any(|(_, rule)| rule.matches(file))
}

fn essence(mime_type: &str) -> &str {
    mime_type.split(';').next().unwrap_or(mime_type).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_from_list() {
        let accept = Accept::from("image/jpeg, .png ,,audio/*");
        assert_eq!(accept.entries(), vec!["image/jpeg", ".png", "audio/*"]);
    }

    #[test]
    fn test_entries_from_map() {
        let accept = Accept::from([("image/*", &[".png", ".gif"][..]), ("text/plain", &[][..])]);
        assert_eq!(accept.entries(), vec!["image/*", ".png", ".gif", "text/plain"]);
    }

    #[test]
    fn test_attribute_skips_invalid_entries() {
        let accept = Accept::from("image/jpeg,nonsense,.pdf");
        assert_eq!(accept.attribute().as_deref(), Some("image/jpeg,.pdf"));
        assert_eq!(Accept::from("nonsense").attribute(), None);
    }

    #[test]
    fn test_parse_rules() {
        assert_eq!(AcceptRule::parse("*/*"), Some(AcceptRule::Any));
        assert_eq!(AcceptRule::parse(" * "), Some(AcceptRule::Any));
        assert_eq!(
            AcceptRule::parse("IMAGE/*"),
            Some(AcceptRule::BaseType("image".to_string()))
        );
        assert_eq!(
            AcceptRule::parse("image/jpeg"),
            Some(AcceptRule::Mime("image/jpeg".to_string()))
        );
        assert_eq!(
            AcceptRule::parse(".PNG"),
            Some(AcceptRule::Extension(".png".to_string()))
        );
        assert_eq!(AcceptRule::parse("."), None);
        assert_eq!(AcceptRule::parse("jpeg"), None);
    }

    #[test]
    fn test_matches() {
        let gif = File::new("cats.gif", 1234, "image/gif");
        assert!(AcceptRule::Any.matches(&gif));
        assert!(AcceptRule::BaseType("image".to_string()).matches(&gif));
        assert!(!AcceptRule::BaseType("audio".to_string()).matches(&gif));
        assert!(AcceptRule::Mime("image/gif".to_string()).matches(&gif));
        assert!(!AcceptRule::Mime("image/jpeg".to_string()).matches(&gif));
        assert!(AcceptRule::Extension(".gif".to_string()).matches(&File::new("CATS.GIF", 1, "")));
    }

    #[test]
    fn test_extension_rule_needs_a_name() {
        let item = File::from_item("image/png");
        assert!(!AcceptRule::Extension(".png".to_string()).matches(&item));
        assert!(AcceptRule::Mime("image/png".to_string()).matches(&item));
    }

    #[test]
    fn test_is_file_accepted() {
        let pdf = File::new("file1.pdf", 1111, "application/pdf");
        assert!(is_file_accepted(&pdf, &[]));
        let rules = Accept::from("image/*,.pdf").rules();
        assert!(is_file_accepted(&pdf, &rules));
        let rules = Accept::from("image/*").rules();
        assert!(!is_file_accepted(&pdf, &rules));
    }

    #[test]
    fn test_map_entries_are_sorted_by_mime_type() {
        let accept = Accept::from([("text/plain", &[".txt"][..]), ("image/*", &[".png"][..])]);
        assert_eq!(accept.entries(), vec!["image/*", ".png", "text/plain", ".txt"]);
        assert_eq!(accept.attribute().as_deref(), Some("image/*,.png,text/plain,.txt"));
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let list: Accept = serde_json::from_str("\"image/png\"").unwrap();
        assert_eq!(list, Accept::Types("image/png".to_string()));
        let map: Accept = serde_json::from_str(r#"{"image/*":[".png"]}"#).unwrap();
        assert_eq!(map.entries(), vec!["image/*", ".png"]);
    }
}
