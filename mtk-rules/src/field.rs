//! Field resolution against records
//!
//! A rule addresses a field with a dotted path such as
//! `"Library.MediaTags.Album"`. Records expose their fields through the
//! [`Record`] capability trait instead of runtime reflection.
//!
//! # Resolution
//!
//! 1. The last segment is the leaf field; only the leaf is read or written.
//! 2. Leading segments equal to the current record's `type_name()` are skipped.
//! 3. Every other non-leaf segment descends into the named child record when
//!    one exists, and is otherwise ignored.
//!
//! An unresolvable path yields `None` (or `false` on write). Callers treat
//! that as "rule does not apply", never as an engine fault.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dotted path naming a field on a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a path from its dotted text form
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Dotted text form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the path names no field at all
    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }

    /// Non-empty segments, left to right
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').map(str::trim).filter(|s| !s.is_empty())
    }

    /// Last segment: the field actually read or written
    ///
    /// `"Tags.Album"` -> `Some("Album")`, `"Album"` -> `Some("Album")`,
    /// `""` -> `None`.
    pub fn leaf(&self) -> Option<&str> {
        self.segments().last()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Value held by a record field
///
/// Multi-valued tags (several performers, several genres) are `TextList`.
/// The engine reduces them to their first non-blank entry, the primary
/// string, wherever a scalar is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    TextList(Vec<String>),
}

impl FieldValue {
    /// Primary string: the text itself, or the first non-blank list entry
    pub fn primary(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::TextList(list) => list
                .iter()
                .map(String::as_str)
                .find(|entry| !entry.trim().is_empty()),
        }
    }

    /// Every entry (a `Text` value is a single entry)
    pub fn entries(&self) -> &[String] {
        match self {
            FieldValue::Text(text) => std::slice::from_ref(text),
            FieldValue::TextList(list) => list,
        }
    }

    /// True when some entry equals `text` exactly
    pub fn contains(&self, text: &str) -> bool {
        self.entries().iter().any(|entry| entry == text)
    }

    /// True when no entry holds anything but whitespace
    pub fn is_blank(&self) -> bool {
        self.entries().iter().all(|entry| entry.trim().is_empty())
    }

    /// Copy of this value with its written slot replaced
    ///
    /// `Text` is replaced outright. `TextList` has index 0 replaced and is
    /// otherwise left at its current length; an empty list gains the value
    /// as its only entry.
    pub fn with_primary(&self, value: &str) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(value.to_string()),
            FieldValue::TextList(list) => {
                let mut list = list.clone();
                match list.first_mut() {
                    Some(first) => *first = value.to_string(),
                    None => list.push(value.to_string()),
                }
                FieldValue::TextList(list)
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(list: Vec<String>) -> Self {
        FieldValue::TextList(list)
    }
}

/// Named-field capability a record exposes to the engine
///
/// Implementors map field names to their own storage. Fields that do not
/// hold text (numbers, timestamps) are simply not exposed.
pub trait Record {
    /// Fully-qualified type name, e.g. `"mtk.MediaTags"`
    ///
    /// Path segments equal to this name are skipped during resolution.
    fn type_name(&self) -> &str;

    /// Read a field by name
    fn get_field(&self, name: &str) -> Option<FieldValue>;

    /// Write a field by name, returning `false` if the field is not writable
    fn set_field(&mut self, name: &str, value: FieldValue) -> bool;

    /// Nested record reached through a non-leaf path segment
    fn child(&self, _name: &str) -> Option<&dyn Record> {
        None
    }

    /// Mutable access to a nested record
    fn child_mut(&mut self, _name: &str) -> Option<&mut dyn Record> {
        None
    }
}

/// Drop a leading run of segments spelling out `type_name`
fn strip_type_prefix<'a, 'p>(segments: &'a [&'p str], type_name: &str) -> &'a [&'p str] {
    let mut type_segments = type_name.split('.').filter(|s| !s.is_empty()).peekable();
    if type_segments.peek().is_none() {
        return segments;
    }

    let mut matched = 0;
    for expected in type_segments {
        match segments.get(matched) {
            Some(segment) if *segment == expected => matched += 1,
            _ => return segments,
        }
    }

    &segments[matched..]
}

/// Child names to descend through and the leaf name, for `path` on `record`
fn route<'p>(record: &dyn Record, path: &'p FieldPath) -> Option<(Vec<&'p str>, &'p str)> {
    let segments: Vec<&str> = path.segments().collect();
    let (leaf, branches) = segments.split_last()?;

    let mut children = Vec::new();
    let mut current = record;
    let mut rest = branches;

    loop {
        rest = strip_type_prefix(rest, current.type_name());
        let Some((name, tail)) = rest.split_first() else {
            break;
        };
        if let Some(child) = current.child(name) {
            children.push(*name);
            current = child;
        }
        rest = tail;
    }

    Some((children, *leaf))
}

/// Resolve `path` on `record` to the leaf field's value
pub fn get_field_value(record: &dyn Record, path: &FieldPath) -> Option<FieldValue> {
    let (children, leaf) = route(record, path)?;

    let mut current = record;
    for name in children {
        current = current.child(name)?;
    }

    current.get_field(leaf)
}

/// Resolve `path` on `record` and reduce it to its primary string
pub fn get_primary(record: &dyn Record, path: &FieldPath) -> Option<String> {
    get_field_value(record, path).and_then(|value| value.primary().map(str::to_string))
}

/// Write `value` to the leaf field of `path`
///
/// The existing field decides the shape of the write (see
/// [`FieldValue::with_primary`]). Returns `false` when the path does not
/// resolve to an existing, writable field.
pub fn set_field_value(record: &mut dyn Record, path: &FieldPath, value: &str) -> bool {
    let Some((children, leaf)) = route(record, path) else {
        return false;
    };

    let mut current = record;
    for name in children {
        current = match current.child_mut(name) {
            Some(child) => child,
            None => return false,
        };
    }

    match current.get_field(leaf) {
        Some(existing) => current.set_field(leaf, existing.with_primary(value)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    struct Tag {
        fields: BTreeMap<String, FieldValue>,
    }

    impl Record for Tag {
        fn type_name(&self) -> &str {
            "test.Tag"
        }

        fn get_field(&self, name: &str) -> Option<FieldValue> {
            self.fields.get(name).cloned()
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match self.fields.get_mut(name) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        }
    }

    #[derive(Debug, Default)]
    struct Track {
        title: String,
        tag: Tag,
    }

    impl Record for Track {
        fn type_name(&self) -> &str {
            "test.Track"
        }

        fn get_field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "Title" => Some(FieldValue::Text(self.title.clone())),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
            match (name, value) {
                ("Title", FieldValue::Text(text)) => {
                    self.title = text;
                    true
                }
                _ => false,
            }
        }

        fn child(&self, name: &str) -> Option<&dyn Record> {
            match name {
                "Tag" => Some(&self.tag),
                _ => None,
            }
        }

        fn child_mut(&mut self, name: &str) -> Option<&mut dyn Record> {
            match name {
                "Tag" => Some(&mut self.tag),
                _ => None,
            }
        }
    }

    fn track() -> Track {
        let mut tag = Tag::default();
        tag.fields.insert(
            "Performers".to_string(),
            FieldValue::TextList(vec!["".to_string(), "X".to_string(), "Y".to_string()]),
        );
        tag.fields
            .insert("Album".to_string(), FieldValue::Text("Blue Train".to_string()));
        Track {
            title: "Moment's Notice".to_string(),
            tag,
        }
    }

    #[test]
    fn test_leaf_of_dotted_path() {
        assert_eq!(FieldPath::new("Library.Tags.Album").leaf(), Some("Album"));
        assert_eq!(FieldPath::new("Album").leaf(), Some("Album"));
        assert_eq!(FieldPath::new("").leaf(), None);
        assert!(FieldPath::new(" . ").is_empty());
    }

    #[test]
    fn test_primary_skips_blank_entries() {
        let value = FieldValue::TextList(vec!["".into(), " ".into(), "X".into()]);
        assert_eq!(value.primary(), Some("X"));
        assert!(!value.is_blank());

        let blank = FieldValue::TextList(vec!["".into(), "  ".into()]);
        assert_eq!(blank.primary(), None);
        assert!(blank.is_blank());
    }

    #[test]
    fn test_contains_checks_every_entry() {
        let value = FieldValue::TextList(vec!["A".into(), "B".into()]);
        assert!(value.contains("B"));
        assert!(!value.contains("b"));
        assert!(FieldValue::Text("A".into()).contains("A"));
    }

    #[test]
    fn test_get_on_top_level_field() {
        let track = track();
        let value = get_field_value(&track, &FieldPath::new("Title"));
        assert_eq!(value, Some(FieldValue::Text("Moment's Notice".into())));
    }

    #[test]
    fn test_get_skips_type_name_prefix() {
        let track = track();
        let value = get_primary(&track, &FieldPath::new("test.Track.Title"));
        assert_eq!(value.as_deref(), Some("Moment's Notice"));
    }

    #[test]
    fn test_get_descends_into_child() {
        let track = track();
        let value = get_primary(&track, &FieldPath::new("test.Track.Tag.Performers"));
        assert_eq!(value.as_deref(), Some("X"));

        // Child type name prefix is skipped as well
        let value = get_primary(&track, &FieldPath::new("Tag.test.Tag.Album"));
        assert_eq!(value.as_deref(), Some("Blue Train"));
    }

    #[test]
    fn test_unknown_branch_segments_are_ignored() {
        let track = track();
        let value = get_primary(&track, &FieldPath::new("Some.Namespace.Title"));
        assert_eq!(value.as_deref(), Some("Moment's Notice"));
    }

    #[test]
    fn test_unresolvable_path() {
        let mut track = track();
        assert!(get_field_value(&track, &FieldPath::new("NoSuchField")).is_none());
        assert!(get_field_value(&track, &FieldPath::new("")).is_none());
        assert!(!set_field_value(&mut track, &FieldPath::new("NoSuchField"), "x"));
    }

    #[test]
    fn test_set_text_field() {
        let mut track = track();
        assert!(set_field_value(&mut track, &FieldPath::new("Title"), "Locomotion"));
        assert_eq!(track.title, "Locomotion");
    }

    #[test]
    fn test_set_list_replaces_first_entry_only() {
        let mut track = track();
        assert!(set_field_value(&mut track, &FieldPath::new("Tag.Performers"), "Z"));

        let value = track.tag.fields.get("Performers").cloned();
        assert_eq!(
            value,
            Some(FieldValue::TextList(vec!["Z".into(), "X".into(), "Y".into()]))
        );
    }

    #[test]
    fn test_set_empty_list_gains_single_entry() {
        let value = FieldValue::TextList(Vec::new()).with_primary("Solo");
        assert_eq!(value, FieldValue::TextList(vec!["Solo".into()]));
    }
}
