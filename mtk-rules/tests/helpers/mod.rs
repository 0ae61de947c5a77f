//! Shared test records for rule engine integration tests

#![allow(dead_code)]

use mtk_rules::{FieldValue, Record};
use std::cell::RefCell;

pub const DISC_PATTERN: &str = r"\s*\(Dis(c|k).*?\)";
pub const ALBUM_WITH_DISC: &str = "What It Is! Funky Soul And Rare Grooves (Disk 2)";
pub const ALBUM_CLEAN: &str = "What It Is! Funky Soul And Rare Grooves";

/// Flat tag record: one text field, two list fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackTags {
    pub album: String,
    pub artists: Vec<String>,
    pub performers: Vec<String>,
}

impl TrackTags {
    /// Record used by most scenarios
    pub fn sample() -> Self {
        Self {
            album: ALBUM_WITH_DISC.to_string(),
            artists: vec!["Various Artists".to_string()],
            performers: vec!["The Solos".to_string()],
        }
    }

    pub fn with_album(album: &str) -> Self {
        Self {
            album: album.to_string(),
            ..Self::default()
        }
    }
}

impl Record for TrackTags {
    fn type_name(&self) -> &str {
        "test.TrackTags"
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Album" => Some(FieldValue::Text(self.album.clone())),
            "Artists" => Some(FieldValue::TextList(self.artists.clone())),
            "Performers" => Some(FieldValue::TextList(self.performers.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("Album", FieldValue::Text(text)) => self.album = text,
            ("Artists", FieldValue::TextList(list)) => self.artists = list,
            ("Performers", FieldValue::TextList(list)) => self.performers = list,
            _ => return false,
        }
        true
    }
}

/// Wraps a record and remembers every field read and write
#[derive(Debug, Default)]
pub struct SpyRecord {
    pub inner: TrackTags,
    pub reads: RefCell<Vec<String>>,
    pub writes: Vec<String>,
}

impl SpyRecord {
    pub fn new(inner: TrackTags) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn was_read(&self, name: &str) -> bool {
        self.reads.borrow().iter().any(|read| read == name)
    }
}

impl Record for SpyRecord {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        self.reads.borrow_mut().push(name.to_string());
        self.inner.get_field(name)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        self.writes.push(name.to_string());
        self.inner.set_field(name, value)
    }
}
