//! Media file tag record
//!
//! Text tags are exposed to rules by their tag name: `Album`, `Title`
//! (single values) and `Artists`, `Performers`, `Composers`, `Genres`
//! (multi-valued). `FilePath` and `Year` are not rule-addressable.

use mtk_rules::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tags read from one media file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTags {
    /// Media file the tags belong to
    pub file_path: PathBuf,

    #[serde(default)]
    pub album: String,

    #[serde(default)]
    pub title: String,

    /// Album artists
    #[serde(default)]
    pub artists: Vec<String>,

    /// Track performers
    #[serde(default)]
    pub performers: Vec<String>,

    #[serde(default)]
    pub composers: Vec<String>,

    #[serde(default)]
    pub genres: Vec<String>,

    /// Release year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

impl MediaTags {
    pub const TYPE_NAME: &'static str = "mtk.MediaTags";

    fn text_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "Album" => Some(&mut self.album),
            "Title" => Some(&mut self.title),
            _ => None,
        }
    }

    fn list_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        match name {
            "Artists" => Some(&mut self.artists),
            "Performers" => Some(&mut self.performers),
            "Composers" => Some(&mut self.composers),
            "Genres" => Some(&mut self.genres),
            _ => None,
        }
    }
}

impl Record for MediaTags {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "Album" => FieldValue::Text(self.album.clone()),
            "Title" => FieldValue::Text(self.title.clone()),
            "Artists" => FieldValue::TextList(self.artists.clone()),
            "Performers" => FieldValue::TextList(self.performers.clone()),
            "Composers" => FieldValue::TextList(self.composers.clone()),
            "Genres" => FieldValue::TextList(self.genres.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match value {
            FieldValue::Text(text) => match self.text_mut(name) {
                Some(slot) => {
                    *slot = text;
                    true
                }
                None => false,
            },
            FieldValue::TextList(list) => match self.list_mut(name) {
                Some(slot) => {
                    *slot = list;
                    true
                }
                None => false,
            },
        }
    }
}
