use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;

pub mod aggregate;
pub mod analysis;
pub mod comments;
pub mod config;
pub mod detail;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod recommendations;
pub mod report;
pub mod search;
pub mod service;
pub mod similar;
pub mod themes;

pub use config::{RunStamp, ScrapeConfig};
pub use error::{Error, FetchError, ItemParseError, PersistError, Result};
pub use fetcher::{Fetcher, HttpSource, PageSource, RetryPolicy};
pub use service::MovieService;

/// Placeholder shown when a title could not be read.
pub const UNKNOWN_TITLE: &str = "未知标题";
/// Placeholder shown for a missing rating or comment score.
pub const NO_RATING: &str = "无评分";
/// Placeholder shown when the synopsis is missing.
pub const NO_SYNOPSIS: &str = "无简介";

/// Average score of a title. The site omits the number for titles with too
/// few votes, so absence is a normal state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Rating {
    Score(f32),
    #[default]
    Unavailable,
}

impl Rating {
    pub fn parse(text: &str) -> Self {
        text.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Rating::Score)
            .unwrap_or(Rating::Unavailable)
    }

    pub fn value(&self) -> Option<f32> {
        match self {
            Rating::Score(v) => Some(*v),
            Rating::Unavailable => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(v) => write!(f, "{:.1}", v),
            Rating::Unavailable => f.write_str(NO_RATING),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Star code attached to a user comment. The site encodes it in a CSS class
/// (`allstar40` → 4); treat it as an opaque small integer, not a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentScore {
    Stars(u8),
    #[default]
    Unrated,
}

impl fmt::Display for CommentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentScore::Stars(n) => write!(f, "{}", n),
            CommentScore::Unrated => f.write_str(NO_RATING),
        }
    }
}

/// Ordered key/value attributes. Re-inserting a key replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Everything read from one detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub rating: Rating,
    pub votes: u64,
    /// Director, writer, cast, region, language, runtime... in page order
    pub attributes: Attributes,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub poster_url: Option<String>,
}

impl MovieRecord {
    /// Flat label → value view used for the analysis payload and the saved
    /// artifact.
    pub fn basic_info(&self) -> serde_json::Map<String, serde_json::Value> {
        use serde_json::Value;

        let mut info = serde_json::Map::new();
        info.insert("douban_id".into(), Value::String(self.id.clone()));
        info.insert("标题".into(), Value::String(self.title.clone()));
        info.insert("评分".into(), Value::String(self.rating.to_string()));
        info.insert("评价人数".into(), Value::from(self.votes));
        for (k, v) in self.attributes.iter() {
            info.insert(k.to_string(), Value::String(v.to_string()));
        }
        info.insert("简介".into(), Value::String(self.synopsis.clone()));
        info.insert(
            "海报链接".into(),
            self.poster_url
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        info
    }
}

/// One user comment from a comment listing
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub author: String,
    pub score: CommentScore,
    pub text: String,
    pub timestamp: String,
}

/// A related title from a detail page's recommendation block
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationStub {
    pub title: String,
    pub id: String,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_parses_and_displays() {
        assert_eq!(Rating::parse(" 9.7 "), Rating::Score(9.7));
        assert_eq!(Rating::parse("8").to_string(), "8.0");
        assert_eq!(Rating::parse(""), Rating::Unavailable);
        assert_eq!(Rating::parse("NaN"), Rating::Unavailable);
        assert_eq!(Rating::Unavailable.to_string(), NO_RATING);
        assert_eq!(Rating::Unavailable.value(), None);
    }

    #[test]
    fn attributes_replace_in_place() {
        let mut attrs = Attributes::new();
        attrs.insert("导演", "A");
        attrs.insert("制片国家/地区", "中国大陆");
        attrs.insert("导演", "A / B");

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["导演", "制片国家/地区"]);
        assert_eq!(attrs.get("导演"), Some("A / B"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn basic_info_keeps_order_and_null_poster() {
        let mut attributes = Attributes::new();
        attributes.insert("片长", "142分钟");
        let record = MovieRecord {
            id: "1292052".into(),
            title: "肖申克的救赎".into(),
            rating: Rating::Unavailable,
            votes: 0,
            attributes,
            genres: vec![],
            synopsis: NO_SYNOPSIS.into(),
            poster_url: None,
        };

        let info = record.basic_info();
        let keys: Vec<_> = info.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["douban_id", "标题", "评分", "评价人数", "片长", "简介", "海报链接"]
        );
        assert_eq!(info["评分"], NO_RATING);
        assert!(info["海报链接"].is_null());
    }
}
