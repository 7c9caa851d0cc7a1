//! Keyword search through the site's JSON suggest endpoint
//! (`/j/subject_suggest?q=...`), which answers with a bare array.

use serde::Deserialize;

/// One search suggestion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub year: String,
    pub id: String,
    #[serde(default)]
    pub sub_title: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "movie".to_string()
}

/// Decode a suggest response, keeping the first `limit` hits.
pub fn parse_suggestions(body: &str, limit: usize) -> Result<Vec<SearchHit>, serde_json::Error> {
    let mut hits: Vec<SearchHit> = serde_json::from_str(body)?;
    hits.truncate(limit);
    Ok(hits)
}
