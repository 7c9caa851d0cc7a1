use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://movie.douban.com";
pub const DEFAULT_IMDB_URL: &str = "https://www.imdb.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
pub const DEFAULT_LIMIT: usize = 5;

/// Point in time captured once per process, used to namespace artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    pub fn now() -> Self {
        Self(chrono::Local::now().format("%Y%m%d_%H%M%S").to_string())
    }

    /// Fixed stamp, for reproducible file names.
    pub fn fixed(stamp: impl Into<String>) -> Self {
        Self(stamp.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings shared by every operation of a [`crate::service::MovieService`].
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root, without trailing slash
    pub base_url: String,
    /// IMDb root, used for similar-title lookups
    pub imdb_base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    /// Directory receiving `movie_{id}_{stamp}.json` files
    pub data_dir: PathBuf,
    pub run_stamp: RunStamp,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            imdb_base_url: DEFAULT_IMDB_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            data_dir: PathBuf::from("data"),
            run_stamp: RunStamp::now(),
        }
    }
}

impl ScrapeConfig {
    pub fn detail_url(&self, id: &str) -> String {
        format!("{}/subject/{}/", self.base_url.trim_end_matches('/'), id)
    }

    pub fn comments_url(&self, id: &str) -> String {
        format!("{}/subject/{}/comments", self.base_url.trim_end_matches('/'), id)
    }

    pub fn suggest_url(&self) -> String {
        format!("{}/j/subject_suggest", self.base_url.trim_end_matches('/'))
    }

    /// Title search on IMDb, `q` form-encoded.
    pub fn imdb_search_url(&self, title: &str) -> String {
        let find = format!("{}/find", self.imdb_base_url.trim_end_matches('/'));
        reqwest::Url::parse_with_params(&find, &[("q", title), ("s", "tt")])
            .map(String::from)
            .unwrap_or_else(|_| format!("{}?q={}&s=tt", find, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_ignore_trailing_slash_on_base() {
        let config = ScrapeConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..ScrapeConfig::default()
        };
        assert_eq!(config.detail_url("1292052"), "http://localhost:1234/subject/1292052/");
        assert_eq!(
            config.comments_url("1292052"),
            "http://localhost:1234/subject/1292052/comments"
        );
        assert_eq!(config.suggest_url(), "http://localhost:1234/j/subject_suggest");
    }

    #[test]
    fn imdb_search_url_encodes_title() {
        let config = ScrapeConfig {
            imdb_base_url: "http://localhost:1234/".to_string(),
            ..ScrapeConfig::default()
        };
        assert_eq!(
            config.imdb_search_url("The Matrix"),
            "http://localhost:1234/find?q=The+Matrix&s=tt"
        );
        assert_eq!(
            ScrapeConfig::default().imdb_search_url("活着"),
            "https://www.imdb.com/find?q=%E6%B4%BB%E7%9D%80&s=tt"
        );
    }

    #[test]
    fn run_stamp_has_date_and_time_parts() {
        let stamp = RunStamp::now();
        let (date, time) = stamp.as_str().split_once('_').unwrap();
        assert_eq!(date.len(), 8);
        assert_eq!(time.len(), 6);
        assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));
    }
}
