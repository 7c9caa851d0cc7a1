//! Public operations: fetch, parse, format, save.
//!
//! The `fetch_*` methods return typed records and propagate errors. The
//! remaining methods mirror what a chat tool or command line shows a user:
//! they always produce a value, encoding failures as text (or as an
//! `error` field for the analysis payload).

use crate::aggregate::{self, AggregateArtifact};
use crate::analysis::AnalysisResult;
use crate::comments::parse_comments;
use crate::config::ScrapeConfig;
use crate::detail::parse_detail;
use crate::error::{Error, FetchError, Result};
use crate::fetcher::{Fetcher, HttpSource, PageSource, RetryPolicy};
use crate::recommendations::parse_recommendations;
use crate::report;
use crate::search::{self, SearchHit};
use crate::similar::{SimilarTitle, parse_similar};
use crate::{CommentRecord, MovieRecord, RecommendationStub};
use std::path::PathBuf;
use tracing::{error, info, instrument};

pub struct MovieService<S = HttpSource> {
    fetcher: Fetcher<S>,
    config: ScrapeConfig,
}

impl MovieService<HttpSource> {
    pub fn new(config: ScrapeConfig) -> std::result::Result<Self, FetchError> {
        let fetcher = Fetcher::from_config(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<S: PageSource> MovieService<S> {
    /// Service over a custom page source; retry settings come from `config`.
    pub fn with_source(source: S, config: ScrapeConfig) -> Self {
        let policy = RetryPolicy::new(config.max_attempts, config.retry_delay);
        Self {
            fetcher: Fetcher::new(source, policy),
            config,
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let url = reqwest::Url::parse_with_params(&self.config.suggest_url(), &[("q", keyword)])
            .map(String::from)
            .unwrap_or_else(|_| format!("{}?q={}", self.config.suggest_url(), keyword));
        let body = self.fetcher.fetch(&url).await?;
        let hits = search::parse_suggestions(&body, limit)?;
        info!("{} search hits", hits.len());
        Ok(hits)
    }

    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, id: &str) -> Result<MovieRecord> {
        let id = checked_id(id)?;
        let body = self.fetcher.fetch(&self.config.detail_url(id)).await?;
        Ok(parse_detail(&body, id))
    }

    #[instrument(skip(self))]
    pub async fn fetch_comments(&self, id: &str, limit: usize) -> Result<Vec<CommentRecord>> {
        let id = checked_id(id)?;
        let body = self.fetcher.fetch(&self.config.comments_url(id)).await?;
        Ok(parse_comments(&body, limit))
    }

    #[instrument(skip(self))]
    pub async fn fetch_recommendations(
        &self,
        id: &str,
        limit: usize,
    ) -> Result<Vec<RecommendationStub>> {
        let id = checked_id(id)?;
        let body = self.fetcher.fetch(&self.config.detail_url(id)).await?;
        Ok(parse_recommendations(&body, limit))
    }

    /// Similar titles from IMDb's title search for `title`.
    #[instrument(skip(self))]
    pub async fn fetch_similar(&self, title: &str, limit: usize) -> Result<Vec<SimilarTitle>> {
        let body = self.fetcher.fetch(&self.config.imdb_search_url(title)).await?;
        Ok(parse_similar(&body, &self.config.imdb_base_url, limit))
    }

    /// Like [`Self::fetch_similar`], but any failure is logged and yields an
    /// empty list.
    pub async fn similar_movies(&self, title: &str, limit: usize) -> Vec<SimilarTitle> {
        self.fetch_similar(title, limit).await.unwrap_or_else(|e| {
            error!("similar titles for {:?} failed: {}", title, e);
            Vec::new()
        })
    }

    pub async fn search_movies(&self, keyword: &str, limit: usize) -> String {
        match self.search(keyword, limit).await {
            Ok(hits) => report::format_search(keyword, &hits),
            Err(e) => format!("搜索电影时出错: {}", e),
        }
    }

    pub async fn movie_detail(&self, id: &str) -> String {
        match self.fetch_detail(id).await {
            Ok(record) => report::format_detail(&record),
            Err(e) => format!("获取电影详情时出错: {}", e),
        }
    }

    pub async fn movie_comments(&self, id: &str, limit: usize) -> String {
        match self.fetch_comments(id, limit).await {
            Ok(comments) => report::format_comments(&comments),
            Err(e) => format!("获取电影评论时出错: {}", e),
        }
    }

    pub async fn movie_recommendations(&self, id: &str, limit: usize) -> String {
        match self.fetch_recommendations(id, limit).await {
            Ok(stubs) => report::format_recommendations(&stubs),
            Err(e) => format!("获取电影推荐时出错: {}", e),
        }
    }

    pub async fn analyze(&self, id: &str) -> Result<AnalysisResult> {
        let record = self.fetch_detail(id).await?;
        Ok(AnalysisResult::from_record(&record))
    }

    /// Analysis payload, or `{"error": "..."}` when the page cannot be fetched.
    pub async fn analyze_movie(&self, id: &str) -> serde_json::Value {
        let result = self.analyze(id).await.and_then(|analysis| {
            serde_json::to_value(analysis).map_err(Error::from)
        });
        match result {
            Ok(value) => value,
            Err(e) => serde_json::json!({ "error": format!("分析电影信息时出错: {}", e) }),
        }
    }

    /// Fetch detail, comments and recommendations and combine them. The
    /// detail page is required; comment and recommendation failures are
    /// kept as their error text.
    #[instrument(skip(self))]
    pub async fn collect(&self, id: &str) -> Result<AggregateArtifact> {
        let id = checked_id(id)?;
        let detail_page = self.fetcher.fetch(&self.config.detail_url(id)).await?;
        let record = parse_detail(&detail_page, id);
        let recommendations = report::format_recommendations(&parse_recommendations(
            &detail_page,
            crate::config::DEFAULT_LIMIT,
        ));
        let comments = self.movie_comments(id, crate::config::DEFAULT_LIMIT).await;

        Ok(aggregate::aggregate(
            &record,
            comments,
            recommendations,
            chrono::Local::now(),
        ))
    }

    pub async fn save(&self, id: &str) -> Result<PathBuf> {
        let id = checked_id(id)?;
        let artifact = self.collect(id).await?;
        let path =
            aggregate::persist(&artifact, &self.config.data_dir, id, &self.config.run_stamp)?;
        Ok(path)
    }

    pub async fn save_movie_info(&self, id: &str) -> String {
        match self.save(id).await {
            Ok(path) => format!(
                "电影信息已保存到文件: {}",
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            ),
            Err(e) => format!("保存电影信息时出错: {}", e),
        }
    }
}

fn checked_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() { Err(Error::EmptyId) } else { Ok(id) }
}
