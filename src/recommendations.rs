//! "喜欢这部电影的人也喜欢" block of a detail page.
//! Each `.recommendations-bd dl` holds a poster link, a title link and
//! usually a score.

use crate::error::ItemParseError;
use crate::extract::{self, Query, node_text};
use crate::{Rating, RecommendationStub};
use scraper::{ElementRef, Html};
use tracing::warn;

/// Related titles among the first `limit` items, in page order; unreadable
/// items are logged and skipped without freeing their slot.
pub fn parse_recommendations(html: &str, limit: usize) -> Vec<RecommendationStub> {
    let doc = Html::parse_document(html);
    doc.query_all(".recommendations-bd dl")
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, item)| match parse_item(item) {
            Ok(stub) => Some(stub),
            Err(e) => {
                warn!("skipping recommendation #{}: {}", i + 1, e);
                None
            }
        })
        .collect()
}

fn parse_item(item: ElementRef<'_>) -> Result<RecommendationStub, ItemParseError> {
    let links = item.query_all("a");
    let first = links.first().ok_or(ItemParseError { field: "link" })?;

    let title = links
        .iter()
        .find_map(|a| node_text(*a))
        .or_else(|| extract::attr(item, "img", "alt"))
        .ok_or(ItemParseError { field: "title" })?;
    let id = first
        .value()
        .attr("href")
        .and_then(id_from_href)
        .ok_or(ItemParseError { field: "id" })?;
    let rating = extract::extract(
        item,
        ".rating_nums, .subject-rate",
        |el| node_text(el).map(|t| Rating::parse(&t)),
        Rating::Unavailable,
    );

    Ok(RecommendationStub { title, id, rating })
}

/// Subject id of a link like `https://movie.douban.com/subject/1291546/`:
/// the second-to-last `/`-separated segment. Links without a trailing slash
/// do not follow the site's layout and yield whatever sits before the last
/// segment; an empty segment yields `None`.
pub fn id_from_href(href: &str) -> Option<String> {
    let segments: Vec<&str> = href.trim().split('/').collect();
    if segments.len() < 2 {
        return None;
    }
    let id = segments[segments.len() - 2];
    if id.is_empty() { None } else { Some(id.to_string()) }
}
