//! Comment listing parser.
//! Page: https://movie.douban.com/subject/{id}/comments
//! Each `.comment-item` carries author, an optional star class, body and time.

use crate::error::ItemParseError;
use crate::extract::{self, Query};
use crate::{CommentRecord, CommentScore};
use scraper::{ElementRef, Html};
use tracing::warn;

/// Comments among the first `limit` items, in page order. Items that cannot
/// be read are logged and skipped; they still use up their slot.
pub fn parse_comments(html: &str, limit: usize) -> Vec<CommentRecord> {
    let doc = Html::parse_document(html);
    doc.query_all(".comment-item")
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, item)| match parse_item(item) {
            Ok(comment) => Some(comment),
            Err(e) => {
                warn!("skipping comment #{}: {}", i + 1, e);
                None
            }
        })
        .collect()
}

fn parse_item(item: ElementRef<'_>) -> Result<CommentRecord, ItemParseError> {
    let author =
        extract::text(item, ".comment-info a").ok_or(ItemParseError { field: "author" })?;
    let score = extract::extract(
        item,
        ".rating",
        |el| Some(score_from_class(el)),
        CommentScore::Unrated,
    );
    let text =
        extract::text(item, ".comment-content").ok_or(ItemParseError { field: "content" })?;
    let timestamp =
        extract::text(item, ".comment-time").ok_or(ItemParseError { field: "time" })?;

    Ok(CommentRecord {
        author,
        score,
        text,
        timestamp,
    })
}

/// Star code from the first class name: its second-to-last character
/// (`allstar40` → 4).
fn score_from_class(el: ElementRef<'_>) -> CommentScore {
    el.value()
        .attr("class")
        .and_then(|c| c.split_whitespace().next())
        .and_then(|class| class.chars().rev().nth(1))
        .and_then(|c| c.to_digit(10))
        .map(|d| CommentScore::Stars(d as u8))
        .unwrap_or(CommentScore::Unrated)
}
