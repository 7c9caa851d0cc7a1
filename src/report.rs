//! Numbered, line-oriented text listings for people (and chat tools) to read.

use crate::search::SearchHit;
use crate::similar::SimilarTitle;
use crate::{CommentRecord, MovieRecord, RecommendationStub};
use std::fmt::Write;

pub fn format_search(keyword: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("未找到与\"{}\"相关的电影", keyword);
    }

    let mut out = String::from("搜索结果：\n\n");
    for (i, hit) in hits.iter().enumerate() {
        let year = if hit.year.is_empty() { "未知年份" } else { hit.year.as_str() };
        let _ = writeln!(out, "{}. {} ({})", i + 1, hit.title, year);
        let _ = writeln!(out, "   ID: {}", hit.id);
        if !hit.sub_title.is_empty() {
            let _ = writeln!(out, "   副标题: {}", hit.sub_title);
        }
        out.push('\n');
    }
    out
}

pub fn format_detail(record: &MovieRecord) -> String {
    let mut out = String::from("电影详情：\n\n");
    let _ = writeln!(out, "标题: {}", record.title);
    let _ = writeln!(out, "评分: {} ({}人评价)", record.rating, record.votes);
    for (key, value) in record.attributes.iter() {
        let _ = writeln!(out, "{}: {}", key, value);
    }
    let _ = writeln!(out, "简介: {}", record.synopsis);
    let _ = writeln!(
        out,
        "海报链接: {}",
        record.poster_url.as_deref().unwrap_or("无")
    );
    out
}

pub fn format_comments(comments: &[CommentRecord]) -> String {
    if comments.is_empty() {
        return "未找到任何评论".to_string();
    }

    let mut out = String::from("电影评论：\n\n");
    for (i, c) in comments.iter().enumerate() {
        let _ = writeln!(out, "{}. {} (评分: {})", i + 1, c.author, c.score);
        let _ = writeln!(out, "   时间: {}", c.timestamp);
        let _ = writeln!(out, "   内容: {}\n", c.text);
    }
    out
}

pub fn format_recommendations(stubs: &[RecommendationStub]) -> String {
    if stubs.is_empty() {
        return "未找到任何推荐电影".to_string();
    }

    let mut out = String::from("推荐电影：\n\n");
    for (i, s) in stubs.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, s.title);
        let _ = writeln!(out, "   评分: {}", s.rating);
        let _ = writeln!(out, "   ID: {}\n", s.id);
    }
    out
}

pub fn format_similar(titles: &[SimilarTitle]) -> String {
    if titles.is_empty() {
        return "未找到相似电影".to_string();
    }

    let mut out = String::from("相似电影：\n\n");
    for t in titles {
        let _ = writeln!(out, "- {}", t.title);
        let _ = writeln!(out, "  链接: {}\n", t.url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attributes, CommentScore, NO_SYNOPSIS, Rating};

    #[test]
    fn search_listing() {
        let hits = vec![
            SearchHit {
                title: "霸王别姬".into(),
                year: "1993".into(),
                id: "1291546".into(),
                sub_title: "Farewell My Concubine".into(),
                kind: "movie".into(),
            },
            SearchHit {
                title: "霸王别姬".into(),
                year: String::new(),
                id: "26340419".into(),
                sub_title: String::new(),
                kind: "tv".into(),
            },
        ];
        let text = format_search("霸王", &hits);

        assert!(text.starts_with("搜索结果：\n\n1. 霸王别姬 (1993)\n   ID: 1291546\n   副标题: Farewell My Concubine\n"));
        assert!(text.contains("2. 霸王别姬 (未知年份)\n   ID: 26340419\n\n"));
        assert_eq!(format_search("无此片", &[]), "未找到与\"无此片\"相关的电影");
    }

    #[test]
    fn detail_listing() {
        let mut attributes = Attributes::new();
        attributes.insert("导演", "陈凯歌");
        let record = MovieRecord {
            id: "1291546".into(),
            title: "霸王别姬".into(),
            rating: Rating::Score(9.6),
            votes: 12,
            attributes,
            genres: vec![],
            synopsis: NO_SYNOPSIS.into(),
            poster_url: None,
        };

        assert_eq!(
            format_detail(&record),
            "电影详情：\n\n标题: 霸王别姬\n评分: 9.6 (12人评价)\n导演: 陈凯歌\n简介: 无简介\n海报链接: 无\n"
        );
    }

    #[test]
    fn similar_listing() {
        let titles = [SimilarTitle {
            title: "The Matrix Reloaded".into(),
            url: "https://www.imdb.com/title/tt0234215/".into(),
            source: crate::similar::SOURCE_IMDB,
        }];
        assert_eq!(
            format_similar(&titles),
            "相似电影：\n\n- The Matrix Reloaded\n  链接: https://www.imdb.com/title/tt0234215/\n\n"
        );
    }

    #[test]
    fn comment_and_recommendation_listings() {
        let comments = [CommentRecord {
            author: "影迷".into(),
            score: CommentScore::Stars(5),
            text: "经典".into(),
            timestamp: "2024-01-01".into(),
        }];
        assert_eq!(
            format_comments(&comments),
            "电影评论：\n\n1. 影迷 (评分: 5)\n   时间: 2024-01-01\n   内容: 经典\n\n"
        );

        let stubs = [RecommendationStub {
            title: "活着".into(),
            id: "1292365".into(),
            rating: Rating::Unavailable,
        }];
        assert_eq!(
            format_recommendations(&stubs),
            "推荐电影：\n\n1. 活着\n   评分: 无评分\n   ID: 1292365\n\n"
        );

        assert_eq!(format_comments(&[]), "未找到任何评论");
        assert_eq!(format_similar(&[]), "未找到相似电影");
        assert_eq!(format_recommendations(&[]), "未找到任何推荐电影");
    }
}
