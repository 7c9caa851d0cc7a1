//! Analysis payload handed to a downstream text-generation step, plus a
//! coarse verdict for a numeric score.

use crate::{MovieRecord, Rating};
use crate::themes::infer_themes;
use serde::Serialize;
use std::collections::BTreeSet;

/// Instruction text sent along with the analysis payload.
pub const REVIEW_PROMPT: &str = "请根据电影信息生成一条专业的影评，注意以下要点：\n1. 分析电影的类型特点和主题表现\n2. 评价演员表演和导演手法\n3. 讨论电影的社会意义和艺术价值\n4. 给出客观的评分建议";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub douban_id: String,
    #[serde(rename = "基本信息")]
    pub basic_info: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "类型")]
    pub genres: Vec<String>,
    #[serde(rename = "主题")]
    pub themes: BTreeSet<String>,
    #[serde(rename = "评分")]
    pub rating: String,
    #[serde(rename = "评价人数")]
    pub votes: u64,
    pub message: String,
}

impl AnalysisResult {
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            douban_id: record.id.clone(),
            basic_info: record.basic_info(),
            genres: record.genres.clone(),
            themes: infer_themes(&record.genres)
                .into_iter()
                .map(String::from)
                .collect(),
            rating: record.rating.to_string(),
            votes: record.votes,
            message: REVIEW_PROMPT.to_string(),
        }
    }
}

/// Verdict for a score on the site's 10-point scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingAssessment {
    pub level: &'static str,
    pub description: &'static str,
    pub score: Option<f32>,
}

pub fn assess_rating(text: &str) -> RatingAssessment {
    let Some(score) = Rating::parse(text).value() else {
        return RatingAssessment {
            level: "无法评估",
            description: "评分数据无效",
            score: None,
        };
    };

    let (level, description) = if score >= 8.5 {
        ("优秀", "这是一部非常优秀的电影，强烈推荐观看")
    } else if score >= 7.0 {
        ("良好", "这是一部不错的电影，值得一看")
    } else if score >= 5.0 {
        ("一般", "这是一部普通的电影，可以看看")
    } else {
        ("较差", "这部电影评分较低，建议谨慎观看")
    };

    RatingAssessment {
        level,
        description,
        score: Some(score),
    }
}
