use std::collections::BTreeSet;

/// Genre label → themes worth discussing for a film of that genre.
static GENRE_THEMES: [(&str, [&str; 3]); 19] = [
    ("剧情", ["故事性", "人物塑造", "情节发展"]),
    ("喜剧", ["幽默感", "笑点", "欢乐氛围"]),
    ("动作", ["动作场面", "视觉效果", "刺激感"]),
    ("爱情", ["感情线", "浪漫元素", "人物关系"]),
    ("科幻", ["科技元素", "未来世界", "想象力"]),
    ("动画", ["动画效果", "角色设计", "视觉风格"]),
    ("悬疑", ["推理元素", "剧情转折", "悬念设置"]),
    ("惊悚", ["紧张氛围", "恐怖元素", "心理描写"]),
    ("恐怖", ["恐怖氛围", "惊吓元素", "心理恐惧"]),
    ("犯罪", ["犯罪元素", "社会问题", "人性探讨"]),
    ("奇幻", ["奇幻元素", "想象力", "世界观"]),
    ("冒险", ["冒险元素", "探索精神", "刺激感"]),
    ("灾难", ["灾难场景", "人性考验", "生存主题"]),
    ("音乐", ["音乐元素", "艺术表现", "情感表达"]),
    ("历史", ["历史背景", "时代特征", "文化内涵"]),
    ("战争", ["战争场面", "历史背景", "人性探讨"]),
    ("传记", ["人物生平", "历史背景", "人物塑造"]),
    ("运动", ["体育精神", "竞技元素", "团队合作"]),
    ("纪录片", ["真实记录", "社会观察", "知识普及"]),
];

/// Union of the themes of every known genre. Unknown genres add nothing.
pub fn infer_themes<S: AsRef<str>>(genres: &[S]) -> BTreeSet<&'static str> {
    genres
        .iter()
        .filter_map(|g| {
            let g = g.as_ref().trim();
            GENRE_THEMES.iter().find(|(genre, _)| *genre == g)
        })
        .flat_map(|(_, themes)| themes.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspense_and_action() {
        let themes = infer_themes(&["悬疑", "动作"]);
        let expected: BTreeSet<&str> =
            ["推理元素", "剧情转折", "悬念设置", "动作场面", "视觉效果", "刺激感"]
                .into_iter()
                .collect();
        assert_eq!(themes, expected);
    }

    #[test]
    fn order_independent_and_idempotent() {
        let a = infer_themes(&["剧情", "战争", "历史"]);
        let b = infer_themes(&["历史", "剧情", "战争"]);
        let c = infer_themes(&["历史", "历史", "剧情", "战争", "剧情"]);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn shared_themes_deduplicated() {
        // 战争 and 历史 both contribute 历史背景
        assert_eq!(infer_themes(&["战争", "历史"]).len(), 5);
    }

    #[test]
    fn unknown_genres_contribute_nothing() {
        assert!(infer_themes(&["同性", "", "西部"]).is_empty());
        assert_eq!(infer_themes(&["西部", "喜剧"]).len(), 3);
        assert!(infer_themes::<String>(&[]).is_empty());
    }
}
