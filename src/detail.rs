//! Detail page parser.
//! Page: https://movie.douban.com/subject/{id}/
//! Title/rating sit in the header, everything else in the `#info` block as
//! `<span class="pl">label</span>: value<br>` lines.

use crate::extract::{self, Query, node_text};
use crate::{Attributes, MovieRecord, NO_SYNOPSIS, Rating, UNKNOWN_TITLE};
use scraper::{ElementRef, Html};

/// Labels whose values are lists of linked names. Plain line splitting
/// flattens them badly, so they are re-read from their `span.attrs` sibling.
const ROLE_LABELS: [&str; 3] = ["导演", "编剧", "主演"];

/// Parse a detail page into a [`MovieRecord`]. Never fails: every missing
/// piece falls back to its placeholder.
pub fn parse_detail(html: &str, id: &str) -> MovieRecord {
    let doc = Html::parse_document(html);

    let title = extract::text_or(&doc, "h1 span", UNKNOWN_TITLE);
    let rating = extract::extract(
        &doc,
        ".rating_num",
        |el| node_text(el).map(|t| Rating::parse(&t)),
        Rating::Unavailable,
    );
    let votes = extract::extract(
        &doc,
        ".rating_people span",
        |el| node_text(el)?.replace(',', "").parse::<u64>().ok(),
        0,
    );

    let mut attributes = Attributes::new();
    if let Some(info) = doc.query_one("#info") {
        read_info_lines(info, &mut attributes);
        for role in ROLE_LABELS {
            if let Some(names) = role_names(info, role) {
                attributes.insert(role, names);
            }
        }
    }

    let genres = extract::all_texts(&doc, "span[property=\"v:genre\"]");
    if !genres.is_empty() {
        attributes.insert("类型", genres.join(" / "));
    }

    let synopsis = extract::text_or(&doc, "[property=\"v:summary\"]", NO_SYNOPSIS);
    let poster_url = extract::attr(&doc, "#mainpic img", "src");

    MovieRecord {
        id: id.to_string(),
        title,
        rating,
        votes,
        attributes,
        genres,
        synopsis,
        poster_url,
    }
}

/// `key: value` lines of the info block, split on the first colon.
fn read_info_lines(info: ElementRef<'_>, attributes: &mut Attributes) {
    let text: String = info.text().collect();
    for line in text.split('\n') {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if !key.is_empty() && !value.is_empty() {
            attributes.insert(key, value);
        }
    }
}

/// Linked names following the `role` label, joined with " / ".
fn role_names(info: ElementRef<'_>, role: &str) -> Option<String> {
    let label = info
        .query_all("span")
        .into_iter()
        .find(|span| node_text(*span).as_deref() == Some(role))?;

    let attrs = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")?;
    let only_attrs_class = attrs
        .value()
        .attr("class")
        .is_some_and(|c| c.split_whitespace().eq(["attrs"]));
    if !only_attrs_class {
        return None;
    }

    let names = extract::all_texts(attrs, "a");
    if names.is_empty() {
        None
    } else {
        Some(names.join(" / "))
    }
}
