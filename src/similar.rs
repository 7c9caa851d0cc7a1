//! "More like this" block of an IMDb title search.
//! Page: https://www.imdb.com/find?q={title}&s=tt
//! Links are site-relative (`/title/tt0133093/?ref_=...`).

use crate::error::ItemParseError;
use crate::extract::{Query, node_text};
use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::warn;

pub const SOURCE_IMDB: &str = "IMDB";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarTitle {
    pub title: String,
    pub url: String,
    pub source: &'static str,
}

/// Titles among the first `limit` list entries of the similar-titles
/// section. No section gives an empty list. Relative links are joined onto
/// `site_root`.
pub fn parse_similar(html: &str, site_root: &str, limit: usize) -> Vec<SimilarTitle> {
    let doc = Html::parse_document(html);
    let Some(section) = doc.query_one("section[data-testid=\"find-more-like-this\"]") else {
        return Vec::new();
    };

    section
        .query_all("li")
        .into_iter()
        .take(limit)
        .enumerate()
        .filter_map(|(i, item)| match parse_item(item, site_root) {
            Ok(similar) => Some(similar),
            Err(e) => {
                warn!("skipping similar title #{}: {}", i + 1, e);
                None
            }
        })
        .collect()
}

fn parse_item(item: ElementRef<'_>, site_root: &str) -> Result<SimilarTitle, ItemParseError> {
    let link = item.query_one("a").ok_or(ItemParseError { field: "link" })?;
    let href = link
        .value()
        .attr("href")
        .ok_or(ItemParseError { field: "href" })?;
    let title = node_text(link).ok_or(ItemParseError { field: "title" })?;

    Ok(SimilarTitle {
        title,
        url: format!("{}{}", site_root.trim_end_matches('/'), href),
        source: SOURCE_IMDB,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://www.imdb.com";

    fn li(tt: &str, title: &str) -> String {
        format!(
            r#"<li class="ipc-metadata-list-summary-item">
                 <a class="ipc-metadata-list-summary-item__t" href="/title/{tt}/?ref_=fn_mlt">{title}</a>
               </li>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!(
            r#"<html><body>
                 <section data-testid="find-results-section-title"><ul>{}</ul></section>
                 <section data-testid="find-more-like-this"><ul>{}</ul></section>
               </body></html>"#,
            li("tt0000001", "Exact Match"),
            items.concat()
        )
    }

    #[test]
    fn reads_titles_from_similar_section_only() {
        let similar = parse_similar(
            &page(&[li("tt0234215", "The Matrix Reloaded"), li("tt0242653", "The Matrix Revolutions")]),
            ROOT,
            5,
        );

        assert_eq!(
            similar,
            [
                SimilarTitle {
                    title: "The Matrix Reloaded".into(),
                    url: "https://www.imdb.com/title/tt0234215/?ref_=fn_mlt".into(),
                    source: SOURCE_IMDB,
                },
                SimilarTitle {
                    title: "The Matrix Revolutions".into(),
                    url: "https://www.imdb.com/title/tt0242653/?ref_=fn_mlt".into(),
                    source: SOURCE_IMDB,
                },
            ]
        );
    }

    #[test]
    fn entries_without_link_use_up_their_slot() {
        let items = vec![
            li("tt1", "One"),
            "<li>no link</li>".to_string(),
            li("tt2", "Two"),
            li("tt3", "Three"),
        ];
        let titles: Vec<_> = parse_similar(&page(&items), ROOT, 3)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[test]
    fn missing_section_gives_empty_list() {
        let html = r#"<html><body><section data-testid="find-results-section-title">
            <ul><li><a href="/title/tt0133093/">The Matrix</a></li></ul></section></body></html>"#;
        assert!(parse_similar(html, ROOT, 5).is_empty());
    }
}
