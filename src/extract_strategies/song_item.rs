//! Structural strategy for the trend site's own song-item markup.
//!
//! Each chart row is an `li` with a ranking-number span and anchors for
//! title and artist.  The site routinely hides the literal text and
//! exposes the real value only through `aria-label`, so every field has
//! an attribute fallback, and the artist degrades further to the
//! metadata line and finally to the cover image's alt text.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

use super::{flat_text, ExtractionStrategy};
use crate::record::{ChartRecord, MAX_CHART_POSITION};

pub struct SongItemStrategy;

fn alt_artist_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)by (.+)$").unwrap())
}

fn trailing_digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+$").unwrap())
}

impl ExtractionStrategy for SongItemStrategy {
    fn name(&self) -> &str {
        "song-item"
    }

    fn extract(&self, doc: &Html) -> Vec<ChartRecord> {
        let li_sel = Selector::parse("li").unwrap();
        let rank_sel = Selector::parse(r#"[class*="rankingNumber"]"#).unwrap();
        let title_sel =
            Selector::parse(r#"a[data-test-id="charts_userevent_list_songTitle"]"#).unwrap();
        let artist_sel =
            Selector::parse(r#"a[data-test-id="charts_userevent_list_artistName"]"#).unwrap();
        let labelled_sel = Selector::parse("a[aria-label]").unwrap();
        let metadata_sel = Selector::parse(r#"[class*="metadataLine"]"#).unwrap();
        let img_sel = Selector::parse("img").unwrap();

        let mut records = Vec::new();

        for li in doc.select(&li_sel) {
            let rank_text = match li.select(&rank_sel).next() {
                Some(el) => flat_text(&el),
                None => continue,
            };
            let order: u32 = match rank_text.parse() {
                Ok(n) if n >= 1 && n <= MAX_CHART_POSITION => n,
                _ => continue,
            };

            let mut title = li
                .select(&title_sel)
                .next()
                .map(|a| text_or_label(&a))
                .unwrap_or_default();
            if title.is_empty() {
                // Any labelled anchor that is not just the rank again.
                for a in li.select(&labelled_sel) {
                    if let Some(label) = a.value().attr("aria-label") {
                        let label = label.trim();
                        if !label.is_empty() && label != rank_text {
                            title = label.to_string();
                            break;
                        }
                    }
                }
            }
            if title.is_empty() {
                continue;
            }

            let mut artist = li
                .select(&artist_sel)
                .next()
                .map(|a| text_or_label(&a))
                .unwrap_or_default();
            if artist.is_empty() {
                if let Some(meta) = li.select(&metadata_sel).next() {
                    let text = flat_text(&meta);
                    if !text.is_empty() && text != title {
                        artist = text;
                    }
                }
            }
            if artist.is_empty() {
                for img in li.select(&img_sel) {
                    if let Some(alt) = img.value().attr("alt") {
                        if let Some(caps) = alt_artist_re().captures(alt) {
                            artist = caps[1].trim().to_string();
                            break;
                        }
                    }
                }
            }
            // Rank digits sometimes bleed into the artist text node.
            artist = trailing_digits_re().replace(artist.trim(), "").trim().to_string();
            if artist.is_empty() {
                continue;
            }

            records.push(ChartRecord::new(order, title, artist));
        }

        records
    }
}

fn text_or_label(a: &scraper::ElementRef) -> String {
    let text = flat_text(a);
    if !text.is_empty() {
        return text;
    }
    a.value()
        .attr("aria-label")
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}
