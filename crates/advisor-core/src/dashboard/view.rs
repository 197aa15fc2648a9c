//! Renderable dashboard view model.
//!
//! Turns a [`DashboardResponse`] into the ordered list of sections a screen
//! shows, pairing every item with the [`VoteKey`] used for voting on it.
//! Dashboard content is transient and carries no stable backend ids, so the
//! keys are fingerprints derived from the content itself.

use super::model::{DashboardResponse, MemeItem, NewsItem};
use crate::format::{format_news_date, format_price, truncate_chars};
use crate::vote::{SectionType, VoteKey};

/// Longest news title shown before truncation.
pub const NEWS_TITLE_MAX_CHARS: usize = 70;

/// Backend limit on `item_id`, applied to the insight fingerprint.
pub const ITEM_ID_MAX_CHARS: usize = 255;

/// Fingerprint for a news item.
pub fn news_item_id(item: &NewsItem) -> String {
    item.url.clone()
}

/// Fingerprint for a price quote: symbol and price together, so a new quote
/// is a new votable item.
pub fn price_item_id(symbol: &str, price: f64) -> String {
    format!("{symbol}|{}", number_text(price))
}

/// Shortest round-trip text of `value` in the backend's number notation:
/// plain decimals, with exponent form only below 1e-6 or from 1e21 up.
fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    format!("{value}")
}

/// Fingerprint for the generated insight: its leading characters.
pub fn insight_item_id(insight: &str) -> String {
    insight.chars().take(ITEM_ID_MAX_CHARS).collect()
}

/// Fingerprint for a meme.
pub fn meme_item_id(meme: &MemeItem) -> String {
    meme.image_url.clone()
}

/// One votable row of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardItem {
    pub key: VoteKey,
    /// Primary text (headline, symbol, insight, meme title).
    pub label: String,
    /// Secondary text (publication date, formatted price).
    pub detail: Option<String>,
    /// Link to open (article, meme page).
    pub link: Option<String>,
}

/// A non-empty dashboard section.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSection {
    pub kind: SectionType,
    pub items: Vec<DashboardItem>,
}

impl DashboardSection {
    pub fn heading(&self) -> &'static str {
        match self.kind {
            SectionType::News => "News",
            SectionType::Price => "Price",
            SectionType::Ai => "AI",
            SectionType::Meme => "Meme",
        }
    }
}

/// The dashboard as it should be displayed.
///
/// Sections appear in the order news, price, ai, meme; empty ones are
/// omitted. When nothing remains the view is empty and the screen shows the
/// "no content" state instead of any section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub sections: Vec<DashboardSection>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, kind: SectionType) -> Option<&DashboardSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Every vote key present in the view, in display order.
    pub fn vote_keys(&self) -> impl Iterator<Item = &VoteKey> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter().map(|item| &item.key))
    }
}

impl From<&DashboardResponse> for DashboardView {
    fn from(response: &DashboardResponse) -> Self {
        let mut sections = Vec::new();

        if !response.news.is_empty() {
            let items = response
                .news
                .iter()
                .map(|item| DashboardItem {
                    key: VoteKey::new(SectionType::News, news_item_id(item)),
                    label: truncate_chars(&item.title, NEWS_TITLE_MAX_CHARS),
                    detail: item
                        .published_at
                        .as_deref()
                        .filter(|published| !published.trim().is_empty())
                        .map(format_news_date),
                    link: Some(item.url.clone()),
                })
                .collect();
            sections.push(DashboardSection {
                kind: SectionType::News,
                items,
            });
        }

        if !response.prices.is_empty() {
            let items = response
                .prices
                .iter()
                .map(|(symbol, price)| DashboardItem {
                    key: VoteKey::new(SectionType::Price, price_item_id(symbol, *price)),
                    label: symbol.clone(),
                    detail: Some(format_price(*price)),
                    link: None,
                })
                .collect();
            sections.push(DashboardSection {
                kind: SectionType::Price,
                items,
            });
        }

        if !response.ai_insight.is_empty() {
            sections.push(DashboardSection {
                kind: SectionType::Ai,
                items: vec![DashboardItem {
                    key: VoteKey::new(SectionType::Ai, insight_item_id(&response.ai_insight)),
                    label: response.ai_insight.clone(),
                    detail: None,
                    link: None,
                }],
            });
        }

        if let Some(meme) = &response.meme {
            sections.push(DashboardSection {
                kind: SectionType::Meme,
                items: vec![DashboardItem {
                    key: VoteKey::new(SectionType::Meme, meme_item_id(meme)),
                    label: meme.title.clone(),
                    detail: Some(meme.image_url.clone()),
                    link: Some(meme.url.clone()),
                }],
            });
        }

        Self { sections }
    }
}

impl From<DashboardResponse> for DashboardView {
    fn from(response: DashboardResponse) -> Self {
        Self::from(&response)
    }
}
