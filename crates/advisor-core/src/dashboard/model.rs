//! Dashboard wire models returned by `GET /dashboard`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A news headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// ISO-8601 publication timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coins: Vec<String>,
}

/// The meme of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeItem {
    pub title: String,
    pub url: String,
    pub image_url: String,
}

/// Personalized dashboard payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub news: Vec<NewsItem>,
    /// Symbol to USD price.
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
    /// Generated insight text; empty when none was produced.
    #[serde(default)]
    pub ai_insight: String,
    #[serde(default)]
    pub meme: Option<MemeItem>,
}
