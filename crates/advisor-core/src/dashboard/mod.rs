//! Dashboard domain module.
//!
//! - `model`: Wire payload of `GET /dashboard`
//! - `view`: Section/item view model with vote fingerprints
//! - `api`: Backend collaborator trait

mod api;
mod model;
mod view;

pub use api::DashboardApi;
pub use model::{DashboardResponse, MemeItem, NewsItem};
pub use view::{
    DashboardItem, DashboardSection, DashboardView, ITEM_ID_MAX_CHARS, NEWS_TITLE_MAX_CHARS,
    insight_item_id, meme_item_id, news_item_id, price_item_id,
};
