//! Vote domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Dashboard content category. Closed list shared with the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SectionType {
    News,
    Price,
    Ai,
    Meme,
}

/// Direction of a vote.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn opposite(self) -> Self {
        match self {
            VoteType::Up => VoteType::Down,
            VoteType::Down => VoteType::Up,
        }
    }
}

/// Identifies one votable piece of content: its section plus a
/// client-chosen fingerprint of the item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoteKey {
    pub section: SectionType,
    pub item_id: String,
}

impl VoteKey {
    pub fn new(section: SectionType, item_id: impl Into<String>) -> Self {
        Self {
            section,
            item_id: item_id.into(),
        }
    }
}

impl fmt::Display for VoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.item_id)
    }
}

/// Body for `POST /vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub section_type: SectionType,
    pub item_id: String,
    pub vote_type: VoteType,
}

impl VoteRequest {
    pub fn new(key: &VoteKey, vote_type: VoteType) -> Self {
        Self {
            section_type: key.section,
            item_id: key.item_id.clone(),
            vote_type,
        }
    }
}

/// Body for `DELETE /vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCancelRequest {
    pub section_type: SectionType,
    pub item_id: String,
}

impl From<&VoteKey> for VoteCancelRequest {
    fn from(key: &VoteKey) -> Self {
        Self {
            section_type: key.section,
            item_id: key.item_id.clone(),
        }
    }
}

/// Response of both vote endpoints.
///
/// `action` is `created` or `updated` for a cast and `cancelled` for a
/// removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub action: String,
}
