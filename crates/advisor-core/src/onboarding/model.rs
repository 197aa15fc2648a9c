//! Onboarding survey models.
//!
//! The asset and investor-type lists are closed and must match the backend
//! exactly; a mismatch is a contract violation rather than a runtime case.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::vote::SectionType;

/// Supported crypto assets.
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
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AssetSymbol {
    Btc,
    Eth,
    Bnb,
    Sol,
    Xrp,
    Usdt,
    Usdc,
    Ada,
    Doge,
    Avax,
    Dot,
    Matic,
    Link,
    Uni,
    Atom,
    Ltc,
    Etc,
    Xlm,
    Bch,
    Near,
    Apt,
    Arb,
    Op,
    Inj,
    Sui,
    Sei,
    Tia,
    Pepe,
    Wif,
    Floki,
    Bonk,
}

/// Self-declared investing style.
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
#[strum(ascii_case_insensitive)]
pub enum InvestorType {
    #[serde(rename = "HODLer")]
    #[strum(serialize = "HODLer")]
    Hodler,
    DayTrader,
    SwingTrader,
    LongTermInvestor,
    #[serde(rename = "NFTCollector")]
    #[strum(serialize = "NFTCollector")]
    NftCollector,
    DeFiFarmer,
}

/// Body for `POST /onboarding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingRequest {
    pub assets: Vec<AssetSymbol>,
    pub investor_type: InvestorType,
    pub content_types: Vec<SectionType>,
}

/// Preferences as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingResponse {
    pub id: String,
    pub user_id: String,
    pub assets: Vec<String>,
    pub investor_type: String,
    pub content_types: Vec<String>,
}
