//! Onboarding domain module.

mod api;
mod model;

pub use api::OnboardingApi;
pub use model::{AssetSymbol, InvestorType, OnboardingRequest, OnboardingResponse};
