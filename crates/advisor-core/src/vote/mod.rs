//! Vote domain module.

mod api;
mod model;

pub use api::VoteApi;
pub use model::{SectionType, VoteCancelRequest, VoteKey, VoteRequest, VoteResponse, VoteType};
