//! Interaction layer: talks to the Crypto Advisor backend over HTTP.

pub mod http_api;

pub use http_api::{HealthResponse, HttpAdvisorApi};
