//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: Token, identity and request/response shapes
//! - `api`: Backend collaborator trait and the `Credentials` accessor
//! - `token_store`: Persisted token interface and an in-memory implementation

mod api;
mod model;
mod token_store;

pub use api::{AuthApi, Credentials};
pub use model::{AccessToken, Identity, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
pub use token_store::{MemoryTokenStore, TOKEN_KEY, TokenStore};
