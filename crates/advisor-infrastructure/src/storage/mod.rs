//! Storage layer.
//!
//! Persists the one piece of client state that outlives a process: the
//! credential token.

pub mod token_file;

pub use token_file::FileTokenStore;
