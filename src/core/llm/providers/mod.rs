//! LLM Provider Implementations
//!
//! Concrete implementations of the `LLMProvider` trait.

mod google;

pub use google::GoogleProvider;
