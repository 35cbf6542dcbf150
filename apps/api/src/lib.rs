//! Resumatch scores how well a resume covers the vocabulary of a job description.
//!
//! The core is [`matching::compare_documents`]; everything else is the HTTP service
//! and saved-document storage around it.

pub mod config;
pub mod documents;
pub mod errors;
pub mod matching;
pub mod routes;
pub mod state;

pub use matching::{compare_documents, Comparator, MatchResult, TokenizerConfig};
