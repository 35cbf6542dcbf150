// Keyword coverage matching between a resume and a job description.
// The comparator and tokenizer are pure; handlers and extraction are the only I/O here.

pub mod comparator;
pub mod extract;
pub mod handlers;
pub mod tokenizer;

pub use comparator::{compare_documents, Comparator, MatchResult};
pub use tokenizer::TokenizerConfig;
