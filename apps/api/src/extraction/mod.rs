// Résumé information extraction.
// Pure extractors over plain text; the orchestrator is the only part that sees
// the whole fact set. Document conversion lives in crate::document.

pub mod error;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod names;
pub mod orchestrator;
pub mod patterns;
pub mod scoring;
pub mod tagger;
pub mod vocabulary;
