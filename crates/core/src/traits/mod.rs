//! Strategy traits for the engagement engine
//!
//! Components depend on these seams instead of concrete implementations so
//! scoring tables and answer sources can be swapped or mocked in tests.
//!
//! ```text
//! Scoring:
//!   - IcpScoringStrategy: ProfileInput → ScoreBreakdown
//!
//! Knowledge:
//!   - AnswerSource: free-text question → best knowledge-base answer
//! ```

mod knowledge;
mod scoring;

pub use knowledge::AnswerSource;
pub use scoring::IcpScoringStrategy;
