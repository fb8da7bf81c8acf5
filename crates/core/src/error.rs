//! Error types shared across the engagement crates

use thiserror::Error;

/// Errors raised at the input boundary.
///
/// Decision functions never return these: an empty result is the normal
/// "no action" outcome. Errors only come from parsing caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown {field} value: {value}")]
    UnknownBand { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
