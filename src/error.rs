// ===============================
// src/error.rs
// ===============================
use thiserror::Error;

/// Nothing in the core is fatal; these surface from parsing and lookups and
/// are either logged and ignored or turned into an empty view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("unknown page `{0}`")]
    UnknownPage(String),
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error("malformed command `{0}`")]
    BadCommand(String),
    #[error("unknown component `{0}`")]
    UnknownComponent(String),
}
