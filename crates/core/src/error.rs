use thiserror::Error;

/// Raised when a caller asks for content the static catalogs do not hold.
///
/// The catalogs are closed, so this signals a programming error rather than a
/// user mistake.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("no {kind} catalog entry for `{id}`")]
    MissingContent { kind: &'static str, id: String },
}

impl ContentError {
    #[must_use]
    pub fn missing(kind: &'static str, id: impl Into<String>) -> Self {
        Self::MissingContent {
            kind,
            id: id.into(),
        }
    }
}
