use crate::ItemId;

/// Errors from mutating an [`crate::OrderedSource`].
///
/// Running off either end of the source is not an error; traversal returns
/// `None` for that.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("no record with id {0}")]
    UnknownId(ItemId),
    #[error("a record with id {0} already exists")]
    DuplicateId(ItemId),
}

/// Rejected [`crate::ListConfig`] values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("keep-alive margin must be finite and >= 0, got {0}")]
    InvalidKeepAlive(f32),
    #[error("navigation step must be finite and > 0, got {0}")]
    InvalidStep(f32),
    #[error("navigation interval must be at least 1ms")]
    InvalidInterval,
    #[error("max_scroll_materializations must be > 0")]
    InvalidBudget,
}
