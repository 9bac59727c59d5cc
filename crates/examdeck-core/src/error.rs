use std::path::PathBuf;

/// Lookup failures in the hierarchy store.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no top-level folder named {0:?}")]
    TopNotFound(String),
    #[error("no folder named {leaf:?} inside {top:?}")]
    LeafNotFound { top: String, leaf: String },
}

/// Reasons an edit command did nothing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The command needs a folder (or container) that is no longer there.
    #[error("no target for this command")]
    MissingTarget,
    #[error("clipboard is empty")]
    EmptyClipboard,
    /// A top-level folder was pasted inside a folder, or the reverse.
    #[error("cannot paste a {source_level} folder into a {destination_level} container")]
    InvalidPaste {
        source_level: &'static str,
        destination_level: &'static str,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while loading seed data.
#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("seed must be a JSON object of folders, found {0}")]
    Shape(&'static str),
    #[error("duplicate folder {name:?} inside {parent:?}")]
    Duplicate { parent: String, name: String },
}
