use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirexError {
    // Directory arguments
    /// A directory argument is unusable: its string form contains glob
    /// wildcards (`*`, `?`), or a mirror source and target are nested one
    /// inside the other.
    #[error("invalid directory")]
    InvalidDirectory(PathBuf),

    #[error("directory not found")]
    DirectoryNotFound(PathBuf),

    #[error("not a directory")]
    NotADirectory(PathBuf),

    // Patterns
    #[error("invalid pattern")]
    InvalidPattern(String),

    // Text
    /// The file's bytes are not valid text under the active encoding (or,
    /// when writing, the text has no representation in it).
    #[error("decode failed")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    // Filesystem
    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DirexError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "failed: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidDirectory(p) | Self::DirectoryNotFound(p) | Self::NotADirectory(p) => {
                Some(p)
            }
            Self::Decode { path, .. } | Self::Io { path, .. } => Some(path),
            Self::InvalidPattern(_) => None,
        }
    }
}
