use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;

use crate::error::DirexError;

/// Pattern used when the caller does not supply one: every file at any depth.
pub const MATCH_ALL: &str = "**/*";

// ---------------------------------------------------------------------------
// Directory validation
// ---------------------------------------------------------------------------

/// Check that `path` is an acceptable directory argument.
///
/// Rejects paths whose string form contains glob wildcards, paths that exist
/// but are not directories, and — when `must_exist` is set — paths that do
/// not exist at all. Returns the path unchanged otherwise. No side effects:
/// a missing-but-permitted directory is not created here.
pub(crate) fn ensure_dir(path: &Path, must_exist: bool) -> Result<PathBuf, DirexError> {
    let s = path.to_string_lossy();
    if s.contains('*') || s.contains('?') {
        return Err(DirexError::InvalidDirectory(path.to_path_buf()));
    }
    if path.exists() {
        if !path.is_dir() {
            return Err(DirexError::NotADirectory(path.to_path_buf()));
        }
    } else if must_exist {
        return Err(DirexError::DirectoryNotFound(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

// ---------------------------------------------------------------------------
// Pattern compilation
// ---------------------------------------------------------------------------

/// Compile a glob pattern with shell segment semantics: `*` and `?` stay
/// within one path component, `**` crosses components.
pub(crate) fn compile_pattern(pattern: &str) -> Result<GlobMatcher, DirexError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| DirexError::InvalidPattern(e.to_string()))?;
    Ok(glob.compile_matcher())
}

// ---------------------------------------------------------------------------
// snapshot()
// ---------------------------------------------------------------------------

/// Evaluate `pattern` under `root` into an ordered list of regular files.
///
/// The walk is fully materialized before the caller sees a single path.
/// Later stages may delete, move, or create files while the sequence is
/// being consumed; the set of files to process is fixed here and does not
/// drift. Matching is against the path relative to `root`.
///
/// Entries that match the pattern but are not regular files at snapshot
/// time (directories, broken links) are filtered, not reported. A symlink
/// to a regular file counts as a file.
pub(crate) fn snapshot(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DirexError> {
    let matcher = compile_pattern(pattern)?;

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(map_ignore_error)?;

        // Skip the root itself
        if entry.depth() == 0 {
            continue;
        }

        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if !matcher.is_match(rel) {
            continue;
        }

        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "snapshot of {}: {} files match {pattern}",
        root.display(),
        files.len()
    );
    Ok(files)
}

// ---------------------------------------------------------------------------
// Map ignore::Error to DirexError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> DirexError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => DirexError::Io {
                path,
                source: io_err,
            },
            other => DirexError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
            },
        },
        ignore::Error::Io(io_err) => DirexError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => DirexError::Io {
            path: PathBuf::new(),
            source: std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
        },
    }
}
