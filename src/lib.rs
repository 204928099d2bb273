//! # direx
//!
//! Deterministic directory traversal and mirroring — lazy, embeddable, zero opinions.
//!
//! direx walks a directory tree, hands each matched file (or its decoded
//! text) to a caller-supplied function, and can mirror results into a
//! parallel output tree with the same relative layout. It owns the traversal
//! snapshot, the glob matching, the source/target pairing, and the error
//! type. It does **not** own argument parsing, logger configuration, or what
//! your function does with each file — those belong to the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use direx::DirexError;
//!
//! // Print every .txt file under ./docs, at any depth.
//! direx::scan("./docs")
//!     .pattern("**/*.txt")
//!     .for_each_file(|path| {
//!         println!("{}", path.display());
//!         Ok::<(), DirexError>(())
//!     })
//!     .unwrap();
//! ```
//!
//! # Mirroring a tree
//!
//! Mirror operations pair every matched source file with the path at the
//! same relative location under a target root, creating target parent
//! directories on demand:
//!
//! ```rust,no_run
//! use direx::DirexError;
//!
//! // Keep only the first word of each .txt file, writing the results
//! // into a parallel tree under ./out.
//! direx::mirror("./docs", "./out")
//!     .pattern("**/*.txt")
//!     .convert_texts(|text| {
//!         Ok::<_, DirexError>(text.split_whitespace().next().unwrap_or("").to_string())
//!     })
//!     .unwrap();
//! ```
//!
//! # Snapshot consistency
//!
//! Every operation evaluates its glob once, up front, into an ordered
//! in-memory snapshot. Files your function creates, moves, or deletes while
//! a sequence is being consumed never change what that sequence yields.
//! Enumeration order is deterministic for a fixed tree and pattern:
//! depth-first, with each directory's entries sorted by file name.
//!
//! # Errors
//!
//! Directory-shape problems (wildcards in a directory argument, a missing
//! or non-directory root, nested mirror roots) surface eagerly when a
//! sequence is built. Per-file problems (a file that does not decode, a
//! target parent that cannot be created) surface as `Err` items at that
//! file's position. Errors returned by caller functions propagate to the
//! caller unmodified and halt iteration — the applicators are generic over
//! any error type convertible from [`DirexError`]:
//!
//! ```rust,no_run
//! use direx::DirexError;
//!
//! #[derive(Debug)]
//! enum AppError {
//!     Traversal(DirexError),
//!     EmptyFile,
//! }
//!
//! impl From<DirexError> for AppError {
//!     fn from(e: DirexError) -> Self {
//!         AppError::Traversal(e)
//!     }
//! }
//!
//! let result: Result<(), AppError> = direx::scan("./docs").for_each_text(|text| {
//!     if text.is_empty() {
//!         return Err(AppError::EmptyFile);
//!     }
//!     Ok(())
//! });
//! ```
//!
//! # Encodings
//!
//! Text operations decode (and re-encode) through [`encoding_rs`]; pass any
//! of its encodings and pick a [`DecodePolicy`] for malformed input:
//!
//! ```rust,no_run
//! use direx::DecodePolicy;
//!
//! let texts = direx::scan("./legacy")
//!     .pattern("**/*.csv")
//!     .encoding(encoding_rs::WINDOWS_1252)
//!     .decode_policy(DecodePolicy::Replace)
//!     .texts()
//!     .unwrap();
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;
mod mirror;
mod scan;
mod text;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use engine::MATCH_ALL;
pub use error::DirexError;
pub use mirror::{FilePairs, Mirror, TextPairs};
pub use scan::{Files, Scan, Texts};
pub use text::DecodePolicy;

// Callers pass `&'static Encoding` values (UTF_8, WINDOWS_1252, ...) from
// encoding_rs; re-exported so depending on it directly is optional.
pub use encoding_rs::Encoding;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a [`Scan`] over one directory tree.
///
/// The root must exist as a directory when a terminal method is called.
/// Defaults: pattern [`MATCH_ALL`], UTF-8, [`DecodePolicy::Strict`].
///
/// # Example
///
/// ```rust,no_run
/// let files: Vec<_> = direx::scan("./data").files().unwrap().collect();
/// ```
pub fn scan(root: impl Into<std::path::PathBuf>) -> Scan {
    Scan::new(root.into())
}

/// Create a [`Mirror`] from a source tree onto a target tree.
///
/// The source must exist; the target may not exist yet (it is materialized
/// lazily, one parent directory at a time, as pairs are consumed). Neither
/// root may be nested inside the other. Defaults: pattern [`MATCH_ALL`],
/// UTF-8, [`DecodePolicy::Strict`].
///
/// # Example
///
/// ```rust,no_run
/// // Copy a tree, pattern-filtered, structure preserved.
/// direx::mirror("./assets", "./dist/assets")
///     .pattern("**/*.png")
///     .convert_files(|source, target| {
///         std::fs::copy(source, target).map_err(|e| direx::DirexError::Io {
///             path: source.to_path_buf(),
///             source: e,
///         })?;
///         Ok::<(), direx::DirexError>(())
///     })
///     .unwrap();
/// ```
pub fn mirror(
    source: impl Into<std::path::PathBuf>,
    target: impl Into<std::path::PathBuf>,
) -> Mirror {
    Mirror::new(source.into(), target.into())
}
