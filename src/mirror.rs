use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::engine::{ensure_dir, snapshot, MATCH_ALL};
use crate::error::DirexError;
use crate::text::{read_text, write_text, DecodePolicy};

// ---------------------------------------------------------------------------
// Mirror
// ---------------------------------------------------------------------------

/// Entry point for mirroring one directory tree into another.
///
/// Created via `direx::mirror()`. Every matched file under
/// the source is paired with the path at the same relative location under
/// the target, and target parent directories are created on demand as pairs
/// are consumed. Configure with chained builder methods, then call a
/// terminal — [`file_pairs()`](Mirror::file_pairs),
/// [`text_pairs()`](Mirror::text_pairs),
/// [`convert_files()`](Mirror::convert_files), or
/// [`convert_texts()`](Mirror::convert_texts).
///
/// # Example
///
/// ```rust,no_run
/// // Uppercase every .txt file into a parallel tree.
/// direx::mirror("./notes", "./notes_upper")
///     .pattern("**/*.txt")
///     .convert_texts(|text| Ok::<_, direx::DirexError>(text.to_uppercase()))
///     .unwrap();
/// ```
pub struct Mirror {
    source: PathBuf,
    target: PathBuf,
    pattern: String,
    encoding: &'static Encoding,
    policy: DecodePolicy,
}

impl Mirror {
    pub(crate) fn new(source: PathBuf, target: PathBuf) -> Self {
        Self {
            source,
            target,
            pattern: MATCH_ALL.to_string(),
            encoding: UTF_8,
            policy: DecodePolicy::default(),
        }
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Glob pattern matched against each path relative to the source root.
    ///
    /// `*` and `?` match within one path segment, `**` matches across
    /// segments. Defaults to [`MATCH_ALL`] (`**/*`) — every file at any
    /// depth.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Character encoding used to decode source text and encode converted
    /// text. Defaults to UTF-8.
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// What to do when decoding (or strict re-encoding) fails. Defaults to
    /// [`DecodePolicy::Strict`].
    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    // ── Enumerate ─────────────────────────────────────────────────────────

    /// Snapshot the source tree and return `(source, target)` file pairs as
    /// a lazy sequence.
    ///
    /// The source must exist; the target may not exist yet but must not
    /// exist as a file. Each pair's target parent directory is guaranteed
    /// to exist by the time the pair is yielded — created on first
    /// encounter, once per distinct parent. Consuming nothing creates
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either directory argument is invalid, if one root
    /// is nested inside the other ([`DirexError::InvalidDirectory`]), if
    /// the pattern does not compile, or if the walk fails.
    pub fn file_pairs(self) -> Result<FilePairs, DirexError> {
        let source = ensure_dir(&self.source, true)?;
        let target = ensure_dir(&self.target, false)?;
        ensure_disjoint(&source, &target)?;
        let paths = snapshot(&source, &self.pattern)?;
        Ok(FilePairs {
            source,
            target,
            inner: paths.into_iter(),
            made: HashSet::new(),
        })
    }

    /// Like [`file_pairs()`](Mirror::file_pairs), but yields each source
    /// file's decoded text alongside its target path.
    ///
    /// # Errors
    ///
    /// Same as [`file_pairs()`](Mirror::file_pairs).
    pub fn text_pairs(self) -> Result<TextPairs, DirexError> {
        let encoding = self.encoding;
        let policy = self.policy;
        let pairs = self.file_pairs()?;
        Ok(TextPairs {
            pairs,
            encoding,
            policy,
        })
    }

    // ── Drive ─────────────────────────────────────────────────────────────

    /// Invoke `function(source, target)` once per file pair.
    ///
    /// The function is responsible for producing the target file itself —
    /// by copying, transforming, or anything else. The library only
    /// guarantees the target's parent directory exists. An error returned
    /// by the function propagates unmodified and halts iteration.
    ///
    /// # Errors
    ///
    /// Everything [`file_pairs()`](Mirror::file_pairs) can return
    /// (converted into `E`), plus whatever the function itself returns.
    pub fn convert_files<F, E>(self, mut function: F) -> Result<(), E>
    where
        F: FnMut(&Path, &Path) -> Result<(), E>,
        E: From<DirexError>,
    {
        for pair in self.file_pairs()? {
            let (source, target) = pair?;
            function(&source, &target)?;
        }
        Ok(())
    }

    /// Invoke `function` on each source file's decoded text and write its
    /// return value to the paired target path.
    ///
    /// Unlike [`convert_files()`](Mirror::convert_files), the write is
    /// performed by the library, using the configured encoding. Fail-fast:
    /// the first error — decode, function, or write — halts iteration.
    ///
    /// # Errors
    ///
    /// Everything [`text_pairs()`](Mirror::text_pairs) can return
    /// (converted into `E`), whatever the function itself returns, and
    /// write failures ([`DirexError::Io`], or [`DirexError::Decode`] for
    /// strictly unmappable output).
    pub fn convert_texts<F, E>(self, mut function: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<String, E>,
        E: From<DirexError>,
    {
        let encoding = self.encoding;
        let policy = self.policy;
        for item in self.text_pairs()? {
            let (text, target) = item?;
            let converted = function(&text)?;
            write_text(&target, &converted, encoding, policy)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Containment check
// ---------------------------------------------------------------------------

/// Reject mirror roots nested one inside the other.
///
/// Compared per path component on absolute, lexically-normalized paths — a
/// string prefix test would call `/a/bb` a child of `/a/b`. Equal roots are
/// not nested and pass.
fn ensure_disjoint(source: &Path, target: &Path) -> Result<(), DirexError> {
    let source_abs = normalize(source)?;
    let target_abs = normalize(target)?;
    if source_abs != target_abs
        && (source_abs.starts_with(&target_abs) || target_abs.starts_with(&source_abs))
    {
        return Err(DirexError::InvalidDirectory(target.to_path_buf()));
    }
    Ok(())
}

/// Absolutize against the current directory and fold away `.` and `..`
/// components, without touching the filesystem (the target may not exist
/// yet).
fn normalize(path: &Path) -> Result<PathBuf, DirexError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| DirexError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

// ---------------------------------------------------------------------------
// FilePairs
// ---------------------------------------------------------------------------

/// Lazy sequence of `(source, target)` file pairs from one snapshot.
///
/// Created by [`Mirror::file_pairs`]. Target parent directories are created
/// as a side effect of iteration, each at most once per distinct parent —
/// with thousands of files sharing a directory the filesystem sees one
/// creation call, not thousands. Abandoning the iterator early leaves the
/// remaining parents uncreated, which is a well-defined partial state.
#[derive(Debug)]
pub struct FilePairs {
    source: PathBuf,
    target: PathBuf,
    inner: std::vec::IntoIter<PathBuf>,
    made: HashSet<PathBuf>,
}

impl Iterator for FilePairs {
    type Item = Result<(PathBuf, PathBuf), DirexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let source_file = self.inner.next()?;

            // Snapshot paths always sit under the source root
            let Ok(relative) = source_file.strip_prefix(&self.source) else {
                continue;
            };
            let target_file = self.target.join(relative);

            if let Some(parent) = target_file.parent() {
                if !self.made.contains(parent) {
                    if let Err(e) = fs::create_dir_all(parent) {
                        return Some(Err(DirexError::Io {
                            path: parent.to_path_buf(),
                            source: e,
                        }));
                    }
                    log::trace!("created target parent {}", parent.display());
                    self.made.insert(parent.to_path_buf());
                }
            }

            return Some(Ok((source_file, target_file)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.inner.len()))
    }
}

// ---------------------------------------------------------------------------
// TextPairs
// ---------------------------------------------------------------------------

/// Lazy sequence of `(source text, target path)` pairs from one snapshot.
///
/// Created by [`Mirror::text_pairs`]. Each source file is read and decoded
/// when its turn comes; the pairing side effects are those of
/// [`FilePairs`].
#[derive(Debug)]
pub struct TextPairs {
    pairs: FilePairs,
    encoding: &'static Encoding,
    policy: DecodePolicy,
}

impl Iterator for TextPairs {
    type Item = Result<(String, PathBuf), DirexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.pairs.next()?;
        Some(pair.and_then(|(source, target)| {
            let text = read_text(&source, self.encoding, self.policy)?;
            Ok((text, target))
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

// ---------------------------------------------------------------------------
// Unit tests — normalize() is private and unreachable from tests/
// ---------------------------------------------------------------------------
