use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::engine::{ensure_dir, snapshot, MATCH_ALL};
use crate::error::DirexError;
use crate::text::{read_text, DecodePolicy};

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Entry point for enumerating one directory tree.
///
/// Created via `direx::scan()`. Configure with chained
/// builder methods, then call a terminal — [`files()`](Scan::files),
/// [`texts()`](Scan::texts), [`for_each_file()`](Scan::for_each_file), or
/// [`for_each_text()`](Scan::for_each_text).
///
/// # Example
///
/// ```rust,no_run
/// let mut names = Vec::new();
/// direx::scan("./data")
///     .pattern("**/*.csv")
///     .for_each_file(|path| {
///         names.push(path.to_path_buf());
///         Ok::<(), direx::DirexError>(())
///     })
///     .unwrap();
/// ```
pub struct Scan {
    root: PathBuf,
    pattern: String,
    encoding: &'static Encoding,
    policy: DecodePolicy,
}

impl Scan {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            pattern: MATCH_ALL.to_string(),
            encoding: UTF_8,
            policy: DecodePolicy::default(),
        }
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Glob pattern matched against each path relative to the root.
    ///
    /// `*` and `?` match within one path segment, `**` matches across
    /// segments. Defaults to [`MATCH_ALL`] (`**/*`) — every file at any
    /// depth.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Character encoding used to decode file contents. Defaults to UTF-8.
    ///
    /// Takes any [`encoding_rs`] encoding, e.g. `encoding_rs::WINDOWS_1252`.
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// What to do when decoding fails. Defaults to [`DecodePolicy::Strict`].
    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    // ── Enumerate ─────────────────────────────────────────────────────────

    /// Snapshot the tree and return the matching file paths as a lazy
    /// sequence.
    ///
    /// The glob is evaluated once, here — files created or deleted while
    /// the sequence is being consumed do not change what it yields.
    /// Directories and broken links matched by the pattern are silently
    /// filtered. The order is deterministic: depth-first with each
    /// directory's entries sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the root is invalid ([`DirexError::InvalidDirectory`],
    /// [`DirexError::DirectoryNotFound`], [`DirexError::NotADirectory`]),
    /// the pattern does not compile, or the walk itself fails.
    pub fn files(self) -> Result<Files, DirexError> {
        let root = ensure_dir(&self.root, true)?;
        let paths = snapshot(&root, &self.pattern)?;
        Ok(Files {
            inner: paths.into_iter(),
        })
    }

    /// Like [`files()`](Scan::files), but yields each file's decoded text
    /// instead of its path, in the same order.
    ///
    /// Decode failures surface at the offending file's position in the
    /// sequence, per the configured [`DecodePolicy`].
    ///
    /// # Errors
    ///
    /// Same as [`files()`](Scan::files).
    pub fn texts(self) -> Result<Texts, DirexError> {
        let encoding = self.encoding;
        let policy = self.policy;
        let files = self.files()?;
        Ok(Texts {
            files,
            encoding,
            policy,
        })
    }

    // ── Drive ─────────────────────────────────────────────────────────────

    /// Invoke `function` once per matched file path.
    ///
    /// An error returned by the function propagates unmodified and halts
    /// iteration — no file after the failing one is visited.
    ///
    /// # Errors
    ///
    /// Everything [`files()`](Scan::files) can return (converted into `E`),
    /// plus whatever the function itself returns.
    pub fn for_each_file<F, E>(self, mut function: F) -> Result<(), E>
    where
        F: FnMut(&Path) -> Result<(), E>,
        E: From<DirexError>,
    {
        for path in self.files()? {
            function(&path)?;
        }
        Ok(())
    }

    /// Invoke `function` once per matched file's decoded text.
    ///
    /// Same fail-fast contract as [`for_each_file()`](Scan::for_each_file).
    ///
    /// # Errors
    ///
    /// Everything [`texts()`](Scan::texts) can return (converted into `E`),
    /// plus whatever the function itself returns.
    pub fn for_each_text<F, E>(self, mut function: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
        E: From<DirexError>,
    {
        for text in self.texts()? {
            function(&text?)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Lazy sequence of file paths from one snapshot.
///
/// Created by [`Scan::files`]. One-shot — build a new [`Scan`] to traverse
/// again (each build re-validates and re-snapshots).
#[derive(Debug)]
pub struct Files {
    inner: std::vec::IntoIter<PathBuf>,
}

impl Iterator for Files {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Files {}

// ---------------------------------------------------------------------------
// Texts
// ---------------------------------------------------------------------------

/// Lazy sequence of decoded file contents from one snapshot.
///
/// Created by [`Scan::texts`]. Each file is read and decoded when its turn
/// comes, so a decode failure is an `Err` item at that position rather than
/// an upfront error.
#[derive(Debug)]
pub struct Texts {
    files: Files,
    encoding: &'static Encoding,
    policy: DecodePolicy,
}

impl Iterator for Texts {
    type Item = Result<String, DirexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        Some(read_text(&path, self.encoding, self.policy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}
