use std::fs;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::DirexError;

/// What to do when a file's bytes are not valid text under the active
/// encoding (or, when writing, when the text has no representation in it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Fail with [`DirexError::Decode`] naming the offending file.
    #[default]
    Strict,
    /// Substitute the replacement character and keep going.
    Replace,
}

/// Read `path` and decode its contents under `encoding`.
pub(crate) fn read_text(
    path: &Path,
    encoding: &'static Encoding,
    policy: DecodePolicy,
) -> Result<String, DirexError> {
    let bytes = fs::read(path).map_err(|e| DirexError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (text, _, malformed) = encoding.decode(&bytes);
    if malformed && policy == DecodePolicy::Strict {
        return Err(DirexError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }
    Ok(text.into_owned())
}

/// Encode `text` under `encoding` and write it to `path`.
pub(crate) fn write_text(
    path: &Path,
    text: &str,
    encoding: &'static Encoding,
    policy: DecodePolicy,
) -> Result<(), DirexError> {
    let (bytes, _, unmappable) = encoding.encode(text);
    if unmappable && policy == DecodePolicy::Strict {
        return Err(DirexError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }
    fs::write(path, &bytes).map_err(|e| DirexError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
