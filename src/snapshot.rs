// Snapshot loading from disk
//
// The only filesystem-touching module. It builds an immutable Snapshot for
// the pipeline; everything downstream works on already-loaded content.

use crate::error::{Error, Result};
use crate::model::{Snapshot, SourceFile};
use log::info;
use std::path::Path;
use walkdir::WalkDir;

/// Load a snapshot from a directory tree.
///
/// Files whose bytes do not decode as UTF-8 are kept with the binary
/// marker rather than dropped, so statistics still see them. Paths are
/// stored relative to `root` with `/` separators on every platform.
pub fn load(root: &Path, exclude: &[String]) -> Result<Snapshot> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }

    let mut snapshot = Snapshot::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");

        if is_excluded(&relative, exclude) {
            continue;
        }

        let bytes = std::fs::read(entry.path())?;
        let size_bytes = bytes.len() as u64;
        let file = match String::from_utf8(bytes) {
            Ok(text) => SourceFile {
                content: crate::model::FileContent::Text(text),
                size_bytes,
            },
            Err(_) => {
                info!("loaded {relative} as binary");
                SourceFile::binary(size_bytes)
            }
        };
        snapshot.insert(relative, file);
    }

    Ok(snapshot)
}

/// Substring match against the relative path
fn is_excluded(relative: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|pattern| relative.contains(pattern))
}
