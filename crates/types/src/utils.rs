//! Utility functions and helpers

use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Join `segments` onto `base` and normalise the result lexically.
///
/// Absolute segments replace everything before them, `.` and `..` are
/// collapsed, and `..` never climbs above the root. No filesystem access.
pub fn resolve_path<I, S>(base: &Path, segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = base.to_path_buf();
    for segment in segments {
        joined.push(segment);
    }
    joined.clean()
}

/// Parent directory of `path`, with `/` as its own parent
pub fn parent_dir(path: &Path) -> PathBuf {
    resolve_path(path, [".."])
}

/// Make `path` absolute against the process working directory and normalise it
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    Ok(std::path::absolute(path)?.clean())
}

/// Whether an import specifier is relative (`./x`, `../x`, `.`, `..`)
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Walk from `start` up to the filesystem root, yielding each directory
pub fn ancestors_of(start: &Path) -> impl Iterator<Item = &Path> {
    start.ancestors().filter(|dir| !dir.as_os_str().is_empty())
}
