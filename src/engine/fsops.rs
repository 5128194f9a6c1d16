//! Filesystem primitives for the link engine.
//!
//! Thin wrappers over `std::fs` that keep the platform conditionals out of
//! the decision procedure. Errors stay as [`std::io::Error`] so the engine
//! can classify them itself.

use std::io;
use std::path::Path;

/// True when `path` names a symlink whose target does not resolve.
pub(super) fn is_broken_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
        && !path.exists()
}

/// True when `a` and `b` resolve to the same filesystem object, following
/// symlinks on both sides.
#[cfg(unix)]
pub(super) fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt as _;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(meta_a), Ok(meta_b)) => meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino(),
        _ => false,
    }
}

/// True when `a` and `b` resolve to the same filesystem object.
#[cfg(not(unix))]
pub(super) fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(canon_a), Ok(canon_b)) => canon_a == canon_b,
        _ => false,
    }
}

/// Create a symlink at `dest` pointing to `source`.
///
/// `directory` selects the directory-flavored call on Windows; on Unix a
/// symlink is a symlink.
pub(super) fn create_symlink(source: &Path, dest: &Path, directory: bool) -> io::Result<()> {
    #[cfg(unix)]
    {
        let _ = directory;
        std::os::unix::fs::symlink(source, dest)
    }
    #[cfg(windows)]
    {
        if directory {
            std::os::windows::fs::symlink_dir(source, dest)
        } else {
            std::os::windows::fs::symlink_file(source, dest)
        }
    }
}

/// Remove the symlink at `path`.
///
/// Windows wants directory symlinks removed with `remove_dir`, and
/// `symlink_metadata().is_dir()` is `false` for them, so the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit decides there.
pub(super) fn remove_symlink(path: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt as _;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
