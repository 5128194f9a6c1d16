//! Pure path helpers shared by the link engine and the config loader.

use std::path::Path;

/// Placeholder token replaced by each template item during expansion.
pub const ITEM_TOKEN: &str = "%{item}";

/// Replace every literal `%{item}` token in `pattern` with `item`.
///
/// The scan runs over `pattern` only: tokens introduced by the item string
/// itself are left as-is rather than expanded again.
///
/// # Examples
///
/// ```
/// use dotlink_cli::paths::substitute;
///
/// assert_eq!(substitute("config/%{item}/init.lua", "nvim"), "config/nvim/init.lua");
/// assert_eq!(substitute("no token here", "nvim"), "no token here");
/// ```
#[must_use]
pub fn substitute(pattern: &str, item: &str) -> String {
    pattern.replace(ITEM_TOKEN, item)
}

/// Render `path` with a leading `~` when it sits under `home`.
///
/// Display-only: the compacted string never feeds back into filesystem
/// calls.
#[must_use]
pub fn compact_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Advisory probe: does the parent directory of `path` exist with write
/// permission bits set?
///
/// A pre-flight check only. The creation call that follows still handles
/// the real error; a `true` here is no guarantee the write will succeed.
#[must_use]
pub fn parent_writable(path: &Path) -> bool {
    path.parent()
        .and_then(|parent| std::fs::metadata(parent).ok())
        .is_some_and(|meta| !meta.permissions().readonly())
}
