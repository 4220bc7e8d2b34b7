//! Common utility functions shared across the codebase.

use std::path::Path;

/// Derives the module name of a scanned directory from its basename.
///
/// Characters outside `[A-Za-z0-9_-]` are removed, so a directory named
/// `@tm-shared` produces the module name `tm-shared`. The module name is
/// used both for locale file names and as the seed for a derived
/// namespace rule value.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use locgrub::utils::module_name;
///
/// assert_eq!(module_name(Path::new("/app/src/modules/tm-shared")), "tm-shared");
/// assert_eq!(module_name(Path::new("src/@scope")), "scope");
/// assert_eq!(module_name(Path::new("plain")), "plain");
/// ```
pub fn module_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
