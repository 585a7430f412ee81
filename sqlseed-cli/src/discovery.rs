//! Finding input files on disk.

use std::path::{Path, PathBuf};

use crate::error::CliError;
use crate::settings::ScriptSettings;

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn collect_recursive(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) -> Result<(), CliError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, extension, out)?;
        } else if has_extension(&path, extension) {
            out.push(path);
        }
    }
    Ok(())
}

fn under_dir(path: &Path, root: &Path, dir_name: &str) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .parent()
        .is_some_and(|parent| {
            parent
                .components()
                .any(|c| c.as_os_str().to_string_lossy().eq_ignore_ascii_case(dir_name))
        })
}

/// All `.sql` files under `root` in run order: scripts inside a
/// `first_dir` directory (e.g. `Security`) first, then the rest, each group
/// in path order. Excluded file names are dropped.
pub(crate) fn discover_scripts(
    root: &Path,
    settings: &ScriptSettings,
) -> Result<Vec<PathBuf>, CliError> {
    if !root.is_dir() {
        return Err(CliError::config(format!(
            "script directory not found: {}",
            root.display()
        )));
    }

    let mut found = Vec::new();
    collect_recursive(root, "sql", &mut found)?;

    let (mut first, mut rest): (Vec<PathBuf>, Vec<PathBuf>) = found
        .into_iter()
        .filter(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let excluded = settings
                .excluded
                .iter()
                .any(|e| e.eq_ignore_ascii_case(&name));
            if excluded {
                log::debug!("Excluding {}", path.display());
            }
            !excluded
        })
        .partition(|path| under_dir(path, root, &settings.first_dir));

    first.sort();
    rest.sort();
    first.append(&mut rest);
    Ok(first)
}

/// Directories directly inside `root`, by name.
pub(crate) fn subdirectories(root: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !root.is_dir() {
        return Err(CliError::config(format!(
            "script directory not found: {}",
            root.display()
        )));
    }

    let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// The `.csv` files directly inside `dir`, by file name.
pub(crate) fn discover_csv(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::config(format!(
            "CSV directory not found: {}",
            dir.display()
        )));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_extension(p, "csv"))
        .collect();
    files.sort();
    Ok(files)
}

/// `path` relative to `base` for display, or as-is when unrelated.
pub(crate) fn display_path(path: &Path, base: &Path) -> String {
    pathdiff::diff_paths(path, base)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
#[path = "tests/discovery_tests.rs"]
mod tests;
