use std::path::{Path, PathBuf};

use crate::core::error::{EvalError, Result};

/// List the regular files directly inside `dir`, sorted by file name.
///
/// Hidden and git-ignored files are included; subdirectories are not entered.
pub fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(EvalError::FileNotFound(dir.display().to_string()));
    }
    if !dir.is_dir() {
        return Err(EvalError::InvalidArgument(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    let mut builder = ignore::WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        let entry_path = entry.path();
        if entry_path.is_file() {
            files.push(entry_path.to_path_buf());
        }
    }

    Ok(files)
}

/// File name of a path as UTF-8, if it has one
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}
