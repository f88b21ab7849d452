use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute against `base` and resolves `.` and `..` lexically.
///
/// Symlinks are not followed and the path does not need to exist. A `..`
/// that would climb above the filesystem root is dropped.
pub fn clean_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    cleaned.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    cleaned.pop();
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Like [`clean_path`], resolving relative paths against the process working directory.
pub fn clean_path_from_cwd(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean_path(path, Path::new("/")));
    }
    let cwd = std::env::current_dir()?;
    Ok(clean_path(path, &cwd))
}

/// Renders a repository-relative path the way git pathspecs expect it.
pub fn to_pathspec(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
