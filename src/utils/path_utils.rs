// src/utils/path_utils.rs
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Locate `command` the way a shell would: verbatim when it contains a path
/// separator, otherwise by walking `PATH`.
pub fn find_executable(command: &str) -> Option<PathBuf> {
    if command.contains('/') || command.contains(std::path::MAIN_SEPARATOR) {
        let path = Path::new(command);
        if is_executable(path) {
            return Some(path.to_path_buf());
        }
        return None;
    }

    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        for candidate in candidates(&dir, command) {
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(windows)]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT;.COM".to_string());
    let mut out = vec![dir.join(command)];
    out.extend(exts.split(';').filter(|e| !e.is_empty()).map(|ext| dir.join(format!("{}{}", command, ext))));
    out
}

#[cfg(not(windows))]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    vec![dir.join(command)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_none() {
        assert!(find_executable("voxcmd-definitely-not-installed-helper").is_none());
        assert!(find_executable("/nonexistent/dir/helper").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_finds_sh_on_path() {
        assert!(find_executable("sh").is_some());
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = env::temp_dir();
        assert_eq!(resolve(&base, Path::new("a.txt")), base.join("a.txt"));
        let abs = base.join("b.txt");
        assert_eq!(resolve(Path::new("/elsewhere"), &abs), abs);
    }
}
