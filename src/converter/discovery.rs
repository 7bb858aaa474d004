//! Bundle discovery by glob pattern.
//!
//! Absolute patterns are anchored at their filesystem root; relative patterns
//! at the working directory. Matches are produced lazily.

use crate::error::{CliError, Result};
use std::path::{Component, Path, PathBuf};

/// Default pattern: every `.aab` below the working directory.
pub const DEFAULT_PATTERN: &str = "**/*.aab";

/// Lazy sequence of bundle files matching a pattern.
///
/// Walks the filesystem as it is consumed and cannot be restarted.
pub struct Discovery {
    paths: glob::Paths,
}

impl std::fmt::Debug for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery").finish_non_exhaustive()
    }
}

impl Iterator for Discovery {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        for entry in self.paths.by_ref() {
            match entry {
                Ok(path) if path.is_file() => return Some(path),
                Ok(path) => log::debug!("Skipping non-file match {}", path.display()),
                Err(e) => log::warn!("Skipping unreadable path {}: {}", e.path().display(), e),
            }
        }
        None
    }
}

/// Split `pattern` into the directory matching starts from and the remainder.
///
/// For `/srv/builds/**/*.aab` this is (`/`, `srv/builds/**/*.aab`); for a
/// relative pattern the anchor is `cwd` and the remainder is the pattern.
pub fn split_pattern(pattern: &str, cwd: &Path) -> (PathBuf, String) {
    let path = Path::new(pattern);
    if !path.is_absolute() {
        return (cwd.to_path_buf(), pattern.to_string());
    }

    let mut anchor = PathBuf::new();
    let mut rest = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            other => rest.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    (anchor, rest.join("/"))
}

/// Start discovering files that match `pattern`, resolved against `cwd`.
///
/// The anchor is escaped so metacharacters in directory names match
/// literally; only the remainder is treated as a glob.
pub fn discover(pattern: &str, cwd: &Path) -> Result<Discovery> {
    let (anchor, remainder) = split_pattern(pattern, cwd);

    let anchor_str = anchor.to_str().ok_or_else(|| CliError::InvalidArguments {
        reason: format!("Directory is not valid UTF-8: {}", anchor.display()),
    })?;
    let escaped = PathBuf::from(glob::Pattern::escape(anchor_str));
    let full = escaped.join(&remainder);
    let full = full.to_string_lossy();

    log::debug!(
        "Matching {:?} from {} ({})",
        remainder,
        anchor.display(),
        full
    );

    let paths = glob::glob(&full).map_err(|e| CliError::InvalidArguments {
        reason: format!("Invalid pattern {pattern:?}: {e}"),
    })?;

    Ok(Discovery { paths })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"bundle").unwrap();
    }

    #[test]
    fn relative_pattern_is_anchored_at_cwd() {
        let (anchor, rest) = split_pattern("**/*.aab", Path::new("/work"));
        assert_eq!(anchor, PathBuf::from("/work"));
        assert_eq!(rest, "**/*.aab");
    }

    #[cfg(unix)]
    #[test]
    fn absolute_pattern_is_anchored_at_root() {
        let (anchor, rest) = split_pattern("/srv/builds/**/*.aab", Path::new("/work"));
        assert_eq!(anchor, PathBuf::from("/"));
        assert_eq!(rest, "srv/builds/**/*.aab");
    }

    #[test]
    fn default_pattern_finds_nested_bundles() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("app.aab"));
        touch(&dir.path().join("nested/deep/wear.aab"));
        touch(&dir.path().join("nested/notes.txt"));

        let mut found: Vec<_> = discover(DEFAULT_PATTERN, dir.path()).unwrap().collect();
        found.sort();
        assert_eq!(
            found,
            [
                dir.path().join("app.aab"),
                dir.path().join("nested/deep/wear.aab"),
            ]
        );
    }

    #[test]
    fn absolute_and_relative_forms_match_the_same_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("out/app.aab"));
        let elsewhere = tempfile::tempdir().unwrap();

        let relative: Vec<_> = discover("out/*.aab", dir.path()).unwrap().collect();
        let absolute_pattern = format!("{}/out/*.aab", dir.path().display());
        let absolute: Vec<_> = discover(&absolute_pattern, elsewhere.path())
            .unwrap()
            .collect();

        assert_eq!(relative, [dir.path().join("out/app.aab")]);
        assert_eq!(absolute, relative);

        // The same relative remainder resolved elsewhere finds nothing.
        assert_eq!(discover("out/*.aab", elsewhere.path()).unwrap().count(), 0);
    }

    #[test]
    fn directories_are_not_yielded() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("odd.aab")).unwrap();
        assert_eq!(discover("*.aab", dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn metacharacters_in_cwd_are_literal() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().join("[release]");
        touch(&cwd.join("app.aab"));

        let found: Vec<_> = discover("*.aab", &cwd).unwrap().collect();
        assert_eq!(found, [cwd.join("app.aab")]);
    }

    #[test]
    fn invalid_pattern_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover("***.aab", dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
