//! Resolve file patterns into the list of files to upload
//!
//! Patterns are glob expressions matched with `globset`: `*` and `?` stay
//! within one path component, `**` spans directories. Each pattern walks
//! the directory tree from its literal prefix, skipping dot-entries that the
//! pattern does not name explicitly. A pattern without glob syntax names a
//! single file.

use crate::error::ImportResult;
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Largest file, in bytes, that will be submitted
pub const MAX_FILE_SIZE: u64 = 500_000;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Expand a single pattern into the files it matches, sorted
///
/// A pattern matching nothing yields an empty list.
pub fn expand(pattern: &str) -> ImportResult<Vec<PathBuf>> {
    if !pattern.contains(GLOB_META) {
        let path = PathBuf::from(pattern);
        return Ok(if path.is_file() { vec![path] } else { Vec::new() });
    }

    let (base, rest) = split_literal_prefix(Path::new(pattern));
    let matcher = GlobBuilder::new(&rest.join("/"))
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let walker = Walker {
        base: &base,
        rest: &rest,
        recursive: rest.iter().any(|c| c == "**"),
        matcher: &matcher,
    };
    let mut matches = Vec::new();
    walker.walk(&base, 1, &mut matches);
    matches.sort();

    debug!(pattern, count = matches.len(), "Expanded file pattern");
    Ok(matches)
}

/// Expand every pattern and concatenate the results in pattern order
pub fn expand_all(patterns: &[String]) -> ImportResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        files.extend(expand(pattern)?);
    }
    Ok(files)
}

/// Check whether a file is small enough to submit
///
/// Oversized or unreadable files are excluded with a warning.
pub fn admit(path: &Path, max_size: u64) -> bool {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.len() > max_size => {
            warn!(
                file = %path.display(),
                size = metadata.len(),
                max_size,
                "Skipping file larger than the import limit"
            );
            false
        }
        Ok(_) => true,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping unreadable file");
            false
        }
    }
}

/// Expand the patterns and keep the files that pass the size check
pub fn resolve_files(patterns: &[String], max_size: u64) -> ImportResult<Vec<PathBuf>> {
    let files = expand_all(patterns)?;
    let total = files.len();
    let admitted: Vec<PathBuf> = files.into_iter().filter(|f| admit(f, max_size)).collect();

    debug!(matched = total, admitted = admitted.len(), "Resolved input files");
    Ok(admitted)
}

/// Split a pattern into the directory before the first glob component and
/// the components from there on
fn split_literal_prefix(pattern: &Path) -> (PathBuf, Vec<String>) {
    let mut base = PathBuf::new();
    let mut rest = Vec::new();

    for component in pattern.components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !text.contains(GLOB_META) {
            base.push(component);
        } else if !matches!(component, Component::CurDir) {
            rest.push(text.into_owned());
        }
    }

    (base, rest)
}

/// Directory walk for one pattern, relative to its literal prefix
struct Walker<'a> {
    base: &'a Path,
    rest: &'a [String],
    recursive: bool,
    matcher: &'a GlobMatcher,
}

impl Walker<'_> {
    fn walk(&self, dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
        if !self.recursive && depth > self.rest.len() {
            return;
        }

        let read_from = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        let entries = match std::fs::read_dir(read_from) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') && !self.names_dot_entry(depth) {
                continue;
            }

            let path = dir.join(&name);
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                self.walk(&path, depth + 1, out);
            } else if path.is_file() && self.is_match(&path) {
                out.push(path);
            }
        }
    }

    /// Whether the pattern component at `depth` can name a dot-entry
    ///
    /// Past a `**` the depth is unknown, so any dotted component counts.
    fn names_dot_entry(&self, depth: usize) -> bool {
        match self.rest.iter().position(|c| c == "**") {
            Some(globstar) if depth > globstar => self.rest[globstar + 1..]
                .iter()
                .any(|c| c.starts_with('.')),
            _ => self
                .rest
                .get(depth - 1)
                .is_some_and(|c| c.starts_with('.')),
        }
    }

    fn is_match(&self, path: &Path) -> bool {
        path.strip_prefix(self.base)
            .is_ok_and(|relative| self.matcher.is_match(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, size: usize) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "x".repeat(size)).unwrap();
        path
    }

    fn pattern(dir: &Path, suffix: &str) -> String {
        format!("{}/{}", dir.display(), suffix)
    }

    #[test]
    fn test_star_matches_one_level_sorted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.json", 2);
        write(temp.path(), "a.json", 2);
        write(temp.path(), "notes.txt", 2);
        write(temp.path(), "nested/c.json", 2);

        let files = expand(&pattern(temp.path(), "*.json")).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.json"), temp.path().join("b.json")]
        );
    }

    #[test]
    fn test_double_star_recurses() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.json", 2);
        write(temp.path(), "nested/deeper/c.json", 2);

        let files = expand(&pattern(temp.path(), "**/*.json")).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&temp.path().join("nested/deeper/c.json")));
    }

    #[test]
    fn test_glob_in_directory_component() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "batch-1/users.json", 2);
        write(temp.path(), "batch-2/users.json", 2);
        write(temp.path(), "other/users.json", 2);

        let files = expand(&pattern(temp.path(), "batch-*/users.json")).unwrap();
        assert_eq!(
            files,
            vec![
                temp.path().join("batch-1/users.json"),
                temp.path().join("batch-2/users.json")
            ]
        );
    }

    #[test]
    fn test_dot_files_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".hidden.json", 2);
        write(temp.path(), "visible.json", 2);

        let files = expand(&pattern(temp.path(), "*.json")).unwrap();
        assert_eq!(files, vec![temp.path().join("visible.json")]);
    }

    #[test]
    fn test_dot_name_under_glob_directory() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "batch-1/.users.json", 2);
        write(temp.path(), "batch-1/users.json", 2);
        write(temp.path(), ".batch-2/.users.json", 2);

        let files = expand(&pattern(temp.path(), "batch-*/.users.json")).unwrap();
        assert_eq!(files, vec![temp.path().join("batch-1/.users.json")]);
    }

    #[test]
    fn test_dot_prefixed_glob_component() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".staging/users.json", 2);
        write(temp.path(), "prod/users.json", 2);

        let files = expand(&pattern(temp.path(), ".*/users.json")).unwrap();
        assert_eq!(files, vec![temp.path().join(".staging/users.json")]);
    }

    #[test]
    fn test_dot_name_after_double_star() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a/b/.users.json", 2);
        write(temp.path(), "a/b/users.json", 2);

        let files = expand(&pattern(temp.path(), "**/.users.json")).unwrap();
        assert_eq!(files, vec![temp.path().join("a/b/.users.json")]);
    }

    #[test]
    fn test_current_dir_segments_are_ignored() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "d/u.json", 2);
        let expected = vec![temp.path().join("d/u.json")];

        assert_eq!(expand(&pattern(temp.path(), "./d/*.json")).unwrap(), expected);
        assert_eq!(expand(&pattern(temp.path(), "d/./*.json")).unwrap(), expected);
        assert_eq!(expand(&pattern(temp.path(), "*/./u.json")).unwrap(), expected);
    }

    #[test]
    fn test_no_match_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(expand(&pattern(temp.path(), "*.json")).unwrap().is_empty());
        assert!(expand(&pattern(temp.path(), "missing.json"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_literal_path() {
        let temp = TempDir::new().unwrap();
        let file = write(temp.path(), "users.json", 2);

        assert_eq!(expand(&file.display().to_string()).unwrap(), vec![file]);
        assert!(expand(&temp.path().display().to_string())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = expand("users-[.json");
        assert!(matches!(result, Err(crate::error::ImportError::Config(_))));
    }

    #[test]
    fn test_expand_all_keeps_pattern_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.json", 2);
        write(temp.path(), "z.json", 2);

        let patterns = vec![pattern(temp.path(), "z.json"), pattern(temp.path(), "a.*")];
        let files = expand_all(&patterns).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("z.json"), temp.path().join("a.json")]
        );
    }

    #[test]
    fn test_admit_threshold_is_inclusive() {
        let temp = TempDir::new().unwrap();
        let at_limit = write(temp.path(), "limit.json", 100);
        let over_limit = write(temp.path(), "over.json", 101);

        assert!(admit(&at_limit, 100));
        assert!(!admit(&over_limit, 100));
        assert!(!admit(&temp.path().join("gone.json"), 100));
    }

    #[test]
    fn test_resolve_files_filters_oversized() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "small.json", 10);
        write(temp.path(), "large.json", (MAX_FILE_SIZE + 1) as usize);

        let files = resolve_files(&[pattern(temp.path(), "*.json")], MAX_FILE_SIZE).unwrap();
        assert_eq!(files, vec![temp.path().join("small.json")]);
    }

    #[test]
    fn test_split_literal_prefix() {
        let (base, rest) = split_literal_prefix(Path::new("./data/2026/*.json"));
        assert_eq!(base, PathBuf::from("./data/2026"));
        assert_eq!(rest, vec!["*.json".to_string()]);

        let (base, rest) = split_literal_prefix(Path::new("**/users.json"));
        assert_eq!(base, PathBuf::new());
        assert_eq!(rest, vec!["**".to_string(), "users.json".to_string()]);
    }
}
