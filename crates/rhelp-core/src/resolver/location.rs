//! Location resolution for pre-rendered help pages and help archives.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::InterpreterEnv;
use crate::domain::{
    FileLocation, HelpFile, LIBRARY_SEGMENT, normalize_request_path, split_request_path,
};

/// Directory inside an installed package that holds the help archive pair.
pub const HELP_ARCHIVE_DIR: &str = "help";

/// Ordered list of places a request path may live.
///
/// Search order:
/// 1. The root of the previous page (relative links stay with their page)
/// 2. The interpreter home
/// 3. Every library root, if the request is under `library/`
///
/// Pure function: nothing is checked on disk.
pub fn candidate_locations(
    env: &InterpreterEnv,
    request_path: &str,
    prev_location: Option<&FileLocation>,
) -> Vec<FileLocation> {
    let normalized = normalize_request_path(request_path);
    let split = split_request_path(&normalized);
    let rel_path = split.request_dirname;
    let file_name = split.request_filename;

    let mut locations = Vec::new();

    if let Some(prev) = prev_location {
        locations.push(FileLocation::new(
            prev.trunc_path.clone(),
            rel_path.clone(),
            file_name.clone(),
        ));
    }

    if let Some(home) = env.home_path() {
        locations.push(FileLocation::new(home, rel_path.clone(), file_name.clone()));
    }

    let mut parts = rel_path.split('/');
    if parts.next() == Some(LIBRARY_SEGMENT) {
        let lib_rel_path = parts.collect::<Vec<_>>().join("/");
        for lib_path in env.lib_paths() {
            locations.push(FileLocation::new(
                lib_path.clone(),
                lib_rel_path.clone(),
                file_name.clone(),
            ));
        }
    }

    locations
}

/// Find a pre-rendered file for `request_path` and read it.
///
/// Returns the first candidate that exists as a regular file. Candidates
/// that exist but cannot be read are logged and skipped.
pub fn resolve_real(
    env: &InterpreterEnv,
    request_path: &str,
    prev_location: Option<&FileLocation>,
) -> Option<HelpFile> {
    debug!(request_path, "Looking for a pre-rendered help file");

    if split_request_path(request_path).request_filename.is_empty() {
        return None;
    }

    for location in candidate_locations(env, request_path, prev_location) {
        let full_path = location.full_path();
        if !full_path.is_file() {
            continue;
        }

        match std::fs::read(&full_path) {
            Ok(bytes) => {
                debug!(path = %full_path.display(), "Found pre-rendered help file");
                let html = String::from_utf8_lossy(&bytes).into_owned();
                let normalized = normalize_request_path(request_path);
                return Some(HelpFile::from_real_file(&normalized, html, location));
            }
            Err(e) => {
                warn!(path = %full_path.display(), error = %e, "Skipping unreadable help file");
            }
        }
    }

    None
}

/// A library root holding a package's compressed help archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLocation {
    /// The library root.
    pub lib_path: PathBuf,
    /// `<lib_path>/<package>/help`, the directory with the archive pair.
    pub help_dir: PathBuf,
}

/// Whether `help_dir` holds both `<package>.rdb` and `<package>.rdx`.
pub fn has_archive_pair(help_dir: &Path, package: &str) -> bool {
    let rdb = help_dir.join(format!("{package}.rdb"));
    let rdx = help_dir.join(format!("{package}.rdx"));
    rdb.is_file() && rdx.is_file()
}

/// Library roots (in priority order) that hold a complete archive pair for
/// `package`.
pub fn archive_locations(env: &InterpreterEnv, package: &str) -> Vec<ArchiveLocation> {
    env.lib_paths()
        .iter()
        .filter_map(|lib_path| {
            let help_dir = lib_path.join(package).join(HELP_ARCHIVE_DIR);
            has_archive_pair(&help_dir, package).then(|| ArchiveLocation {
                lib_path: lib_path.clone(),
                help_dir,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env_with(home: Option<&Path>, libs: &[&Path]) -> InterpreterEnv {
        InterpreterEnv::new(
            home.map(Path::to_path_buf),
            libs.iter().map(|p| p.to_path_buf()).collect(),
        )
        .unwrap()
    }

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_candidate_order_prev_home_then_libraries() {
        let env = env_with(
            Some(Path::new("/opt/R")),
            &[Path::new("/user/lib"), Path::new("/system/lib")],
        );
        let prev = FileLocation::new("/prev/root", "stats/html", "lm.html");

        let candidates = candidate_locations(&env, "library/utils/html/help.html", Some(&prev));
        let roots: Vec<_> = candidates.iter().map(|c| c.trunc_path.clone()).collect();

        assert_eq!(
            roots,
            vec![
                PathBuf::from("/prev/root"),
                PathBuf::from("/opt/R"),
                PathBuf::from("/user/lib"),
                PathBuf::from("/system/lib"),
            ]
        );
        assert_eq!(candidates[0].rel_path, "library/utils/html");
        assert_eq!(candidates[2].rel_path, "utils/html");
        assert_eq!(candidates[3].file_name, "help.html");
    }

    #[test]
    fn test_non_library_paths_skip_library_roots() {
        let env = env_with(Some(Path::new("/opt/R")), &[Path::new("/user/lib")]);
        let candidates = candidate_locations(&env, "doc/html/index.html", None);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].trunc_path, PathBuf::from("/opt/R"));
        assert_eq!(candidates[0].rel_path, "doc/html");
    }

    #[test]
    fn test_candidates_fold_relative_segments() {
        let env = env_with(None, &[Path::new("/user/lib")]);
        let candidates =
            candidate_locations(&env, "/library/stats/html/../../utils/html/help.html", None);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rel_path, "utils/html");
    }

    #[test]
    fn test_resolve_real_reads_library_file() {
        let lib = TempDir::new().unwrap();
        write_file(&lib.path().join("pkg/html/fn.html"), "<h1>fn</h1>");
        let env = env_with(None, &[lib.path()]);

        let file = resolve_real(&env, "library/pkg/html/fn.html", None).unwrap();
        assert!(file.is_real_file);
        assert_eq!(file.html, "<h1>fn</h1>");
        assert_eq!(file.request_dirname, "library/pkg/html");
        let location = file.file_location.unwrap();
        assert_eq!(location.trunc_path, lib.path());
    }

    #[test]
    fn test_resolve_real_first_library_wins() {
        let user = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        write_file(&user.path().join("pkg/html/fn.html"), "user");
        write_file(&system.path().join("pkg/html/fn.html"), "system");
        let env = env_with(None, &[user.path(), system.path()]);

        let file = resolve_real(&env, "library/pkg/html/fn.html", None).unwrap();
        assert_eq!(file.html, "user");
    }

    #[test]
    fn test_resolve_real_prefers_previous_root() {
        let user = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        write_file(&user.path().join("pkg/html/fn.html"), "user");
        write_file(&other.path().join("library/pkg/html/fn.html"), "previous");
        let env = env_with(None, &[user.path()]);
        let prev = FileLocation::new(other.path(), "library/pkg/html", "other.html");

        let file = resolve_real(&env, "library/pkg/html/fn.html", Some(&prev)).unwrap();
        assert_eq!(file.html, "previous");
        assert_eq!(file.file_location.unwrap().trunc_path, other.path());
    }

    #[test]
    fn test_resolve_real_finds_doc_pages_under_home() {
        let home = TempDir::new().unwrap();
        let lib = TempDir::new().unwrap();
        write_file(&home.path().join("doc/html/index.html"), "index");
        let env = env_with(Some(home.path()), &[lib.path()]);

        let file = resolve_real(&env, "doc/html/index.html", None).unwrap();
        assert_eq!(file.html, "index");
    }

    #[test]
    fn test_resolve_real_misses() {
        let lib = TempDir::new().unwrap();
        fs::create_dir_all(lib.path().join("pkg/html/fn.html")).unwrap();
        let env = env_with(None, &[lib.path()]);

        // A directory with the right name is not a help file
        assert!(resolve_real(&env, "library/pkg/html/fn.html", None).is_none());
        assert!(resolve_real(&env, "library/pkg/html/other.html", None).is_none());
        assert!(resolve_real(&env, "library/pkg/html/", None).is_none());
    }

    #[test]
    fn test_archive_pair_needs_both_files() {
        let lib = TempDir::new().unwrap();
        let help_dir = lib.path().join("pkg/help");
        write_file(&help_dir.join("pkg.rdb"), "");
        assert!(!has_archive_pair(&help_dir, "pkg"));

        write_file(&help_dir.join("pkg.rdx"), "");
        assert!(has_archive_pair(&help_dir, "pkg"));
    }

    #[test]
    fn test_archive_locations_in_library_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let third = TempDir::new().unwrap();
        for lib in [&first, &third] {
            write_file(&lib.path().join("pkg/help/pkg.rdb"), "");
            write_file(&lib.path().join("pkg/help/pkg.rdx"), "");
        }
        let env = env_with(None, &[first.path(), second.path(), third.path()]);

        let found = archive_locations(&env, "pkg");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].lib_path, first.path());
        assert_eq!(found[0].help_dir, first.path().join("pkg/help"));
        assert_eq!(found[1].lib_path, third.path());
    }
}
