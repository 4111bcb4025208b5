//! Shared fixtures: fake R executables and a fake R installation.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable shell script named `R` into `dir`.
pub fn fake_r(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("R");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create `<lib>/<package>/help/<package>.rdb` and `.rdx`.
pub fn archive_pair(lib: &Path, package: &str) -> PathBuf {
    let help_dir = lib.join(package).join("help");
    write_file(&help_dir.join(format!("{package}.rdb")), "");
    write_file(&help_dir.join(format!("{package}.rdx")), "");
    help_dir
}
