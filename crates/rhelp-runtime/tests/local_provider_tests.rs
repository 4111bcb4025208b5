//! Local provider against a fake `R` executable.
//!
//! The fake R answers the markup dump with `\name{<package>}` (the package
//! is taken from the working directory) and the Rd conversion by wrapping
//! the handed-over file in `<pre>`. A `FAIL` file in a help directory makes
//! the markup dump fail there.

#![cfg(unix)]

mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use common::{archive_pair, fake_r, write_file};
use rhelp_core::{HelpOptions, HelpPanel, HelpProvider, InterpreterEnv, NoopView};
use rhelp_runtime::{LocalHelpProvider, RInterpreter, build_provider};
use tempfile::TempDir;

const FAKE_R: &str = r#"
if [ "$1" = "CMD" ]; then
    echo "<pre>"
    cat "$4"
    echo "</pre>"
    exit 0
fi
case "$5" in
    *libPaths*) printf '%s' "$RHELP_TEST_LIBS"; exit 0 ;;
    *R.home*) printf '%s' "$RHELP_TEST_HOME"; exit 0 ;;
esac
if [ -f FAIL ]; then
    echo "archive is corrupt" >&2
    exit 1
fi
printf '\\name{%s}' "$(basename "$(dirname "$PWD")")"
"#;

fn interpreter(dir: &Path) -> Arc<RInterpreter> {
    let r = fake_r(dir, FAKE_R);
    Arc::new(RInterpreter::new(r.to_string_lossy()).with_command_timeout(Duration::from_secs(10)))
}

#[tokio::test]
async fn extraction_falls_through_to_next_library() {
    let bin = TempDir::new().unwrap();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();

    let broken = archive_pair(first.path(), "pkg");
    write_file(&broken.join("FAIL"), "");
    archive_pair(second.path(), "pkg");

    let env = InterpreterEnv::new(
        None,
        vec![first.path().to_path_buf(), second.path().to_path_buf()],
    )
    .unwrap();
    let provider = LocalHelpProvider::new_in(env, interpreter(bin.path()), temp.path())
        .await
        .unwrap();

    let file = provider
        .get_help_file_for_function("pkg", "topic")
        .await
        .unwrap()
        .unwrap();

    assert!(!file.is_real_file);
    assert!(file.html.contains("\\name{pkg}"));
    assert_eq!(file.file_location.unwrap().trunc_path, second.path());
    assert_eq!(fs::read_dir(provider.temp_dir()).unwrap().count(), 0);

    provider.dispose().await;
}

#[tokio::test]
async fn every_library_failing_is_not_found() {
    let bin = TempDir::new().unwrap();
    let lib = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    let help_dir = archive_pair(lib.path(), "pkg");
    write_file(&help_dir.join("FAIL"), "");

    let env = InterpreterEnv::new(None, vec![lib.path().to_path_buf()]).unwrap();
    let provider = LocalHelpProvider::new_in(env, interpreter(bin.path()), temp.path())
        .await
        .unwrap();

    let result = provider.get_help_file_for_function("pkg", "topic").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn build_provider_discovers_libraries_from_interpreter() {
    let bin = TempDir::new().unwrap();
    let lib = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_file(&lib.path().join("utils/html/help.html"), "<h2>help</h2>");
    write_file(&home.path().join("doc/html/index.html"), "<h1>index</h1>");

    let r = fake_r(
        bin.path(),
        &format!(
            "RHELP_TEST_LIBS='{}'\nRHELP_TEST_HOME='{}'\n{FAKE_R}",
            lib.path().display(),
            home.path().display()
        ),
    );
    let options = HelpOptions::new().with_r_path(r.to_string_lossy());
    let provider = build_provider(&options).await.unwrap();

    let help = provider
        .get_help_file_for_function("utils", "help")
        .await
        .unwrap()
        .unwrap();
    assert!(help.is_real_file);

    let index = provider.get_help_file_for_doc("index.html").await.unwrap().unwrap();
    assert_eq!(index.html, "<h1>index</h1>");

    provider.dispose().await;
}

#[tokio::test]
async fn panel_navigates_extracted_and_real_pages() {
    let bin = TempDir::new().unwrap();
    let lib = TempDir::new().unwrap();
    let temp = TempDir::new().unwrap();
    write_file(
        &lib.path().join("stats/html/lm.html"),
        r#"<a href="../../base/html/mean.html">mean</a>"#,
    );
    archive_pair(lib.path(), "base");

    let env = InterpreterEnv::new(None, vec![lib.path().to_path_buf()]).unwrap();
    let provider = LocalHelpProvider::new_in(env, interpreter(bin.path()), temp.path())
        .await
        .unwrap();
    let mut panel = HelpPanel::new(Arc::new(provider), Arc::new(NoopView));

    assert!(panel.show_help("lm", Some("stats")).await.unwrap());
    let link = panel.current_links().remove(0);
    assert!(panel.show_help_for_path(&link).await.unwrap());

    let current = panel.current().unwrap();
    assert_eq!(current.pkg_name, "base");
    assert_eq!(current.fnc_name, "mean");
    assert!(!current.help_file.is_real_file);

    assert!(panel.go_back());
    assert_eq!(panel.current().unwrap().fnc_name, "lm");
    panel.dispose().await;
}
