//! Extraction of single topics from compressed help archives.
//!
//! Two interpreter calls: dump the topic's Rd markup, then convert it to
//! HTML. The markup is handed over through a temporary file in the
//! provider's temp directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rhelp_core::InterpreterPort;
use tracing::{debug, warn};
use uuid::Uuid;

/// Turns `<pkg>.rdb`/`<pkg>.rdx` topics into HTML.
pub struct ArchiveExtractor {
    interpreter: Arc<dyn InterpreterPort>,
    temp_dir: PathBuf,
}

impl ArchiveExtractor {
    pub fn new(interpreter: Arc<dyn InterpreterPort>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Extract `topic` from the archive pair in `help_dir`.
    ///
    /// Returns `None` when either interpreter step fails or produces
    /// nothing. The temporary Rd file never outlives the call.
    pub async fn extract(&self, help_dir: &Path, package: &str, topic: &str) -> Option<String> {
        let markup = match self.interpreter.topic_markup(help_dir, package, topic).await {
            Ok(markup) if !markup.trim().is_empty() => markup,
            Ok(_) => {
                debug!(package, topic, "Archive has no markup for topic");
                return None;
            }
            Err(e) => {
                warn!(package, topic, error = %e, "Failed to read topic from help archive");
                return None;
            }
        };

        let rd_file = self.temp_dir.join(rd_file_name(topic));
        if let Err(e) = tokio::fs::write(&rd_file, markup).await {
            warn!(path = %rd_file.display(), error = %e, "Failed to write Rd file");
            return None;
        }

        let html = self.interpreter.rd_to_html(help_dir, &rd_file).await;
        remove_temp_file(&rd_file).await;

        match html {
            Ok(html) if !html.trim().is_empty() => Some(html),
            Ok(_) => {
                debug!(package, topic, "Rd conversion produced no output");
                None
            }
            Err(e) => {
                warn!(package, topic, error = %e, "Failed to convert Rd to HTML");
                None
            }
        }
    }
}

/// Unique file name for a topic's markup; topic names may hold characters
/// that are not valid in file names (`[<-`, `%in%`).
fn rd_file_name(topic: &str) -> String {
    let stem: String = topic
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    format!("{stem}-{}.Rd", Uuid::new_v4().simple())
}

async fn remove_temp_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove temporary Rd file");
    }
}
